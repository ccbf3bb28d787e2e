//! Collection administration seam.

use crate::qdrant::types::{CollectionInfo, CollectionSpec, QdrantError};
use async_trait::async_trait;

/// Operations needed to manage the lifecycle of a collection.
///
/// Implemented by [`crate::qdrant::QdrantService`] over HTTP; tests substitute an in-memory
/// store.
#[async_trait]
pub trait CollectionAdmin: Send + Sync {
    /// Names of every collection on the server.
    async fn list_collections(&self) -> Result<Vec<String>, QdrantError>;

    /// Drop a collection and all of its points.
    async fn delete_collection(&self, name: &str) -> Result<(), QdrantError>;

    /// Create an empty collection with the given vector configuration.
    async fn create_collection(&self, spec: &CollectionSpec) -> Result<(), QdrantError>;

    /// Read back status, counts and configuration of a collection.
    async fn get_collection(&self, name: &str) -> Result<CollectionInfo, QdrantError>;
}
