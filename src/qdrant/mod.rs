//! Qdrant vector store integration.

pub mod admin;
pub mod client;
pub mod types;

pub use admin::CollectionAdmin;
pub use client::QdrantService;
pub use types::{
    CollectionInfo, CollectionSpec, CollectionStatus, CollectionSummary, Distance, Probe,
    QdrantError, VectorParams, VectorsConfig, parse_collection_info, parse_collection_summary,
};
