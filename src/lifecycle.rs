//! Collection recreation.
//!
//! Resets a collection to an empty state with a known vector configuration: check whether
//! it exists, drop it if so, create it again and read it back. The existence check is best
//! effort; its failures are reported and the run carries on to creation. Creation and
//! read-back failures abort the run.

use crate::qdrant::{CollectionAdmin, CollectionInfo, CollectionSpec, QdrantError, VectorParams};
use crate::report::{Reporter, format_count};
use std::io::Write;
use thiserror::Error;

/// Failures that abort a recreation run.
#[derive(Debug, Error)]
pub enum RecreateError {
    /// Qdrant rejected or never answered the create request.
    #[error("Failed to create collection '{name}': {source}")]
    Create {
        /// Collection being created.
        name: String,
        /// Underlying client error.
        #[source]
        source: QdrantError,
    },
    /// The collection could not be read back after creation.
    #[error("Failed to read back collection '{name}': {source}")]
    ReadBack {
        /// Collection being verified.
        name: String,
        /// Underlying client error.
        #[source]
        source: QdrantError,
    },
    /// The collection exists but its vector configuration differs from the request.
    #[error("Collection '{name}' reports vectors {actual}, expected {expected}")]
    ConfigMismatch {
        /// Collection being verified.
        name: String,
        /// Requested vector configuration.
        expected: String,
        /// Vector configuration reported by Qdrant.
        actual: String,
    },
}

/// What a successful recreation run did.
#[derive(Debug, Clone)]
pub struct RecreateOutcome {
    /// Whether the collection existed beforehand; `None` when the check failed.
    pub existed: Option<bool>,
    /// Whether an existing collection was dropped.
    pub deleted: bool,
    /// Collection metadata read back after creation.
    pub info: CollectionInfo,
}

/// Drop and recreate `spec.name` with the vector configuration in `spec`.
pub async fn recreate_collection<A, W>(
    admin: &A,
    spec: &CollectionSpec,
    reporter: &mut Reporter<W>,
) -> Result<RecreateOutcome, RecreateError>
where
    A: CollectionAdmin + ?Sized,
    W: Write,
{
    let name = spec.name.as_str();

    reporter.info(format_args!("Checking for existing collection '{name}'"));
    let existed = match admin.list_collections().await {
        Ok(collections) => Some(collections.iter().any(|existing| existing == name)),
        Err(err) => {
            tracing::warn!(collection = name, error = %err, "Existence check failed; continuing");
            reporter.error(format_args!("Could not list collections: {err}"));
            None
        }
    };

    let mut deleted = false;
    match existed {
        Some(true) => {
            reporter.info(format_args!("Deleting existing collection '{name}'"));
            match admin.delete_collection(name).await {
                Ok(()) => {
                    deleted = true;
                    reporter.ok(format_args!("Deleted collection '{name}'"));
                }
                Err(err) => {
                    tracing::warn!(collection = name, error = %err, "Delete failed; continuing");
                    reporter.error(format_args!("Could not delete collection '{name}': {err}"));
                }
            }
        }
        Some(false) => reporter.info(format_args!("Collection '{name}' does not exist yet")),
        None => {}
    }

    reporter.info(format_args!(
        "Creating collection '{name}' ({})",
        describe(&spec.vectors)
    ));
    if let Err(source) = admin.create_collection(spec).await {
        tracing::error!(collection = name, error = %source, "Collection creation failed");
        reporter.error(format_args!("Failed to create collection '{name}': {source}"));
        return Err(RecreateError::Create {
            name: name.to_string(),
            source,
        });
    }
    reporter.ok(format_args!("Created collection '{name}'"));

    let info = match admin.get_collection(name).await {
        Ok(info) => info,
        Err(source) => {
            reporter.error(format_args!("Failed to read back collection '{name}': {source}"));
            return Err(RecreateError::ReadBack {
                name: name.to_string(),
                source,
            });
        }
    };
    print_collection_info(reporter, name, &info);

    let actual = info.vector_params().copied();
    if actual != Some(spec.vectors) {
        let error = RecreateError::ConfigMismatch {
            name: name.to_string(),
            expected: describe(&spec.vectors),
            actual: actual
                .as_ref()
                .map(describe)
                .unwrap_or_else(|| "named vectors".to_string()),
        };
        reporter.error(&error);
        return Err(error);
    }

    tracing::info!(
        collection = name,
        deleted,
        vector_size = spec.vectors.size,
        "Collection recreated"
    );
    Ok(RecreateOutcome {
        existed,
        deleted,
        info,
    })
}

/// Print the fields of a collection an operator cares about after a reset.
pub fn print_collection_info<W: Write>(reporter: &mut Reporter<W>, name: &str, info: &CollectionInfo) {
    reporter.line(format_args!("Collection '{name}':"));
    reporter.line(format_args!("  status:        {}", info.status));
    reporter.line(format_args!("  points_count:  {}", format_count(info.points_count)));
    reporter.line(format_args!("  vectors_count: {}", format_count(info.vectors_count)));
    match info.vector_params() {
        Some(params) => {
            reporter.line(format_args!("  vector size:   {}", params.size));
            reporter.line(format_args!("  distance:      {}", params.distance));
        }
        None => reporter.line("  vectors:       named"),
    }
}

fn describe(params: &VectorParams) -> String {
    format!("size={} distance={}", params.size, params.distance)
}
