//! Shared types used by the Qdrant client and the commands built on it.

use crate::config::{Config, DEFAULT_VECTOR_SIZE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors returned while interacting with Qdrant.
#[derive(Debug, Error)]
pub enum QdrantError {
    /// Base URL failed to parse or normalize.
    #[error("Invalid Qdrant URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Qdrant responded with an unexpected status code.
    #[error("Unexpected Qdrant response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from Qdrant.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
    /// Response body did not match the expected shape.
    #[error("Malformed Qdrant response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Similarity function used to rank nearest neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Distance {
    /// Cosine similarity.
    #[default]
    Cosine,
    /// Euclidean distance.
    Euclid,
    /// Dot product.
    Dot,
    /// Manhattan distance.
    Manhattan,
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cosine => "Cosine",
            Self::Euclid => "Euclid",
            Self::Dot => "Dot",
            Self::Manhattan => "Manhattan",
        };
        f.write_str(name)
    }
}

/// Vector configuration of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorParams {
    /// Dimensionality every point must match.
    pub size: u64,
    /// Distance metric.
    pub distance: Distance,
}

/// Desired shape of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSpec {
    /// Collection name.
    pub name: String,
    /// Vector configuration applied on creation.
    pub vectors: VectorParams,
}

impl CollectionSpec {
    /// Cosine collection with the given name and vector size.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            vectors: VectorParams {
                size,
                distance: Distance::Cosine,
            },
        }
    }

    /// Collection described by the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.qdrant_collection_name.clone(), config.vector_size)
    }

    /// Request body for `PUT /collections/{name}`.
    pub(crate) fn create_body(&self) -> serde_json::Value {
        serde_json::json!({ "vectors": self.vectors })
    }
}

impl Default for CollectionSpec {
    fn default() -> Self {
        Self::new("business_documents", DEFAULT_VECTOR_SIZE)
    }
}

/// Optimization state reported by Qdrant for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    /// All segments optimized and ready.
    Green,
    /// Optimization in progress.
    Yellow,
    /// Optimization pending.
    Grey,
    /// An operation failed.
    Red,
    /// Status value not known to this client.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Grey => "grey",
            Self::Red => "red",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Single unnamed vector or a map of named vectors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VectorsConfig {
    /// One anonymous vector per point.
    Single(VectorParams),
    /// Named vectors.
    Named(BTreeMap<String, VectorParams>),
}

impl VectorsConfig {
    /// Parameters of the anonymous vector, if the collection uses one.
    pub fn single(&self) -> Option<&VectorParams> {
        match self {
            Self::Single(params) => Some(params),
            Self::Named(_) => None,
        }
    }
}

/// Metadata returned by `GET /collections/{name}`.
///
/// Counts are optional because recent Qdrant releases omit `vectors_count`.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionInfo {
    /// Optimization status.
    pub status: CollectionStatus,
    /// Number of stored points.
    #[serde(default)]
    pub points_count: Option<u64>,
    /// Number of stored vectors.
    #[serde(default)]
    pub vectors_count: Option<u64>,
    /// Number of vectors covered by the HNSW index.
    #[serde(default)]
    pub indexed_vectors_count: Option<u64>,
    /// Number of storage segments.
    #[serde(default)]
    pub segments_count: Option<u64>,
    /// Collection configuration.
    pub config: CollectionConfig,
}

/// Configuration section of [`CollectionInfo`].
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    /// Collection parameters.
    pub params: CollectionParams,
}

/// Parameters section of [`CollectionConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionParams {
    /// Vector configuration.
    pub vectors: VectorsConfig,
}

impl CollectionInfo {
    /// Parameters of the anonymous vector, if any.
    pub fn vector_params(&self) -> Option<&VectorParams> {
        self.config.params.vectors.single()
    }
}

/// Status and counters of a collection, without its configuration.
///
/// Decoded leniently so that a status check does not depend on the config schema.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSummary {
    /// Optimization status.
    pub status: CollectionStatus,
    /// Number of stored points.
    #[serde(default)]
    pub points_count: Option<u64>,
    /// Number of stored vectors.
    #[serde(default)]
    pub vectors_count: Option<u64>,
}

/// Raw outcome of an unauthenticated probe request.
#[derive(Debug, Clone)]
pub struct Probe {
    /// HTTP status returned by the endpoint.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

#[derive(Deserialize)]
pub(crate) struct ListCollectionsResponse {
    pub(crate) result: ListCollectionsResult,
}

#[derive(Deserialize)]
pub(crate) struct ListCollectionsResult {
    pub(crate) collections: Vec<CollectionDescription>,
}

#[derive(Deserialize)]
pub(crate) struct CollectionDescription {
    pub(crate) name: String,
}

#[derive(Deserialize)]
pub(crate) struct GetCollectionResponse {
    pub(crate) result: CollectionInfo,
}

/// Decode the body of `GET /collections/{name}`.
pub fn parse_collection_info(body: &str) -> Result<CollectionInfo, QdrantError> {
    let response: GetCollectionResponse = serde_json::from_str(body)?;
    Ok(response.result)
}

#[derive(Deserialize)]
struct CollectionSummaryResponse {
    result: CollectionSummary,
}

/// Decode only `status`, `points_count` and `vectors_count` from `GET /collections/{name}`.
pub fn parse_collection_summary(body: &str) -> Result<CollectionSummary, QdrantError> {
    let response: CollectionSummaryResponse = serde_json::from_str(body)?;
    Ok(response.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_body_uses_rest_spelling() {
        let spec = CollectionSpec::new("docs", 1536);
        assert_eq!(
            spec.create_body(),
            json!({ "vectors": { "size": 1536, "distance": "Cosine" } })
        );
    }

    #[test]
    fn parses_collection_info_with_single_vector() {
        let body = json!({
            "status": "ok",
            "time": 0.001,
            "result": {
                "status": "green",
                "optimizer_status": "ok",
                "vectors_count": 0,
                "indexed_vectors_count": 0,
                "points_count": 0,
                "segments_count": 8,
                "config": {
                    "params": {
                        "vectors": { "size": 1536, "distance": "Cosine" },
                        "shard_number": 1
                    },
                    "hnsw_config": { "m": 16 }
                },
                "payload_schema": {}
            }
        })
        .to_string();

        let info = parse_collection_info(&body).expect("info");
        assert_eq!(info.status, CollectionStatus::Green);
        assert_eq!(info.points_count, Some(0));
        assert_eq!(info.vectors_count, Some(0));
        assert_eq!(
            info.vector_params(),
            Some(&VectorParams {
                size: 1536,
                distance: Distance::Cosine
            })
        );
    }

    #[test]
    fn tolerates_named_vectors_and_missing_counts() {
        let body = json!({
            "result": {
                "status": "yellow",
                "points_count": 12,
                "config": {
                    "params": {
                        "vectors": {
                            "text": { "size": 384, "distance": "Dot" }
                        }
                    }
                }
            }
        })
        .to_string();

        let info = parse_collection_info(&body).expect("info");
        assert_eq!(info.status, CollectionStatus::Yellow);
        assert_eq!(info.vectors_count, None);
        assert!(info.vector_params().is_none());
        match &info.config.params.vectors {
            VectorsConfig::Named(map) => assert_eq!(map["text"].size, 384),
            other => panic!("unexpected vectors config: {other:?}"),
        }
    }

    #[test]
    fn unknown_status_does_not_fail_decoding() {
        let body = json!({
            "result": {
                "status": "purple",
                "config": { "params": { "vectors": { "size": 4, "distance": "Euclid" } } }
            }
        })
        .to_string();
        let info = parse_collection_info(&body).expect("info");
        assert_eq!(info.status, CollectionStatus::Unknown);
    }

    #[test]
    fn summary_decodes_without_config_section() {
        let body = r#"{"result":{"status":"green","points_count":7,"vectors_count":7}}"#;
        let summary = parse_collection_summary(body).expect("summary");
        assert_eq!(summary.status, CollectionStatus::Green);
        assert_eq!(summary.points_count, Some(7));
        assert_eq!(summary.vectors_count, Some(7));

        assert!(parse_collection_info(body).is_err());
    }
}
