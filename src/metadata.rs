//! Per-page metadata attached to indexed document chunks.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Errors raised while building or serializing a [`DocumentMetadata`].
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Pages are numbered from one.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// Page lies beyond the end of the document.
    #[error("page {page} is beyond the document's {total_pages} pages")]
    PageOutOfRange {
        /// Requested page.
        page: u32,
        /// Page count of the document.
        total_pages: u32,
    },
    /// Indexing timestamp could not be rendered as RFC 3339.
    #[error("failed to format indexing timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    /// Record could not be converted to a JSON payload.
    #[error("failed to serialize metadata payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Payload stored next to every vector derived from a document page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Original filename as uploaded.
    pub source: String,
    /// 1-based page the chunk was taken from.
    pub page: u32,
    /// Page count of the whole document.
    pub total_pages: u32,
    /// Location of the persisted copy used by the PDF viewer.
    pub file_path: String,
    /// Lowercased file extension, e.g. `pdf`.
    pub file_type: String,
    /// RFC 3339 timestamp of indexing.
    pub indexed_at: String,
    /// Size of the source file in bytes.
    pub file_size: u64,
}

impl DocumentMetadata {
    /// Build a record for `page` of `source`, stamped with `indexed_at`.
    pub fn new(
        source: impl Into<String>,
        page: u32,
        total_pages: u32,
        file_path: impl Into<String>,
        file_size: u64,
        indexed_at: OffsetDateTime,
    ) -> Result<Self, MetadataError> {
        if page == 0 {
            return Err(MetadataError::ZeroPage);
        }
        if page > total_pages {
            return Err(MetadataError::PageOutOfRange { page, total_pages });
        }
        let source = source.into();
        Ok(Self {
            file_type: file_type_of(&source),
            source,
            page,
            total_pages,
            file_path: file_path.into(),
            indexed_at: indexed_at.format(&Rfc3339)?,
            file_size,
        })
    }

    /// JSON payload as stored in Qdrant.
    pub fn to_payload(&self) -> Result<serde_json::Value, MetadataError> {
        Ok(serde_json::to_value(self)?)
    }
}

fn file_type_of(source: &str) -> String {
    Path::new(source)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn derives_file_type_and_timestamp() {
        let meta = DocumentMetadata::new(
            "Quarterly Report.PDF",
            3,
            12,
            "uploads/quarterly-report.pdf",
            482_113,
            datetime!(2024-05-02 09:30:00 UTC),
        )
        .expect("metadata");

        assert_eq!(meta.file_type, "pdf");
        assert_eq!(meta.indexed_at, "2024-05-02T09:30:00Z");
        assert!(OffsetDateTime::parse(&meta.indexed_at, &Rfc3339).is_ok());

        let payload = meta.to_payload().expect("payload");
        assert_eq!(payload["source"], "Quarterly Report.PDF");
        assert_eq!(payload["page"], 3);
        assert_eq!(payload["total_pages"], 12);
        assert_eq!(payload["file_size"], 482_113);
    }

    #[test]
    fn rejects_invalid_pages() {
        let at = datetime!(2024-01-01 00:00:00 UTC);
        assert!(matches!(
            DocumentMetadata::new("a.pdf", 0, 1, "a.pdf", 1, at),
            Err(MetadataError::ZeroPage)
        ));
        assert!(matches!(
            DocumentMetadata::new("a.pdf", 5, 4, "a.pdf", 1, at),
            Err(MetadataError::PageOutOfRange {
                page: 5,
                total_pages: 4
            })
        ));
    }

    #[test]
    fn missing_extension_is_unknown() {
        let meta = DocumentMetadata::new("README", 1, 1, "README", 10, OffsetDateTime::UNIX_EPOCH)
            .expect("metadata");
        assert_eq!(meta.file_type, "unknown");
    }

    #[test]
    fn unrepresentable_timestamp_is_an_error() {
        let before_year_zero = datetime!(-0001-06-01 00:00:00 UTC);
        let err = DocumentMetadata::new("a.pdf", 1, 1, "a.pdf", 1, before_year_zero).unwrap_err();
        assert!(matches!(err, MetadataError::Timestamp(_)));
    }
}
