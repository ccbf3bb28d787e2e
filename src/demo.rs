//! Console walkthrough of the PDF viewer in the document Q&A application.

use crate::config::DEFAULT_VECTOR_SIZE;
use crate::metadata::DocumentMetadata;
use std::io::{self, Write};
use time::macros::datetime;

const STEPS: &[(&str, &[&str])] = &[
    (
        "Upload",
        &[
            "Drop a PDF into the sidebar uploader.",
            "The original file is persisted under uploads/ so it can be displayed later.",
            "Each page is split into chunks and embedded before indexing.",
        ],
    ),
    (
        "Ask",
        &[
            "Type a question about the document in the chat box.",
            "The closest chunks are retrieved from the vector store by cosine similarity.",
            "The answer cites the pages it was built from, e.g. [Quarterly Report.pdf, p. 3].",
        ],
    ),
    (
        "View",
        &[
            "Click a citation to open the PDF viewer at the cited page.",
            "Use the page controls to move through the document or jump to any page.",
            "The viewer reads the persisted copy referenced by the chunk's file_path.",
        ],
    ),
];

/// Sample payload stored for page 3 of a 12-page report.
pub fn example_metadata() -> io::Result<DocumentMetadata> {
    DocumentMetadata::new(
        "Quarterly Report.pdf",
        3,
        12,
        "uploads/quarterly-report.pdf",
        482_113,
        datetime!(2024-05-02 09:30:00 UTC),
    )
    .map_err(io::Error::other)
}

/// Write the walkthrough to `out`.
pub fn render_walkthrough<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "=== PDF Viewer Walkthrough ===")?;
    writeln!(out)?;
    writeln!(
        out,
        "Answers in the document Q&A app link back to the exact PDF page they came from."
    )?;

    for (index, (title, lines)) in STEPS.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}. {title}", index + 1)?;
        for line in lines.iter() {
            writeln!(out, "   - {line}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Metadata stored with every chunk:")?;
    let payload = example_metadata()?
        .to_payload()
        .map_err(io::Error::other)?;
    let payload = serde_json::to_string_pretty(&payload)?;
    for line in payload.lines() {
        writeln!(out, "   {line}")?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Vectors are {DEFAULT_VECTOR_SIZE}-dimensional; the page and file_path fields drive the viewer."
    )?;
    writeln!(out, "=== End of walkthrough ===")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkthrough_is_non_empty_and_includes_payload() {
        let mut buffer = Vec::new();
        render_walkthrough(&mut buffer).expect("render");
        let text = String::from_utf8(buffer).expect("utf8");

        assert!(text.starts_with("=== PDF Viewer Walkthrough ==="));
        assert!(text.contains("3. View"));
        assert!(text.contains("\"file_path\": \"uploads/quarterly-report.pdf\""));
        assert!(text.contains("\"indexed_at\": \"2024-05-02T09:30:00Z\""));
        assert!(text.contains("1536-dimensional"));
        assert!(text.trim_end().ends_with("=== End of walkthrough ==="));
    }
}
