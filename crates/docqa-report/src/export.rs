//! Document export rendering
//!
//! Renders one succeeded document's extracted text as plain text, JSON, or
//! a standalone HTML page. Pages are joined with blank lines, matching the
//! extraction joins used elsewhere in the pipeline.

use crate::ReportError;
use docqa_domain::Document;
use serde_json::json;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain text
    Txt,
    /// JSON object with filename, timestamp and character count
    Json,
    /// Standalone HTML page
    Html,
}

impl ExportFormat {
    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    /// Parse a format name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(ExportFormat::Txt),
            "json" => Some(ExportFormat::Json),
            "html" => Some(ExportFormat::Html),
            _ => None,
        }
    }
}

/// Render a succeeded document in the given format
///
/// `extracted_at` is the export timestamp in seconds since the Unix epoch.
pub fn render(
    document: &Document,
    format: ExportFormat,
    extracted_at: u64,
) -> Result<String, ReportError> {
    if !document.is_succeeded() {
        return Err(ReportError::NotExtracted(document.filename().to_string()));
    }

    let text = document.pages().join("\n\n");
    match format {
        ExportFormat::Txt => Ok(text),
        ExportFormat::Json => {
            let value = json!({
                "filename": document.filename(),
                "extracted_at": extracted_at,
                "text": text,
                "character_count": text.chars().count(),
            });
            serde_json::to_string_pretty(&value)
                .map_err(|e| ReportError::NotExtracted(e.to_string()))
        }
        ExportFormat::Html => Ok(render_html(document.filename(), &text)),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_html(filename: &str, text: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }}
        h1 {{ color: #333; }}
        pre {{ white-space: pre-wrap; word-wrap: break-word; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <pre>{body}</pre>
</body>
</html>"#,
        title = escape_html(filename),
        body = escape_html(text),
    )
}
