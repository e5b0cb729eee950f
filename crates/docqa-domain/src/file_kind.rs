//! Supported source-file formats

use std::fmt;

/// A supported document format, detected from the filename extension
///
/// The set mirrors the uploader allowlist of the original application:
/// office formats, plain-text formats, and the scanned/rich formats that go
/// through the remote extraction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Portable Document Format (`.pdf`)
    Pdf,
    /// Word documents (`.docx`, `.doc`)
    Docx,
    /// Presentations (`.pptx`, `.ppt`)
    Pptx,
    /// Spreadsheets (`.xlsx`, `.xls`)
    Xlsx,
    /// Plain text (`.txt`)
    Txt,
    /// Comma-separated values (`.csv`)
    Csv,
    /// Markdown (`.md`)
    Markdown,
    /// Rich Text Format (`.rtf`)
    Rtf,
    /// HTML pages (`.html`, `.htm`)
    Html,
    /// EPUB e-books (`.epub`)
    Epub,
}

impl FileKind {
    /// All supported kinds, in allowlist order
    pub fn all() -> &'static [FileKind] {
        &[
            FileKind::Pdf,
            FileKind::Docx,
            FileKind::Pptx,
            FileKind::Xlsx,
            FileKind::Txt,
            FileKind::Csv,
            FileKind::Markdown,
            FileKind::Rtf,
            FileKind::Html,
            FileKind::Epub,
        ]
    }

    /// Detect the kind from a filename extension (case-insensitive)
    ///
    /// Returns `None` for unknown or missing extensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use docqa_domain::FileKind;
    ///
    /// assert_eq!(FileKind::from_filename("Report.PDF"), Some(FileKind::Pdf));
    /// assert_eq!(FileKind::from_filename("notes"), None);
    /// ```
    pub fn from_filename(filename: &str) -> Option<FileKind> {
        let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" | "doc" => Some(FileKind::Docx),
            "pptx" | "ppt" => Some(FileKind::Pptx),
            "xlsx" | "xls" => Some(FileKind::Xlsx),
            "txt" => Some(FileKind::Txt),
            "csv" => Some(FileKind::Csv),
            "md" => Some(FileKind::Markdown),
            "rtf" => Some(FileKind::Rtf),
            "html" | "htm" => Some(FileKind::Html),
            "epub" => Some(FileKind::Epub),
            _ => None,
        }
    }

    /// Canonical extension for this kind
    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Pptx => "pptx",
            FileKind::Xlsx => "xlsx",
            FileKind::Txt => "txt",
            FileKind::Csv => "csv",
            FileKind::Markdown => "md",
            FileKind::Rtf => "rtf",
            FileKind::Html => "html",
            FileKind::Epub => "epub",
        }
    }

    /// Whether this kind decodes natively as text (no remote extraction)
    pub fn is_native_text(&self) -> bool {
        matches!(
            self,
            FileKind::Txt | FileKind::Csv | FileKind::Markdown | FileKind::Html
        )
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filename_case_insensitive() {
        assert_eq!(FileKind::from_filename("a.PDF"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_filename("b.Docx"), Some(FileKind::Docx));
        assert_eq!(FileKind::from_filename("c.HTM"), Some(FileKind::Html));
    }

    #[test]
    fn test_from_filename_legacy_extensions() {
        assert_eq!(FileKind::from_filename("old.doc"), Some(FileKind::Docx));
        assert_eq!(FileKind::from_filename("deck.ppt"), Some(FileKind::Pptx));
        assert_eq!(FileKind::from_filename("sheet.xls"), Some(FileKind::Xlsx));
    }

    #[test]
    fn test_from_filename_unknown() {
        assert_eq!(FileKind::from_filename("archive.zip"), None);
        assert_eq!(FileKind::from_filename("no_extension"), None);
        assert_eq!(FileKind::from_filename(""), None);
    }

    #[test]
    fn test_native_text_kinds() {
        assert!(FileKind::Txt.is_native_text());
        assert!(FileKind::Markdown.is_native_text());
        assert!(!FileKind::Pdf.is_native_text());
        assert!(!FileKind::Docx.is_native_text());
    }
}
