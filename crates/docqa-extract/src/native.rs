//! In-process decoding for plain-text formats
//!
//! Text-native formats (txt, csv, markdown, html) never leave the process:
//! the bytes are decoded as UTF-8 (lossily, matching the original uploader's
//! behavior) and split into pages on form-feed characters. HTML additionally
//! has its markup stripped.

use crate::ExtractError;
use docqa_domain::traits::TextExtractor as TextExtractorTrait;
use docqa_domain::FileKind;

/// Page separator inside plain-text files
const FORM_FEED: char = '\u{0c}';

/// Extractor for formats that decode natively as text
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeExtractor;

impl NativeExtractor {
    /// Create a new native extractor
    pub fn new() -> Self {
        Self
    }

    fn decode(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    /// Split decoded text into pages on form feeds
    ///
    /// Files without form feeds become a single page. Empty pages are kept:
    /// page numbering must stay aligned with the source.
    fn paginate(text: &str) -> Vec<String> {
        if text.is_empty() {
            return vec![String::new()];
        }
        text.split(FORM_FEED).map(|p| p.to_string()).collect()
    }

    /// Strip HTML markup, keeping text content
    ///
    /// Deliberately minimal: tags are dropped, a handful of common entities
    /// are decoded, script/style bodies are skipped.
    fn strip_html(html: &str) -> String {
        let mut out = String::with_capacity(html.len() / 2);
        let mut chars = html.char_indices().peekable();
        let mut skip_until: Option<&str> = None;
        let lower = html.to_ascii_lowercase();

        while let Some((i, c)) = chars.next() {
            if let Some(end_tag) = skip_until {
                if lower[i..].starts_with(end_tag) {
                    for _ in 0..end_tag.len() - 1 {
                        chars.next();
                    }
                    skip_until = None;
                }
                continue;
            }
            if c == '<' {
                if lower[i..].starts_with("<script") {
                    skip_until = Some("</script>");
                } else if lower[i..].starts_with("<style") {
                    skip_until = Some("</style>");
                }
                // Consume through the closing '>'
                for (_, t) in chars.by_ref() {
                    if t == '>' {
                        break;
                    }
                }
                out.push(' ');
            } else if c == '&' {
                let rest = &html[i..];
                let (entity, replacement) = if rest.starts_with("&amp;") {
                    ("&amp;", '&')
                } else if rest.starts_with("&lt;") {
                    ("&lt;", '<')
                } else if rest.starts_with("&gt;") {
                    ("&gt;", '>')
                } else if rest.starts_with("&nbsp;") {
                    ("&nbsp;", ' ')
                } else if rest.starts_with("&quot;") {
                    ("&quot;", '"')
                } else {
                    ("&", '&')
                };
                out.push(replacement);
                for _ in 0..entity.len() - 1 {
                    chars.next();
                }
            } else {
                out.push(c);
            }
        }

        // Collapse runs of whitespace introduced by dropped tags
        let mut cleaned = String::with_capacity(out.len());
        let mut last_blank = false;
        for line in out.lines() {
            let trimmed = line.split_whitespace().collect::<Vec<_>>().join(" ");
            if trimmed.is_empty() {
                if !last_blank && !cleaned.is_empty() {
                    cleaned.push('\n');
                }
                last_blank = true;
            } else {
                cleaned.push_str(&trimmed);
                cleaned.push('\n');
                last_blank = false;
            }
        }
        cleaned.trim_end().to_string()
    }
}

impl TextExtractorTrait for NativeExtractor {
    type Error = ExtractError;

    fn extract(&self, bytes: &[u8], kind: FileKind) -> Result<Vec<String>, Self::Error> {
        match kind {
            FileKind::Txt | FileKind::Csv | FileKind::Markdown => {
                Ok(Self::paginate(&Self::decode(bytes)))
            }
            FileKind::Html => {
                let text = Self::strip_html(&Self::decode(bytes));
                Ok(Self::paginate(&text))
            }
            other => Err(ExtractError::Unsupported(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_single_page() {
        let pages = NativeExtractor::new()
            .extract(b"hello world", FileKind::Txt)
            .unwrap();
        assert_eq!(pages, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_txt_form_feed_pagination() {
        let pages = NativeExtractor::new()
            .extract(b"page one\x0cpage two\x0cpage three", FileKind::Txt)
            .unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1], "page two");
    }

    #[test]
    fn test_invalid_utf8_is_lossy_not_fatal() {
        let bytes = [b'h', b'i', 0xFF, 0xFE, b'!'];
        let pages = NativeExtractor::new().extract(&bytes, FileKind::Txt).unwrap();
        assert!(pages[0].starts_with("hi"));
        assert!(pages[0].ends_with('!'));
    }

    #[test]
    fn test_html_tags_stripped() {
        let html = b"<html><body><h1>Title</h1><p>Body &amp; more</p></body></html>";
        let pages = NativeExtractor::new().extract(html, FileKind::Html).unwrap();
        let text = &pages[0];
        assert!(text.contains("Title"));
        assert!(text.contains("Body & more"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_html_script_bodies_skipped() {
        let html = b"<p>visible</p><script>var hidden = 1;</script><p>also visible</p>";
        let pages = NativeExtractor::new().extract(html, FileKind::Html).unwrap();
        let text = &pages[0];
        assert!(text.contains("visible"));
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn test_office_formats_not_native() {
        let result = NativeExtractor::new().extract(b"%PDF-1.4", FileKind::Pdf);
        assert!(matches!(result, Err(ExtractError::Unsupported(_))));
    }
}
