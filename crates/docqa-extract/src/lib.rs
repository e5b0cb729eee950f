//! docqa Extraction Layer
//!
//! Implementations of the `TextExtractor` trait from `docqa-domain`.
//! Extraction itself (OCR, office-format parsing) is delegated: plain-text
//! formats decode natively in-process, everything else goes to a remote
//! extraction service over HTTP.
//!
//! # Extractors
//!
//! - `NativeExtractor`: in-process decoding for txt/csv/markdown/html
//! - `RemoteExtractor`: HTTP client for the extraction/OCR service
//! - `ExtractorRegistry`: dispatches by `FileKind`
//! - `MockExtractor`: deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use docqa_extract::MockExtractor;
//! use docqa_domain::{FileKind, traits::TextExtractor};
//!
//! let extractor = MockExtractor::new(vec!["page".to_string()]);
//! let pages = extractor.extract(b"anything", FileKind::Pdf).unwrap();
//! assert_eq!(pages, vec!["page".to_string()]);
//! ```

#![warn(missing_docs)]

pub mod native;
pub mod registry;
pub mod remote;

mod error;

use docqa_domain::traits::TextExtractor as TextExtractorTrait;
use docqa_domain::FileKind;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub use error::ExtractError;
pub use native::NativeExtractor;
pub use registry::ExtractorRegistry;
pub use remote::RemoteExtractor;

/// Mock extractor for deterministic testing
///
/// Returns pre-configured page sequences without touching any backend.
/// Responses are keyed by the file bytes interpreted as UTF-8, which lets
/// tests drive distinct outcomes per submitted file.
///
/// # Examples
///
/// ```
/// use docqa_extract::MockExtractor;
/// use docqa_domain::{FileKind, traits::TextExtractor};
///
/// let mut extractor = MockExtractor::new(vec!["default page".to_string()]);
/// extractor.add_pages("file-a", vec!["a1".into(), "a2".into()]);
/// extractor.add_error("broken");
///
/// assert_eq!(extractor.extract(b"file-a", FileKind::Txt).unwrap().len(), 2);
/// assert!(extractor.extract(b"broken", FileKind::Txt).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockExtractor {
    default_pages: Vec<String>,
    responses: Arc<Mutex<HashMap<String, Vec<String>>>>,
    errors: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockExtractor {
    /// Create a mock that returns the given pages for every file
    pub fn new(default_pages: Vec<String>) -> Self {
        Self {
            default_pages,
            responses: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Configure specific pages for a file-content key
    pub fn add_pages(&mut self, content: impl Into<String>, pages: Vec<String>) {
        self.responses.lock().unwrap().insert(content.into(), pages);
    }

    /// Configure an extraction failure for a file-content key
    pub fn add_error(&mut self, content: impl Into<String>) {
        self.errors.lock().unwrap().push(content.into());
    }

    /// Number of times `extract` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new(vec!["mock page".to_string()])
    }
}

impl TextExtractorTrait for MockExtractor {
    type Error = ExtractError;

    fn extract(&self, bytes: &[u8], _kind: FileKind) -> Result<Vec<String>, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let key = String::from_utf8_lossy(bytes).to_string();
        if self.errors.lock().unwrap().iter().any(|e| *e == key) {
            return Err(ExtractError::Failed("mock extraction failure".to_string()));
        }
        if let Some(pages) = self.responses.lock().unwrap().get(&key) {
            return Ok(pages.clone());
        }
        Ok(self.default_pages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_default_pages() {
        let extractor = MockExtractor::new(vec!["p1".into(), "p2".into()]);
        let pages = extractor.extract(b"whatever", FileKind::Pdf).unwrap();
        assert_eq!(pages, vec!["p1".to_string(), "p2".to_string()]);
    }

    #[test]
    fn test_mock_keyed_responses() {
        let mut extractor = MockExtractor::default();
        extractor.add_pages("a", vec!["alpha".into()]);
        extractor.add_pages("b", vec!["beta".into()]);

        assert_eq!(extractor.extract(b"a", FileKind::Txt).unwrap(), vec!["alpha"]);
        assert_eq!(extractor.extract(b"b", FileKind::Txt).unwrap(), vec!["beta"]);
        assert_eq!(
            extractor.extract(b"other", FileKind::Txt).unwrap(),
            vec!["mock page"]
        );
    }

    #[test]
    fn test_mock_error_injection() {
        let mut extractor = MockExtractor::default();
        extractor.add_error("corrupt");

        let result = extractor.extract(b"corrupt", FileKind::Pdf);
        assert!(matches!(result, Err(ExtractError::Failed(_))));
    }

    #[test]
    fn test_mock_call_count_shared_across_clones() {
        let extractor = MockExtractor::default();
        let clone = extractor.clone();

        extractor.extract(b"x", FileKind::Txt).unwrap();
        clone.extract(b"y", FileKind::Txt).unwrap();

        assert_eq!(extractor.call_count(), 2);
        assert_eq!(clone.call_count(), 2);
    }
}
