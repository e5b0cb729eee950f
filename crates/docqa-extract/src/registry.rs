//! Format-keyed dispatch between extraction backends

use crate::{ExtractError, NativeExtractor, RemoteExtractor};
use docqa_domain::traits::TextExtractor as TextExtractorTrait;
use docqa_domain::FileKind;

/// Dispatches extraction to the right backend for each file kind
///
/// Text-native formats decode in-process; everything else requires the
/// remote extraction service. A registry without a remote backend still
/// handles the native formats and fails cleanly for the rest.
pub struct ExtractorRegistry {
    native: NativeExtractor,
    remote: Option<RemoteExtractor>,
}

impl ExtractorRegistry {
    /// Registry with native decoding only
    pub fn native_only() -> Self {
        Self {
            native: NativeExtractor::new(),
            remote: None,
        }
    }

    /// Registry with native decoding plus a remote extraction service
    pub fn with_remote(remote: RemoteExtractor) -> Self {
        Self {
            native: NativeExtractor::new(),
            remote: Some(remote),
        }
    }

    /// Whether the registry can extract the given kind at all
    pub fn handles(&self, kind: FileKind) -> bool {
        kind.is_native_text() || self.remote.is_some()
    }
}

impl TextExtractorTrait for ExtractorRegistry {
    type Error = ExtractError;

    fn extract(&self, bytes: &[u8], kind: FileKind) -> Result<Vec<String>, Self::Error> {
        if kind.is_native_text() {
            return self.native.extract(bytes, kind);
        }
        match &self.remote {
            Some(remote) => remote.extract(bytes, kind),
            None => Err(ExtractError::Unsupported(format!(
                "{} (no remote extraction service configured)",
                kind
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_only_handles_text_kinds() {
        let registry = ExtractorRegistry::native_only();
        assert!(registry.handles(FileKind::Txt));
        assert!(registry.handles(FileKind::Markdown));
        assert!(!registry.handles(FileKind::Pdf));
    }

    #[test]
    fn test_native_only_rejects_office_formats() {
        let registry = ExtractorRegistry::native_only();
        let result = registry.extract(b"PK\x03\x04", FileKind::Docx);
        assert!(matches!(result, Err(ExtractError::Unsupported(_))));
    }

    #[test]
    fn test_native_dispatch() {
        let registry = ExtractorRegistry::native_only();
        let pages = registry.extract(b"plain text", FileKind::Txt).unwrap();
        assert_eq!(pages, vec!["plain text".to_string()]);
    }
}
