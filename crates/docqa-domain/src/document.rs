//! Document module - one uploaded source file and its extracted text

use std::fmt;

/// Unique identifier for a document based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability (a batch's ids sort in submission order)
/// - 128-bit uniqueness with no coordination between writers
/// - RFC 9562-standard format with broad ecosystem support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u128);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    ///
    /// # Examples
    ///
    /// ```
    /// use docqa_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a DocumentId from a raw u128 value
    ///
    /// Primarily for tests and log replay.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a DocumentId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use docqa_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// let parsed = DocumentId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid document id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Why a document failed to reach `Succeeded`
///
/// Recorded on the document so batch summaries can report the taxonomy of
/// failures, not just prose reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// File type not in the configured allowlist
    UnsupportedType,
    /// File exceeds the hard size cap
    TooLarge,
    /// File exceeds the confirmation threshold and was not confirmed
    OversizeUnconfirmed,
    /// The extraction collaborator failed or timed out
    Extraction,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::UnsupportedType => "unsupported type",
            FailureKind::TooLarge => "too large",
            FailureKind::OversizeUnconfirmed => "oversize unconfirmed",
            FailureKind::Extraction => "extraction failed",
        };
        write!(f, "{}", s)
    }
}

/// Extraction lifecycle state of a document
///
/// `Succeeded` and `Failed` are terminal: no further mutation occurs after
/// either is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// Accepted for ingestion, extraction not yet finished
    Pending,
    /// Extraction finished; per-page text is immutable from here on
    Succeeded,
    /// Extraction failed; the document holds no text
    Failed {
        /// Failure taxonomy kind
        kind: FailureKind,
        /// Human-readable reason
        reason: String,
    },
}

/// One uploaded source file
///
/// A document is created `Pending` when a file is accepted for ingestion and
/// is mutated only by the ingestion coordinator, via [`Document::complete`]
/// or [`Document::fail`]. Once a terminal status is reached the per-page text
/// sequence is immutable; both transition methods reject a second call.
///
/// Pages are private so nothing outside this module can mutate them after
/// `Succeeded`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    filename: String,
    status: ExtractionStatus,
    pages: Vec<String>,
    created_at: u64,
}

impl Document {
    /// Create a new pending document
    pub fn new(filename: impl Into<String>, created_at: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename: filename.into(),
            status: ExtractionStatus::Pending,
            pages: Vec::new(),
            created_at,
        }
    }

    /// Unique identifier
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Original filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Current extraction status
    pub fn status(&self) -> &ExtractionStatus {
        &self.status
    }

    /// Creation time (seconds since Unix epoch)
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Ordered per-page extracted text (empty until `Succeeded`)
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Number of extracted pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total character count across all pages (derived, never stored)
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.chars().count()).sum()
    }

    /// Whether the document has reached a terminal status
    pub fn is_terminal(&self) -> bool {
        !matches!(self.status, ExtractionStatus::Pending)
    }

    /// Whether extraction succeeded
    pub fn is_succeeded(&self) -> bool {
        matches!(self.status, ExtractionStatus::Succeeded)
    }

    /// Failure kind and reason, if the document failed
    pub fn failure(&self) -> Option<(FailureKind, &str)> {
        match &self.status {
            ExtractionStatus::Failed { kind, reason } => Some((*kind, reason)),
            _ => None,
        }
    }

    /// Mark extraction as succeeded with the extracted pages
    ///
    /// Fails if the document already reached a terminal status.
    pub fn complete(&mut self, pages: Vec<String>) -> Result<(), String> {
        if self.is_terminal() {
            return Err(format!(
                "document '{}' is already {:?}",
                self.filename, self.status
            ));
        }
        self.pages = pages;
        self.status = ExtractionStatus::Succeeded;
        Ok(())
    }

    /// Mark extraction as failed with a kind and reason
    ///
    /// Fails if the document already reached a terminal status.
    pub fn fail(&mut self, kind: FailureKind, reason: impl Into<String>) -> Result<(), String> {
        if self.is_terminal() {
            return Err(format!(
                "document '{}' is already {:?}",
                self.filename, self.status
            ));
        }
        self.status = ExtractionStatus::Failed {
            kind,
            reason: reason.into(),
        };
        Ok(())
    }
}
