//! Output formatting for the CLI.

use colored::Colorize;
use docqa_domain::QueryResult;
use docqa_report::BatchSummary;

/// Characters shown in a document preview.
pub const PREVIEW_CHARS: usize = 500;

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a batch summary, one line of counts plus failure details.
    pub fn summary(&self, summary: &BatchSummary) -> String {
        let mut lines = vec![if summary.failed == 0 {
            self.green(&summary.line())
        } else {
            self.yellow(&summary.line())
        }];
        for failure in &summary.failures {
            lines.push(self.red(&format!(
                "  {} — {}: {}",
                failure.filename, failure.kind, failure.reason
            )));
        }
        lines.join("\n")
    }

    /// Format an answered query with its citation filenames.
    pub fn answer(&self, result: &QueryResult, citation_names: &[String]) -> String {
        let mut out = String::new();
        out.push_str(&result.answer);
        out.push('\n');
        if !citation_names.is_empty() {
            out.push('\n');
            out.push_str(&self.dimmed(&format!("Context: {}", citation_names.join(", "))));
            out.push('\n');
        }
        out.push_str(&self.dimmed(&format!("Model: {}", result.model)));
        out
    }

    /// Format the first [`PREVIEW_CHARS`] characters of a document's text.
    pub fn preview(&self, filename: &str, text: &str) -> String {
        let truncated = text.chars().count() > PREVIEW_CHARS;
        let shown: String = text.chars().take(PREVIEW_CHARS).collect();
        format!(
            "{}\n{}{}",
            self.bold(&format!("--- {} ---", filename)),
            shown,
            if truncated { "…" } else { "" }
        )
    }

    fn green(&self, s: &str) -> String {
        if self.color_enabled {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    fn yellow(&self, s: &str) -> String {
        if self.color_enabled {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    }

    fn red(&self, s: &str) -> String {
        if self.color_enabled {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }

    fn bold(&self, s: &str) -> String {
        if self.color_enabled {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn dimmed(&self, s: &str) -> String {
        if self.color_enabled {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }
}
