//! Append-only query history

use docqa_domain::QueryResult;

/// Ordered, append-only log of answered queries
///
/// Entries are never reordered or deleted; failed queries are never appended
/// (the router returns an error before any append happens), so the history
/// only ever contains completed exchanges.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<QueryResult>,
}

impl HistoryLog {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one answered query
    pub fn append(&mut self, result: QueryResult) {
        self.entries.push(result);
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[QueryResult] {
        &self.entries
    }

    /// Number of recorded exchanges
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any exchange has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(question: &str) -> QueryResult {
        QueryResult {
            question: question.to_string(),
            answer: "answer".to_string(),
            citations: Vec::new(),
            model: "m".to_string(),
            asked_at: 0,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut history = HistoryLog::new();
        history.append(result("first"));
        history.append(result("second"));
        history.append(result("third"));

        let questions: Vec<_> = history.entries().iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_prior_entries_survive_later_appends() {
        let mut history = HistoryLog::new();
        history.append(result("first"));
        let snapshot = history.entries()[0].clone();

        for i in 0..100 {
            history.append(result(&format!("q{}", i)));
        }

        assert_eq!(history.entries()[0], snapshot);
        assert_eq!(history.len(), 101);
    }
}
