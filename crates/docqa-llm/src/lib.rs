//! docqa Answering Layer
//!
//! Implementations of the `AnsweringService` trait from `docqa-domain`.
//! Answering is delegated entirely to an external model; this crate only
//! owns the wire call and a deterministic mock for tests.
//!
//! # Providers
//!
//! - `MockAnswerer`: deterministic mock for testing
//! - `ChatProvider`: OpenAI-compatible chat-completions API client
//!
//! # Examples
//!
//! ```
//! use docqa_llm::MockAnswerer;
//! use docqa_domain::traits::AnsweringService;
//!
//! let answerer = MockAnswerer::new("The answer is 42.");
//! let answer = answerer.answer("what?", "context", "gpt-4.1-mini").unwrap();
//! assert_eq!(answer.text, "The answer is 42.");
//! ```

#![warn(missing_docs)]

pub mod openai;

mod error;

use docqa_domain::traits::{Answer, AnsweringService as AnsweringServiceTrait};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub use error::LlmError;
pub use openai::ChatProvider;

/// Mock answering service for deterministic testing
///
/// Returns pre-configured answers without making any network calls.
/// Responses are keyed by question text; unknown questions get the default
/// answer.
#[derive(Debug, Clone)]
pub struct MockAnswerer {
    default_answer: String,
    responses: Arc<Mutex<HashMap<String, Answer>>>,
    errors: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockAnswerer {
    /// Create a mock with a fixed answer for all questions
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            default_answer: answer.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Configure a specific answer (with citations) for a question
    pub fn add_answer(&mut self, question: impl Into<String>, answer: Answer) {
        self.responses
            .lock()
            .unwrap()
            .insert(question.into(), answer);
    }

    /// Configure a failure for a specific question
    pub fn add_error(&mut self, question: impl Into<String>) {
        self.errors.lock().unwrap().push(question.into());
    }

    /// Number of times `answer` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockAnswerer {
    fn default() -> Self {
        Self::new("Default mock answer")
    }
}

impl AnsweringServiceTrait for MockAnswerer {
    type Error = LlmError;

    fn answer(&self, question: &str, _context: &str, _model: &str) -> Result<Answer, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if self.errors.lock().unwrap().iter().any(|q| q == question) {
            return Err(LlmError::Unavailable("mock failure".to_string()));
        }
        if let Some(answer) = self.responses.lock().unwrap().get(question) {
            return Ok(answer.clone());
        }
        Ok(Answer::text_only(self.default_answer.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_default_answer() {
        let answerer = MockAnswerer::new("fixed");
        let answer = answerer.answer("anything", "ctx", "m").unwrap();
        assert_eq!(answer.text, "fixed");
        assert!(answer.citations.is_empty());
    }

    #[test]
    fn test_mock_keyed_answer_with_citations() {
        let mut answerer = MockAnswerer::default();
        answerer.add_answer(
            "who?",
            Answer {
                text: "Alice, per the contract.".to_string(),
                citations: vec!["contract.pdf".to_string()],
            },
        );

        let answer = answerer.answer("who?", "ctx", "m").unwrap();
        assert_eq!(answer.citations, vec!["contract.pdf".to_string()]);
    }

    #[test]
    fn test_mock_error_injection() {
        let mut answerer = MockAnswerer::default();
        answerer.add_error("bad question");

        let result = answerer.answer("bad question", "ctx", "m");
        assert!(matches!(result, Err(LlmError::Unavailable(_))));
    }

    #[test]
    fn test_mock_call_count() {
        let answerer = MockAnswerer::default();
        assert_eq!(answerer.call_count(), 0);

        answerer.answer("q1", "c", "m").unwrap();
        answerer.answer("q2", "c", "m").unwrap();
        assert_eq!(answerer.call_count(), 2);
    }
}
