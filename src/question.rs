use serde::{Deserialize, Serialize};

/// How a question is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    TypeIn,
    FillBlank,
}

/// A single quiz question. Content is opaque to the progression engine;
/// only `answer` is read, for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: QuestionKind,

    pub prompt: String,

    /// Choices for multiple-choice questions (contains `answer`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Canonical answer
    pub answer: String,

    /// Shown after a wrong answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Question {
    pub fn multiple_choice(
        id: impl Into<String>,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        options: Vec<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: QuestionKind::MultipleChoice,
            prompt: prompt.into(),
            options: Some(options),
            answer: answer.into(),
            hint,
        }
    }

    pub fn type_in(
        id: impl Into<String>,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: QuestionKind::TypeIn,
            prompt: prompt.into(),
            options: None,
            answer: answer.into(),
            hint,
        }
    }

    pub fn is_correct(&self, submitted: &str) -> bool {
        answers_match(submitted, &self.answer)
    }
}

/// Case-insensitive, whitespace-trimmed exact comparison
pub fn answers_match(submitted: &str, canonical: &str) -> bool {
    submitted.trim().to_lowercase() == canonical.trim().to_lowercase()
}

/// Source of questions for a quiz run.
///
/// Implementations return at most `count` questions with unique ids, fewer
/// when the topic has fewer distinct items, and none for unknown topics.
pub trait QuestionGenerator {
    fn generate(&mut self, topic_id: &str, count: usize) -> Vec<Question>;
}
