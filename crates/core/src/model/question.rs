use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, Topic};

/// A single practice prompt with its integer answer.
///
/// Questions are never mutated; the next one replaces the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    prompt_text: String,
    correct_answer: i64,
    difficulty: u32,
    topic: Topic,
    hint_text: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        prompt_text: impl Into<String>,
        correct_answer: i64,
        difficulty: u32,
        topic: Topic,
        hint_text: Option<String>,
    ) -> Self {
        Self {
            id,
            prompt_text: prompt_text.into(),
            correct_answer,
            difficulty,
            topic,
            hint_text,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    #[must_use]
    pub fn correct_answer(&self) -> i64 {
        self.correct_answer
    }

    #[must_use]
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    #[must_use]
    pub fn hint_text(&self) -> Option<&str> {
        self.hint_text.as_deref()
    }

    /// Checks raw user input against the answer.
    ///
    /// Anything that does not parse as an integer is simply wrong.
    #[must_use]
    pub fn is_answered_by(&self, raw: &str) -> bool {
        raw.trim()
            .parse::<i64>()
            .is_ok_and(|value| value == self.correct_answer)
    }
}
