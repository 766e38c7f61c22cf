use sprint_core::model::{Achievement, SubmissionOutcome};

/// What the caller shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub outcome: SubmissionOutcome,
    pub message: String,
    pub unlocked: Vec<Achievement>,
}

impl AnswerFeedback {
    #[must_use]
    pub fn new(outcome: SubmissionOutcome, unlocked: Vec<Achievement>) -> Self {
        let message = if outcome.correct {
            format!("Correct! +{} points", outcome.points_awarded)
        } else {
            format!("Not quite right. The answer was {}", outcome.correct_answer)
        };
        Self {
            outcome,
            message,
            unlocked,
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.outcome.correct
    }
}
