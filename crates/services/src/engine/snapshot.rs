use sprint_core::model::{GameMode, Progress, Question, Session, SessionPhase, Topic};

/// Read-only copy of everything a front end draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub mode: GameMode,
    pub topic: Topic,
    pub phase: SessionPhase,
    pub score: u32,
    pub streak: u32,
    pub total_answered: u32,
    pub correct_answered: u32,
    pub time_remaining_seconds: u32,
    pub question: Option<Question>,
    pub experience_points: u32,
    pub level: u32,
    pub level_progress: u32,
    pub climb_progress: u32,
}

impl SessionSnapshot {
    #[must_use]
    pub fn capture(session: &Session, progress: &Progress) -> Self {
        Self {
            mode: session.mode(),
            topic: session.topic(),
            phase: session.phase(),
            score: session.score(),
            streak: session.streak(),
            total_answered: session.total_answered(),
            correct_answered: session.correct_answered(),
            time_remaining_seconds: session.time_remaining_seconds(),
            question: session.question().cloned(),
            experience_points: progress.experience_points(),
            level: progress.level(),
            level_progress: progress.level_progress(),
            climb_progress: session.climb_progress(),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }
}
