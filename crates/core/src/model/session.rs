use serde::{Deserialize, Serialize};

use crate::model::{AchievementContext, GameMode, Progress, Question, Topic};

//
// ─── RULES ─────────────────────────────────────────────────────────────────────
//

/// Timer lengths and scoring constants for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRules {
    pub blitz_seconds: u32,
    pub standard_seconds: u32,
    /// Multiplied by the streak length (including the current answer).
    pub base_points: u32,
    pub experience_per_correct: u32,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            blitz_seconds: 60,
            standard_seconds: 300,
            base_points: 10,
            experience_per_correct: 5,
        }
    }
}

impl SessionRules {
    #[must_use]
    pub fn time_limit(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Blitz => self.blitz_seconds,
            _ => self.standard_seconds,
        }
    }
}

/// Questions in a full climb.
pub const CLIMB_LENGTH: u32 = 20;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Active,
    Finished,
}

/// What a scored submission did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub correct: bool,
    pub points_awarded: u32,
    pub experience_awarded: u32,
    pub correct_answer: i64,
    pub streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session inactive or untimed; nothing changed.
    Ignored,
    Running { remaining: u32 },
    Expired,
}

/// Figures for the result screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResults {
    pub mode: GameMode,
    pub topic: Topic,
    pub score: u32,
    pub total_answered: u32,
    pub correct_answered: u32,
    pub best_streak: u32,
    /// Whole percent, rounded half up; 0 when nothing was answered.
    pub accuracy: u32,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through, from `start` until it finishes or returns to the menu.
///
/// Pure state: the caller supplies questions and drives `tick`. Every
/// operation called out of context is a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    rules: SessionRules,
    mode: GameMode,
    topic: Topic,
    score: u32,
    streak: u32,
    best_streak: u32,
    total_answered: u32,
    correct_answered: u32,
    time_remaining_seconds: u32,
    active: bool,
    finished: bool,
    /// Set once the live question is scored; cleared by `advance`.
    awaiting_advance: bool,
    question: Option<Question>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionRules::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(rules: SessionRules) -> Self {
        Self {
            rules,
            mode: GameMode::Menu,
            topic: Topic::Multiplication,
            score: 0,
            streak: 0,
            best_streak: 0,
            total_answered: 0,
            correct_answered: 0,
            time_remaining_seconds: rules.blitz_seconds,
            active: false,
            finished: false,
            awaiting_advance: false,
            question: None,
        }
    }

    #[must_use]
    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.total_answered
    }

    #[must_use]
    pub fn correct_answered(&self) -> u32 {
        self.correct_answered
    }

    #[must_use]
    pub fn time_remaining_seconds(&self) -> u32 {
        self.time_remaining_seconds
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The live question has been scored and waits to be replaced.
    #[must_use]
    pub fn is_awaiting_advance(&self) -> bool {
        self.awaiting_advance
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.active {
            SessionPhase::Active
        } else if self.finished {
            SessionPhase::Finished
        } else {
            SessionPhase::Idle
        }
    }

    /// Climb completion in whole percent, capped at 100.
    #[must_use]
    pub fn climb_progress(&self) -> u32 {
        (self.total_answered.saturating_mul(100) / CLIMB_LENGTH).min(100)
    }

    /// Resets counters and begins a new play-through.
    ///
    /// Safe to call while already active; the previous run is discarded.
    /// `GameMode::Menu` is not playable and leaves the session untouched.
    pub fn start(&mut self, mode: GameMode, topic: Topic, first_question: Question) -> bool {
        if mode == GameMode::Menu {
            return false;
        }
        self.mode = mode;
        self.topic = topic;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.total_answered = 0;
        self.correct_answered = 0;
        self.time_remaining_seconds = self.rules.time_limit(mode);
        self.active = true;
        self.finished = false;
        self.awaiting_advance = false;
        self.question = Some(first_question);
        true
    }

    /// Scores raw answer text against the live question.
    ///
    /// Each question is scored once. Returns `None` without touching
    /// anything when the session is not active, has no question, or the
    /// question was already scored. Experience for a correct answer is
    /// added to `progress`.
    pub fn submit(&mut self, raw: &str, progress: &mut Progress) -> Option<SubmissionOutcome> {
        if !self.active || self.awaiting_advance {
            return None;
        }
        let question = self.question.as_ref()?;
        let correct = question.is_answered_by(raw);
        let correct_answer = question.correct_answer();

        let (points_awarded, experience_awarded) = if correct {
            let points = self.rules.base_points.saturating_mul(self.streak + 1);
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.score = self.score.saturating_add(points);
            self.correct_answered += 1;
            progress.award(self.rules.experience_per_correct);
            (points, self.rules.experience_per_correct)
        } else {
            self.streak = 0;
            (0, 0)
        };
        self.total_answered += 1;
        self.awaiting_advance = true;

        Some(SubmissionOutcome {
            correct,
            points_awarded,
            experience_awarded,
            correct_answer,
            streak: self.streak,
        })
    }

    /// One second of countdown. Reaching zero finishes the session.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.active || !self.mode.is_timed() {
            return TickOutcome::Ignored;
        }
        if self.time_remaining_seconds <= 1 {
            self.time_remaining_seconds = 0;
            self.finish();
            return TickOutcome::Expired;
        }
        self.time_remaining_seconds -= 1;
        TickOutcome::Running {
            remaining: self.time_remaining_seconds,
        }
    }

    /// Finishes an active session early. Returns whether anything changed.
    pub fn end(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.finish();
        true
    }

    /// Drops the session back to the menu, clearing the question.
    pub fn return_to_menu(&mut self) {
        self.mode = GameMode::Menu;
        self.active = false;
        self.finished = false;
        self.awaiting_advance = false;
        self.question = None;
    }

    /// Installs the next question. Ignored unless active.
    pub fn advance(&mut self, next: Question) -> bool {
        if !self.active {
            return false;
        }
        self.question = Some(next);
        self.awaiting_advance = false;
        true
    }

    #[must_use]
    pub fn results(&self) -> Option<SessionResults> {
        if !self.finished {
            return None;
        }
        let accuracy = if self.total_answered == 0 {
            0
        } else {
            (self.correct_answered * 200 + self.total_answered) / (self.total_answered * 2)
        };
        Some(SessionResults {
            mode: self.mode,
            topic: self.topic,
            score: self.score,
            total_answered: self.total_answered,
            correct_answered: self.correct_answered,
            best_streak: self.best_streak,
            accuracy,
        })
    }

    #[must_use]
    pub fn achievement_context(&self, progress: &Progress) -> AchievementContext {
        AchievementContext {
            mode: self.mode,
            score: self.score,
            streak: self.streak,
            correct_answered: self.correct_answered,
            level: progress.level(),
        }
    }

    fn finish(&mut self) {
        self.active = false;
        self.finished = true;
        self.awaiting_advance = false;
        self.question = None;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;

    fn question(answer: i64) -> Question {
        Question::new(
            QuestionId::from_random_bytes([answer as u8; 16]),
            format!("= {answer}"),
            answer,
            1,
            Topic::Multiplication,
            None,
        )
    }

    fn started(mode: GameMode) -> Session {
        let mut session = Session::default();
        assert!(session.start(mode, Topic::Squares, question(144)));
        session
    }

    /// Scores `raw`, then moves on to another `= 144` question.
    fn answer(
        session: &mut Session,
        raw: &str,
        progress: &mut Progress,
    ) -> Option<SubmissionOutcome> {
        let outcome = session.submit(raw, progress);
        session.advance(question(144));
        outcome
    }

    #[test]
    fn start_sets_timer_by_mode() {
        assert_eq!(started(GameMode::Blitz).time_remaining_seconds(), 60);
        assert_eq!(started(GameMode::Climb).time_remaining_seconds(), 300);
        assert_eq!(started(GameMode::Study).time_remaining_seconds(), 300);
        assert_eq!(started(GameMode::Blitz).phase(), SessionPhase::Active);
    }

    #[test]
    fn correct_answers_score_by_streak() {
        let mut session = started(GameMode::Climb);
        let mut progress = Progress::default();

        let mut expected = 0;
        for i in 0..4 {
            let outcome = answer(&mut session, "144", &mut progress).unwrap();
            expected += 10 * (i + 1);
            assert!(outcome.correct);
            assert_eq!(outcome.points_awarded, 10 * (i + 1));
            assert_eq!(session.streak(), i + 1);
            assert_eq!(session.score(), expected);
        }
        assert_eq!(progress.experience_points(), 20);
        assert_eq!(session.correct_answered(), 4);
        assert_eq!(session.total_answered(), 4);
    }

    #[test]
    fn wrong_answer_resets_streak_only() {
        let mut session = started(GameMode::Climb);
        let mut progress = Progress::default();
        answer(&mut session, "144", &mut progress);
        answer(&mut session, "144", &mut progress);

        let outcome = session.submit("999", &mut progress).unwrap();

        assert!(!outcome.correct);
        assert_eq!(outcome.correct_answer, 144);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.best_streak(), 2);
        assert_eq!(session.score(), 30);
        assert_eq!(progress.experience_points(), 10);
        assert_eq!(session.total_answered(), 3);
        assert_eq!(session.correct_answered(), 2);
    }

    #[test]
    fn a_scored_question_cannot_be_answered_again() {
        let mut session = started(GameMode::Custom);
        let mut progress = Progress::default();

        let first = session.submit("0", &mut progress).unwrap();
        assert!(!first.correct);
        assert!(session.is_awaiting_advance());

        // The revealed answer does not count on the same question.
        assert!(session.submit("144", &mut progress).is_none());
        assert!(session.submit("144", &mut progress).is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.total_answered(), 1);
        assert_eq!(progress.experience_points(), 0);

        assert!(session.advance(question(144)));
        assert!(!session.is_awaiting_advance());
        assert!(session.submit("144", &mut progress).unwrap().correct);
    }

    #[test]
    fn menu_is_not_a_playable_mode() {
        let mut session = Session::default();
        assert!(!session.start(GameMode::Menu, Topic::Cubes, question(27)));
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.question().is_none());

        let mut running = started(GameMode::Blitz);
        assert!(!running.start(GameMode::Menu, Topic::Cubes, question(27)));
        assert_eq!(running.mode(), GameMode::Blitz);
        assert_eq!(running.question().unwrap().correct_answer(), 144);
    }

    #[test]
    fn malformed_input_counts_as_wrong() {
        let mut session = started(GameMode::Climb);
        let mut progress = Progress::default();
        let outcome = session.submit("abc", &mut progress).unwrap();
        assert!(!outcome.correct);
        assert_eq!(session.total_answered(), 1);
    }

    #[test]
    fn submit_is_ignored_when_idle_or_finished() {
        let mut progress = Progress::default();
        let mut idle = Session::default();
        assert!(idle.submit("1", &mut progress).is_none());

        let mut session = started(GameMode::Blitz);
        session.end();
        assert!(session.submit("144", &mut progress).is_none());
        assert_eq!(session.total_answered(), 0);
    }

    #[test]
    fn ticking_a_climb_to_zero_finishes_it() {
        let mut session = started(GameMode::Climb);
        for _ in 0..299 {
            assert!(matches!(session.tick(), TickOutcome::Running { .. }));
        }
        assert_eq!(session.time_remaining_seconds(), 1);
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert_eq!(session.time_remaining_seconds(), 0);
        assert!(session.is_finished());
        assert!(!session.is_active());
        assert!(session.question().is_none());
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.time_remaining_seconds(), 0);
    }

    #[test]
    fn study_sessions_do_not_count_down() {
        let mut session = started(GameMode::Study);
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.time_remaining_seconds(), 300);
    }

    #[test]
    fn return_to_menu_clears_question_and_flags() {
        let mut session = started(GameMode::Blitz);
        session.return_to_menu();
        assert_eq!(session.mode(), GameMode::Menu);
        assert!(!session.is_active());
        assert!(!session.is_finished());
        assert!(session.question().is_none());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn advance_only_applies_while_active() {
        let mut session = started(GameMode::Climb);
        assert!(session.advance(question(9)));
        assert_eq!(session.question().unwrap().correct_answer(), 9);

        session.end();
        assert!(!session.advance(question(16)));
        assert!(session.question().is_none());
    }

    #[test]
    fn end_is_a_no_op_when_idle() {
        let mut session = Session::default();
        assert!(!session.end());
        assert!(!session.is_finished());
    }

    #[test]
    fn results_report_rounded_accuracy() {
        let mut session = started(GameMode::Climb);
        let mut progress = Progress::default();
        answer(&mut session, "144", &mut progress);
        answer(&mut session, "144", &mut progress);
        answer(&mut session, "0", &mut progress);
        assert!(session.results().is_none());

        session.end();
        let results = session.results().unwrap();
        assert_eq!(results.accuracy, 67);
        assert_eq!(results.score, 30);
        assert_eq!(results.best_streak, 2);
    }

    #[test]
    fn climb_progress_caps_at_full() {
        let mut session = started(GameMode::Climb);
        let mut progress = Progress::default();
        for _ in 0..5 {
            answer(&mut session, "144", &mut progress);
        }
        assert_eq!(session.climb_progress(), 25);
        for _ in 0..30 {
            answer(&mut session, "1", &mut progress);
        }
        assert_eq!(session.climb_progress(), 100);
    }

    #[test]
    fn restart_discards_previous_run() {
        let mut session = started(GameMode::Blitz);
        let mut progress = Progress::default();
        session.submit("144", &mut progress);
        session.tick();

        session.start(GameMode::Marathon, Topic::Cubes, question(27));

        assert_eq!(session.score(), 0);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.total_answered(), 0);
        assert_eq!(session.time_remaining_seconds(), 300);
        assert_eq!(session.topic(), Topic::Cubes);
    }
}
