use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sprint_core::model::{
    Achievement, GameMode, Progress, Question, Session, SessionResults, TickOutcome, Topic,
};
use sprint_core::{Clock, generate_with, generator::generate_distractors_with};
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::feedback::AnswerFeedback;
use super::snapshot::SessionSnapshot;
use super::timers::SessionTimers;
use crate::config::EngineConfig;
use crate::progress_service::ProgressService;

//
// ─── SHARED STATE ──────────────────────────────────────────────────────────────
//

struct EngineState {
    session: Session,
    progress: Progress,
    rng: StdRng,
    /// Bumped whenever the session is started, ended or reset.
    epoch: u64,
    /// Bumped whenever a pending advance is scheduled or cancelled.
    advance_ticket: u64,
    timers: SessionTimers,
}

impl EngineState {
    fn cancel_timers(&mut self) {
        self.timers.cancel_all();
        self.advance_ticket += 1;
    }
}

struct Shared {
    state: Mutex<EngineState>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &EngineState) {
        self.snapshots
            .send_replace(SessionSnapshot::capture(&state.session, &state.progress));
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Hosts one quiz session and the timers that drive it.
///
/// All operations are silent no-ops when called out of context. The
/// countdown and the delayed next-question step run as Tokio tasks owned by
/// the engine; they are aborted whenever the session leaves the active phase
/// and when the engine is dropped, so `start`, `end` and `return_to_menu`
/// must run inside a Tokio runtime.
pub struct GameEngine {
    shared: Arc<Shared>,
    progress_store: ProgressService,
    config: EngineConfig,
    clock: Clock,
}

impl GameEngine {
    /// Build an engine with progress loaded from `progress_store`.
    pub async fn load(clock: Clock, progress_store: ProgressService, config: EngineConfig) -> Self {
        let progress = progress_store.load().await;
        tracing::debug!(
            experience = progress.experience_points(),
            level = progress.level(),
            "loaded progress"
        );
        Self::with_progress(clock, progress_store, config, progress)
    }

    /// Build an engine around already-loaded progress.
    #[must_use]
    pub fn with_progress(
        clock: Clock,
        progress_store: ProgressService,
        config: EngineConfig,
        progress: Progress,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let session = Session::new(config.rules);
        let (snapshots, _) = watch::channel(SessionSnapshot::capture(&session, &progress));
        let state = EngineState {
            session,
            progress,
            rng,
            epoch: 0,
            advance_ticket: 0,
            timers: SessionTimers::default(),
        };
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                snapshots,
            }),
            progress_store,
            config,
            clock,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Subscribe to state changes, including timer-driven ones.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.snapshots.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.shared.lock();
        SessionSnapshot::capture(&state.session, &state.progress)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<Question> {
        self.shared.lock().session.question().cloned()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.shared.lock().progress.clone()
    }

    #[must_use]
    pub fn results(&self) -> Option<SessionResults> {
        self.shared.lock().session.results()
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.shared.lock().timers.is_ticking()
    }

    #[must_use]
    pub fn has_pending_advance(&self) -> bool {
        self.shared.lock().timers.has_pending_advance()
    }

    /// Begin a new session, discarding any running one and its timers.
    ///
    /// `GameMode::Menu` is not playable; use `return_to_menu` instead.
    pub fn start(&self, mode: GameMode, topic: Topic) {
        if mode == GameMode::Menu {
            tracing::debug!("ignoring start in menu mode");
            return;
        }
        let mut state = self.shared.lock();
        state.cancel_timers();
        state.epoch += 1;
        let epoch = state.epoch;

        let first = generate_with(&mut state.rng, topic);
        state.session.start(mode, topic, first);

        if mode.is_timed() {
            let ticker = tokio::spawn(run_ticker(
                Arc::clone(&self.shared),
                epoch,
                self.config.tick_period,
            ));
            state.timers.set_ticker(ticker);
        }

        tracing::info!(
            %mode,
            %topic,
            seconds = state.session.time_remaining_seconds(),
            "session started"
        );
        self.shared.publish(&state);
    }

    /// Restart with the mode and topic of the last session.
    ///
    /// Returns `false` when there is nothing to replay.
    pub fn play_again(&self) -> bool {
        let (mode, topic) = {
            let state = self.shared.lock();
            (state.session.mode(), state.session.topic())
        };
        if mode == GameMode::Menu {
            return false;
        }
        self.start(mode, topic);
        true
    }

    /// Score an answer against the live question.
    ///
    /// Returns `None` when there is no active session or question, and for
    /// every submission after the first on the same question. The next
    /// question follows one `advance_delay` after the scored submission.
    /// Progress is persisted before returning; a storage failure is logged
    /// and the in-memory result stands.
    pub async fn submit(&self, raw: &str) -> Option<AnswerFeedback> {
        let (feedback, progress) = {
            let mut state = self.shared.lock();
            let EngineState {
                session, progress, ..
            } = &mut *state;
            let outcome = session.submit(raw, progress)?;
            let unlocked: Vec<Achievement> = if outcome.correct {
                let ctx = session.achievement_context(progress);
                progress.unlock_earned(&ctx, self.clock.now())
            } else {
                Vec::new()
            };

            tracing::debug!(
                correct = outcome.correct,
                points = outcome.points_awarded,
                streak = outcome.streak,
                score = state.session.score(),
                "answer scored"
            );
            for achievement in &unlocked {
                tracing::info!(id = %achievement.id, "achievement unlocked");
            }

            self.schedule_advance(&mut state);
            self.shared.publish(&state);
            (AnswerFeedback::new(outcome, unlocked), state.progress.clone())
        };

        self.persist(&progress, !feedback.unlocked.is_empty()).await;
        Some(feedback)
    }

    /// One second of countdown, as the ticker would apply it.
    pub fn tick(&self) -> TickOutcome {
        let mut state = self.shared.lock();
        let outcome = state.session.tick();
        match outcome {
            TickOutcome::Ignored => return outcome,
            TickOutcome::Expired => {
                state.cancel_timers();
                state.epoch += 1;
                tracing::info!(score = state.session.score(), "session time expired");
            }
            TickOutcome::Running { .. } => {}
        }
        self.shared.publish(&state);
        outcome
    }

    /// Finish the session early and show results.
    pub fn end(&self) {
        let mut state = self.shared.lock();
        if !state.session.end() {
            return;
        }
        state.cancel_timers();
        state.epoch += 1;
        tracing::info!(score = state.session.score(), "session ended");
        self.shared.publish(&state);
    }

    /// Abandon the session and go back to the menu.
    pub fn return_to_menu(&self) {
        let mut state = self.shared.lock();
        state.cancel_timers();
        state.epoch += 1;
        state.session.return_to_menu();
        tracing::debug!("returned to menu");
        self.shared.publish(&state);
    }

    /// Multiple-choice options for the live question.
    #[must_use]
    pub fn multiple_choice(&self, n: usize) -> Option<Vec<i64>> {
        let mut state = self.shared.lock();
        let question = state.session.question()?.clone();
        Some(generate_distractors_with(&mut state.rng, &question, n))
    }

    fn schedule_advance(&self, state: &mut EngineState) {
        state.advance_ticket += 1;
        let handle = tokio::spawn(run_advance(
            Arc::clone(&self.shared),
            state.epoch,
            state.advance_ticket,
            self.config.advance_delay,
        ));
        state.timers.set_advance(handle);
    }

    async fn persist(&self, progress: &Progress, achievements_changed: bool) {
        if let Err(err) = self.progress_store.save(progress).await {
            tracing::warn!(error = %err, "failed to persist experience");
        }
        if achievements_changed {
            if let Err(err) = self
                .progress_store
                .save_achievements(progress.achievements())
                .await
            {
                tracing::warn!(error = %err, "failed to persist achievements");
            }
        }
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        self.shared.lock().cancel_timers();
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("GameEngine")
            .field("session", &state.session)
            .field("experience", &state.progress.experience_points())
            .field("epoch", &state.epoch)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//
// ─── TASKS ─────────────────────────────────────────────────────────────────────
//

async fn run_ticker(shared: Arc<Shared>, epoch: u64, period: Duration) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let mut state = shared.lock();
        if state.epoch != epoch {
            return;
        }
        match state.session.tick() {
            TickOutcome::Running { .. } => shared.publish(&state),
            TickOutcome::Expired => {
                state.timers.release_ticker();
                state.timers.cancel_advance();
                state.advance_ticket += 1;
                state.epoch += 1;
                tracing::info!(score = state.session.score(), "session time expired");
                shared.publish(&state);
                return;
            }
            TickOutcome::Ignored => {
                state.timers.release_ticker();
                return;
            }
        }
    }
}

async fn run_advance(shared: Arc<Shared>, epoch: u64, ticket: u64, delay: Duration) {
    time::sleep(delay).await;
    let mut state = shared.lock();
    if state.epoch != epoch || state.advance_ticket != ticket {
        return;
    }
    state.timers.release_advance();
    let topic = state.session.topic();
    let next = generate_with(&mut state.rng, topic);
    let id = next.id();
    if state.session.advance(next) {
        tracing::debug!(question = %id, "next question");
        shared.publish(&state);
    }
}
