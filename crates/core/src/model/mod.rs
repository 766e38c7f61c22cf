mod achievement;
mod ids;
mod mode;
mod progress;
mod question;
mod session;
mod topic;

pub use achievement::{
    ACHIEVEMENTS, Achievement, AchievementContext, AchievementDef, AchievementRule,
};
pub use ids::{FlashCardId, QuestionId};
pub use mode::{GameMode, ParseModeError, format_clock};
pub use progress::{Progress, XP_PER_LEVEL, level_for};
pub use question::Question;
pub use session::{
    CLIMB_LENGTH, Session, SessionPhase, SessionResults, SessionRules, SubmissionOutcome,
    TickOutcome,
};
pub use topic::{ParseTopicError, Topic};
