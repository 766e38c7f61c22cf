mod feedback;
mod game;
mod snapshot;
mod timers;

// Public API of the engine subsystem.
pub use feedback::AnswerFeedback;
pub use game::GameEngine;
pub use snapshot::SessionSnapshot;
