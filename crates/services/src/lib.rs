#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod engine;
pub mod error;
pub mod progress_service;

pub use sprint_core::Clock;

pub use app_services::AppServices;
pub use config::EngineConfig;
pub use engine::{AnswerFeedback, GameEngine, SessionSnapshot};
pub use error::{AppServicesError, ProgressError};
pub use progress_service::ProgressService;
