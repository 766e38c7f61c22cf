#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod model;
pub mod study;
pub mod time;

pub use generator::{generate, generate_distractors, generate_for_name, generate_with};
pub use time::Clock;
