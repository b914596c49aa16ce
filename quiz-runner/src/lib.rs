pub mod app;
pub mod config;
pub mod cues;
pub mod events;
pub mod input;
pub mod render;
pub mod round_driver;

pub use app::run_quiz;
pub use round_driver::{RoundFinish, run_round};
