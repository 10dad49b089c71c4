pub mod challenge;
pub mod config;
pub mod difficulty;
pub mod mode;
pub mod progress;

pub use challenge::{Category, Challenge, ChallengeCatalog};
// config is accessed as crate::models::config::{load_config, save_config, ...}
pub use difficulty::Difficulty;
pub use mode::GameMode;
pub use progress::ProgressState;
