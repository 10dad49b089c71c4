use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Today's challenge, the same for everyone on a given date.
    Daily,
    /// Random challenges you have not finished yet.
    Practice,
}

impl GameMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::Daily => "Daily Challenge",
            GameMode::Practice => "Practice Mode",
        }
    }
}
