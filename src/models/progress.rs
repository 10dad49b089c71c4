use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Persisted ledger of finished challenges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub completed_ids: BTreeSet<u32>,
    pub last_played_date: Option<NaiveDate>,
}

impl ProgressState {
    pub fn is_completed(&self, id: u32) -> bool {
        self.completed_ids.contains(&id)
    }

    pub fn has_played_on(&self, date: NaiveDate) -> bool {
        self.last_played_date == Some(date)
    }
}
