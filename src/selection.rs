use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Challenge, ChallengeCatalog};

const FALLBACK_DISTRACTORS: [&str; 3] = [
    "does something else entirely",
    "performs the opposite operation",
    "is not a valid function",
];

/// Today's challenge number, `(day_of_year mod catalog_size) + 1`.
///
/// The result is a 1-based catalog position in `[1, catalog_size]`.
pub fn daily_challenge_id(date: NaiveDate, catalog_size: usize) -> usize {
    let size = catalog_size.max(1);
    (date.ordinal() as usize % size) + 1
}

/// Catalog index of the daily challenge for `date`.
pub fn daily_challenge_index(date: NaiveDate, catalog: &ChallengeCatalog) -> usize {
    daily_challenge_id(date, catalog.len()) - 1
}

/// Picks a catalog index uniformly among challenges not yet completed.
///
/// `None` means every challenge has been completed.
pub fn pick_unplayed<R: Rng + ?Sized>(
    catalog: &ChallengeCatalog,
    completed_ids: &BTreeSet<u32>,
    rng: &mut R,
) -> Option<usize> {
    let available: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, challenge)| !completed_ids.contains(&challenge.id))
        .map(|(index, _)| index)
        .collect();

    if available.is_empty() {
        return None;
    }

    Some(available[rng.random_range(0..available.len())])
}

/// Options in random order, or the answer plus stock distractors when the
/// challenge ships without options.
pub fn shuffle_options<R: Rng + ?Sized>(challenge: &Challenge, rng: &mut R) -> Vec<String> {
    let mut options = if challenge.options.is_empty() {
        let mut synthesized = vec![challenge.answer.clone()];
        synthesized.extend(FALLBACK_DISTRACTORS.iter().map(|s| s.to_string()));
        synthesized
    } else {
        challenge.options.clone()
    };

    options.shuffle(rng);
    options
}
