use super::{load_catalog, open_store, Paths};
use crate::clock::Clock;
use crate::selection::daily_challenge_id;

pub fn show_info(paths: &Paths) {
    let catalog = load_catalog(paths.catalog.as_deref());
    let store = open_store(paths);
    let progress = store.state();
    let today = Clock::System.today();

    if progress.has_played_on(today) {
        println!("You've completed today's challenge!");
    } else {
        println!(
            "You still have a challenge to complete today! (#{})",
            daily_challenge_id(today, catalog.len())
        );
    }

    let completed = catalog
        .iter()
        .filter(|challenge| progress.is_completed(challenge.id))
        .count();
    let last_played = progress
        .last_played_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("\nChallenges completed: {}/{}", completed, catalog.len());
    println!("Last daily played: {}", last_played);
    println!("Progress stored in: {}", paths.data_dir.display());
}
