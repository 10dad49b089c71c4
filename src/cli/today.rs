use super::{load_catalog, Paths};
use crate::clock::Clock;
use crate::selection::{daily_challenge_id, daily_challenge_index};

pub fn show_today(paths: &Paths) {
    let catalog = load_catalog(paths.catalog.as_deref());
    let today = Clock::System.today();
    let number = daily_challenge_id(today, catalog.len());

    let Some(challenge) = catalog.get(daily_challenge_index(today, &catalog)) else {
        eprintln!("Today's challenge is missing from the catalog");
        std::process::exit(1);
    };

    println!("{}", today.format("%A, %B %-d, %Y"));
    println!("Today's challenge: #{} of {}", number, catalog.len());
    println!(
        "Difficulty: {} | Category: {}",
        challenge.difficulty.display_name(),
        challenge.category.as_str()
    );
    println!();
    println!("Run `codele` to play it.");
}
