use super::{open_store, Paths};

pub fn reset_progress(paths: &Paths) {
    let mut store = open_store(paths);
    let completed = store.state().completed_ids.len();

    if let Err(e) = store.reset() {
        eprintln!("Failed to reset progress: {}", e);
        std::process::exit(1);
    }

    println!("Progress reset ({} completed challenge(s) forgotten).", completed);
    println!("Today's challenge is available again.");
}
