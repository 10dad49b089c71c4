use crate::session::{Feedback, Phase, SessionSnapshot};

pub fn display_session(snapshot: &SessionSnapshot) {
    println!("\n{}", "=".repeat(60));

    if snapshot.phase == Phase::NoMoreAvailable {
        println!("  No New Challenges Available");
        println!("{}\n", "=".repeat(60));
        println!(
            "You've completed all available challenges! Your final score: {}",
            snapshot.score
        );
        println!("\nType `reset` to clear your progress, or `quit` to leave.");
        return;
    }

    print!("  {}", snapshot.mode.display_name());
    if snapshot.is_todays_challenge {
        print!("  [Today's Challenge]");
    }
    println!("  | Score: {}", snapshot.score);
    println!("{}\n", "=".repeat(60));

    let label = match snapshot.challenge_id {
        Some(id) if !snapshot.is_todays_challenge => format!("Challenge #{}", id),
        _ => snapshot.today.format("%A, %B %-d, %Y").to_string(),
    };
    let difficulty = snapshot.difficulty.map(|d| d.display_name()).unwrap_or("?");
    let category = snapshot.category.map(|c| c.as_str()).unwrap_or("?");
    println!("{}  ({}, {})", label, difficulty, category);
    println!(
        "Revealed: {}%  [{}/{}]  Time left: {}s",
        snapshot.reveal_percent(),
        snapshot.reveal_level,
        snapshot.max_reveal_level,
        snapshot.timer_seconds
    );

    println!("{}", "-".repeat(60));
    println!("{}", snapshot.revealed_code);
    println!("{}", "-".repeat(60));

    println!("\nWhat does this function do?");
    for (i, option) in snapshot.shuffled_options.iter().enumerate() {
        println!("  {}) {}", i + 1, option);
    }

    display_feedback(snapshot);
    display_commands(snapshot);
}

fn display_feedback(snapshot: &SessionSnapshot) {
    match snapshot.feedback {
        Feedback::Correct => {
            println!("\nCorrect! Well done!");
            if let Some(ref answer) = snapshot.correct_answer {
                println!("The function {}.", answer);
            }
        }
        Feedback::Incorrect => {
            if snapshot.timer_seconds == 0 {
                println!("\nTime's up! The whole function is shown above.");
            } else {
                println!("\nOut of reveals. The whole function is shown above.");
            }
        }
        Feedback::None if !snapshot.selected_answer.is_empty() => {
            println!("\nNot quite right. Try again or reveal more.");
        }
        Feedback::None => {}
    }
}

fn display_commands(snapshot: &SessionSnapshot) {
    println!("\n{}", "=".repeat(60));
    if !snapshot.is_resolved {
        println!("1-{}: answer | r: reveal more | s: skip", snapshot.shuffled_options.len());
    } else {
        println!("n: next challenge");
    }
    println!("p: practice | d: daily | restart | reset | q: quit");
    println!("{}\n", "=".repeat(60));
}

pub fn display_timer(seconds: u32) {
    println!("  {}s left", seconds);
}
