use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{load_catalog, open_store, Paths};
use crate::clock::Clock;
use crate::display::{display_session, display_timer};
use crate::models::GameMode;
use crate::session::{Action, Phase, SessionController, SessionSnapshot, TimerToken};
use crate::ticker::TickerSlot;

const TICK_PERIOD: Duration = Duration::from_secs(1);

enum Event {
    Input(String),
    InputClosed,
    Tick(TimerToken),
}

#[derive(Debug, PartialEq)]
enum Command {
    Answer(usize),
    Reveal,
    Next,
    Practice,
    Daily,
    Restart,
    Reset,
    Quit,
    Help,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let input = line.trim().to_lowercase();

    if let Ok(n) = input.parse::<usize>() {
        return Command::Answer(n);
    }

    match input.as_str() {
        "r" | "reveal" => Command::Reveal,
        "s" | "skip" | "n" | "next" => Command::Next,
        "p" | "practice" => Command::Practice,
        "d" | "daily" => Command::Daily,
        "restart" => Command::Restart,
        "reset" => Command::Reset,
        "q" | "quit" | "exit" => Command::Quit,
        "" | "?" | "h" | "help" => Command::Help,
        _ => Command::Unknown(input),
    }
}

/// Option text for a 1-based choice on screen.
fn chosen_option(snapshot: &SessionSnapshot, choice: usize) -> Option<&str> {
    choice
        .checked_sub(1)
        .and_then(|i| snapshot.shuffled_options.get(i))
        .map(String::as_str)
}

fn spawn_input_reader(events: Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if events.send(Event::Input(line)).is_err() {
                return;
            }
        }
        let _ = events.send(Event::InputClosed);
    });
}

pub fn play(paths: &Paths, mode: Option<GameMode>) {
    let catalog = load_catalog(paths.catalog.as_deref());
    let store = open_store(paths);
    let mut controller = SessionController::new(catalog, store, Clock::System, StdRng::from_os_rng());

    if let Some(mode) = mode {
        let switched = controller.snapshot().mode == mode || controller.switch_mode(mode).is_applied();
        if !switched && mode == GameMode::Daily {
            println!("You've already played today's challenge. Starting practice instead.");
        }
    }

    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone());
    let mut ticker = TickerSlot::default();

    display_session(&controller.snapshot());

    loop {
        ticker.sync(controller.timer_token(), TICK_PERIOD, &tx, Event::Tick);

        let Ok(event) = rx.recv() else { break };
        match event {
            Event::Tick(token) => {
                if let Action::Applied(snapshot) = controller.tick(token) {
                    if snapshot.phase != Phase::Active {
                        display_session(&snapshot);
                    } else if snapshot.timer_seconds % 10 == 0 || snapshot.timer_seconds <= 5 {
                        display_timer(snapshot.timer_seconds);
                    }
                }
            }
            Event::Input(line) => {
                let action = match parse_command(&line) {
                    Command::Answer(choice) => {
                        let snapshot = controller.snapshot();
                        match chosen_option(&snapshot, choice) {
                            Some(answer) => controller.submit_guess(answer),
                            None => {
                                println!("Pick a number between 1 and {}.", snapshot.shuffled_options.len());
                                continue;
                            }
                        }
                    }
                    Command::Reveal => controller.request_reveal(),
                    Command::Next => controller.advance(),
                    Command::Practice => controller.switch_mode(GameMode::Practice),
                    Command::Daily => controller.switch_mode(GameMode::Daily),
                    Command::Restart => controller.restart(),
                    Command::Reset => controller.reset_progress(),
                    Command::Quit => break,
                    Command::Help => Action::Applied(controller.snapshot()),
                    Command::Unknown(input) => {
                        println!("Unknown command '{}'. Type `help` for the list.", input);
                        continue;
                    }
                };

                match action {
                    Action::Applied(snapshot) => display_session(&snapshot),
                    Action::Ignored => println!("That's not available right now."),
                }
            }
            Event::InputClosed => break,
        }
    }

    let finished = controller
        .catalog()
        .iter()
        .filter(|challenge| controller.progress().is_completed(challenge.id))
        .count();
    println!(
        "Final score: {} | Challenges completed: {}/{}",
        controller.snapshot().score,
        finished,
        controller.catalog().len()
    );
}
