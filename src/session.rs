use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::StoreError;
use crate::models::{Category, Challenge, ChallengeCatalog, Difficulty, GameMode, ProgressState};
use crate::reveal::{points_for_correct_guess, revealed_code, MAX_REVEAL_LEVEL};
use crate::selection::{daily_challenge_index, pick_unplayed, shuffle_options};
use crate::store::{ProgressBackend, ProgressStore};

pub const TIMER_SECONDS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    None,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Won,
    Lost,
    /// Practice mode ran out of unfinished challenges.
    NoMoreAvailable,
}

/// Identifies the countdown of one challenge load. Ticks carrying an older
/// token are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[cfg(test)]
impl TimerToken {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone)]
struct Countdown {
    seconds: u32,
    running: bool,
    token: TimerToken,
}

impl Countdown {
    fn start(token: TimerToken) -> Self {
        Self {
            seconds: TIMER_SECONDS,
            running: true,
            token,
        }
    }

    fn stopped(token: TimerToken) -> Self {
        Self {
            seconds: TIMER_SECONDS,
            running: false,
            token,
        }
    }
}

#[derive(Debug, Clone)]
struct Session {
    challenge_index: Option<usize>,
    reveal_level: u32,
    selected_answer: String,
    feedback: Feedback,
    score: u32,
    countdown: Countdown,
    mode: GameMode,
    shuffled_options: Vec<String>,
    exhausted: bool,
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub challenge_index: Option<usize>,
    pub challenge_id: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
    pub revealed_code: String,
    pub reveal_level: u32,
    pub max_reveal_level: u32,
    pub selected_answer: String,
    pub feedback: Feedback,
    pub is_resolved: bool,
    /// The answer text, once the challenge has been won.
    pub correct_answer: Option<String>,
    pub score: u32,
    pub timer_seconds: u32,
    pub timer_running: bool,
    pub timer_token: TimerToken,
    pub mode: GameMode,
    pub shuffled_options: Vec<String>,
    pub phase: Phase,
    pub today: NaiveDate,
    pub is_todays_challenge: bool,
    pub has_played_today: bool,
}

impl SessionSnapshot {
    /// Share of the code currently visible, in percent.
    pub fn reveal_percent(&self) -> u32 {
        self.reveal_level * 100 / self.max_reveal_level.max(1)
    }
}

/// Result of a player or timer event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Applied(SessionSnapshot),
    /// The event is not legal in the current state and changed nothing.
    Ignored,
}

impl Action {
    pub fn is_applied(&self) -> bool {
        matches!(self, Action::Applied(_))
    }
}

/// Drives one player's game: picks challenges, applies guesses, reveals
/// and timer ticks, and records progress.
pub struct SessionController<B: ProgressBackend, R: Rng> {
    catalog: ChallengeCatalog,
    store: ProgressStore<B>,
    clock: Clock,
    rng: R,
    session: Session,
    next_token: u64,
}

impl<B: ProgressBackend, R: Rng> SessionController<B, R> {
    /// Starts on today's challenge unless it was already played today, in
    /// which case practice mode begins with an unfinished challenge.
    pub fn new(catalog: ChallengeCatalog, mut store: ProgressStore<B>, clock: Clock, rng: R) -> Self {
        let progress = store.load();
        let mut controller = Self {
            catalog,
            store,
            clock,
            rng,
            session: Session {
                challenge_index: None,
                reveal_level: 1,
                selected_answer: String::new(),
                feedback: Feedback::None,
                score: 0,
                countdown: Countdown::stopped(TimerToken(0)),
                mode: GameMode::Daily,
                shuffled_options: Vec::new(),
                exhausted: false,
            },
            next_token: 1,
        };

        let today = controller.clock.today();
        if progress.has_played_on(today) {
            info!("today's challenge already played, starting practice");
            controller.load_unplayed();
        } else {
            controller.load_challenge(controller.daily_index(), GameMode::Daily);
        }
        controller
    }

    pub fn catalog(&self) -> &ChallengeCatalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressState {
        self.store.state()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let s = &self.session;
        let today = self.clock.today();
        let challenge = s.challenge_index.and_then(|i| self.catalog.get(i));
        let phase = self.phase();

        SessionSnapshot {
            challenge_index: s.challenge_index,
            challenge_id: challenge.map(|c| c.id),
            difficulty: challenge.map(|c| c.difficulty),
            category: challenge.map(|c| c.category),
            revealed_code: challenge
                .map(|c| revealed_code(&c.code, s.reveal_level, MAX_REVEAL_LEVEL))
                .unwrap_or_default(),
            reveal_level: s.reveal_level,
            max_reveal_level: MAX_REVEAL_LEVEL,
            selected_answer: s.selected_answer.clone(),
            feedback: s.feedback,
            is_resolved: s.feedback != Feedback::None,
            correct_answer: challenge
                .filter(|_| phase == Phase::Won)
                .map(|c| c.answer.clone()),
            score: s.score,
            timer_seconds: s.countdown.seconds,
            timer_running: s.countdown.running,
            timer_token: s.countdown.token,
            mode: s.mode,
            shuffled_options: s.shuffled_options.clone(),
            phase,
            today,
            is_todays_challenge: s.challenge_index == Some(self.daily_index()),
            has_played_today: self.store.state().has_played_on(today),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.session.exhausted {
            return Phase::NoMoreAvailable;
        }
        match self.session.feedback {
            Feedback::None => Phase::Active,
            Feedback::Correct => Phase::Won,
            Feedback::Incorrect => Phase::Lost,
        }
    }

    /// Token the host scheduler must attach to ticks, while the countdown runs.
    pub fn timer_token(&self) -> Option<TimerToken> {
        let countdown = &self.session.countdown;
        countdown.running.then_some(countdown.token)
    }

    pub fn submit_guess(&mut self, answer: &str) -> Action {
        if self.phase() != Phase::Active || answer.is_empty() {
            return Action::Ignored;
        }
        let Some(challenge) = self.current_challenge() else {
            return Action::Ignored;
        };
        let (id, is_correct) = (challenge.id, challenge.answer == answer);

        self.session.selected_answer = answer.to_string();

        if is_correct {
            let points = points_for_correct_guess(self.session.reveal_level, MAX_REVEAL_LEVEL);
            self.session.feedback = Feedback::Correct;
            self.session.countdown.running = false;
            self.session.score += points;
            debug!(id, points, level = self.session.reveal_level, "correct guess");

            log_store_failure(self.store.record_completion(id));

            if self.session.mode == GameMode::Daily && self.is_on_todays_challenge() {
                let today = self.clock.today();
                log_store_failure(self.store.record_daily_played(today));
            }
        } else {
            debug!(id, level = self.session.reveal_level, "incorrect guess");
            if self.session.reveal_level < MAX_REVEAL_LEVEL {
                self.session.reveal_level += 1;
            }
        }

        Action::Applied(self.snapshot())
    }

    pub fn request_reveal(&mut self) -> Action {
        if self.phase() != Phase::Active || self.session.reveal_level >= MAX_REVEAL_LEVEL {
            return Action::Ignored;
        }

        self.session.reveal_level += 1;
        if self.session.reveal_level == MAX_REVEAL_LEVEL {
            debug!("fully revealed without a correct guess");
            self.lose();
        }

        Action::Applied(self.snapshot())
    }

    /// One elapsed second of the countdown started by the load identified
    /// by `token`.
    pub fn tick(&mut self, token: TimerToken) -> Action {
        let countdown = &mut self.session.countdown;
        if countdown.token != token || !countdown.running || countdown.seconds == 0 {
            return Action::Ignored;
        }

        countdown.seconds -= 1;
        if countdown.seconds == 0 {
            countdown.running = false;
            if self.session.feedback != Feedback::Correct {
                debug!("timer expired");
                self.session.reveal_level = MAX_REVEAL_LEVEL;
                self.lose();
            }
        }

        Action::Applied(self.snapshot())
    }

    /// Leaves the current challenge, marking it completed, and moves on to
    /// a random unfinished challenge in practice mode.
    pub fn advance(&mut self) -> Action {
        let Some(challenge) = self.current_challenge() else {
            return Action::Ignored;
        };
        let id = challenge.id;

        // No-op for challenges already won, apart from retrying a failed save.
        log_store_failure(self.store.record_completion(id));

        if self.session.mode == GameMode::Daily {
            info!("leaving daily challenge for practice");
        }
        self.load_unplayed();
        Action::Applied(self.snapshot())
    }

    pub fn restart(&mut self) -> Action {
        self.session.score = 0;
        self.session.exhausted = false;

        match self.session.mode {
            GameMode::Daily => self.load_challenge(self.daily_index(), GameMode::Daily),
            GameMode::Practice => self.load_unplayed(),
        }
        Action::Applied(self.snapshot())
    }

    pub fn reset_progress(&mut self) -> Action {
        log_store_failure(self.store.reset());
        info!("progress reset");

        self.session.score = 0;
        self.session.exhausted = false;
        self.load_challenge(self.daily_index(), GameMode::Daily);
        Action::Applied(self.snapshot())
    }

    pub fn switch_mode(&mut self, mode: GameMode) -> Action {
        if mode == self.session.mode && !self.session.exhausted {
            return Action::Ignored;
        }

        match mode {
            GameMode::Daily => {
                if self.store.state().has_played_on(self.clock.today()) {
                    return Action::Ignored;
                }
                self.load_challenge(self.daily_index(), GameMode::Daily);
            }
            GameMode::Practice => {
                if self.session.exhausted {
                    return Action::Ignored;
                }
                self.load_unplayed();
            }
        }
        Action::Applied(self.snapshot())
    }

    fn current_challenge(&self) -> Option<&Challenge> {
        self.session.challenge_index.and_then(|i| self.catalog.get(i))
    }

    fn daily_index(&self) -> usize {
        daily_challenge_index(self.clock.today(), &self.catalog)
    }

    fn is_on_todays_challenge(&self) -> bool {
        self.session.challenge_index == Some(self.daily_index())
    }

    fn lose(&mut self) {
        self.session.feedback = Feedback::Incorrect;
        self.session.countdown.running = false;
    }

    fn fresh_token(&mut self) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        token
    }

    fn load_challenge(&mut self, index: usize, mode: GameMode) {
        let Some(challenge) = self.catalog.get(index) else {
            warn!(index, "challenge index out of range");
            return;
        };
        let options = shuffle_options(challenge, &mut self.rng);
        debug!(id = challenge.id, index, ?mode, "challenge loaded");

        let token = self.fresh_token();
        let s = &mut self.session;
        s.challenge_index = Some(index);
        s.reveal_level = 1;
        s.selected_answer.clear();
        s.feedback = Feedback::None;
        s.countdown = Countdown::start(token);
        s.mode = mode;
        s.shuffled_options = options;
        s.exhausted = false;
    }

    fn load_unplayed(&mut self) {
        let picked = pick_unplayed(&self.catalog, &self.store.state().completed_ids, &mut self.rng);
        match picked {
            Some(index) => self.load_challenge(index, GameMode::Practice),
            None => {
                info!("no unfinished challenges left");
                let token = self.fresh_token();
                let s = &mut self.session;
                s.challenge_index = None;
                s.reveal_level = 1;
                s.selected_answer.clear();
                s.feedback = Feedback::None;
                s.countdown = Countdown::stopped(token);
                s.mode = GameMode::Practice;
                s.shuffled_options.clear();
                s.exhausted = true;
            }
        }
    }
}

fn log_store_failure<T>(result: Result<T, StoreError>) {
    if let Err(e) = result {
        warn!("progress not saved, will retry on next change: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::models::challenge::{sample_catalog, sample_challenge};
    use crate::store::memory::MemoryBackend;

    // Day 45 of the year: with 30 challenges, today's is position 16.
    fn feb_14() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()
    }

    fn controller_with(
        catalog: ChallengeCatalog,
        backend: MemoryBackend,
        date: NaiveDate,
    ) -> SessionController<MemoryBackend, StdRng> {
        SessionController::new(
            catalog,
            ProgressStore::open(backend),
            Clock::Fixed(date),
            StdRng::seed_from_u64(42),
        )
    }

    fn controller(size: u32) -> (SessionController<MemoryBackend, StdRng>, MemoryBackend) {
        let backend = MemoryBackend::default();
        (controller_with(sample_catalog(size), backend.clone(), feb_14()), backend)
    }

    fn answer_of(c: &SessionController<MemoryBackend, StdRng>) -> String {
        let index = c.snapshot().challenge_index.unwrap();
        c.catalog().get(index).unwrap().answer.clone()
    }

    fn snapshot_of(action: Action) -> SessionSnapshot {
        match action {
            Action::Applied(snapshot) => snapshot,
            Action::Ignored => panic!("action was ignored"),
        }
    }

    #[test]
    fn test_starts_on_daily_challenge() {
        let (c, _) = controller(30);
        let s = c.snapshot();
        assert_eq!(s.mode, GameMode::Daily);
        assert_eq!(s.challenge_id, Some(16));
        assert_eq!(s.phase, Phase::Active);
        assert_eq!(s.reveal_level, 1);
        assert_eq!(s.timer_seconds, TIMER_SECONDS);
        assert!(s.timer_running);
        assert!(s.is_todays_challenge);
        assert_eq!(s.shuffled_options.len(), 4);
        assert_eq!(s.revealed_code, "line 1\nline 2");
    }

    #[test]
    fn test_starts_in_practice_after_daily_played() {
        let backend = MemoryBackend::default();
        {
            let mut store = ProgressStore::open(backend.clone());
            store.record_completion(16).unwrap();
            store.record_daily_played(feb_14()).unwrap();
        }
        let c = controller_with(sample_catalog(30), backend, feb_14());
        let s = c.snapshot();
        assert_eq!(s.mode, GameMode::Practice);
        assert_ne!(s.challenge_id, Some(16));
        assert!(s.has_played_today);
    }

    #[test]
    fn test_new_day_returns_to_daily() {
        let backend = MemoryBackend::default();
        {
            let mut store = ProgressStore::open(backend.clone());
            store.record_daily_played(feb_14()).unwrap();
        }
        let next_day = feb_14().succ_opt().unwrap();
        let c = controller_with(sample_catalog(30), backend, next_day);
        assert_eq!(c.snapshot().mode, GameMode::Daily);
        assert_eq!(c.snapshot().challenge_id, Some(17));
    }

    #[test]
    fn test_starts_exhausted_when_everything_done() {
        let backend = MemoryBackend::default();
        {
            let mut store = ProgressStore::open(backend.clone());
            for id in 1..=3 {
                store.record_completion(id).unwrap();
            }
            store.record_daily_played(feb_14()).unwrap();
        }
        let c = controller_with(sample_catalog(3), backend, feb_14());
        let s = c.snapshot();
        assert_eq!(s.phase, Phase::NoMoreAvailable);
        assert_eq!(s.challenge_index, None);
        assert!(!s.timer_running);
        assert_eq!(c.timer_token(), None);
    }

    #[test]
    fn test_correct_guess_at_level_four() {
        let (mut c, _) = controller(30);
        c.request_reveal();
        c.request_reveal();
        c.request_reveal();
        assert_eq!(c.snapshot().reveal_level, 4);

        let answer = answer_of(&c);
        let s = snapshot_of(c.submit_guess(&answer));
        assert_eq!(s.phase, Phase::Won);
        assert_eq!(s.score, 20);
        assert!(!s.timer_running);
        assert!(s.is_resolved);
        assert_eq!(s.correct_answer.as_deref(), Some("answer 16"));
        assert_eq!(s.selected_answer, "answer 16");
    }

    #[test]
    fn test_correct_daily_guess_records_progress() {
        let (mut c, backend) = controller(30);
        let answer = answer_of(&c);
        let s = snapshot_of(c.submit_guess(&answer));
        assert_eq!(s.score, 50);
        assert!(c.progress().is_completed(16));
        assert!(s.has_played_today);
        assert_eq!(
            backend.raw(crate::store::LAST_PLAYED_DATE_KEY).as_deref(),
            Some("2025-02-14")
        );
    }

    #[test]
    fn test_incorrect_guess_consumes_a_reveal() {
        let (mut c, _) = controller(30);
        let s = snapshot_of(c.submit_guess("wrong one"));
        assert_eq!(s.feedback, Feedback::None);
        assert_eq!(s.phase, Phase::Active);
        assert_eq!(s.reveal_level, 2);
        assert_eq!(s.score, 0);
        assert_eq!(s.selected_answer, "wrong one");
        assert!(!c.progress().is_completed(16));
    }

    #[test]
    fn test_incorrect_guess_at_max_keeps_level() {
        let (mut c, _) = controller(30);
        for _ in 0..6 {
            c.submit_guess("wrong two");
        }
        let s = c.snapshot();
        assert_eq!(s.reveal_level, MAX_REVEAL_LEVEL);
        assert_eq!(s.phase, Phase::Active);
    }

    #[test]
    fn test_reveal_to_max_loses() {
        let (mut c, _) = controller(30);
        for _ in 0..3 {
            c.request_reveal();
        }
        let s = snapshot_of(c.request_reveal());
        assert_eq!(s.reveal_level, 5);
        assert_eq!(s.phase, Phase::Lost);
        assert_eq!(s.feedback, Feedback::Incorrect);
        assert!(!s.timer_running);
        assert_eq!(s.revealed_code.lines().count(), 8);
        assert_eq!(s.correct_answer, None);
    }

    #[test]
    fn test_actions_ignored_once_resolved() {
        let (mut c, _) = controller(30);
        let answer = answer_of(&c);
        c.submit_guess(&answer);
        assert_eq!(c.submit_guess(&answer), Action::Ignored);
        assert_eq!(c.request_reveal(), Action::Ignored);
        assert_eq!(c.snapshot().score, 50);
    }

    #[test]
    fn test_empty_guess_ignored() {
        let (mut c, _) = controller(30);
        assert_eq!(c.submit_guess(""), Action::Ignored);
        assert_eq!(c.snapshot().reveal_level, 1);
    }

    #[test]
    fn test_timer_expiry_forces_full_reveal() {
        let (mut c, _) = controller(30);
        c.request_reveal();
        let token = c.timer_token().unwrap();
        for _ in 0..TIMER_SECONDS - 1 {
            assert!(c.tick(token).is_applied());
        }
        assert_eq!(c.snapshot().phase, Phase::Active);
        assert_eq!(c.snapshot().timer_seconds, 1);

        let s = snapshot_of(c.tick(token));
        assert_eq!(s.timer_seconds, 0);
        assert_eq!(s.reveal_level, MAX_REVEAL_LEVEL);
        assert_eq!(s.phase, Phase::Lost);
        assert!(!s.timer_running);
        assert_eq!(c.tick(token), Action::Ignored);
    }

    #[test]
    fn test_ticks_stop_after_win() {
        let (mut c, _) = controller(30);
        let token = c.timer_token().unwrap();
        c.tick(token);
        let answer = answer_of(&c);
        c.submit_guess(&answer);
        assert_eq!(c.tick(token), Action::Ignored);
        assert_eq!(c.snapshot().timer_seconds, TIMER_SECONDS - 1);
        assert_eq!(c.snapshot().phase, Phase::Won);
    }

    #[test]
    fn test_stale_token_cannot_touch_new_challenge() {
        let (mut c, _) = controller(30);
        let old = c.timer_token().unwrap();
        c.advance();
        let new = c.timer_token().unwrap();
        assert_ne!(old, new);
        assert_eq!(c.tick(old), Action::Ignored);
        assert_eq!(c.snapshot().timer_seconds, TIMER_SECONDS);
        assert!(c.tick(new).is_applied());
    }

    #[test]
    fn test_advance_marks_skipped_and_switches_to_practice() {
        let (mut c, _) = controller(30);
        let s = snapshot_of(c.advance());
        assert!(c.progress().is_completed(16));
        assert_eq!(s.mode, GameMode::Practice);
        assert_ne!(s.challenge_id, Some(16));
        assert_eq!(s.phase, Phase::Active);
        assert!(!s.has_played_today);
    }

    #[test]
    fn test_score_carries_across_challenges() {
        let (mut c, _) = controller(30);
        let answer = answer_of(&c);
        c.submit_guess(&answer);
        c.advance();
        c.request_reveal();
        let answer = answer_of(&c);
        let s = snapshot_of(c.submit_guess(&answer));
        assert_eq!(s.score, 90);
    }

    #[test]
    fn test_practice_runs_out() {
        let (mut c, _) = controller(3);
        // Feb 14 with 3 challenges: (45 % 3) + 1 = 1
        assert_eq!(c.snapshot().challenge_id, Some(1));
        c.advance();
        c.advance();
        let s = snapshot_of(c.advance());
        assert_eq!(s.phase, Phase::NoMoreAvailable);
        assert_eq!(c.progress().completed_ids.len(), 3);
        assert_eq!(c.advance(), Action::Ignored);
        assert_eq!(c.submit_guess("answer 1"), Action::Ignored);
    }

    #[test]
    fn test_restart_resets_score_and_reloads_daily() {
        let (mut c, _) = controller(30);
        let answer = answer_of(&c);
        c.submit_guess(&answer);
        let s = snapshot_of(c.restart());
        assert_eq!(s.score, 0);
        assert_eq!(s.mode, GameMode::Daily);
        assert_eq!(s.challenge_id, Some(16));
        assert_eq!(s.phase, Phase::Active);
        assert_eq!(s.timer_seconds, TIMER_SECONDS);
    }

    #[test]
    fn test_restart_when_exhausted_stays_exhausted() {
        let (mut c, _) = controller(2);
        c.advance();
        c.advance();
        assert_eq!(c.phase(), Phase::NoMoreAvailable);
        let s = snapshot_of(c.restart());
        assert_eq!(s.phase, Phase::NoMoreAvailable);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_reset_progress_returns_to_daily() {
        let (mut c, backend) = controller(3);
        c.advance();
        c.advance();
        c.advance();
        let s = snapshot_of(c.reset_progress());
        assert_eq!(s.mode, GameMode::Daily);
        assert_eq!(s.phase, Phase::Active);
        assert_eq!(s.challenge_id, Some(1));
        assert_eq!(s.score, 0);
        assert!(c.progress().completed_ids.is_empty());
        assert_eq!(backend.raw(crate::store::COMPLETED_CHALLENGES_KEY), None);
    }

    #[test]
    fn test_switch_mode_rules() {
        let (mut c, _) = controller(30);
        assert_eq!(c.switch_mode(GameMode::Daily), Action::Ignored);

        let s = snapshot_of(c.switch_mode(GameMode::Practice));
        assert_eq!(s.mode, GameMode::Practice);
        assert!(!c.progress().is_completed(16));

        let s = snapshot_of(c.switch_mode(GameMode::Daily));
        assert_eq!(s.challenge_id, Some(16));

        let answer = answer_of(&c);
        c.submit_guess(&answer);
        c.advance();
        assert_eq!(c.snapshot().mode, GameMode::Practice);
        assert_eq!(c.switch_mode(GameMode::Daily), Action::Ignored);
    }

    #[test]
    fn test_practice_win_on_daily_id_does_not_mark_played() {
        let (mut c, _) = controller(1);
        c.switch_mode(GameMode::Practice);
        let s = c.snapshot();
        assert_eq!(s.mode, GameMode::Practice);
        assert!(s.is_todays_challenge);
        let answer = answer_of(&c);
        let s = snapshot_of(c.submit_guess(&answer));
        assert!(!s.has_played_today);
    }

    #[test]
    fn test_write_failure_does_not_stop_play() {
        let (mut c, backend) = controller(30);
        backend.set_fail_writes(true);
        let answer = answer_of(&c);
        let s = snapshot_of(c.submit_guess(&answer));
        assert_eq!(s.phase, Phase::Won);
        assert!(c.progress().is_completed(16));
        assert_eq!(backend.raw(crate::store::COMPLETED_CHALLENGES_KEY), None);

        backend.set_fail_writes(false);
        c.advance();
        assert_eq!(
            backend.raw(crate::store::COMPLETED_CHALLENGES_KEY).as_deref(),
            Some("[16]")
        );
    }

    #[test]
    fn test_challenge_without_options_gets_stock_choices() {
        let mut challenge = sample_challenge(1, 3);
        challenge.options.clear();
        let catalog = ChallengeCatalog::new(vec![challenge]).unwrap();
        let c = controller_with(catalog, MemoryBackend::default(), feb_14());
        let s = c.snapshot();
        assert_eq!(s.shuffled_options.len(), 4);
        assert!(s.shuffled_options.contains(&"answer 1".to_string()));
    }
}
