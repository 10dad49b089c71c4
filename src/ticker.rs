use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::session::TimerToken;

/// Once-per-second source of ticks for a single countdown. Dropping or
/// cancelling it stops the thread before its next send.
pub struct Ticker {
    token: TimerToken,
    cancelled: Arc<AtomicBool>,
}

impl Ticker {
    pub fn spawn<E, F>(token: TimerToken, period: Duration, events: Sender<E>, make_event: F) -> Self
    where
        E: Send + 'static,
        F: Fn(TimerToken) -> E + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Acquire) {
                break;
            }
            if events.send(make_event(token)).is_err() {
                break;
            }
        });

        Self { token, cancelled }
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Keeps at most one ticker alive, matching the controller's current token.
#[derive(Default)]
pub struct TickerSlot {
    current: Option<Ticker>,
}

impl TickerSlot {
    /// Starts, replaces or stops the ticker so it follows `wanted`.
    pub fn sync<E, F>(&mut self, wanted: Option<TimerToken>, period: Duration, events: &Sender<E>, make_event: F)
    where
        E: Send + 'static,
        F: Fn(TimerToken) -> E + Send + 'static,
    {
        let running = self.current.as_ref().map(Ticker::token);
        if running == wanted {
            return;
        }

        self.current = wanted.map(|token| Ticker::spawn(token, period, events.clone(), make_event));
    }
}
