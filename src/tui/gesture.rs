//! Long-press detection for mouse presses on cards.
//!
//! Terminals only report button down and up, so the tracker is fed those
//! events plus a periodic tick. A press fires once the threshold elapses,
//! either on a tick while the button is still held or on release.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Press {
    card: usize,
    started: Instant,
    fired: bool,
}

#[derive(Debug)]
pub struct PressTracker {
    threshold: Duration,
    press: Option<Press>,
}

impl PressTracker {
    pub fn new(threshold: Duration) -> Self {
        PressTracker { threshold, press: None }
    }

    /// Button went down on `card`.
    pub fn press(&mut self, card: usize, now: Instant) {
        self.press = Some(Press { card, started: now, fired: false });
    }

    /// Pointer dragged over `card` (or off every card). Leaving the pressed card cancels.
    pub fn drag(&mut self, card: Option<usize>) {
        if let Some(press) = self.press {
            if card != Some(press.card) {
                self.press = None;
            }
        }
    }

    /// Fire a held press that has reached the threshold.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let press = self.press.as_mut()?;
        if !press.fired && now.duration_since(press.started) >= self.threshold {
            press.fired = true;
            return Some(press.card);
        }
        None
    }

    /// Button released over `card`. Returns the card if this completes a
    /// long-press that has not already fired.
    pub fn release(&mut self, card: Option<usize>, now: Instant) -> Option<usize> {
        let press = self.press.take()?;
        let held = now.duration_since(press.started) >= self.threshold;
        (!press.fired && held && card == Some(press.card)).then_some(press.card)
    }

    pub fn cancel(&mut self) {
        self.press = None;
    }
}
