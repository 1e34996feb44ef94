//! Keyed one-shot timers driven by the host clock.
//!
//! At most one timer per [`TimerKey`] is pending. Scheduling an already
//! pending key replaces it. Due timers are handed out one at a time, earliest
//! first, and are removed before the caller acts on them, so a handler may
//! freely schedule or cancel other keys.

use crate::pointer::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKey {
    /// Single-pointer long-press window of the tap detector.
    LongPress,
    /// Single-tap confirmation once the double-tap window has passed.
    TapConfirm,
    DblLongPress,
    MultiLongPress,
}

impl TimerKey {
    pub const COUNT: usize = 4;

    pub const fn label(self) -> &'static str {
        match self {
            Self::LongPress => "long_press",
            Self::TapConfirm => "tap_confirm",
            Self::DblLongPress => "dbl_long_press",
            Self::MultiLongPress => "multi_long_press",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimerPayload {
    Point(Point),
    Pair(Point, Point),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingTimer {
    pub key: TimerKey,
    pub fire_at_ms: u64,
    pub payload: TimerPayload,
    seq: u32,
}

#[derive(Debug, Default)]
pub struct DeferredTimers {
    pending: heapless::Vec<PendingTimer, { TimerKey::COUNT }>,
    next_seq: u32,
}

impl DeferredTimers {
    pub const fn new() -> Self {
        Self {
            pending: heapless::Vec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, key: TimerKey, fire_at_ms: u64, payload: TimerPayload) {
        let _ = self.remove(key);
        let timer = PendingTimer {
            key,
            fire_at_ms,
            payload,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        // One slot per key, and `key` was just removed.
        let pushed = self.pending.push(timer).is_ok();
        debug_assert!(pushed, "timer slots exhausted for {}", key.label());
        log::debug!("gesture: timer armed key={} at_ms={}", key.label(), fire_at_ms);
    }

    /// Returns whether a pending timer was removed.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let removed = self.remove(key).is_some();
        if removed {
            log::debug!("gesture: timer cancelled key={}", key.label());
        }
        removed
    }

    /// Removes and returns the pending timer for `key`, if any.
    pub fn take(&mut self, key: TimerKey) -> Option<PendingTimer> {
        self.remove(key)
    }

    fn remove(&mut self, key: TimerKey) -> Option<PendingTimer> {
        let index = self.pending.iter().position(|timer| timer.key == key)?;
        let timer = self.pending.swap_remove(index);
        debug_assert!(
            !self.is_pending(key),
            "duplicate timer for {}",
            key.label()
        );
        Some(timer)
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.iter().any(|timer| timer.key == key)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|timer| timer.fire_at_ms).min()
    }

    /// Removes and returns the earliest timer due at `now_ms`. Ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<PendingTimer> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.fire_at_ms <= now_ms)
            .min_by_key(|(_, timer)| (timer.fire_at_ms, timer.seq))
            .map(|(index, _)| index)?;
        Some(self.pending.swap_remove(index))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
