//! Single-pointer tap primitive.
//!
//! Turns one-pointer samples into press, scroll, fling, long-press,
//! tap-up, tap-confirmed and double-tap signals. Timing lives in the shared
//! [`DeferredTimers`]; the detector owns the `LongPress` and `TapConfirm`
//! keys.

mod velocity;

use crate::{
    config::GestureConfig,
    geometry::{beyond_slop, distance},
    pointer::{Point, PointerEvent, PointerPhase},
    timer::{DeferredTimers, PendingTimer, TimerKey, TimerPayload},
};

use velocity::VelocityTracker;

pub(crate) const SIGNAL_CAPACITY: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DoubleTapPhase {
    Down,
    Move,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum DetectorSignal {
    Down {
        point: Point,
    },
    Scroll {
        from: Point,
        to: Point,
        dx: f32,
        dy: f32,
    },
    Fling {
        from: Point,
        to: Point,
        vx: f32,
        vy: f32,
    },
    LongPress {
        point: Point,
    },
    SingleTapUp {
        point: Point,
    },
    SingleTapConfirmed {
        point: Point,
    },
    DoubleTap {
        phase: DoubleTapPhase,
        point: Point,
        down_time_ms: u64,
    },
}

pub(crate) type SignalQueue = heapless::Vec<DetectorSignal, SIGNAL_CAPACITY>;

fn push(out: &mut SignalQueue, signal: DetectorSignal) {
    let pushed = out.push(signal).is_ok();
    debug_assert!(pushed, "detector signal queue overflow");
}

fn payload_point(payload: TimerPayload) -> Point {
    match payload {
        TimerPayload::Point(point) | TimerPayload::Pair(point, _) => point,
    }
}

#[derive(Debug)]
pub(crate) struct TapDetector {
    long_press_enabled: bool,
    still_down: bool,
    in_long_press: bool,
    always_in_tap_region: bool,
    is_double_tapping: bool,
    defer_confirm_single_tap: bool,
    current_down: Option<PointerEvent>,
    previous_up: Option<PointerEvent>,
    last_focus: Point,
    previous_sample: Point,
    velocity: VelocityTracker,
}

impl TapDetector {
    pub(crate) fn new() -> Self {
        Self {
            long_press_enabled: true,
            still_down: false,
            in_long_press: false,
            always_in_tap_region: false,
            is_double_tapping: false,
            defer_confirm_single_tap: false,
            current_down: None,
            previous_up: None,
            last_focus: Point::default(),
            previous_sample: Point::default(),
            velocity: VelocityTracker::default(),
        }
    }

    /// Disabling also drops a long-press window that is already armed.
    pub(crate) fn set_long_press_enabled(&mut self, enabled: bool, timers: &mut DeferredTimers) {
        self.long_press_enabled = enabled;
        if !enabled {
            timers.cancel(TimerKey::LongPress);
        }
    }

    pub(crate) fn is_long_press_enabled(&self) -> bool {
        self.long_press_enabled
    }

    /// Feeds one sample with fewer than two pointers. Returns whether the
    /// sample was consumed by a recognized signal.
    pub(crate) fn on_touch_event(
        &mut self,
        event: &PointerEvent,
        config: &GestureConfig,
        timers: &mut DeferredTimers,
        out: &mut SignalQueue,
    ) -> bool {
        match event.phase {
            PointerPhase::FirstDown => self.on_down(event, config, timers, out),
            PointerPhase::Move => self.on_move(event, config, timers, out),
            PointerPhase::LastUp => self.on_up(event, config, timers, out),
            PointerPhase::Cancel => {
                self.cancel(timers);
                true
            }
            PointerPhase::PointerDown | PointerPhase::PointerUp => false,
        }
    }

    /// Handles a fired `LongPress` or `TapConfirm` timer.
    pub(crate) fn on_timer(
        &mut self,
        timer: PendingTimer,
        timers: &mut DeferredTimers,
        out: &mut SignalQueue,
    ) {
        match timer.key {
            TimerKey::LongPress => {
                timers.cancel(TimerKey::TapConfirm);
                self.defer_confirm_single_tap = false;
                self.in_long_press = true;
                push(
                    out,
                    DetectorSignal::LongPress {
                        point: payload_point(timer.payload),
                    },
                );
            }
            TimerKey::TapConfirm => {
                if self.still_down {
                    self.defer_confirm_single_tap = true;
                } else {
                    push(
                        out,
                        DetectorSignal::SingleTapConfirmed {
                            point: payload_point(timer.payload),
                        },
                    );
                }
            }
            TimerKey::DblLongPress | TimerKey::MultiLongPress => {}
        }
    }

    /// Stops tap and long-press recognition for the press in progress. Used
    /// when a second pointer lands; the first pointer stays tracked.
    pub(crate) fn cancel_taps(&mut self, timers: &mut DeferredTimers) {
        timers.cancel(TimerKey::LongPress);
        timers.cancel(TimerKey::TapConfirm);
        self.in_long_press = false;
        self.always_in_tap_region = false;
        self.is_double_tapping = false;
        self.defer_confirm_single_tap = false;
    }

    pub(crate) fn cancel(&mut self, timers: &mut DeferredTimers) {
        self.cancel_taps(timers);
        self.velocity.clear();
        self.still_down = false;
        self.previous_up = None;
    }

    fn on_down(
        &mut self,
        event: &PointerEvent,
        config: &GestureConfig,
        timers: &mut DeferredTimers,
        out: &mut SignalQueue,
    ) -> bool {
        let point = event.primary();
        match timers.take(TimerKey::TapConfirm) {
            Some(_) if self.is_considered_double_tap(event, config) => {
                self.is_double_tapping = true;
                push(
                    out,
                    DetectorSignal::DoubleTap {
                        phase: DoubleTapPhase::Down,
                        point,
                        down_time_ms: event.down_time_ms,
                    },
                );
            }
            pending => {
                // A new press outside the double-tap window settles the
                // previous tap right away.
                if let Some(previous) = pending {
                    push(
                        out,
                        DetectorSignal::SingleTapConfirmed {
                            point: payload_point(previous.payload),
                        },
                    );
                }
                timers.schedule(
                    TimerKey::TapConfirm,
                    event
                        .event_time_ms
                        .saturating_add(config.double_tap_timeout_ms),
                    TimerPayload::Point(point),
                );
            }
        }

        self.current_down = Some(*event);
        self.last_focus = point;
        self.previous_sample = point;
        self.always_in_tap_region = true;
        self.still_down = true;
        self.in_long_press = false;
        self.defer_confirm_single_tap = false;
        self.velocity.clear();
        self.velocity.add(event.event_time_ms, point);

        if self.long_press_enabled {
            timers.schedule(
                TimerKey::LongPress,
                config.long_press_deadline(event.down_time_ms),
                TimerPayload::Point(point),
            );
        }

        push(out, DetectorSignal::Down { point });
        true
    }

    fn on_move(
        &mut self,
        event: &PointerEvent,
        config: &GestureConfig,
        timers: &mut DeferredTimers,
        out: &mut SignalQueue,
    ) -> bool {
        let Some(down) = self.current_down else {
            return false;
        };
        if self.in_long_press || !self.still_down {
            return false;
        }

        let point = event.primary();
        self.velocity.add(event.event_time_ms, point);
        // Scroll distance runs from the current sample back to the last one.
        let dx = self.last_focus.x - point.x;
        let dy = self.last_focus.y - point.y;
        let mut consumed = false;

        if self.is_double_tapping {
            push(
                out,
                DetectorSignal::DoubleTap {
                    phase: DoubleTapPhase::Move,
                    point,
                    down_time_ms: event.down_time_ms,
                },
            );
            consumed = true;
        } else if self.always_in_tap_region {
            if beyond_slop(down.primary(), point, config.move_slop) {
                push(
                    out,
                    DetectorSignal::Scroll {
                        from: down.primary(),
                        to: point,
                        dx,
                        dy,
                    },
                );
                self.last_focus = point;
                self.always_in_tap_region = false;
                timers.cancel(TimerKey::TapConfirm);
                timers.cancel(TimerKey::LongPress);
            }
        } else if dx.abs() >= 1.0 || dy.abs() >= 1.0 {
            push(
                out,
                DetectorSignal::Scroll {
                    from: down.primary(),
                    to: point,
                    dx,
                    dy,
                },
            );
            self.last_focus = point;
        }

        self.previous_sample = point;
        consumed
    }

    fn on_up(
        &mut self,
        event: &PointerEvent,
        config: &GestureConfig,
        timers: &mut DeferredTimers,
        out: &mut SignalQueue,
    ) -> bool {
        if self.current_down.is_none() || !self.still_down {
            return false;
        }

        let point = event.primary();
        self.still_down = false;
        self.velocity.add(event.event_time_ms, point);

        let consumed = if self.is_double_tapping {
            push(
                out,
                DetectorSignal::DoubleTap {
                    phase: DoubleTapPhase::Up,
                    point,
                    down_time_ms: event.down_time_ms,
                },
            );
            true
        } else if self.in_long_press {
            timers.cancel(TimerKey::TapConfirm);
            self.in_long_press = false;
            false
        } else if self.always_in_tap_region {
            push(out, DetectorSignal::SingleTapUp { point });
            if self.defer_confirm_single_tap {
                push(out, DetectorSignal::SingleTapConfirmed { point });
            }
            true
        } else {
            let (vx, vy) = self.velocity.velocity(config.max_fling_velocity);
            if vx.abs() > config.min_fling_velocity || vy.abs() > config.min_fling_velocity {
                push(
                    out,
                    DetectorSignal::Fling {
                        from: self.previous_sample,
                        to: point,
                        vx,
                        vy,
                    },
                );
                true
            } else {
                false
            }
        };

        self.previous_up = Some(*event);
        self.is_double_tapping = false;
        self.defer_confirm_single_tap = false;
        self.velocity.clear();
        timers.cancel(TimerKey::LongPress);
        consumed
    }

    /// The previous press must have stayed inside the tap region, the new
    /// down must land within the double-tap window after its lift, and close
    /// enough to the previous down.
    fn is_considered_double_tap(&self, second_down: &PointerEvent, config: &GestureConfig) -> bool {
        if !self.always_in_tap_region {
            return false;
        }
        let (Some(first_down), Some(first_up)) = (self.current_down, self.previous_up) else {
            return false;
        };

        let delta_ms = second_down
            .event_time_ms
            .saturating_sub(first_up.event_time_ms);
        if delta_ms > config.double_tap_timeout_ms || delta_ms < config.double_tap_min_time_ms {
            return false;
        }

        distance(first_down.primary(), second_down.primary()) < config.double_tap_slop
    }
}
