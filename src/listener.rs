use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::{
    config::GestureConfig,
    detector::{DetectorSignal, DoubleTapPhase, SignalQueue, TapDetector},
    geometry::beyond_slop,
    observer::{Observers, OnDetectDouble, OnDetectMulti, OnDetectSingle},
    pointer::{Point, PointerEvent, PointerPhase},
    timer::{DeferredTimers, TimerKey, TimerPayload},
};

mod helpers;

/// Classification progress shared by the single, double-tap and
/// two-pointer paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    None,
    Down,
    Move,
    Up,
    DblDown,
    DblMove,
    DblUp,
    MultiDown,
    MultiMove,
    MultiUp,
}

#[derive(Clone, Copy, Debug)]
enum GestureHsmEvent {
    Detector(DetectorSignal),
    /// A single-pointer lift the tap primitive did not claim.
    UnconsumedUp {
        point: Point,
    },
    MultiDown {
        points: [Point; 2],
        down_time_ms: u64,
    },
    MultiMove {
        points: [Point; 2],
    },
    MultiUp {
        points: [Point; 2],
    },
    DblLongPress {
        point: Point,
    },
    MultiLongPress {
        points: [Point; 2],
    },
    Cancel,
}

struct DispatchContext {
    config: GestureConfig,
    timers: DeferredTimers,
    detector: TapDetector,
    observers: Observers,
    single_long_press_allowed: bool,
}

/// Classifies pointer samples into gestures and reports them to the
/// registered observers.
///
/// Single-threaded: the host feeds events and calls [`tick`](Self::tick) from
/// the same loop, using [`next_deadline`](Self::next_deadline) to know when.
pub struct TouchGestureListener {
    machine: statig::blocking::StateMachine<GestureHsm>,
    context: DispatchContext,
}

impl Default for TouchGestureListener {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchGestureListener {
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            machine: GestureHsm::new().state_machine(),
            context: DispatchContext::new(config),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.context.config
    }

    /// `None` restores the logging default.
    pub fn set_on_detect_single(&mut self, observer: Option<Box<dyn OnDetectSingle>>) {
        self.context.observers.set_single(observer);
    }

    pub fn set_on_detect_double(&mut self, observer: Option<Box<dyn OnDetectDouble>>) {
        self.context.observers.set_double(observer);
    }

    pub fn set_on_detect_multi(&mut self, observer: Option<Box<dyn OnDetectMulti>>) {
        self.context.observers.set_multi(observer);
    }

    pub fn set_long_clickable(&mut self, enabled: bool) {
        self.context.config.long_clickable = enabled;
        let allowed = self.context.single_long_press_allowed;
        self.context.set_single_long_press(allowed);
    }

    pub fn set_dbl_long_clickable(&mut self, enabled: bool) {
        self.context.config.dbl_long_clickable = enabled;
        if !enabled {
            self.context.timers.cancel(TimerKey::DblLongPress);
        }
    }

    pub fn set_multi_long_clickable(&mut self, enabled: bool) {
        self.context.config.multi_long_clickable = enabled;
        if !enabled {
            self.context.timers.cancel(TimerKey::MultiLongPress);
        }
    }

    pub fn mode(&self) -> Mode {
        match self.machine.state() {
            State::Idle { .. } => Mode::None,
            State::Down { .. } => Mode::Down,
            State::Moving { .. } => Mode::Move,
            State::Up { .. } => Mode::Up,
            State::DblDown { .. } => Mode::DblDown,
            State::DblMoving { .. } => Mode::DblMove,
            State::DblUp { .. } => Mode::DblUp,
            State::MultiDown { .. } => Mode::MultiDown,
            State::MultiMoving { .. } => Mode::MultiMove,
            State::MultiUp { .. } => Mode::MultiUp,
        }
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.context.timers.next_deadline()
    }

    /// Feeds one pointer sample. Timers due at or before the sample's time
    /// fire first. Always reports the sample as consumed.
    pub fn feed(&mut self, event: &PointerEvent) -> bool {
        log::trace!(
            "gesture: event phase={:?} count={} x={} y={} t={}",
            event.phase,
            event.pointer_count,
            event.primary().x,
            event.primary().y,
            event.event_time_ms
        );
        self.tick(event.event_time_ms);

        if event.phase == PointerPhase::Cancel {
            self.context.detector.cancel(&mut self.context.timers);
            self.handle(&GestureHsmEvent::Cancel);
            return true;
        }

        if event.pointer_count < 2 {
            let mut signals = SignalQueue::new();
            let consumed = self.context.detector.on_touch_event(
                event,
                &self.context.config,
                &mut self.context.timers,
                &mut signals,
            );
            self.dispatch_signals(&signals);
            if !consumed && event.phase == PointerPhase::LastUp {
                self.handle(&GestureHsmEvent::UnconsumedUp {
                    point: event.primary(),
                });
            }
            return true;
        }

        let points = event.points;
        let multi = match event.phase {
            PointerPhase::PointerDown => Some(GestureHsmEvent::MultiDown {
                points,
                down_time_ms: event.down_time_ms,
            }),
            PointerPhase::Move => Some(GestureHsmEvent::MultiMove { points }),
            PointerPhase::PointerUp => Some(GestureHsmEvent::MultiUp { points }),
            PointerPhase::FirstDown | PointerPhase::LastUp | PointerPhase::Cancel => None,
        };
        if let Some(multi) = multi {
            self.handle(&multi);
        }
        true
    }

    /// Fires every timer due at `now_ms`, earliest first.
    pub fn tick(&mut self, now_ms: u64) {
        while let Some(timer) = self.context.timers.pop_due(now_ms) {
            log::trace!(
                "gesture: timer fired key={} at_ms={} now_ms={}",
                timer.key.label(),
                timer.fire_at_ms,
                now_ms
            );
            match (timer.key, timer.payload) {
                (TimerKey::LongPress | TimerKey::TapConfirm, _) => {
                    let mut signals = SignalQueue::new();
                    self.context
                        .detector
                        .on_timer(timer, &mut self.context.timers, &mut signals);
                    self.dispatch_signals(&signals);
                }
                (TimerKey::DblLongPress, TimerPayload::Point(point)) => {
                    self.handle(&GestureHsmEvent::DblLongPress { point });
                }
                (TimerKey::MultiLongPress, TimerPayload::Pair(p0, p1)) => {
                    self.handle(&GestureHsmEvent::MultiLongPress { points: [p0, p1] });
                }
                (key, payload) => {
                    debug_assert!(
                        false,
                        "timer {} fired with payload {:?}",
                        key.label(),
                        payload
                    );
                }
            }
        }
    }

    fn dispatch_signals(&mut self, signals: &SignalQueue) {
        for signal in signals {
            self.handle(&GestureHsmEvent::Detector(*signal));
        }
    }

    fn handle(&mut self, event: &GestureHsmEvent) {
        let before = self.mode();
        self.machine.handle_with_context(event, &mut self.context);
        let after = self.mode();
        if before != after {
            log::debug!("gesture: mode {:?} -> {:?} on {:?}", before, after, event);
        }
    }
}

struct GestureHsm {
    down_point: Point,
    dbl_previous: Point,
    multi_previous: [Point; 2],
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state(superstate = "classifier")]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Detector(DetectorSignal::Down { point }) => {
                self.begin_single(context, *point);
                Transition(State::down())
            }
            GestureHsmEvent::MultiDown {
                points,
                down_time_ms,
            } => {
                self.enter_multi(context, *points, *down_time_ms);
                Transition(State::multi_down())
            }
            _ => Super,
        }
    }

    #[state(superstate = "classifier")]
    fn down(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Detector(DetectorSignal::Scroll { from, to, dx, dy }) => {
                context.observers.single.on_move(*from, *to, *dx, *dy);
                Transition(State::moving())
            }
            GestureHsmEvent::Detector(DetectorSignal::LongPress { point }) => {
                if !context.config.long_clickable {
                    return Handled;
                }
                context.observers.single.on_long_click(*point);
                Transition(State::up())
            }
            GestureHsmEvent::Detector(DetectorSignal::SingleTapUp { point }) => {
                context.observers.single.on_up(*point);
                Transition(State::up())
            }
            GestureHsmEvent::Detector(DetectorSignal::DoubleTap {
                phase: DoubleTapPhase::Up,
                point,
                ..
            })
            | GestureHsmEvent::UnconsumedUp { point } => {
                context.observers.single.on_up(*point);
                Transition(State::idle())
            }
            GestureHsmEvent::MultiDown {
                points,
                down_time_ms,
            } => {
                self.enter_multi(context, *points, *down_time_ms);
                Transition(State::multi_down())
            }
            _ => Super,
        }
    }

    #[state(superstate = "classifier")]
    fn moving(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Detector(DetectorSignal::Scroll { from, to, dx, dy }) => {
                context.observers.single.on_move(*from, *to, *dx, *dy);
                Handled
            }
            GestureHsmEvent::Detector(DetectorSignal::Fling { from, to, vx, vy }) => {
                context.observers.single.on_up(self.down_point);
                context.observers.single.on_fling(*from, *to, *vx, *vy);
                Transition(State::idle())
            }
            GestureHsmEvent::UnconsumedUp { point } => {
                context.observers.single.on_up(*point);
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    #[state(superstate = "classifier")]
    fn up(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Detector(DetectorSignal::SingleTapConfirmed { point }) => {
                context.observers.single.on_click(*point);
                Transition(State::idle())
            }
            GestureHsmEvent::Detector(DetectorSignal::DoubleTap {
                phase: DoubleTapPhase::Down,
                point,
                down_time_ms,
            }) => {
                self.enter_double(context, *point, *down_time_ms);
                Transition(State::dbl_down())
            }
            // A press with nothing left to confirm starts over.
            GestureHsmEvent::Detector(DetectorSignal::Down { point }) => {
                self.begin_single(context, *point);
                Transition(State::down())
            }
            GestureHsmEvent::Detector(DetectorSignal::DoubleTap {
                phase: DoubleTapPhase::Up,
                ..
            })
            | GestureHsmEvent::UnconsumedUp { .. } => Transition(State::idle()),
            _ => Super,
        }
    }

    #[state(superstate = "classifier")]
    fn dbl_down(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Detector(DetectorSignal::DoubleTap {
                phase: DoubleTapPhase::Move,
                point,
                ..
            }) => {
                if !beyond_slop(self.dbl_previous, *point, context.config.move_slop) {
                    return Handled;
                }
                context.timers.cancel(TimerKey::DblLongPress);
                self.emit_dbl_move(context, *point);
                Transition(State::dbl_moving())
            }
            GestureHsmEvent::Detector(DetectorSignal::DoubleTap {
                phase: DoubleTapPhase::Up,
                ..
            }) => {
                self.leave_double(context);
                let point = self.dbl_previous;
                context.observers.double.on_dbl_click(point);
                context.observers.double.on_dbl_up(point);
                Transition(State::idle())
            }
            GestureHsmEvent::DblLongPress { point } => {
                context.observers.double.on_dbl_long_click(*point);
                Transition(State::dbl_up())
            }
            _ => Super,
        }
    }

    #[state(superstate = "classifier")]
    fn dbl_moving(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Detector(DetectorSignal::DoubleTap {
                phase: DoubleTapPhase::Move,
                point,
                ..
            }) => {
                self.emit_dbl_move(context, *point);
                Handled
            }
            GestureHsmEvent::Detector(DetectorSignal::DoubleTap {
                phase: DoubleTapPhase::Up,
                point,
                ..
            }) => {
                self.leave_double(context);
                context.observers.double.on_dbl_up(*point);
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    #[state(superstate = "classifier")]
    fn dbl_up(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Detector(DetectorSignal::DoubleTap {
                phase: DoubleTapPhase::Up,
                point,
                ..
            }) => {
                self.leave_double(context);
                context.observers.double.on_dbl_up(*point);
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    #[state(superstate = "classifier")]
    fn multi_down(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::MultiMove { points } => {
                if !self.multi_beyond_slop(*points, context.config.move_slop) {
                    return Handled;
                }
                context.timers.cancel(TimerKey::MultiLongPress);
                self.emit_multi_move(context, *points);
                Transition(State::multi_moving())
            }
            GestureHsmEvent::MultiUp { .. } => {
                self.leave_multi(context);
                let [p0, p1] = self.multi_previous;
                context.observers.multi.on_multi_click(p0, p1);
                context.observers.multi.on_multi_up(p0, p1);
                Transition(State::idle())
            }
            GestureHsmEvent::MultiLongPress { points: [p0, p1] } => {
                context.observers.multi.on_multi_long_click(*p0, *p1);
                Transition(State::multi_up())
            }
            _ => Super,
        }
    }

    #[state(superstate = "classifier")]
    fn multi_moving(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::MultiMove { points } => {
                self.emit_multi_move(context, *points);
                Handled
            }
            GestureHsmEvent::MultiUp { points: [p0, p1] } => {
                self.leave_multi(context);
                context.observers.multi.on_multi_up(*p0, *p1);
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    #[state(superstate = "classifier")]
    fn multi_up(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::MultiUp { points: [p0, p1] } => {
                self.leave_multi(context);
                context.observers.multi.on_multi_up(*p0, *p1);
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    /// Cancellation from any state; every other unmatched event is ignored.
    #[superstate]
    fn classifier(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Cancel => {
                context.timers.cancel(TimerKey::DblLongPress);
                context.timers.cancel(TimerKey::MultiLongPress);
                context.set_single_long_press(true);
                Transition(State::idle())
            }
            _ => Handled,
        }
    }
}
