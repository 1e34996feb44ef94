//! Observer interfaces receiving classified gestures.
//!
//! Each family is registered independently on the listener. When nothing is
//! registered the listener falls back to [`LogObserver`].

use crate::pointer::Point;

/// Single-pointer gestures: press, drag, fling, tap and long-press.
pub trait OnDetectSingle {
    fn on_down(&mut self, point: Point);
    /// `dx`, `dy` are the scroll distance since the last report, previous minus current.
    fn on_move(&mut self, from: Point, to: Point, dx: f32, dy: f32);
    fn on_fling(&mut self, from: Point, to: Point, vx: f32, vy: f32);
    fn on_up(&mut self, point: Point);
    fn on_click(&mut self, point: Point);
    fn on_long_click(&mut self, point: Point);
}

/// Gestures of the second tap of a double tap.
pub trait OnDetectDouble {
    fn on_dbl_down(&mut self, point: Point);
    fn on_dbl_move(&mut self, from: Point, to: Point, dx: f32, dy: f32);
    fn on_dbl_up(&mut self, point: Point);
    fn on_dbl_click(&mut self, point: Point);
    fn on_dbl_long_click(&mut self, point: Point);
}

/// Two-pointer gestures.
pub trait OnDetectMulti {
    fn on_multi_down(&mut self, p0: Point, p1: Point);
    fn on_multi_move(&mut self, old_p0: Point, old_p1: Point, new_p0: Point, new_p1: Point);
    fn on_multi_up(&mut self, p0: Point, p1: Point);
    fn on_multi_click(&mut self, p0: Point, p1: Point);
    fn on_multi_long_click(&mut self, p0: Point, p1: Point);
}

/// Default observer for every family. Logs each callback at `info` and does
/// nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl OnDetectSingle for LogObserver {
    fn on_down(&mut self, point: Point) {
        log::info!("gesture: on_down x={} y={}", point.x, point.y);
    }

    fn on_move(&mut self, from: Point, to: Point, dx: f32, dy: f32) {
        log::info!(
            "gesture: on_move from=({}, {}) to=({}, {}) dx={} dy={}",
            from.x,
            from.y,
            to.x,
            to.y,
            dx,
            dy
        );
    }

    fn on_fling(&mut self, from: Point, to: Point, vx: f32, vy: f32) {
        log::info!(
            "gesture: on_fling from=({}, {}) to=({}, {}) vx={} vy={}",
            from.x,
            from.y,
            to.x,
            to.y,
            vx,
            vy
        );
    }

    fn on_up(&mut self, point: Point) {
        log::info!("gesture: on_up x={} y={}", point.x, point.y);
    }

    fn on_click(&mut self, point: Point) {
        log::info!("gesture: on_click x={} y={}", point.x, point.y);
    }

    fn on_long_click(&mut self, point: Point) {
        log::info!("gesture: on_long_click x={} y={}", point.x, point.y);
    }
}

impl OnDetectDouble for LogObserver {
    fn on_dbl_down(&mut self, point: Point) {
        log::info!("gesture: on_dbl_down x={} y={}", point.x, point.y);
    }

    fn on_dbl_move(&mut self, from: Point, to: Point, dx: f32, dy: f32) {
        log::info!(
            "gesture: on_dbl_move from=({}, {}) to=({}, {}) dx={} dy={}",
            from.x,
            from.y,
            to.x,
            to.y,
            dx,
            dy
        );
    }

    fn on_dbl_up(&mut self, point: Point) {
        log::info!("gesture: on_dbl_up x={} y={}", point.x, point.y);
    }

    fn on_dbl_click(&mut self, point: Point) {
        log::info!("gesture: on_dbl_click x={} y={}", point.x, point.y);
    }

    fn on_dbl_long_click(&mut self, point: Point) {
        log::info!("gesture: on_dbl_long_click x={} y={}", point.x, point.y);
    }
}

impl OnDetectMulti for LogObserver {
    fn on_multi_down(&mut self, p0: Point, p1: Point) {
        log_pair("on_multi_down", p0, p1);
    }

    fn on_multi_move(&mut self, old_p0: Point, old_p1: Point, new_p0: Point, new_p1: Point) {
        log::info!(
            "gesture: on_multi_move p0=({}, {})->({}, {}) p1=({}, {})->({}, {})",
            old_p0.x,
            old_p0.y,
            new_p0.x,
            new_p0.y,
            old_p1.x,
            old_p1.y,
            new_p1.x,
            new_p1.y
        );
    }

    fn on_multi_up(&mut self, p0: Point, p1: Point) {
        log_pair("on_multi_up", p0, p1);
    }

    fn on_multi_click(&mut self, p0: Point, p1: Point) {
        log_pair("on_multi_click", p0, p1);
    }

    fn on_multi_long_click(&mut self, p0: Point, p1: Point) {
        log_pair("on_multi_long_click", p0, p1);
    }
}

fn log_pair(callback: &str, p0: Point, p1: Point) {
    log::info!(
        "gesture: {} p0=({}, {}) p1=({}, {})",
        callback,
        p0.x,
        p0.y,
        p1.x,
        p1.y
    );
}

/// The three registered observer families.
pub(crate) struct Observers {
    pub(crate) single: Box<dyn OnDetectSingle>,
    pub(crate) double: Box<dyn OnDetectDouble>,
    pub(crate) multi: Box<dyn OnDetectMulti>,
}

impl Default for Observers {
    fn default() -> Self {
        Self {
            single: Box::new(LogObserver),
            double: Box::new(LogObserver),
            multi: Box::new(LogObserver),
        }
    }
}

impl Observers {
    pub(crate) fn set_single(&mut self, observer: Option<Box<dyn OnDetectSingle>>) {
        self.single = observer.unwrap_or_else(|| Box::new(LogObserver));
    }

    pub(crate) fn set_double(&mut self, observer: Option<Box<dyn OnDetectDouble>>) {
        self.double = observer.unwrap_or_else(|| Box::new(LogObserver));
    }

    pub(crate) fn set_multi(&mut self, observer: Option<Box<dyn OnDetectMulti>>) {
        self.multi = observer.unwrap_or_else(|| Box::new(LogObserver));
    }
}
