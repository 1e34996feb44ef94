#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Phase of a normalized pointer sample.
///
/// `FirstDown`/`LastUp` open and close a gesture sequence, `PointerDown`/
/// `PointerUp` add or remove the second pointer while the first one stays in
/// contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    FirstDown,
    PointerDown,
    Move,
    PointerUp,
    LastUp,
    Cancel,
}

/// One input sample delivered by the host.
///
/// `down_time_ms` is the time the current sequence started (first pointer
/// contact), `event_time_ms` the time of this sample. Both share the host's
/// monotonic millisecond clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pointer_count: u8,
    pub points: [Point; 2],
    pub down_time_ms: u64,
    pub event_time_ms: u64,
}

impl PointerEvent {
    pub fn first_down(t_ms: u64, point: Point) -> Self {
        Self::single(PointerPhase::FirstDown, t_ms, t_ms, point)
    }

    pub fn moved(down_time_ms: u64, t_ms: u64, point: Point) -> Self {
        Self::single(PointerPhase::Move, down_time_ms, t_ms, point)
    }

    pub fn last_up(down_time_ms: u64, t_ms: u64, point: Point) -> Self {
        Self::single(PointerPhase::LastUp, down_time_ms, t_ms, point)
    }

    pub fn pointer_down(down_time_ms: u64, t_ms: u64, p0: Point, p1: Point) -> Self {
        Self::pair(PointerPhase::PointerDown, down_time_ms, t_ms, p0, p1)
    }

    pub fn pair_moved(down_time_ms: u64, t_ms: u64, p0: Point, p1: Point) -> Self {
        Self::pair(PointerPhase::Move, down_time_ms, t_ms, p0, p1)
    }

    pub fn pointer_up(down_time_ms: u64, t_ms: u64, p0: Point, p1: Point) -> Self {
        Self::pair(PointerPhase::PointerUp, down_time_ms, t_ms, p0, p1)
    }

    pub fn cancel(down_time_ms: u64, t_ms: u64) -> Self {
        Self {
            phase: PointerPhase::Cancel,
            pointer_count: 0,
            points: [Point::default(); 2],
            down_time_ms,
            event_time_ms: t_ms,
        }
    }

    pub fn primary(&self) -> Point {
        self.points[0]
    }

    fn single(phase: PointerPhase, down_time_ms: u64, t_ms: u64, point: Point) -> Self {
        Self {
            phase,
            pointer_count: 1,
            points: [point, Point::default()],
            down_time_ms,
            event_time_ms: t_ms,
        }
    }

    fn pair(phase: PointerPhase, down_time_ms: u64, t_ms: u64, p0: Point, p1: Point) -> Self {
        Self {
            phase,
            pointer_count: 2,
            points: [p0, p1],
            down_time_ms,
            event_time_ms: t_ms,
        }
    }
}
