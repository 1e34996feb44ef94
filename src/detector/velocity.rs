use crate::pointer::Point;

const VELOCITY_HISTORY: usize = 20;
const VELOCITY_HORIZON_MS: u64 = 100;

/// Recent pointer samples of the current press, oldest first.
#[derive(Debug, Default)]
pub(crate) struct VelocityTracker {
    samples: heapless::Deque<(u64, Point), VELOCITY_HISTORY>,
}

impl VelocityTracker {
    pub(crate) fn add(&mut self, t_ms: u64, point: Point) {
        if self.samples.is_full() {
            let _ = self.samples.pop_front();
        }
        let _ = self.samples.push_back((t_ms, point));
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }

    /// Velocity in units per second over the samples within the horizon of
    /// the newest one, each axis clamped to `max`.
    pub(crate) fn velocity(&self, max: f32) -> (f32, f32) {
        let Some(&(last_ms, last)) = self.samples.back() else {
            return (0.0, 0.0);
        };
        let Some(&(first_ms, first)) = self
            .samples
            .iter()
            .find(|(t_ms, _)| last_ms.saturating_sub(*t_ms) <= VELOCITY_HORIZON_MS)
        else {
            return (0.0, 0.0);
        };

        let dt_ms = last_ms.saturating_sub(first_ms);
        if dt_ms == 0 {
            return (0.0, 0.0);
        }
        let secs = dt_ms as f32 / 1_000.0;
        let vx = (last.x - first.x) / secs;
        let vy = (last.y - first.y) / secs;
        (vx.max(-max).min(max), vy.max(-max).min(max))
    }
}
