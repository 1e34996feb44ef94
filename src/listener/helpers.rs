use super::*;

impl DispatchContext {
    pub(super) fn new(config: GestureConfig) -> Self {
        let mut context = Self {
            config,
            timers: DeferredTimers::new(),
            detector: TapDetector::new(),
            observers: Observers::default(),
            single_long_press_allowed: true,
        };
        context.set_single_long_press(true);
        context
    }

    /// Single-pointer long-press runs only while no double-tap or two-pointer
    /// gesture holds it off and `long_clickable` is set.
    pub(super) fn set_single_long_press(&mut self, allowed: bool) {
        self.single_long_press_allowed = allowed;
        let enabled = allowed && self.config.long_clickable;
        if enabled != self.detector.is_long_press_enabled() {
            log::debug!("gesture: single long press enabled={}", enabled);
        }
        self.detector
            .set_long_press_enabled(enabled, &mut self.timers);
    }
}

impl GestureHsm {
    pub(super) fn new() -> Self {
        Self {
            down_point: Point::default(),
            dbl_previous: Point::default(),
            multi_previous: [Point::default(); 2],
        }
    }

    pub(super) fn begin_single(&mut self, context: &mut DispatchContext, point: Point) {
        context.timers.cancel(TimerKey::DblLongPress);
        context.timers.cancel(TimerKey::MultiLongPress);
        self.down_point = point;
        context.observers.single.on_down(point);
    }

    pub(super) fn enter_double(
        &mut self,
        context: &mut DispatchContext,
        point: Point,
        down_time_ms: u64,
    ) {
        context.set_single_long_press(false);
        self.dbl_previous = point;
        context.observers.double.on_dbl_down(point);
        if context.config.dbl_long_clickable {
            let fire_at_ms = context.config.long_press_deadline(down_time_ms);
            context
                .timers
                .schedule(TimerKey::DblLongPress, fire_at_ms, TimerPayload::Point(point));
        }
    }

    pub(super) fn leave_double(&mut self, context: &mut DispatchContext) {
        context.set_single_long_press(true);
        context.timers.cancel(TimerKey::DblLongPress);
    }

    pub(super) fn emit_dbl_move(&mut self, context: &mut DispatchContext, point: Point) {
        let from = self.dbl_previous;
        context
            .observers
            .double
            .on_dbl_move(from, point, point.x - from.x, point.y - from.y);
        self.dbl_previous = point;
    }

    pub(super) fn enter_multi(
        &mut self,
        context: &mut DispatchContext,
        points: [Point; 2],
        down_time_ms: u64,
    ) {
        context.set_single_long_press(false);
        context.detector.cancel_taps(&mut context.timers);
        context.timers.cancel(TimerKey::DblLongPress);
        self.multi_previous = points;
        let [p0, p1] = points;
        context.observers.multi.on_multi_down(p0, p1);
        if context.config.multi_long_clickable {
            let fire_at_ms = context.config.long_press_deadline(down_time_ms);
            context.timers.schedule(
                TimerKey::MultiLongPress,
                fire_at_ms,
                TimerPayload::Pair(p0, p1),
            );
        }
    }

    pub(super) fn leave_multi(&mut self, context: &mut DispatchContext) {
        context.set_single_long_press(true);
        context.timers.cancel(TimerKey::MultiLongPress);
    }

    pub(super) fn multi_beyond_slop(&self, points: [Point; 2], slop: f32) -> bool {
        let [old0, old1] = self.multi_previous;
        beyond_slop(old0, points[0], slop) || beyond_slop(old1, points[1], slop)
    }

    pub(super) fn emit_multi_move(&mut self, context: &mut DispatchContext, points: [Point; 2]) {
        let [old0, old1] = self.multi_previous;
        context
            .observers
            .multi
            .on_multi_move(old0, old1, points[0], points[1]);
        self.multi_previous = points;
    }
}
