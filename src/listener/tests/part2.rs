use super::*;

fn pair_down(listener: &mut TouchGestureListener, t_ms: u64, p0: Point, p1: Point) {
    listener.feed(&PointerEvent::first_down(t_ms, p0));
    listener.feed(&PointerEvent::pointer_down(t_ms, t_ms + 20, p0, p1));
}

#[test]
fn disabled_long_click_lets_a_held_press_click() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());
    listener.set_long_clickable(false);
    assert!(!listener.config().long_clickable);

    listener.feed(&PointerEvent::first_down(0, p(1.0, 1.0)));
    listener.tick(800);
    assert_eq!(listener.next_deadline(), None);
    assert_eq!(listener.mode(), Mode::Down);

    listener.feed(&PointerEvent::last_up(0, 900, p(1.0, 1.0)));
    assert_eq!(
        recorder.take(),
        std::vec![
            Call::Down(p(1.0, 1.0)),
            Call::Up(p(1.0, 1.0)),
            Call::Click(p(1.0, 1.0))
        ]
    );
    assert_eq!(listener.mode(), Mode::None);
}

#[test]
fn double_tap_drag_reports_incremental_moves() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    tap(&mut listener, 0, 50, p(0.0, 0.0));
    listener.feed(&PointerEvent::first_down(100, p(5.0, 5.0)));
    listener.feed(&PointerEvent::moved(100, 110, p(5.0, 12.0)));
    assert_eq!(listener.mode(), Mode::DblDown);

    listener.feed(&PointerEvent::moved(100, 120, p(5.0, 30.0)));
    assert_eq!(listener.mode(), Mode::DblMove);
    listener.feed(&PointerEvent::moved(100, 130, p(5.0, 40.0)));
    listener.feed(&PointerEvent::last_up(100, 140, p(5.0, 40.0)));
    listener.tick(10_000);

    assert_eq!(
        recorder.take(),
        std::vec![
            Call::Down(p(0.0, 0.0)),
            Call::Up(p(0.0, 0.0)),
            Call::DblDown(p(5.0, 5.0)),
            Call::DblMove(p(5.0, 5.0), p(5.0, 30.0), 0.0, 25.0),
            Call::DblMove(p(5.0, 30.0), p(5.0, 40.0), 0.0, 10.0),
            Call::DblUp(p(5.0, 40.0)),
        ]
    );
    assert_eq!(listener.mode(), Mode::None);
}

#[test]
fn held_second_tap_becomes_dbl_long_click() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    tap(&mut listener, 0, 50, p(0.0, 0.0));
    listener.feed(&PointerEvent::first_down(100, p(5.0, 5.0)));
    let _ = recorder.take();

    listener.tick(699);
    assert!(recorder.take().is_empty());

    listener.tick(700);
    assert_eq!(recorder.take(), std::vec![Call::DblLongClick(p(5.0, 5.0))]);
    assert_eq!(listener.mode(), Mode::DblUp);

    listener.feed(&PointerEvent::last_up(100, 800, p(6.0, 5.0)));
    assert_eq!(recorder.take(), std::vec![Call::DblUp(p(6.0, 5.0))]);
    assert_eq!(listener.mode(), Mode::None);
    assert_eq!(listener.next_deadline(), None);
}

#[test]
fn disabled_dbl_long_click_never_fires() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());
    listener.set_dbl_long_clickable(false);

    tap(&mut listener, 0, 50, p(0.0, 0.0));
    listener.feed(&PointerEvent::first_down(100, p(5.0, 5.0)));
    assert_eq!(listener.next_deadline(), None);

    listener.tick(5_000);
    listener.feed(&PointerEvent::last_up(100, 5_000, p(5.0, 5.0)));

    let calls = recorder.take();
    assert!(!calls
        .iter()
        .any(|call| matches!(call, Call::DblLongClick(_) | Call::LongClick(_))));
    assert_eq!(
        &calls[2..],
        &[Call::DblDown(p(5.0, 5.0)), Call::DblClick(p(5.0, 5.0)), Call::DblUp(p(5.0, 5.0))]
    );
}

#[test]
fn two_pointer_tap_reports_click_with_recorded_points() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    pair_down(&mut listener, 0, p(0.0, 0.0), p(50.0, 0.0));
    listener.feed(&PointerEvent::pair_moved(0, 40, p(2.0, 0.0), p(52.0, 0.0)));
    assert_eq!(listener.mode(), Mode::MultiDown);

    listener.feed(&PointerEvent::pointer_up(0, 60, p(2.0, 0.0), p(52.0, 0.0)));
    assert_eq!(listener.mode(), Mode::None);
    listener.feed(&PointerEvent::last_up(0, 80, p(2.0, 0.0)));
    listener.tick(10_000);

    assert_eq!(
        recorder.take(),
        std::vec![
            Call::Down(p(0.0, 0.0)),
            Call::MultiDown(p(0.0, 0.0), p(50.0, 0.0)),
            Call::MultiClick(p(0.0, 0.0), p(50.0, 0.0)),
            Call::MultiUp(p(0.0, 0.0), p(50.0, 0.0)),
        ]
    );
    assert_eq!(listener.mode(), Mode::None);
}

#[test]
fn two_pointer_drag_reports_moves_and_current_up() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    pair_down(&mut listener, 0, p(0.0, 0.0), p(50.0, 0.0));
    listener.feed(&PointerEvent::pair_moved(0, 40, p(0.0, 0.0), p(50.0, 15.0)));
    assert_eq!(listener.mode(), Mode::MultiMove);
    listener.feed(&PointerEvent::pair_moved(0, 60, p(0.0, 0.0), p(50.0, 30.0)));
    listener.feed(&PointerEvent::pointer_up(0, 80, p(0.0, 0.0), p(50.0, 30.0)));

    assert_eq!(
        recorder.take(),
        std::vec![
            Call::Down(p(0.0, 0.0)),
            Call::MultiDown(p(0.0, 0.0), p(50.0, 0.0)),
            Call::MultiMove(
                [p(0.0, 0.0), p(50.0, 0.0)],
                [p(0.0, 0.0), p(50.0, 15.0)]
            ),
            Call::MultiMove(
                [p(0.0, 0.0), p(50.0, 15.0)],
                [p(0.0, 0.0), p(50.0, 30.0)]
            ),
            Call::MultiUp(p(0.0, 0.0), p(50.0, 30.0)),
        ]
    );
    assert_eq!(listener.mode(), Mode::None);
    assert_eq!(listener.next_deadline(), None);
}

#[test]
fn held_two_pointers_become_multi_long_click() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    pair_down(&mut listener, 0, p(0.0, 0.0), p(50.0, 0.0));
    let _ = recorder.take();

    listener.tick(599);
    assert!(recorder.take().is_empty());

    listener.tick(600);
    assert_eq!(
        recorder.take(),
        std::vec![Call::MultiLongClick(p(0.0, 0.0), p(50.0, 0.0))]
    );
    assert_eq!(listener.mode(), Mode::MultiUp);

    listener.feed(&PointerEvent::pointer_up(0, 700, p(1.0, 0.0), p(51.0, 0.0)));
    listener.feed(&PointerEvent::last_up(0, 720, p(1.0, 0.0)));
    assert_eq!(
        recorder.take(),
        std::vec![Call::MultiUp(p(1.0, 0.0), p(51.0, 0.0))]
    );
    assert_eq!(listener.mode(), Mode::None);
}

#[test]
fn disabled_multi_long_click_never_fires() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());
    listener.set_multi_long_clickable(false);

    pair_down(&mut listener, 0, p(0.0, 0.0), p(50.0, 0.0));
    listener.tick(5_000);
    assert_eq!(listener.mode(), Mode::MultiDown);
    assert!(!recorder
        .take()
        .iter()
        .any(|call| matches!(call, Call::MultiLongClick(..) | Call::LongClick(_))));
}

#[test]
fn second_pointer_during_drag_is_ignored() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    listener.feed(&PointerEvent::first_down(0, p(0.0, 0.0)));
    listener.feed(&PointerEvent::moved(0, 20, p(30.0, 0.0)));
    listener.feed(&PointerEvent::pointer_down(0, 40, p(30.0, 0.0), p(90.0, 0.0)));

    assert_eq!(listener.mode(), Mode::Move);
    assert!(!recorder
        .take()
        .iter()
        .any(|call| matches!(call, Call::MultiDown(..))));
}

#[test]
fn cancel_returns_to_none_and_rearms_single_long_press() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    pair_down(&mut listener, 0, p(0.0, 0.0), p(50.0, 0.0));
    listener.feed(&PointerEvent::cancel(0, 30));
    assert_eq!(listener.mode(), Mode::None);
    assert_eq!(listener.next_deadline(), None);
    let _ = recorder.take();

    listener.feed(&PointerEvent::first_down(1_000, p(7.0, 7.0)));
    listener.tick(1_600);
    assert_eq!(
        recorder.take(),
        std::vec![Call::Down(p(7.0, 7.0)), Call::LongClick(p(7.0, 7.0))]
    );
}

#[test]
fn cleared_observer_falls_back_to_logging() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());
    listener.set_on_detect_single(None);

    tap(&mut listener, 0, 50, p(0.0, 0.0));
    listener.tick(1_000);

    assert!(recorder.take().is_empty());
    assert_eq!(listener.mode(), Mode::None);
}

#[test]
fn move_and_lift_without_down_are_ignored() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    listener.feed(&PointerEvent::moved(0, 10, p(50.0, 50.0)));
    listener.feed(&PointerEvent::last_up(0, 20, p(50.0, 50.0)));
    listener.tick(1_000);

    assert!(recorder.take().is_empty());
    assert_eq!(listener.mode(), Mode::None);
}

#[test]
fn slow_tap_clicks_on_lift() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    tap(&mut listener, 0, 400, p(2.0, 2.0));

    assert_eq!(
        recorder.take(),
        std::vec![
            Call::Down(p(2.0, 2.0)),
            Call::Up(p(2.0, 2.0)),
            Call::Click(p(2.0, 2.0))
        ]
    );
    assert_eq!(listener.mode(), Mode::None);
}

#[test]
fn quick_far_second_tap_clicks_both() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    tap(&mut listener, 0, 50, p(0.0, 0.0));
    tap(&mut listener, 150, 200, p(300.0, 0.0));
    listener.tick(450);

    assert_eq!(
        recorder.take(),
        std::vec![
            Call::Down(p(0.0, 0.0)),
            Call::Up(p(0.0, 0.0)),
            Call::Click(p(0.0, 0.0)),
            Call::Down(p(300.0, 0.0)),
            Call::Up(p(300.0, 0.0)),
            Call::Click(p(300.0, 0.0)),
        ]
    );
}

#[test]
fn configured_timeouts_move_the_long_press_deadline() {
    let config = GestureConfig {
        long_press_timeout_ms: 800,
        ..GestureConfig::default()
    };
    let (mut listener, recorder) = recording_listener(config);

    listener.feed(&PointerEvent::first_down(0, p(0.0, 0.0)));
    listener.tick(899);
    assert_eq!(recorder.take(), std::vec![Call::Down(p(0.0, 0.0))]);

    listener.tick(900);
    assert_eq!(recorder.take(), std::vec![Call::LongClick(p(0.0, 0.0))]);
}

#[test]
fn quick_re_press_after_lift_is_a_double_click() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    tap(&mut listener, 0, 50, p(0.0, 0.0));
    tap(&mut listener, 70, 100, p(5.0, 5.0));
    listener.tick(10_000);

    assert_eq!(
        recorder.take(),
        std::vec![
            Call::Down(p(0.0, 0.0)),
            Call::Up(p(0.0, 0.0)),
            Call::DblDown(p(5.0, 5.0)),
            Call::DblClick(p(5.0, 5.0)),
            Call::DblUp(p(5.0, 5.0)),
        ]
    );
    assert_eq!(listener.mode(), Mode::None);
}

#[test]
fn double_tap_move_threshold_is_exclusive_at_slop() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    tap(&mut listener, 0, 50, p(0.0, 0.0));
    listener.feed(&PointerEvent::first_down(100, p(5.0, 5.0)));
    listener.feed(&PointerEvent::moved(100, 110, p(11.0, 13.0)));
    assert_eq!(listener.mode(), Mode::DblDown);

    listener.feed(&PointerEvent::moved(100, 120, p(5.0, 15.5)));
    assert_eq!(listener.mode(), Mode::DblMove);
    assert_eq!(
        recorder.take(),
        std::vec![
            Call::Down(p(0.0, 0.0)),
            Call::Up(p(0.0, 0.0)),
            Call::DblDown(p(5.0, 5.0)),
            Call::DblMove(p(5.0, 5.0), p(5.0, 15.5), 0.0, 10.5),
        ]
    );
}

#[test]
fn two_pointer_move_threshold_is_exclusive_at_slop() {
    let (mut listener, recorder) = recording_listener(GestureConfig::default());

    pair_down(&mut listener, 0, p(0.0, 0.0), p(50.0, 0.0));
    listener.feed(&PointerEvent::pair_moved(0, 30, p(0.0, 0.0), p(56.0, 8.0)));
    assert_eq!(listener.mode(), Mode::MultiDown);

    listener.feed(&PointerEvent::pair_moved(0, 40, p(0.0, 0.0), p(50.0, 10.5)));
    assert_eq!(listener.mode(), Mode::MultiMove);
    assert_eq!(
        recorder.take(),
        std::vec![
            Call::Down(p(0.0, 0.0)),
            Call::MultiDown(p(0.0, 0.0), p(50.0, 0.0)),
            Call::MultiMove(
                [p(0.0, 0.0), p(50.0, 0.0)],
                [p(0.0, 0.0), p(50.0, 10.5)]
            ),
        ]
    );
}
