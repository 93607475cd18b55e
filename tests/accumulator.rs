use navstate::backends::virtual_input::VirtualChannel;
use navstate::{Accumulator, ButtonEvent, DeviceState, MotionSample};

fn open_accumulator() -> Accumulator<VirtualChannel> {
    let mut acc = Accumulator::new(VirtualChannel::new("virtual:test"));
    acc.open_channel().expect("virtual channel opens");
    acc
}

#[test]
fn fresh_accumulator_reads_zero_state() {
    let acc = Accumulator::new(VirtualChannel::new("virtual:test"));
    assert!(!acc.is_running());
    assert_eq!(acc.state(), DeviceState::default());
    assert_eq!(acc.motion(), MotionSample::default());
    assert_eq!(acc.button(), ButtonEvent::default());
    assert_eq!(acc.state().to_string(), "0 0 0 0 0 0 0 0");
}

#[test]
fn empty_step_leaves_everything_unchanged() {
    let mut acc = open_accumulator();
    acc.channel_mut()
        .push_motion(MotionSample::new(3, 2, 1, 0, -1, -2));
    acc.channel_mut().press_button(1);
    acc.step();

    let (motion, button, state) = (acc.motion(), acc.button(), acc.state());
    assert_eq!(acc.step(), 0);
    assert_eq!(acc.step(), 0);
    assert_eq!(acc.motion(), motion);
    assert_eq!(acc.button(), button);
    assert_eq!(acc.state(), state);
}

#[test]
fn last_motion_in_a_burst_wins() {
    let mut acc = open_accumulator();
    let burst = [
        MotionSample::new(1, 1, 1, 1, 1, 1),
        MotionSample::new(-20, 4, 0, 7, 0, 3),
        MotionSample::new(350, -350, 12, 0, 0, -9),
    ];
    for m in burst {
        acc.channel_mut().push_motion(m);
    }

    assert_eq!(acc.step(), 3);
    assert_eq!(acc.motion(), burst[2]);
    assert_eq!(acc.state().motion(), burst[2]);
}

#[test]
fn presses_on_both_buttons_latch_independently() {
    let mut acc = open_accumulator();
    acc.channel_mut().press_button(0);
    acc.channel_mut().press_button(1);
    acc.step();

    let s = acc.state();
    assert!(s.button0_pressed);
    assert!(s.button1_pressed);
}

#[test]
fn release_in_the_same_batch_is_not_lost() {
    let mut acc = open_accumulator();
    acc.channel_mut().press_button(0);
    acc.channel_mut().release_button(0);

    assert_eq!(acc.step(), 2);
    assert!(!acc.state().button0_pressed);
    assert_eq!(acc.button(), ButtonEvent::released(0));
}

#[test]
fn closed_channel_is_never_polled() {
    let mut acc = open_accumulator();
    acc.channel_mut().press_button(1);
    acc.step();
    let before = acc.state();

    acc.close_channel().expect("close");
    acc.channel_mut().release_button(1);
    let calls = acc.channel().recv_calls();

    assert_eq!(acc.step(), 0);
    assert_eq!(acc.channel().recv_calls(), calls);
    assert_eq!(acc.state(), before);
    assert_eq!(acc.channel().pending(), 1);
}

#[test]
fn failed_open_leaves_polling_disabled() {
    let mut acc = Accumulator::new(VirtualChannel::unavailable("virtual:missing"));
    assert!(acc.open_channel().is_err());
    acc.channel_mut().press_button(0);

    assert_eq!(acc.step(), 0);
    assert_eq!(acc.channel().recv_calls(), 0);
    assert_eq!(acc.state(), DeviceState::default());

    acc.channel_mut().set_available(true);
    acc.open_channel().expect("reopen");
    acc.step();
    assert!(acc.state().button0_pressed);
}

#[test]
fn single_motion_event_is_mirrored() {
    let mut acc = open_accumulator();
    acc.channel_mut()
        .push_motion(MotionSample::new(5, -3, 0, 1, 0, 0));
    acc.step();

    assert_eq!(acc.motion(), MotionSample::new(5, -3, 0, 1, 0, 0));
    let s = acc.state();
    assert_eq!((s.tx, s.ty, s.tz, s.rx, s.ry, s.rz), (5, -3, 0, 1, 0, 0));
}

#[test]
fn button_one_press_leaves_button_zero_alone() {
    let mut acc = open_accumulator();
    acc.channel_mut().press_button(1);
    acc.step();

    assert!(acc.state().button1_pressed);
    assert!(!acc.state().button0_pressed);
}

#[test]
fn step_after_close_keeps_previous_state() {
    let mut acc = open_accumulator();
    acc.channel_mut()
        .push_motion(MotionSample::new(9, 8, 7, 6, 5, 4));
    acc.channel_mut().press_button(0);
    acc.step();
    let before = acc.state();

    acc.close_channel().expect("close");
    acc.step();
    assert_eq!(acc.state(), before);
    assert!(!acc.is_running());
}

#[test]
fn events_fold_in_arrival_order_across_kinds() {
    let mut acc = open_accumulator();
    let ch = acc.channel_mut();
    ch.press_button(0);
    ch.push_motion(MotionSample::new(1, 0, 0, 0, 0, 0));
    ch.press_button(1);
    ch.release_button(0);
    ch.press_button(4);
    acc.step();

    let s = acc.state();
    assert!(!s.button0_pressed);
    assert!(s.button1_pressed);
    assert_eq!(s.tx, 1);
    assert_eq!(acc.button(), ButtonEvent::pressed(4));
}
