//! Tick-driven state accumulator.
//!
//! [`Accumulator`] owns one [`DeviceChannel`] and three records: the last
//! [`MotionSample`], the last [`ButtonEvent`] and the combined [`DeviceState`].
//! Each call to [`Accumulator::step`] drains the channel **to exhaustion** and
//! folds every event into the records in arrival order.
//!
//! Draining everything matters: a press and its release can both be queued
//! between two ticks. Stopping after one event would leave the latch stuck at
//! "pressed" until the next release arrives.

use crate::device::DeviceChannel;
use crate::error::ChannelError;
use crate::event::{ButtonEvent, MotionSample, NavEvent};
use crate::snapshot::DeviceState;
use tracing::{info, trace, warn};

pub struct Accumulator<C: DeviceChannel> {
    channel: C,
    motion: MotionSample,
    button: ButtonEvent,
    state: DeviceState,
}

impl<C: DeviceChannel> Accumulator<C> {
    /// Wrap `channel` with zeroed motion and both latches released.
    ///
    /// The channel is taken as-is; if it is already open, the first `step()`
    /// will drain it.
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            motion: MotionSample::default(),
            button: ButtonEvent::default(),
            state: DeviceState::default(),
        }
    }

    /// Drain every pending event and fold it into the state.
    ///
    /// Returns the number of events folded. A closed channel is a no-op and is
    /// not polled at all. Channel errors end the drain for this tick; events
    /// already folded are kept.
    pub fn step(&mut self) -> usize {
        if !self.channel.is_open() {
            return 0;
        }

        let mut drained = 0;
        loop {
            match self.channel.try_recv() {
                Ok(Some(event)) => {
                    self.fold(event);
                    drained += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(
                        "channel {} failed after {} event(s): {}",
                        self.channel.name(),
                        drained,
                        e
                    );
                    if !self.channel.is_open() {
                        info!(
                            "channel {} closed; polling disabled until reopened",
                            self.channel.name()
                        );
                    }
                    break;
                }
            }
        }
        drained
    }

    fn fold(&mut self, event: NavEvent) {
        match event {
            NavEvent::Motion(m) => {
                trace!(
                    "got motion event: t({}, {}, {}), r({}, {}, {})",
                    m.tx,
                    m.ty,
                    m.tz,
                    m.rx,
                    m.ry,
                    m.rz
                );
                self.motion = m;
                self.state.apply_motion(&self.motion);
            }
            NavEvent::Button(b) => {
                trace!(
                    "got button {} event b({})",
                    if b.pressed { "press" } else { "release" },
                    b.button
                );
                self.button = b;
                self.state.apply_button(&self.button);
            }
        }
    }

    /// Last drained motion sample.
    #[inline]
    pub fn motion(&self) -> MotionSample {
        self.motion
    }

    /// Last drained button transition.
    #[inline]
    pub fn button(&self) -> ButtonEvent {
        self.button
    }

    #[inline]
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// `true` while the channel is open and `step()` polls it.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.channel.is_open()
    }

    pub fn open_channel(&mut self) -> Result<(), ChannelError> {
        self.channel.open()?;
        info!("opened channel {}", self.channel.name());
        Ok(())
    }

    pub fn close_channel(&mut self) -> Result<(), ChannelError> {
        self.channel.close()?;
        info!("closed channel {}", self.channel.name());
        Ok(())
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_input::VirtualChannel;

    fn running() -> Accumulator<VirtualChannel> {
        let mut acc = Accumulator::new(VirtualChannel::new("virtual:test"));
        acc.open_channel().unwrap();
        acc
    }

    #[test]
    fn step_drains_everything_queued() {
        let mut acc = running();
        let ch = acc.channel_mut();
        ch.push_motion(MotionSample::new(1, 0, 0, 0, 0, 0));
        ch.press_button(0);
        ch.push_motion(MotionSample::new(2, 0, 0, 0, 0, 0));

        assert_eq!(acc.step(), 3);
        assert_eq!(acc.channel().pending(), 0);
        assert_eq!(acc.motion().tx, 2);
        assert!(acc.state().button0_pressed);
    }

    #[test]
    fn button_record_keeps_unlatched_indices() {
        let mut acc = running();
        acc.channel_mut().press_button(5);
        acc.step();

        assert_eq!(acc.button(), ButtonEvent::pressed(5));
        assert_eq!(acc.state(), DeviceState::default());
    }

    #[test]
    fn motion_event_does_not_touch_latches() {
        let mut acc = running();
        acc.channel_mut().press_button(1);
        acc.step();
        acc.channel_mut()
            .push_motion(MotionSample::new(0, 0, 9, 0, 0, 0));
        acc.step();

        let s = acc.state();
        assert!(s.button1_pressed);
        assert_eq!(s.tz, 9);
        assert_eq!(acc.button(), ButtonEvent::pressed(1));
    }

    #[test]
    fn channel_failure_keeps_folded_events() {
        let mut acc = running();
        let ch = acc.channel_mut();
        ch.press_button(0);
        ch.queue_disconnect();
        ch.release_button(0);

        assert_eq!(acc.step(), 1);
        assert!(acc.state().button0_pressed);
        assert!(!acc.is_running());

        // The release is still queued but the channel is closed: nothing drains.
        assert_eq!(acc.step(), 0);
        assert!(acc.state().button0_pressed);
    }
}
