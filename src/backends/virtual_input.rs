//! In-memory channel for tests, demos and hosts that synthesize input.
//!
//! Events are queued with [`VirtualChannel::feed`] (or the convenience
//! helpers) and handed out FIFO by `try_recv`. The queue survives open/close,
//! so events can be staged before the channel is opened.

use crate::device::DeviceChannel;
use crate::error::ChannelError;
use crate::event::{ButtonEvent, MotionSample, NavEvent};
use std::collections::VecDeque;

#[derive(Debug)]
enum Queued {
    Event(NavEvent),
    Disconnect,
}

#[derive(Debug, Default)]
pub struct VirtualChannel {
    name: String,
    queue: VecDeque<Queued>,
    open: bool,
    unavailable: bool,
    recv_calls: usize,
}

impl VirtualChannel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// A channel whose `open()` always fails, like a missing driver.
    pub fn unavailable(name: &str) -> Self {
        Self {
            unavailable: true,
            ..Self::new(name)
        }
    }

    /// Make later `open()` calls succeed (`true`) or fail (`false`).
    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    /// Queue a raw event.
    pub fn feed(&mut self, event: impl Into<NavEvent>) {
        self.queue.push_back(Queued::Event(event.into()));
    }

    pub fn push_motion(&mut self, motion: MotionSample) {
        self.feed(motion);
    }

    pub fn press_button(&mut self, button: u32) {
        self.feed(ButtonEvent::pressed(button));
    }

    pub fn release_button(&mut self, button: u32) {
        self.feed(ButtonEvent::released(button));
    }

    /// Queue a disconnect behind the events fed so far. Receiving it closes
    /// the channel and reports [`ChannelError::Disconnected`].
    pub fn queue_disconnect(&mut self) {
        self.queue.push_back(Queued::Disconnect);
    }

    /// Entries queued and not yet received.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// How many times `try_recv` has been called.
    pub fn recv_calls(&self) -> usize {
        self.recv_calls
    }
}

impl DeviceChannel for VirtualChannel {
    fn open(&mut self) -> Result<(), ChannelError> {
        if self.unavailable {
            return Err(ChannelError::Unavailable(format!(
                "{} is not available",
                self.name
            )));
        }
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), ChannelError> {
        if !self.open {
            return Err(ChannelError::NotOpen);
        }
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn try_recv(&mut self) -> Result<Option<NavEvent>, ChannelError> {
        self.recv_calls += 1;
        if !self.open {
            return Err(ChannelError::NotOpen);
        }
        match self.queue.pop_front() {
            Some(Queued::Event(event)) => Ok(Some(event)),
            Some(Queued::Disconnect) => {
                self.open = false;
                Err(ChannelError::Disconnected(format!(
                    "{} dropped the connection",
                    self.name
                )))
            }
            None => Ok(None),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
