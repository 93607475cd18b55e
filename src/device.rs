//! Device channel abstraction.
//!
//! A [`DeviceChannel`] owns the connection to one space navigator driver and
//! surfaces its raw event stream one event at a time. Concrete channels live in
//! [`backends`](crate::backends).
//!
//! Channels do **not** keep accumulated state; that is the
//! [`Accumulator`](crate::manager::Accumulator)'s job.

use crate::error::ChannelError;
use crate::event::NavEvent;

pub trait DeviceChannel {
    /// Connect to the driver. Opening an already-open channel succeeds without
    /// reconnecting. On failure the channel stays closed.
    fn open(&mut self) -> Result<(), ChannelError>;

    /// Release the connection. Returns [`ChannelError::NotOpen`] when there is
    /// nothing to close.
    fn close(&mut self) -> Result<(), ChannelError>;

    fn is_open(&self) -> bool;

    /// Non-blocking receive of the next decoded event.
    ///
    /// `Ok(None)` means nothing is pending right now. A transport failure that
    /// ends the connection closes the channel before the error is returned.
    fn try_recv(&mut self) -> Result<Option<NavEvent>, ChannelError>;

    fn name(&self) -> &str;
}

impl<C: DeviceChannel + ?Sized> DeviceChannel for Box<C> {
    fn open(&mut self) -> Result<(), ChannelError> {
        (**self).open()
    }
    fn close(&mut self) -> Result<(), ChannelError> {
        (**self).close()
    }
    fn is_open(&self) -> bool {
        (**self).is_open()
    }
    fn try_recv(&mut self) -> Result<Option<NavEvent>, ChannelError> {
        (**self).try_recv()
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}
