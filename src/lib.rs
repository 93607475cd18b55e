//! navstate: tick-driven state for 6-DoF space navigator input devices.
//!
//! A space navigator reports relative translation/rotation deltas and button
//! edges as an asynchronous stream. navstate drains that stream once per host
//! tick and folds it into a [`DeviceState`] snapshot that can be read at any
//! time.
//!
//! - [`DeviceChannel`]: connection to the driver, non-blocking `try_recv`
//! - [`Accumulator`]: drains the channel each `step()` and keeps the records
//! - [`host`]: adapter for simulation hosts that talk in text commands
//! - [`backends`]: spacenavd socket, direct HID (feature `hid`), virtual

pub mod backends;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod host;
pub mod manager;
pub mod snapshot;

pub use config::{Backend, ChannelConfig, Config, ConfigError};
pub use device::DeviceChannel;
pub use error::ChannelError;
pub use event::{ButtonEvent, MotionSample, NavEvent};
pub use manager::Accumulator;
pub use snapshot::DeviceState;
