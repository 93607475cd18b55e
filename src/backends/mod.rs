//! Channel backends for `navstate`.
//!
//! Implementations of [`DeviceChannel`](crate::device::DeviceChannel) for the
//! ways a space navigator can be reached.
//!
//! # Feature flags
//! - **`hid`** enables [`hid::HidChannel`], which reads the device directly
//!   through `hidapi` instead of going through spacenavd.
//!
//! [`socket::SocketChannel`] (Unix only) and [`virtual_input::VirtualChannel`]
//! are always available.

use crate::config::{Backend, ChannelConfig};
use crate::device::DeviceChannel;

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;
pub mod report;
#[cfg(unix)]
pub mod socket;
pub mod virtual_input;

/// Default spacenavd socket path.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/spnav.sock";

/// Build the channel `config` asks for. The channel is returned closed.
///
/// A backend that is not compiled into this build yields a channel whose
/// `open()` always fails, so callers see an ordinary connection error.
pub fn build_channel(config: &ChannelConfig) -> Box<dyn DeviceChannel> {
    match config.backend {
        #[cfg(unix)]
        Backend::Socket => Box::new(socket::SocketChannel::new(&config.socket_path)),
        #[cfg(not(unix))]
        Backend::Socket => Box::new(virtual_input::VirtualChannel::unavailable(
            "spacenavd (unix only)",
        )),

        #[cfg(feature = "hid")]
        Backend::Hid => Box::new(hid::HidChannel::new(config.vendor_id, config.product_id)),
        #[cfg(not(feature = "hid"))]
        Backend::Hid => Box::new(virtual_input::VirtualChannel::unavailable(
            "hid (built without the `hid` feature)",
        )),

        Backend::Virtual => Box::new(virtual_input::VirtualChannel::new("virtual:0")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_backend_opens() {
        let cfg = ChannelConfig {
            backend: Backend::Virtual,
            ..ChannelConfig::default()
        };
        let mut ch = build_channel(&cfg);
        assert!(!ch.is_open());
        ch.open().unwrap();
        assert!(ch.is_open());
        assert_eq!(ch.name(), "virtual:0");
    }

    #[cfg(unix)]
    #[test]
    fn socket_backend_uses_configured_path() {
        let cfg = ChannelConfig {
            socket_path: "/tmp/does-not-exist/spnav.sock".into(),
            ..ChannelConfig::default()
        };
        let ch = build_channel(&cfg);
        assert_eq!(ch.name(), "spacenavd:/tmp/does-not-exist/spnav.sock");
    }
}
