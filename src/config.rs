//! TOML configuration.
//!
//! ```toml
//! [channel]
//! backend = "socket"            # "socket" | "hid" | "virtual"
//! socket_path = "/var/run/spnav.sock"
//! vendor_id = 0x046d            # hid only
//! product_id = 0xc626           # hid only, optional
//! open_on_start = true
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which channel implementation to build.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// spacenavd daemon socket.
    #[default]
    Socket,
    /// Direct HID access (needs the `hid` feature).
    Hid,
    /// In-memory channel with nothing attached.
    Virtual,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "socket" => Ok(Backend::Socket),
            "hid" => Ok(Backend::Hid),
            "virtual" => Ok(Backend::Virtual),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Socket => "socket",
            Backend::Hid => "hid",
            Backend::Virtual => "virtual",
        })
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ChannelConfig {
    pub backend: Backend,
    pub socket_path: PathBuf,
    pub vendor_id: u16,
    /// `None` accepts any known space navigator from `vendor_id`.
    pub product_id: Option<u16>,
    /// Open the channel when the host module is created.
    pub open_on_start: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            socket_path: PathBuf::from(crate::backends::DEFAULT_SOCKET_PATH),
            vendor_id: 0x046d,
            product_id: None,
            open_on_start: true,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub channel: ChannelConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown backend {0:?} (expected socket, hid or virtual)")]
    UnknownBackend(String),
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
