//! Host simulation framework shim.
//!
//! A simulation host drives extension modules through two calls: a per-tick
//! `simulation_step` and text commands. [`HostModule`] is that contract and
//! [`SpaceNavModule`] implements it by forwarding into an
//! [`Accumulator`](crate::manager::Accumulator).
//!
//! The accumulator itself never sees command names; parsing happens here in
//! [`Command::from_str`](std::str::FromStr).
//!
//! ```
//! use navstate::backends::virtual_input::VirtualChannel;
//! use navstate::host::{Command, HostModule, SpaceNavModule};
//!
//! let mut module = SpaceNavModule::new(VirtualChannel::new("virtual:0"), true);
//! module.accumulator_mut().channel_mut().press_button(0);
//! module.simulation_step(0.01);
//!
//! let reply = module.send_command(Command::GetState);
//! assert!(reply.ok);
//! assert_eq!(reply.output, "0 0 0 0 0 0 1 0");
//! ```

use crate::backends::build_channel;
use crate::config::Config;
use crate::device::DeviceChannel;
use crate::error::STATUS_OK;
use crate::manager::Accumulator;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, warn};

/// Interface name the module registers under.
pub const INTERFACE_NAME: &str = "SpaceNav";

/// Typed host commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    OpenChannel,
    CloseChannel,
    GetMotion,
    GetButton,
    GetState,
    Help,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::OpenChannel,
        Command::CloseChannel,
        Command::GetMotion,
        Command::GetButton,
        Command::GetState,
        Command::Help,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::OpenChannel => "OpenChannel",
            Command::CloseChannel => "CloseChannel",
            Command::GetMotion => "GetMotion",
            Command::GetButton => "GetButton",
            Command::GetState => "GetState",
            Command::Help => "help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::OpenChannel => "Manually open the connection to the device",
            Command::CloseChannel => "Manually close the connection to the device",
            Command::GetMotion => "Get most recent motion event",
            Command::GetButton => "Get most recent button event",
            Command::GetState => "Get current device state",
            Command::Help => "List commands",
        }
    }

    /// Older spellings still accepted by [`FromStr`]. Not listed by `help`.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Command::OpenChannel => &["OpenSpaceNav"],
            Command::CloseChannel => &["CloseSpaceNav"],
            _ => &[],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command {0:?}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim();
        Command::ALL
            .into_iter()
            .find(|c| {
                c.name().eq_ignore_ascii_case(word)
                    || c.aliases().iter().any(|a| a.eq_ignore_ascii_case(word))
            })
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Text output plus success flag, as the host expects from a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub ok: bool,
    pub output: String,
}

impl Reply {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            ok: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            ok: false,
            output: output.into(),
        }
    }
}

/// Extension-point contract of the host simulation framework.
pub trait HostModule {
    fn interface_name(&self) -> &str;

    /// Called once per simulation tick. `elapsed` is ignored by this crate;
    /// only the call matters.
    fn simulation_step(&mut self, elapsed: f64) -> bool;

    fn send_command(&mut self, command: Command) -> Reply;

    /// Parse the first word of `line` as a command and run it.
    fn send_text(&mut self, line: &str) -> Reply {
        let word = line.split_whitespace().next().unwrap_or("");
        match word.parse::<Command>() {
            Ok(command) => self.send_command(command),
            Err(e) => Reply::failed(e.to_string()),
        }
    }
}

/// Host module wrapping one device channel.
pub struct SpaceNavModule<C: DeviceChannel = Box<dyn DeviceChannel>> {
    acc: Accumulator<C>,
}

impl<C: DeviceChannel> SpaceNavModule<C> {
    /// Wrap `channel`, opening it first when `open_on_start` is set.
    ///
    /// A failed startup open is logged and leaves polling disabled until an
    /// `OpenChannel` command succeeds.
    pub fn new(channel: C, open_on_start: bool) -> Self {
        let mut acc = Accumulator::new(channel);
        if open_on_start {
            if let Err(e) = acc.open_channel() {
                error!(
                    "failed to connect to the space navigator ({}): {}",
                    acc.channel().name(),
                    e
                );
            }
        }
        Self { acc }
    }

    pub fn accumulator(&self) -> &Accumulator<C> {
        &self.acc
    }

    pub fn accumulator_mut(&mut self) -> &mut Accumulator<C> {
        &mut self.acc
    }

    pub fn help(&self) -> String {
        Command::ALL
            .iter()
            .map(|c| format!("{}: {}", c.name(), c.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SpaceNavModule {
    /// Build the configured backend and wrap it.
    pub fn from_config(config: &Config) -> Self {
        Self::new(build_channel(&config.channel), config.channel.open_on_start)
    }
}

impl<C: DeviceChannel> HostModule for SpaceNavModule<C> {
    fn interface_name(&self) -> &str {
        INTERFACE_NAME
    }

    fn simulation_step(&mut self, _elapsed: f64) -> bool {
        self.acc.step();
        true
    }

    fn send_command(&mut self, command: Command) -> Reply {
        match command {
            Command::OpenChannel => status_reply(command, self.acc.open_channel()),
            Command::CloseChannel => status_reply(command, self.acc.close_channel()),
            Command::GetMotion => Reply::ok(self.acc.motion().to_string()),
            Command::GetButton => Reply::ok(self.acc.button().to_string()),
            Command::GetState => Reply::ok(self.acc.state().to_string()),
            Command::Help => Reply::ok(self.help()),
        }
    }
}

impl<C: DeviceChannel> Drop for SpaceNavModule<C> {
    fn drop(&mut self) {
        if self.acc.is_running() {
            if let Err(e) = self.acc.close_channel() {
                debug!("close on teardown failed: {}", e);
            }
        }
    }
}

fn status_reply(command: Command, result: Result<(), crate::ChannelError>) -> Reply {
    match result {
        Ok(()) => Reply::ok(STATUS_OK.to_string()),
        Err(e) => {
            warn!("{} failed: {}", command, e);
            Reply::failed(e.status_code().to_string())
        }
    }
}

/// Module factory: only the `spacenav` interface name (any case) is served.
pub fn create_module(interface_name: &str, config: &Config) -> Option<SpaceNavModule> {
    if interface_name.eq_ignore_ascii_case(INTERFACE_NAME) {
        Some(SpaceNavModule::from_config(config))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_parse_case_insensitively() {
        assert_eq!("getstate".parse::<Command>().unwrap(), Command::GetState);
        assert_eq!(" OpenChannel ".parse::<Command>().unwrap(), Command::OpenChannel);
        assert_eq!("HELP".parse::<Command>().unwrap(), Command::Help);
        assert_eq!(
            "Reset".parse::<Command>(),
            Err(UnknownCommand("Reset".to_string()))
        );
    }

    #[test]
    fn spacenav_spellings_map_to_channel_commands() {
        assert_eq!("OpenSpaceNav".parse::<Command>().unwrap(), Command::OpenChannel);
        assert_eq!("closespacenav".parse::<Command>().unwrap(), Command::CloseChannel);
        assert_eq!(
            "GetSpaceNav".parse::<Command>(),
            Err(UnknownCommand("GetSpaceNav".to_string()))
        );
    }
}
