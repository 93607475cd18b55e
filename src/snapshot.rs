//! Combined device state.
//!
//! [`DeviceState`] is an **owned**, read-only view of the device at a point in
//! time (typically "this tick"). It is produced by
//! [`Accumulator::state`](crate::manager::Accumulator::state) and is `Copy`, so
//! handing it to several consumers costs nothing.
//!
//! # Semantics
//! - Motion fields mirror the most recently drained [`MotionSample`].
//! - `button0_pressed` / `button1_pressed` are independent latches holding the
//!   last press/release seen for that index.
//! - A snapshot does **not** poll. To refresh, call `step()` and read again.
//!
//! # Example
//! ```
//! use navstate::backends::virtual_input::VirtualChannel;
//! use navstate::{Accumulator, DeviceChannel};
//!
//! let mut channel = VirtualChannel::new("virtual:0");
//! channel.open().unwrap();
//! let mut acc = Accumulator::new(channel);
//! acc.channel_mut().press_button(1);
//! acc.step();
//!
//! let state = acc.state();
//! assert!(state.button1_pressed);
//! assert_eq!(state.to_string(), "0 0 0 0 0 0 0 1");
//! ```

use crate::event::{ButtonEvent, MotionSample};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub tx: i32,
    pub ty: i32,
    pub tz: i32,
    pub rx: i32,
    pub ry: i32,
    pub rz: i32,
    pub button0_pressed: bool,
    pub button1_pressed: bool,
}

impl DeviceState {
    /// Motion half of the state as a sample.
    #[inline]
    pub fn motion(&self) -> MotionSample {
        MotionSample::new(self.tx, self.ty, self.tz, self.rx, self.ry, self.rz)
    }

    /// Latch state for `button`; `false` for indices without a latch.
    #[inline]
    pub fn is_pressed(&self, button: u32) -> bool {
        match button {
            0 => self.button0_pressed,
            1 => self.button1_pressed,
            _ => false,
        }
    }

    pub(crate) fn apply_motion(&mut self, m: &MotionSample) {
        self.tx = m.tx;
        self.ty = m.ty;
        self.tz = m.tz;
        self.rx = m.rx;
        self.ry = m.ry;
        self.rz = m.rz;
    }

    /// Only indices 0 and 1 have latches; anything else leaves the state alone.
    pub(crate) fn apply_button(&mut self, b: &ButtonEvent) {
        match b.button {
            0 => self.button0_pressed = b.pressed,
            1 => self.button1_pressed = b.pressed,
            _ => {}
        }
    }
}

/// Text form used by the host `GetState` command: six motion integers then the
/// two latches as `0`/`1`.
impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.motion(),
            u8::from(self.button0_pressed),
            u8::from(self.button1_pressed)
        )
    }
}
