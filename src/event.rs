//! Decoded device events.
//!
//! navstate represents everything a space navigator reports as one of two
//! small records: a [`MotionSample`] (six relative deltas) or a
//! [`ButtonEvent`] (one press/release edge). Channels yield them wrapped in
//! [`NavEvent`].
//!
//! ## Value conventions
//! - **Motion:** raw device units, signed. No physical scale is implied and no
//!   smoothing or deadzone is applied anywhere in this crate.
//! - **Buttons:** device-defined indices. Only `0` and `1` are latched into
//!   [`DeviceState`](crate::snapshot::DeviceState); other indices are still
//!   reported through [`ButtonEvent`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Last observed translation/rotation delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotionSample {
    pub tx: i32,
    pub ty: i32,
    pub tz: i32,
    pub rx: i32,
    pub ry: i32,
    pub rz: i32,
}

impl MotionSample {
    pub const fn new(tx: i32, ty: i32, tz: i32, rx: i32, ry: i32, rz: i32) -> Self {
        Self {
            tx,
            ty,
            tz,
            rx,
            ry,
            rz,
        }
    }

    /// Fields in wire order: translation then rotation.
    #[inline]
    pub fn as_array(&self) -> [i32; 6] {
        [self.tx, self.ty, self.tz, self.rx, self.ry, self.rz]
    }
}

impl From<[i32; 6]> for MotionSample {
    fn from(v: [i32; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

/// Text form used by the host `GetMotion` command: six space-separated integers.
impl fmt::Display for MotionSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.tx, self.ty, self.tz, self.rx, self.ry, self.rz
        )
    }
}

/// Last observed button transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonEvent {
    /// Device-defined button index.
    pub button: u32,
    /// `true` = down, `false` = released.
    pub pressed: bool,
}

impl ButtonEvent {
    pub const fn pressed(button: u32) -> Self {
        Self {
            button,
            pressed: true,
        }
    }

    pub const fn released(button: u32) -> Self {
        Self {
            button,
            pressed: false,
        }
    }
}

/// Text form used by the host `GetButton` command: `"<pressed 0|1> <index>"`.
impl fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", u8::from(self.pressed), self.button)
    }
}

/// One decoded event as returned by a [`DeviceChannel`](crate::device::DeviceChannel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavEvent {
    /// The device moved; carries the full six-axis sample.
    Motion(MotionSample),

    /// A button went down or up.
    Button(ButtonEvent),
}

impl From<MotionSample> for NavEvent {
    fn from(m: MotionSample) -> Self {
        NavEvent::Motion(m)
    }
}

impl From<ButtonEvent> for NavEvent {
    fn from(b: ButtonEvent) -> Self {
        NavEvent::Button(b)
    }
}
