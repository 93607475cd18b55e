//! 3Dconnexion HID input report decoding.
//!
//! Space navigators expose a vendor-specific HID interface with three input
//! reports:
//! - **1**: translation, 3 × `i16` little-endian (x, y, z). Newer devices send
//!   12 bytes here and append rotation.
//! - **2**: rotation, 3 × `i16` little-endian (rx, ry, rz).
//! - **3**: button bitmask, bit `n` = button `n`, little-endian bytes.
//!
//! Translation and rotation halves arrive separately on older devices, so
//! [`ReportDecoder`] remembers the latest of each and emits a full
//! [`MotionSample`] whenever either half changes. Button bitmasks are diffed
//! against the previous report and turned into press/release edges.
//!
//! This module only needs bytes, so it is compiled with or without the `hid`
//! feature.

use crate::event::{ButtonEvent, MotionSample, NavEvent};
use tracing::debug;

pub const REPORT_TRANSLATION: u8 = 1;
pub const REPORT_ROTATION: u8 = 2;
pub const REPORT_BUTTONS: u8 = 3;

const AXIS_TRIPLE_LEN: usize = 6;
const MAX_BUTTON_BYTES: usize = 4;

#[derive(Debug, Default)]
pub struct ReportDecoder {
    translation: [i32; 3],
    rotation: [i32; 3],
    buttons: u32,
}

impl ReportDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one `[report_id][payload...]` buffer, appending events to `out`.
    ///
    /// Unknown report IDs and short payloads are dropped.
    pub fn decode(&mut self, report: &[u8], out: &mut Vec<NavEvent>) {
        let Some((&report_id, payload)) = report.split_first() else {
            return;
        };

        match report_id {
            REPORT_TRANSLATION => {
                let Some(t) = read_triple(payload) else {
                    debug!("short translation report: {} byte(s)", payload.len());
                    return;
                };
                self.translation = t;
                if let Some(r) = payload.get(AXIS_TRIPLE_LEN..).and_then(read_triple) {
                    self.rotation = r;
                }
                out.push(NavEvent::Motion(self.motion()));
            }
            REPORT_ROTATION => {
                let Some(r) = read_triple(payload) else {
                    debug!("short rotation report: {} byte(s)", payload.len());
                    return;
                };
                self.rotation = r;
                out.push(NavEvent::Motion(self.motion()));
            }
            REPORT_BUTTONS => {
                let mask = payload
                    .iter()
                    .take(MAX_BUTTON_BYTES)
                    .enumerate()
                    .fold(0u32, |acc, (i, b)| acc | (u32::from(*b) << (8 * i)));
                let changed = mask ^ self.buttons;
                for bit in (0..u32::BITS).filter(|bit| changed & (1u32 << *bit) != 0) {
                    let pressed = mask & (1u32 << bit) != 0;
                    out.push(NavEvent::Button(ButtonEvent {
                        button: bit,
                        pressed,
                    }));
                }
                self.buttons = mask;
            }
            other => debug!("ignoring HID report id {}", other),
        }
    }

    fn motion(&self) -> MotionSample {
        let [tx, ty, tz] = self.translation;
        let [rx, ry, rz] = self.rotation;
        MotionSample::new(tx, ty, tz, rx, ry, rz)
    }
}

fn read_triple(payload: &[u8]) -> Option<[i32; 3]> {
    let bytes = payload.get(..AXIS_TRIPLE_LEN)?;
    let axis = |i: usize| i32::from(i16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]]));
    Some([axis(0), axis(1), axis(2)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(a: i16, b: i16, c: i16) -> Vec<u8> {
        [a, b, c].iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn merges_translation_and_rotation_halves() {
        let mut dec = ReportDecoder::new();
        let mut out = Vec::new();

        let mut t = vec![REPORT_TRANSLATION];
        t.extend(triple(5, -3, 0));
        dec.decode(&t, &mut out);

        let mut r = vec![REPORT_ROTATION];
        r.extend(triple(1, 0, -350));
        dec.decode(&r, &mut out);

        assert_eq!(
            out,
            vec![
                NavEvent::Motion(MotionSample::new(5, -3, 0, 0, 0, 0)),
                NavEvent::Motion(MotionSample::new(5, -3, 0, 1, 0, -350)),
            ]
        );
    }

    #[test]
    fn long_translation_report_carries_rotation() {
        let mut dec = ReportDecoder::new();
        let mut out = Vec::new();
        let mut report = vec![REPORT_TRANSLATION];
        report.extend(triple(1, 2, 3));
        report.extend(triple(4, 5, 6));
        dec.decode(&report, &mut out);

        assert_eq!(
            out,
            vec![NavEvent::Motion(MotionSample::new(1, 2, 3, 4, 5, 6))]
        );
    }

    #[test]
    fn button_mask_changes_become_edges() {
        let mut dec = ReportDecoder::new();
        let mut out = Vec::new();

        dec.decode(&[REPORT_BUTTONS, 0b11, 0], &mut out);
        dec.decode(&[REPORT_BUTTONS, 0b10, 0], &mut out);
        dec.decode(&[REPORT_BUTTONS, 0b10, 0], &mut out);

        assert_eq!(
            out,
            vec![
                NavEvent::Button(ButtonEvent::pressed(0)),
                NavEvent::Button(ButtonEvent::pressed(1)),
                NavEvent::Button(ButtonEvent::released(0)),
            ]
        );
    }

    #[test]
    fn short_and_unknown_reports_are_dropped() {
        let mut dec = ReportDecoder::new();
        let mut out = Vec::new();
        dec.decode(&[REPORT_TRANSLATION, 1, 0, 2], &mut out);
        dec.decode(&[9, 1, 2, 3], &mut out);
        dec.decode(&[], &mut out);
        assert!(out.is_empty());
    }
}
