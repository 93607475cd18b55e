//! Direct HID channel via `hidapi` (feature `hid`).
//!
//! [`HidChannel`] talks to a 3Dconnexion device without the spacenavd daemon.
//! It is responsible for:
//! - finding the device by vendor (and optionally product) id
//! - opening the HID handle in non-blocking mode
//! - turning raw reports into [`NavEvent`]s through [`ReportDecoder`]
//!
//! One HID report may decode to several events (a button report with two
//! changed bits), so decoded events are queued and handed out one per
//! `try_recv`.

use crate::backends::report::ReportDecoder;
use crate::device::DeviceChannel;
use crate::error::ChannelError;
use crate::event::NavEvent;
use hidapi::{HidApi, HidDevice};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Vendor id used by 3Dconnexion devices sold under the Logitech umbrella.
pub const VENDOR_LOGITECH: u16 = 0x046d;
/// Vendor id used by current 3Dconnexion devices.
pub const VENDOR_3DCONNEXION: u16 = 0x256f;

/// Product ids accepted when no explicit product id is configured.
const KNOWN_PRODUCTS: &[(u16, u16)] = &[
    (VENDOR_LOGITECH, 0xc603), // SpaceMouse Plus XT
    (VENDOR_LOGITECH, 0xc621), // SpaceBall 5000
    (VENDOR_LOGITECH, 0xc623), // SpaceTraveler
    (VENDOR_LOGITECH, 0xc625), // SpacePilot
    (VENDOR_LOGITECH, 0xc626), // SpaceNavigator
    (VENDOR_LOGITECH, 0xc627), // SpaceExplorer
    (VENDOR_LOGITECH, 0xc628), // SpaceNavigator for Notebooks
    (VENDOR_LOGITECH, 0xc629), // SpacePilot Pro
    (VENDOR_LOGITECH, 0xc62b), // SpaceMouse Pro
    (VENDOR_3DCONNEXION, 0xc62e), // SpaceMouse Wireless (cabled)
    (VENDOR_3DCONNEXION, 0xc62f), // SpaceMouse Wireless receiver
    (VENDOR_3DCONNEXION, 0xc631), // SpaceMouse Pro Wireless (cabled)
    (VENDOR_3DCONNEXION, 0xc632), // SpaceMouse Pro Wireless receiver
    (VENDOR_3DCONNEXION, 0xc635), // SpaceMouse Compact
];

/// Largest input report we expect, including the report id byte.
const REPORT_BUF_LEN: usize = 64;

pub struct HidChannel {
    vendor_id: u16,
    product_id: Option<u16>,
    name: String,
    device: Option<HidDevice>,
    decoder: ReportDecoder,
    queue: VecDeque<NavEvent>,
    scratch: Vec<NavEvent>,
    buf: [u8; REPORT_BUF_LEN],
}

impl HidChannel {
    /// `product_id = None` accepts any known space navigator from `vendor_id`.
    pub fn new(vendor_id: u16, product_id: Option<u16>) -> Self {
        let name = match product_id {
            Some(pid) => format!("hid:{vendor_id:04x}:{pid:04x}"),
            None => format!("hid:{vendor_id:04x}:*"),
        };
        Self {
            vendor_id,
            product_id,
            name,
            device: None,
            decoder: ReportDecoder::new(),
            queue: VecDeque::new(),
            scratch: Vec::new(),
            buf: [0u8; REPORT_BUF_LEN],
        }
    }

    fn accepts(&self, vid: u16, pid: u16) -> bool {
        if vid != self.vendor_id {
            return false;
        }
        match self.product_id {
            Some(wanted) => pid == wanted,
            None => KNOWN_PRODUCTS.contains(&(vid, pid)),
        }
    }

    fn drop_connection(&mut self) {
        self.device = None;
        self.queue.clear();
    }
}

impl Default for HidChannel {
    fn default() -> Self {
        Self::new(VENDOR_LOGITECH, None)
    }
}

impl DeviceChannel for HidChannel {
    fn open(&mut self) -> Result<(), ChannelError> {
        if self.device.is_some() {
            return Ok(());
        }
        let api = HidApi::new()?;
        let info = api
            .device_list()
            .find(|info| self.accepts(info.vendor_id(), info.product_id()))
            .ok_or_else(|| {
                ChannelError::Unavailable(format!("no space navigator matching {}", self.name))
            })?;

        debug!(
            "opening {:04x}:{:04x} product={:?} path={}",
            info.vendor_id(),
            info.product_id(),
            info.product_string(),
            info.path().to_string_lossy()
        );
        let device = info.open_device(&api)?;
        device.set_blocking_mode(false)?;

        self.decoder = ReportDecoder::new();
        self.queue.clear();
        self.device = Some(device);
        Ok(())
    }

    fn close(&mut self) -> Result<(), ChannelError> {
        if self.device.is_none() {
            return Err(ChannelError::NotOpen);
        }
        self.drop_connection();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn try_recv(&mut self) -> Result<Option<NavEvent>, ChannelError> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Ok(Some(event));
            }

            let read = match self.device.as_ref() {
                Some(device) => device.read(&mut self.buf),
                None => return Err(ChannelError::NotOpen),
            };
            match read {
                Ok(0) => return Ok(None),
                Ok(n) => {
                    self.decoder.decode(&self.buf[..n], &mut self.scratch);
                    self.queue.extend(self.scratch.drain(..));
                }
                Err(e) => {
                    warn!("{}: read failed: {}", self.name, e);
                    self.drop_connection();
                    return Err(ChannelError::Hid(e));
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_matches_known_products_only() {
        let ch = HidChannel::default();
        assert!(ch.accepts(VENDOR_LOGITECH, 0xc626));
        assert!(!ch.accepts(VENDOR_LOGITECH, 0xc52b));
        assert!(!ch.accepts(VENDOR_3DCONNEXION, 0xc626));
    }

    #[test]
    fn explicit_product_id_overrides_known_list() {
        let ch = HidChannel::new(VENDOR_3DCONNEXION, Some(0x1234));
        assert!(ch.accepts(VENDOR_3DCONNEXION, 0x1234));
        assert!(!ch.accepts(VENDOR_3DCONNEXION, 0xc635));
        assert_eq!(ch.name(), "hid:256f:1234");
    }
}
