//! spacenavd daemon channel (Unix only).
//!
//! Connects to the daemon's AF_UNIX socket and decodes its fixed-size event
//! frames. The stream is put in non-blocking mode so `try_recv` never waits.
//!
//! ## Wire format
//! Every event is eight native-endian `i32` words:
//!
//! | word  | motion            | button                  |
//! |-------|-------------------|-------------------------|
//! | 0     | `0`               | `1` press / `2` release |
//! | 1..=6 | tx ty tz rx ry rz | `1`: button index       |
//! | 7     | period (ms)       | unused                  |
//!
//! Frames with any other type word (device and configuration notices from
//! newer daemons) or a negative button index are logged and dropped.

use crate::device::DeviceChannel;
use crate::error::ChannelError;
use crate::event::{ButtonEvent, MotionSample, NavEvent};
use std::io::{self, Read};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use crate::backends::DEFAULT_SOCKET_PATH;

const WORDS_PER_FRAME: usize = 8;
/// Bytes per event frame on the wire.
pub const FRAME_LEN: usize = WORDS_PER_FRAME * 4;

const EV_MOTION: i32 = 0;
const EV_PRESS: i32 = 1;
const EV_RELEASE: i32 = 2;

pub struct SocketChannel {
    path: PathBuf,
    name: String,
    stream: Option<UnixStream>,
    // Bytes of a frame that has only partially arrived.
    pending: Vec<u8>,
}

impl SocketChannel {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: format!("spacenavd:{}", path.display()),
            path,
            stream: None,
            pending: Vec::with_capacity(FRAME_LEN),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn drop_connection(&mut self) {
        self.stream = None;
        self.pending.clear();
    }

    fn pop_frame(&mut self) -> Option<[i32; WORDS_PER_FRAME]> {
        if self.pending.len() < FRAME_LEN {
            return None;
        }
        let mut words = [0i32; WORDS_PER_FRAME];
        for (w, bytes) in words
            .iter_mut()
            .zip(self.pending[..FRAME_LEN].chunks_exact(4))
        {
            *w = i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        self.pending.drain(..FRAME_LEN);
        Some(words)
    }
}

impl Default for SocketChannel {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_PATH)
    }
}

impl DeviceChannel for SocketChannel {
    fn open(&mut self) -> Result<(), ChannelError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let stream = UnixStream::connect(&self.path).map_err(|e| {
            ChannelError::Unavailable(format!(
                "cannot connect to spacenavd at {}: {}",
                self.path.display(),
                e
            ))
        })?;
        stream.set_nonblocking(true)?;
        self.pending.clear();
        self.stream = Some(stream);
        Ok(())
    }

    fn close(&mut self) -> Result<(), ChannelError> {
        match self.stream.take() {
            Some(_) => {
                self.pending.clear();
                Ok(())
            }
            None => Err(ChannelError::NotOpen),
        }
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn try_recv(&mut self) -> Result<Option<NavEvent>, ChannelError> {
        let mut chunk = [0u8; FRAME_LEN * 16];
        loop {
            if let Some(words) = self.pop_frame() {
                match decode_frame(&words) {
                    Some(event) => return Ok(Some(event)),
                    None => continue,
                }
            }

            let read = match self.stream.as_mut() {
                Some(stream) => stream.read(&mut chunk),
                None => return Err(ChannelError::NotOpen),
            };
            match read {
                Ok(0) => {
                    if !self.pending.is_empty() {
                        debug!(
                            "{}: discarding {} byte(s) of a truncated frame",
                            self.name,
                            self.pending.len()
                        );
                    }
                    self.drop_connection();
                    return Err(ChannelError::Disconnected(format!(
                        "spacenavd closed {}",
                        self.path.display()
                    )));
                }
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(None),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.drop_connection();
                    return Err(ChannelError::Io(e));
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Decode one frame's words into an event.
///
/// `None` for frames that are not motion or button events, and for button
/// frames with a negative index.
pub fn decode_frame(words: &[i32; WORDS_PER_FRAME]) -> Option<NavEvent> {
    match words[0] {
        EV_MOTION => Some(NavEvent::Motion(MotionSample::new(
            words[1], words[2], words[3], words[4], words[5], words[6],
        ))),
        EV_PRESS | EV_RELEASE => {
            let Ok(button) = u32::try_from(words[1]) else {
                debug!("dropping button frame with index {}", words[1]);
                return None;
            };
            Some(NavEvent::Button(ButtonEvent {
                button,
                pressed: words[0] == EV_PRESS,
            }))
        }
        other => {
            debug!("dropping frame of type {}", other);
            None
        }
    }
}

/// Encode an event the way the daemon writes it. The period word is zero.
///
/// A button index above `i32::MAX` has no wire form and is written as `-1`,
/// which [`decode_frame`] drops.
pub fn encode_frame(event: &NavEvent) -> [u8; FRAME_LEN] {
    let mut words = [0i32; WORDS_PER_FRAME];
    match event {
        NavEvent::Motion(m) => {
            words[0] = EV_MOTION;
            words[1..7].copy_from_slice(&m.as_array());
        }
        NavEvent::Button(b) => {
            words[0] = if b.pressed { EV_PRESS } else { EV_RELEASE };
            words[1] = i32::try_from(b.button).unwrap_or(-1);
        }
    }
    let mut out = [0u8; FRAME_LEN];
    for (dst, w) in out.chunks_exact_mut(4).zip(words) {
        dst.copy_from_slice(&w.to_ne_bytes());
    }
    out
}
