//! A single overlay message: content plus lifecycle state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::{Size, TextureHandle};

/// Messages are faded out over at most this many trailing milliseconds.
pub const FADE_WINDOW_MAX_MS: u32 = 1000;
/// Never-drawn messages are dropped this long after they expire.
pub const DROP_TIMEOUT_MS: i64 = 5000;

/// Common ARGB colors.
pub mod color {
    pub const CYAN: u32 = 0xFF00_FFFF;
    pub const GREEN: u32 = 0xFF00_FF00;
    pub const RED: u32 = 0xFFFF_0000;
    pub const YELLOW: u32 = 0xFFFF_FF30;
}

/// Common message lifetimes in milliseconds.
pub mod duration {
    pub const SHORT: u32 = 2000;
    pub const NORMAL: u32 = 5000;
    pub const VERY_LONG: u32 = 10000;
}

/// Replacement tag for a message.
///
/// A typed submission supersedes every earlier message of the same type in
/// its stack. `Typeless` sorts after every typed value, so typed messages
/// always lead a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Typed(u32),
    Typeless,
}

/// RGBA8 image drawn above a message's text.
///
/// Only built through [`Icon::new`], [`Icon::from_image`] or [`Icon::load`],
/// so the buffer always holds `width * height` pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba: Vec<u8>,
}

impl Icon {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Error::IconSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self { width, height, rgba })
    }

    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba: img.into_raw(),
        }
    }

    /// Decode an image file into an icon.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)?;
        Ok(Self::from_image(img.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

impl std::fmt::Debug for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Texture uploaded from a message's icon, with the icon's size.
#[derive(Debug, PartialEq)]
pub(crate) struct IconTexture {
    pub(crate) handle: TextureHandle,
    pub(crate) size: Size,
}

/// Whether a message may still be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Live,
    /// Superseded by a newer message of the same type; removed on the next
    /// layout pass, which is the only place its texture may be released.
    Discarded,
}

#[derive(Debug)]
pub struct Message {
    text: String,
    color: u32,
    scale: f32,
    duration_ms: u32,
    message_type: MessageType,
    started_at_ms: u64,
    pub(crate) icon: Option<Icon>,
    pub(crate) texture: Option<IconTexture>,
    ever_drawn: bool,
    lifecycle: Lifecycle,
}

impl Message {
    pub fn new(
        message_type: MessageType,
        text: String,
        duration_ms: u32,
        color: u32,
        icon: Option<Icon>,
        scale: f32,
        started_at_ms: u64,
    ) -> Self {
        Self {
            text,
            color,
            scale,
            duration_ms,
            message_type,
            started_at_ms,
            icon,
            texture: None,
            ever_drawn: false,
            lifecycle: Lifecycle::Live,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    /// The icon, until it is uploaded to the renderer.
    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// True while the message still shows (or will show) an icon.
    pub fn has_icon(&self) -> bool {
        self.icon.is_some() || self.texture.is_some()
    }

    pub fn ever_drawn(&self) -> bool {
        self.ever_drawn
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_live(&self) -> bool {
        self.lifecycle == Lifecycle::Live
    }

    /// Live and not yet due for pruning at `now_ms`.
    pub fn is_pending(&self, now_ms: u64) -> bool {
        self.is_live() && !self.is_expired(self.time_remaining(now_ms))
    }

    /// Milliseconds left before expiry; negative once expired.
    pub fn time_remaining(&self, now_ms: u64) -> i64 {
        let elapsed = now_ms.saturating_sub(self.started_at_ms) as i64;
        i64::from(self.duration_ms) - elapsed
    }

    /// Expired messages go once they have been seen, or after the drop
    /// timeout if they never got the chance.
    pub fn is_expired(&self, time_left: i64) -> bool {
        time_left <= 0 && (self.ever_drawn || -time_left >= DROP_TIMEOUT_MS)
    }

    /// Opacity for a draw with `time_left` remaining.
    pub fn alpha(&self, time_left: i64) -> f32 {
        if self.ever_drawn {
            fade_alpha(time_left, self.duration_ms)
        } else {
            1.0
        }
    }

    pub(crate) fn mark_drawn(&mut self) {
        self.ever_drawn = true;
    }

    pub(crate) fn discard(&mut self) {
        self.lifecycle = Lifecycle::Discarded;
    }
}

/// Linear fade over the last `min(duration, FADE_WINDOW_MAX_MS)` ms of life.
pub fn fade_alpha(time_left: i64, duration_ms: u32) -> f32 {
    let window = duration_ms.clamp(1, FADE_WINDOW_MAX_MS) as f32;
    (time_left as f32 / window).clamp(0.0, 1.0)
}

/// Unpack `0xAARRGGBB` into normalized `[r, g, b, a]`.
pub fn argb_to_rgba(argb: u32) -> [f32; 4] {
    let channel = |shift: u32| ((argb >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), channel(24)]
}
