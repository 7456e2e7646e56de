//! On-screen notification overlay
//!
//! Collects short-lived text/icon messages from any thread and lays them out
//! each frame in independently positioned stacks, with fade-out, expiry,
//! deduplication and typed replacement. Drawing itself goes through the
//! [`render::OverlayRenderer`] trait.

pub mod clock;
pub mod config;
pub mod error;
pub mod layout;
pub mod message;
pub mod overlay;
pub mod registry;
pub mod render;
pub mod stack;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::OverlayConfig;
pub use error::{Error, Result};
pub use layout::{FrameReport, Placement};
pub use message::{Icon, MessageType, color, duration};
pub use overlay::{MessageRequest, Overlay, Submission};
pub use render::{HeadlessRenderer, OverlayRenderer};
pub use stack::{StackDirection, StackLayout};
