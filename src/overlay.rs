//! Thread-safe entry point for producers and the render loop.
//!
//! Producers on any thread call the `add_*` methods; the render thread calls
//! [`Overlay::draw_messages`] once per frame. Both go through one lock over
//! the whole [`StackRegistry`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use parking_lot::Mutex;

use crate::clock::{Clock, MonotonicClock};
use crate::config::OverlayConfig;
use crate::layout::{self, FrameContext, FrameReport, ObscuredMargin};
use crate::message::{Icon, Message, MessageType};
use crate::registry::StackRegistry;
use crate::render::OverlayRenderer;
use crate::stack::StackLayout;

/// A message to submit, with everything but text, lifetime and color optional.
#[derive(Debug, Clone)]
pub struct MessageRequest {
    pub text: String,
    pub duration_ms: u32,
    /// `0xAARRGGBB`.
    pub color: u32,
    pub icon: Option<Icon>,
    /// Target stack; unknown names and `""` go to the default stack.
    pub stack: String,
    /// Skip the submission if the stack already shows the same type and text.
    pub prevent_duplicate: bool,
    pub scale: f32,
}

impl MessageRequest {
    pub fn new(text: impl Into<String>, duration_ms: u32, color: u32) -> Self {
        Self {
            text: text.into(),
            duration_ms,
            color,
            icon: None,
            stack: String::new(),
            prevent_duplicate: false,
            scale: 1.0,
        }
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn stack(mut self, name: impl Into<String>) -> Self {
        self.stack = name.into();
        self
    }

    pub fn prevent_duplicate(mut self, prevent: bool) -> Self {
        self.prevent_duplicate = prevent;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// What happened to a submitted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Queued,
    /// Dropped because an identical message is already live.
    Duplicate,
}

pub struct Overlay {
    registry: Mutex<StackRegistry>,
    clock: Arc<dyn Clock>,
    messages_enabled: AtomicBool,
    obscured_left: AtomicI32,
    obscured_top: AtomicI32,
}

impl Overlay {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: Mutex::new(StackRegistry::new()),
            clock,
            messages_enabled: AtomicBool::new(true),
            obscured_left: AtomicI32::new(0),
            obscured_top: AtomicI32::new(0),
        }
    }

    /// Overlay seeded from a config: enabled flag plus every preset stack.
    pub fn from_config(config: &OverlayConfig, clock: Arc<dyn Clock>) -> Self {
        let overlay = Self::with_clock(clock);
        overlay.set_messages_enabled(config.messages_enabled);
        for layout in &config.stacks {
            overlay.add_message_stack(layout.clone());
        }
        overlay
    }

    pub fn add_message(&self, request: MessageRequest) -> Submission {
        self.add_typed_message(MessageType::Typeless, request)
    }

    /// Queue a message. A typed message supersedes every earlier message of
    /// the same type in its stack; those are removed on the next frame.
    pub fn add_typed_message(&self, message_type: MessageType, request: MessageRequest) -> Submission {
        let now_ms = self.clock.now_ms();
        let mut registry = self.registry.lock();
        let stack = registry.resolve_mut(&request.stack);

        if request.prevent_duplicate && stack.has_message(message_type, &request.text, now_ms) {
            tracing::trace!("Skipping duplicate message '{}'", request.text);
            return Submission::Duplicate;
        }
        if message_type != MessageType::Typeless {
            let superseded = stack.discard_type(message_type);
            if superseded > 0 {
                tracing::trace!("Message '{}' supersedes {} of {:?}", request.text, superseded, message_type);
            }
        }

        stack.insert(Message::new(
            message_type,
            request.text,
            request.duration_ms,
            request.color,
            request.icon,
            request.scale,
            now_ms,
        ));
        Submission::Queued
    }

    /// Register a named stack. Returns false if the name is empty or taken;
    /// the existing stack is left untouched.
    pub fn add_message_stack(&self, layout: StackLayout) -> bool {
        self.registry.lock().add_stack(layout)
    }

    /// Draw one frame: the default stack, then every named stack by name.
    pub fn draw_messages(&self, renderer: &mut dyn OverlayRenderer) -> FrameReport {
        let draw_enabled = self.messages_enabled();
        let obscured = self.obscured_margin();
        let mut report = FrameReport::default();

        let mut registry = self.registry.lock();
        for texture in registry.take_orphaned_textures() {
            renderer.destroy_texture(texture);
        }
        let frame = FrameContext {
            now_ms: self.clock.now_ms(),
            draw_enabled,
            obscured,
        };
        for stack in registry.stacks_mut() {
            layout::draw_stack(stack, renderer, &frame, &mut report);
        }
        report
    }

    /// Drop every queued message. Registered stacks stay.
    pub fn clear_messages(&self) {
        let removed = self.registry.lock().clear();
        tracing::debug!("Cleared {} overlay messages", removed);
    }

    pub fn set_obscured_pixels_left(&self, px: i32) {
        self.obscured_left.store(px, Ordering::Relaxed);
    }

    pub fn set_obscured_pixels_top(&self, px: i32) {
        self.obscured_top.store(px, Ordering::Relaxed);
    }

    pub fn obscured_margin(&self) -> ObscuredMargin {
        ObscuredMargin {
            left: self.obscured_left.load(Ordering::Relaxed),
            top: self.obscured_top.load(Ordering::Relaxed),
        }
    }

    /// Toggle drawing. Read at the start of every frame.
    pub fn set_messages_enabled(&self, enabled: bool) {
        self.messages_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn messages_enabled(&self) -> bool {
        self.messages_enabled.load(Ordering::Relaxed)
    }

    /// Queued messages in a stack (`""` for the default), including ones
    /// waiting to be pruned.
    pub fn message_count(&self, stack: &str) -> Option<usize> {
        self.registry.lock().get(stack).map(|s| s.len())
    }

    /// True if `stack` holds a message of this type and text that the next
    /// frame would still draw.
    pub fn has_message(&self, stack: &str, message_type: MessageType, text: &str) -> bool {
        let now_ms = self.clock.now_ms();
        self.registry
            .lock()
            .get(stack)
            .is_some_and(|s| s.has_message(message_type, text, now_ms))
    }

    /// Names of registered stacks, in draw order.
    pub fn stack_names(&self) -> Vec<String> {
        self.registry.lock().stack_names().map(str::to_string).collect()
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("messages_enabled", &self.messages_enabled())
            .field("obscured", &self.obscured_margin())
            .finish_non_exhaustive()
    }
}
