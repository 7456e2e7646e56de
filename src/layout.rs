//! Per-frame placement of a stack's messages.
//!
//! Each pass starts a cursor at the stack's anchor, walks the messages in
//! key order (or reverse key order for reversed stacks), prunes the ones that
//! expired or were superseded, and draws the rest one after another, moving
//! the cursor by each measured surface size, plus padding, in the stack's
//! direction.

use serde::Serialize;

use crate::message::{IconTexture, Message, argb_to_rgba};
use crate::render::{OverlayRenderer, Point, Size};
use crate::stack::{MessageStack, StackDirection, StackLayout, Visit};

/// Pixels left of the first message, before framebuffer scaling.
pub const LEFT_MARGIN: f32 = 10.0;
/// Pixels above the first message, before framebuffer scaling.
pub const TOP_MARGIN: f32 = 10.0;
/// Pixels between consecutive messages, before framebuffer scaling.
pub const WINDOW_PADDING: f32 = 4.0;

/// Screen area reserved by other UI along the left and top edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObscuredMargin {
    pub left: i32,
    pub top: i32,
}

/// Inputs shared by every stack drawn in one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub now_ms: u64,
    /// When false, messages are still pruned but nothing is drawn.
    pub draw_enabled: bool,
    pub obscured: ObscuredMargin,
}

/// Where one message ended up this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub stack: String,
    pub index: usize,
    pub text: String,
    pub position: Point,
    pub size: Size,
    pub alpha: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameReport {
    pub placements: Vec<Placement>,
    /// Messages removed during the frame.
    pub pruned: usize,
}

impl FrameReport {
    /// Placements belonging to one stack, in draw order.
    pub fn for_stack<'a>(&'a self, stack: &'a str) -> impl Iterator<Item = &'a Placement> + 'a {
        self.placements.iter().filter(move |p| p.stack == stack)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.placements.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Surface name for the `index`-th drawn message of a stack.
pub fn surface_name(stack: &str, index: usize) -> String {
    format!("osd_{stack}_{index}")
}

/// Cursor position for the first message of a stack.
pub fn start_cursor(layout: &StackLayout, renderer: &dyn OverlayRenderer, obscured: ObscuredMargin) -> Point {
    let scale = renderer.framebuffer_scale();
    let viewport = renderer.viewport_size();
    let mut cursor = Point::new(
        LEFT_MARGIN * scale.x + obscured.left as f32 + layout.x_offset,
        TOP_MARGIN * scale.y + obscured.top as f32 + layout.y_offset,
    );
    match layout.direction {
        StackDirection::Leftward => cursor.x = viewport.width - cursor.x,
        StackDirection::Upward => cursor.y = viewport.height - cursor.y,
        StackDirection::Downward | StackDirection::Rightward => {}
    }
    cursor
}

/// Screen position of a surface of `size` drawn at `cursor`.
///
/// Centered stacks override the cross-axis coordinate. Upward and leftward
/// stacks hang the surface off the cursor so it stays on screen.
pub fn surface_position(layout: &StackLayout, cursor: Point, size: Size, viewport: Size) -> Point {
    let mut pos = cursor;
    if layout.centered {
        if layout.is_vertical() {
            pos.x = viewport.width / 2.0 - size.width / 2.0;
        } else {
            pos.y = viewport.height / 2.0 - size.height / 2.0;
        }
    }
    match layout.direction {
        StackDirection::Leftward => pos.x -= size.width,
        StackDirection::Upward => pos.y -= size.height,
        StackDirection::Downward | StackDirection::Rightward => {}
    }
    pos
}

/// Measured surface size plus the gap to the next message.
pub fn padded_size(measured: Size, framebuffer_scale: Point) -> Size {
    Size::new(
        measured.width + WINDOW_PADDING * framebuffer_scale.x,
        measured.height + WINDOW_PADDING * framebuffer_scale.y,
    )
}

/// Move the cursor past a drawn surface.
pub fn advance(cursor: &mut Point, direction: StackDirection, size: Size) {
    match direction {
        StackDirection::Downward => cursor.y += size.height,
        StackDirection::Upward => cursor.y -= size.height,
        StackDirection::Rightward => cursor.x += size.width,
        StackDirection::Leftward => cursor.x -= size.width,
    }
}

/// Run one frame over `stack`, appending to `report`.
///
/// Textures of pruned messages are released through `renderer` before this
/// returns.
pub fn draw_stack(
    stack: &mut MessageStack,
    renderer: &mut dyn OverlayRenderer,
    frame: &FrameContext,
    report: &mut FrameReport,
) {
    let layout = stack.layout().clone();
    let viewport = renderer.viewport_size();
    let mut cursor = start_cursor(&layout, renderer, frame.obscured);
    let mut index = 0;

    let removed = stack.walk(layout.reversed, |msg| {
        let time_left = msg.time_remaining(frame.now_ms);
        if msg.is_expired(time_left) {
            tracing::trace!("Dropping expired message '{}'", msg.text());
            return Visit::Remove;
        }
        if !msg.is_live() {
            tracing::trace!("Dropping superseded message '{}'", msg.text());
            return Visit::Remove;
        }
        if !frame.draw_enabled {
            return Visit::Keep;
        }

        let placement = draw_message(renderer, &layout, index, msg, cursor, time_left, viewport);
        advance(&mut cursor, layout.direction, placement.size);
        index += 1;
        report.placements.push(placement);
        Visit::Keep
    });

    report.pruned += removed.len();
    for mut msg in removed {
        if let Some(texture) = msg.texture.take() {
            renderer.destroy_texture(texture.handle);
        }
    }
}

fn draw_message(
    renderer: &mut dyn OverlayRenderer,
    layout: &StackLayout,
    index: usize,
    msg: &mut Message,
    cursor: Point,
    time_left: i64,
    viewport: Size,
) -> Placement {
    let name = surface_name(&layout.name, index);
    let alpha = msg.alpha(time_left);

    renderer.begin_surface(&name, alpha);
    upload_icon(renderer, msg);
    if let Some(texture) = &msg.texture {
        renderer.draw_image(&texture.handle, texture.size);
    }
    renderer.draw_text(msg.text(), argb_to_rgba(msg.color()), msg.scale());

    let size = padded_size(renderer.surface_size(), renderer.framebuffer_scale());
    let position = surface_position(layout, cursor, size, viewport);
    renderer.set_surface_position(&name, position);
    renderer.end_surface();
    msg.mark_drawn();

    Placement {
        stack: layout.name.clone(),
        index,
        text: msg.text().to_string(),
        position,
        size,
        alpha,
    }
}

/// Turn a pending icon into a texture. A failed upload drops the icon for
/// good and the message is drawn as text only.
fn upload_icon(renderer: &mut dyn OverlayRenderer, msg: &mut Message) {
    if msg.texture.is_some() {
        return;
    }
    let Some(icon) = msg.icon.take() else { return };
    match renderer.upload_texture(icon.width, icon.height, &icon.rgba) {
        Some(handle) => {
            msg.texture = Some(IconTexture {
                handle,
                size: Size::new(icon.width as f32, icon.height as f32),
            });
        }
        None => tracing::warn!(
            "Icon upload ({}x{}) failed for '{}', drawing text only",
            icon.width,
            icon.height,
            msg.text()
        ),
    }
}
