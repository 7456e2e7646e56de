//! Renderer boundary for the overlay.
//!
//! The layout engine never rasterizes anything itself. It opens one named
//! surface per message, asks the renderer to draw the icon and text into it,
//! reads back the surface size and then places it on screen.

mod headless;

pub use headless::{HeadlessRenderer, SurfaceRecord};

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Renderer-owned texture created from a message icon.
///
/// Only the renderer that created a handle may destroy it, and only from the
/// thread running the layout pass.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

pub trait OverlayRenderer {
    /// Size of the drawable area in pixels.
    fn viewport_size(&self) -> Size;

    /// Device pixel ratio on each axis.
    fn framebuffer_scale(&self) -> Point;

    /// Upload an RGBA8 image. `None` means the upload failed.
    fn upload_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<TextureHandle>;

    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Start a surface. `name` is unique per stack and message slot.
    fn begin_surface(&mut self, name: &str, alpha: f32);

    fn draw_image(&mut self, texture: &TextureHandle, size: Size);

    fn draw_text(&mut self, text: &str, color: [f32; 4], scale: f32);

    /// Size of everything drawn into the current surface so far.
    fn surface_size(&self) -> Size;

    fn set_surface_position(&mut self, name: &str, position: Point);

    fn end_surface(&mut self);
}
