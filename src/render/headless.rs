//! Windowless renderer with fixed glyph metrics.
//!
//! Measures text as `chars * glyph_width` by `line_height` (both multiplied
//! by the message scale) and records every surface it places. Used by the
//! demo binary and by tests that need exact, reproducible sizes.

use std::collections::HashSet;

use serde::Serialize;

use super::{OverlayRenderer, Point, Size, TextureHandle};

/// A surface as it was placed on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceRecord {
    pub name: String,
    pub text: String,
    pub color: [f32; 4],
    pub alpha: f32,
    pub position: Point,
    pub size: Size,
    /// Size of the icon drawn into the surface, if any.
    pub image: Option<Size>,
}

#[derive(Debug)]
pub struct HeadlessRenderer {
    viewport: Size,
    framebuffer_scale: Point,
    glyph_width: f32,
    line_height: f32,
    fail_uploads: bool,
    next_texture: u64,
    live_textures: HashSet<u64>,
    uploads: usize,
    current: Option<SurfaceRecord>,
    surfaces: Vec<SurfaceRecord>,
}

impl HeadlessRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Size::new(width, height),
            framebuffer_scale: Point::new(1.0, 1.0),
            glyph_width: 8.0,
            line_height: 16.0,
            fail_uploads: false,
            next_texture: 1,
            live_textures: HashSet::new(),
            uploads: 0,
            current: None,
            surfaces: Vec::new(),
        }
    }

    pub fn with_glyph_metrics(mut self, glyph_width: f32, line_height: f32) -> Self {
        self.glyph_width = glyph_width;
        self.line_height = line_height;
        self
    }

    pub fn with_framebuffer_scale(mut self, x: f32, y: f32) -> Self {
        self.framebuffer_scale = Point::new(x, y);
        self
    }

    /// Make every texture upload fail.
    pub fn with_failing_uploads(mut self) -> Self {
        self.fail_uploads = true;
        self
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
    }

    /// Surfaces placed since the last call, in draw order.
    pub fn take_surfaces(&mut self) -> Vec<SurfaceRecord> {
        std::mem::take(&mut self.surfaces)
    }

    pub fn surfaces(&self) -> &[SurfaceRecord] {
        &self.surfaces
    }

    /// Textures uploaded and not yet destroyed.
    pub fn live_textures(&self) -> usize {
        self.live_textures.len()
    }

    /// Upload attempts, successful or not.
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl OverlayRenderer for HeadlessRenderer {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn framebuffer_scale(&self) -> Point {
        self.framebuffer_scale
    }

    fn upload_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<TextureHandle> {
        self.uploads += 1;
        if self.fail_uploads || width == 0 || height == 0 {
            return None;
        }
        debug_assert_eq!(rgba.len(), width as usize * height as usize * 4);
        let id = self.next_texture;
        self.next_texture += 1;
        self.live_textures.insert(id);
        Some(TextureHandle(id))
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        if !self.live_textures.remove(&texture.0) {
            tracing::warn!("Destroying unknown texture {}", texture.0);
        }
    }

    fn begin_surface(&mut self, name: &str, alpha: f32) {
        if let Some(open) = self.current.take() {
            tracing::warn!("Surface '{}' was never ended", open.name);
        }
        self.current = Some(SurfaceRecord {
            name: name.to_string(),
            text: String::new(),
            color: [0.0; 4],
            alpha,
            position: Point::default(),
            size: Size::default(),
            image: None,
        });
    }

    fn draw_image(&mut self, _texture: &TextureHandle, size: Size) {
        let Some(surface) = self.current.as_mut() else { return };
        surface.image = Some(size);
        surface.size.width = surface.size.width.max(size.width);
        surface.size.height += size.height;
    }

    fn draw_text(&mut self, text: &str, color: [f32; 4], scale: f32) {
        let Some(surface) = self.current.as_mut() else { return };
        let width = text.chars().count() as f32 * self.glyph_width * scale;
        surface.text.push_str(text);
        surface.color = color;
        surface.size.width = surface.size.width.max(width);
        surface.size.height += self.line_height * scale;
    }

    fn surface_size(&self) -> Size {
        self.current.as_ref().map(|s| s.size).unwrap_or_default()
    }

    fn set_surface_position(&mut self, name: &str, position: Point) {
        match self.current.as_mut() {
            Some(surface) if surface.name == name => surface.position = position,
            _ => tracing::warn!("Positioning surface '{}' that is not open", name),
        }
    }

    fn end_surface(&mut self) {
        if let Some(surface) = self.current.take() {
            self.surfaces.push(surface);
        }
    }
}
