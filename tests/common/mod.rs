//! Shared test helpers.

use std::sync::Arc;

use osd_overlay::{FrameReport, HeadlessRenderer, ManualClock, Overlay};

pub const VIEWPORT_WIDTH: f32 = 800.0;
pub const VIEWPORT_HEIGHT: f32 = 600.0;

/// Overlay driven by a clock the test controls.
pub fn overlay_with_clock() -> (Overlay, ManualClock) {
    let clock = ManualClock::new();
    (Overlay::with_clock(Arc::new(clock.clone())), clock)
}

/// 800x600 renderer with 10px glyphs and 20px lines.
pub fn renderer() -> HeadlessRenderer {
    HeadlessRenderer::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT).with_glyph_metrics(10.0, 20.0)
}

/// One line per placement: `stack #index (x, y) WxH a=alpha text`.
#[allow(dead_code)]
pub fn describe(report: &FrameReport) -> String {
    report
        .placements
        .iter()
        .map(|p| {
            format!(
                "{} #{} ({}, {}) {}x{} a={:.2} {}",
                if p.stack.is_empty() { "default" } else { p.stack.as_str() },
                p.index,
                p.position.x,
                p.position.y,
                p.size.width,
                p.size.height,
                p.alpha,
                p.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
