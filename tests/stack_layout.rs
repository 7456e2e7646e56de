//! Screen placement of messages for every stack configuration.

mod common;

use common::{describe, overlay_with_clock, renderer};
use osd_overlay::render::Point;
use osd_overlay::{HeadlessRenderer, Icon, MessageRequest, MessageType, StackDirection, StackLayout};

fn positions(report: &osd_overlay::FrameReport, stack: &str) -> Vec<Point> {
    report.for_stack(stack).map(|p| p.position).collect()
}

#[test]
fn test_downward_stack_accumulates_heights() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message(MessageRequest::new("one", 5000, 0));
    overlay.add_message(MessageRequest::new("two", 5000, 0).scale(2.0));
    overlay.add_message(MessageRequest::new("three", 5000, 0));

    let report = overlay.draw_messages(&mut renderer);
    let heights: Vec<f32> = report.placements.iter().map(|p| p.size.height).collect();
    assert_eq!(heights, vec![24.0, 44.0, 24.0]);
    assert_eq!(
        positions(&report, ""),
        vec![Point::new(10.0, 10.0), Point::new(10.0, 34.0), Point::new(10.0, 78.0)]
    );
}

#[test]
fn test_obscured_margin_shifts_anchor() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.set_obscured_pixels_left(7);
    overlay.set_obscured_pixels_top(5);
    overlay.add_message(MessageRequest::new("one", 5000, 0));
    overlay.add_message(MessageRequest::new("two", 5000, 0));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(
        positions(&report, ""),
        vec![Point::new(17.0, 15.0), Point::new(17.0, 39.0)]
    );

    // Margins are read fresh every frame.
    overlay.set_obscured_pixels_top(0);
    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(report.placements[0].position, Point::new(17.0, 10.0));
}

#[test]
fn test_framebuffer_scale_multiplies_margins() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer().with_framebuffer_scale(2.0, 1.5);
    overlay.add_message(MessageRequest::new("hidpi", 5000, 0));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(report.placements[0].position, Point::new(20.0, 15.0));
}

#[test]
fn test_padding_between_messages_scales_with_framebuffer() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer().with_framebuffer_scale(2.0, 2.0);
    overlay.add_message(MessageRequest::new("first", 5000, 0));
    overlay.add_message(MessageRequest::new("second", 5000, 0));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(report.placements[0].position, Point::new(20.0, 20.0));
    assert_eq!(report.placements[0].size.height, 28.0);
    assert_eq!(report.placements[1].position, Point::new(20.0, 48.0));
    // The renderer itself saw the unpadded surface.
    assert_eq!(renderer.surfaces()[0].size.height, 20.0);
}

#[test]
fn test_stack_offset() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(StackLayout::new("netplay").offset(0.0, 100.0));
    overlay.add_message(MessageRequest::new("chat", 5000, 0).stack("netplay"));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(positions(&report, "netplay"), vec![Point::new(10.0, 110.0)]);
}

#[test]
fn test_upward_stack_grows_from_bottom() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(StackLayout::new("up").direction(StackDirection::Upward));
    overlay.add_message(MessageRequest::new("aa", 5000, 0).stack("up"));
    overlay.add_message(MessageRequest::new("bb", 5000, 0).stack("up"));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(
        positions(&report, "up"),
        vec![Point::new(10.0, 566.0), Point::new(10.0, 542.0)]
    );
}

#[test]
fn test_leftward_stack_grows_from_right_edge() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(StackLayout::new("left").direction(StackDirection::Leftward));
    overlay.add_message(MessageRequest::new("abc", 5000, 0).stack("left"));
    overlay.add_message(MessageRequest::new("de", 5000, 0).stack("left"));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(
        positions(&report, "left"),
        vec![Point::new(756.0, 10.0), Point::new(732.0, 10.0)]
    );
}

#[test]
fn test_rightward_stack() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(StackLayout::new("right").direction(StackDirection::Rightward));
    overlay.add_message(MessageRequest::new("abc", 5000, 0).stack("right"));
    overlay.add_message(MessageRequest::new("de", 5000, 0).stack("right"));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(
        positions(&report, "right"),
        vec![Point::new(10.0, 10.0), Point::new(44.0, 10.0)]
    );
}

#[test]
fn test_centered_vertical_stack() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(StackLayout::new("mid").centered(true));
    overlay.add_message(MessageRequest::new("abcd", 5000, 0).stack("mid"));
    overlay.add_message(MessageRequest::new("abcdefgh", 5000, 0).stack("mid"));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(
        positions(&report, "mid"),
        vec![Point::new(378.0, 10.0), Point::new(358.0, 34.0)]
    );
}

#[test]
fn test_centered_horizontal_stack() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(
        StackLayout::new("ticker")
            .direction(StackDirection::Rightward)
            .centered(true),
    );
    overlay.add_message(MessageRequest::new("abc", 5000, 0).stack("ticker"));
    overlay.add_message(MessageRequest::new("big", 5000, 0).scale(2.0).stack("ticker"));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(
        positions(&report, "ticker"),
        vec![Point::new(10.0, 288.0), Point::new(44.0, 278.0)]
    );
}

#[test]
fn test_reversed_stack_walks_back_to_front() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(StackLayout::new("rev").reversed(true));
    for text in ["a", "b", "c"] {
        overlay.add_message(MessageRequest::new(text, 5000, 0).stack("rev"));
    }

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(report.texts(), vec!["c", "b", "a"]);
    assert_eq!(
        positions(&report, "rev"),
        vec![Point::new(10.0, 10.0), Point::new(10.0, 34.0), Point::new(10.0, 58.0)]
    );
}

#[test]
fn test_reversed_stack_prunes_while_walking() {
    let (overlay, clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(StackLayout::new("rev").reversed(true));
    overlay.add_message(MessageRequest::new("long", 5000, 0).stack("rev"));
    overlay.add_message(MessageRequest::new("brief", 100, 0).stack("rev"));
    overlay.add_message(MessageRequest::new("newest", 5000, 0).stack("rev"));
    overlay.draw_messages(&mut renderer);

    clock.advance(100);
    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(report.texts(), vec!["newest", "long"]);
    assert_eq!(report.pruned, 1);
}

#[test]
fn test_typed_messages_lead_the_stack() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message(MessageRequest::new("typeless", 5000, 0));
    overlay.add_typed_message(MessageType::Typed(1), MessageRequest::new("typed", 5000, 0));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(report.texts(), vec!["typed", "typeless"]);
}

#[test]
fn test_icon_adds_to_measured_height() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    let icon = Icon::new(16, 16, vec![0; 16 * 16 * 4]).unwrap();
    overlay.add_message(MessageRequest::new("badge", 5000, 0).icon(icon));
    overlay.add_message(MessageRequest::new("next", 5000, 0));

    let report = overlay.draw_messages(&mut renderer);
    assert_eq!(report.placements[0].size.height, 40.0);
    assert_eq!(report.placements[1].position, Point::new(10.0, 50.0));
}

#[test]
fn test_surface_names_unique_per_stack_and_slot() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(StackLayout::new("hud"));
    overlay.add_message(MessageRequest::new("a", 5000, 0));
    overlay.add_message(MessageRequest::new("b", 5000, 0));
    overlay.add_message(MessageRequest::new("c", 5000, 0).stack("hud"));

    overlay.draw_messages(&mut renderer);
    let names: Vec<&str> = renderer.surfaces().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["osd__0", "osd__1", "osd_hud_0"]);
}

#[test]
fn test_text_color_passed_as_rgba() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message(MessageRequest::new("red", 5000, osd_overlay::color::RED));
    overlay.draw_messages(&mut renderer);
    assert_eq!(renderer.surfaces()[0].color, [1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_nothing_drawn_when_disabled() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.set_messages_enabled(false);
    overlay.add_message(MessageRequest::new("quiet", 5000, 0));

    let report = overlay.draw_messages(&mut renderer);
    assert!(report.placements.is_empty());
    assert!(renderer.surfaces().is_empty());
}

#[test]
fn test_viewport_resize_moves_edge_stacks() {
    let (overlay, _clock) = overlay_with_clock();
    let mut renderer = HeadlessRenderer::new(800.0, 600.0).with_glyph_metrics(10.0, 20.0);
    overlay.add_message_stack(StackLayout::new("up").direction(StackDirection::Upward));
    overlay.add_message(MessageRequest::new("x", 5000, 0).stack("up"));

    assert_eq!(overlay.draw_messages(&mut renderer).placements[0].position.y, 566.0);
    renderer.set_viewport(1024.0, 768.0);
    assert_eq!(overlay.draw_messages(&mut renderer).placements[0].position.y, 734.0);
}

#[test]
fn test_frame_snapshot_across_stacks() {
    let (overlay, clock) = overlay_with_clock();
    let mut renderer = renderer();
    overlay.add_message_stack(StackLayout::new("status").direction(StackDirection::Upward).centered(true));
    overlay.add_message_stack(StackLayout::new("perf").direction(StackDirection::Leftward));

    overlay.add_message(MessageRequest::new("hello", 2000, 0));
    overlay.add_typed_message(MessageType::Typed(1), MessageRequest::new("loading 50%", 2000, 0));
    overlay.add_message(MessageRequest::new("FPS: 60", 2000, 0).stack("perf"));
    overlay.add_message(MessageRequest::new("saved", 2000, 0).stack("status"));
    overlay.add_message(MessageRequest::new("synced", 2000, 0).stack("status"));

    insta::assert_snapshot!(describe(&overlay.draw_messages(&mut renderer)), @r"
    default #0 (10, 10) 114x24 a=1.00 loading 50%
    default #1 (10, 34) 54x24 a=1.00 hello
    perf #0 (716, 10) 74x24 a=1.00 FPS: 60
    status #0 (373, 566) 54x24 a=1.00 saved
    status #1 (368, 542) 64x24 a=1.00 synced
    ");

    clock.advance(1500);
    overlay.add_typed_message(MessageType::Typed(1), MessageRequest::new("loading 100%", 2000, 0));

    insta::assert_snapshot!(describe(&overlay.draw_messages(&mut renderer)), @r"
    default #0 (10, 10) 124x24 a=1.00 loading 100%
    default #1 (10, 34) 54x24 a=0.50 hello
    perf #0 (716, 10) 74x24 a=0.50 FPS: 60
    status #0 (373, 566) 54x24 a=0.50 saved
    status #1 (368, 542) 64x24 a=0.50 synced
    ");
}
