//! Headless overlay demo.
//!
//! Spawns a few producer threads that post messages while the main thread
//! draws frames with the headless renderer and prints where every message
//! landed.
//!
//! Usage:
//!   osd-demo                          # 12 frames, 250ms apart
//!   osd-demo --frames 40 --frame-ms 100
//!   osd-demo --config overlay.json    # stacks and enabled flag from a file
//!   osd-demo --icon badge.png         # attach an icon to the first message

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use osd_overlay::{
    HeadlessRenderer, Icon, MessageRequest, MessageType, MonotonicClock, Overlay, OverlayConfig,
    StackDirection, StackLayout, color, duration,
};

const FPS_MESSAGE: MessageType = MessageType::Typed(0);

#[derive(Parser)]
#[command(name = "osd-demo")]
#[command(about = "Drive the notification overlay with a headless renderer")]
struct Cli {
    /// Frames to draw
    #[arg(long, default_value_t = 12)]
    frames: u32,

    /// Milliseconds between frames
    #[arg(long, default_value_t = 250)]
    frame_ms: u64,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Number of producer threads
    #[arg(long, default_value_t = 3)]
    producers: usize,

    /// Config file (defaults to the user data directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image to show as an icon on the first message
    #[arg(long)]
    icon: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => OverlayConfig::load_from(path)?,
        None => OverlayConfig::load(),
    };

    let overlay = Arc::new(Overlay::from_config(&config, Arc::new(MonotonicClock::new())));
    if config.stacks.is_empty() {
        overlay.add_message_stack(StackLayout::new("perf").direction(StackDirection::Leftward));
        overlay.add_message_stack(
            StackLayout::new("status")
                .direction(StackDirection::Upward)
                .centered(true),
        );
    }

    let mut first = MessageRequest::new("Overlay demo started", duration::NORMAL, color::CYAN);
    if let Some(path) = &cli.icon {
        first = first.icon(Icon::load(path)?);
    }
    overlay.add_message(first);

    let producers: Vec<_> = (0..cli.producers)
        .map(|id| spawn_producer(Arc::clone(&overlay), id, cli.frame_ms))
        .collect();

    let mut renderer = HeadlessRenderer::new(cli.width, cli.height);
    for frame in 0..cli.frames {
        overlay.add_typed_message(
            FPS_MESSAGE,
            MessageRequest::new(format!("FPS: {}", 1000 / cli.frame_ms.max(1)), 0, color::GREEN)
                .stack("perf"),
        );

        let report = overlay.draw_messages(&mut renderer);
        println!("frame {frame}: {} drawn, {} pruned", report.placements.len(), report.pruned);
        for p in &report.placements {
            println!(
                "  [{}#{}] ({:.0}, {:.0}) {:.0}x{:.0} a={:.2} {}",
                if p.stack.is_empty() { "default" } else { p.stack.as_str() },
                p.index,
                p.position.x,
                p.position.y,
                p.size.width,
                p.size.height,
                p.alpha,
                p.text
            );
        }
        renderer.take_surfaces();
        thread::sleep(Duration::from_millis(cli.frame_ms));
    }

    for handle in producers {
        if handle.join().is_err() {
            tracing::warn!("Producer thread panicked");
        }
    }
    overlay.clear_messages();
    overlay.draw_messages(&mut renderer);
    Ok(())
}

/// Post a handful of messages from a background thread.
fn spawn_producer(overlay: Arc<Overlay>, id: usize, frame_ms: u64) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for n in 0..4 {
            overlay.add_message(
                MessageRequest::new(format!("Producer {id}: event {n}"), duration::SHORT, color::YELLOW)
                    .prevent_duplicate(true),
            );
            if n == 2 {
                overlay.add_message(
                    MessageRequest::new(format!("Producer {id} needs attention"), duration::SHORT, color::RED)
                        .stack("status"),
                );
            }
            thread::sleep(Duration::from_millis(frame_ms * (id as u64 + 1)));
        }
    })
}
