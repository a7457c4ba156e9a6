//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `bloomfocus_core` linkage with a ping/version probe.
//! - Run a short synthetic session and print the renderer-facing snapshot.
//!
//! Usage: `bloomfocus_cli [config.json] [--log-dir <absolute dir>]`

use bloomfocus_core::{GardenConfig, GardenSession, Sketch};
use image::{ImageFormat, Rgba, RgbaImage};
use std::error::Error;
use std::io::Cursor;

const DEMO_CYCLES: u64 = 3;
const TICK_STEP_MS: u64 = 1_000;
const MAX_TICKS_PER_CYCLE: u64 = 600;

fn main() -> Result<(), Box<dyn Error>> {
    println!("bloomfocus_core ping={}", bloomfocus_core::ping());
    println!("bloomfocus_core version={}", bloomfocus_core::core_version());

    let args = CliArgs::parse(std::env::args().skip(1))?;
    if let Some(log_dir) = args.log_dir.as_deref() {
        bloomfocus_core::init_logging(bloomfocus_core::default_log_level(), log_dir)?;
    }
    let config = match args.config_path.as_deref() {
        Some(path) => GardenConfig::from_path(path)?,
        None => GardenConfig::default(),
    };

    let mut session = GardenSession::new(config, 0)?;
    for (width, height) in [(240, 240), (360, 200)] {
        session.on_save(Sketch::from_encoded(blank_png(width, height)?)?);
    }

    let (end_ms, step_ms) = demo_schedule(session.config());
    let mut now_ms = 0u64;
    while now_ms < end_ms {
        now_ms = now_ms.saturating_add(step_ms).min(end_ms);
        let outcome = session.tick(now_ms);
        if let Some(object) = outcome.planted {
            let display = session.timer_display(now_ms);
            println!(
                "t={}ms planted order={} at ({:.2}, {:.2}, {:.2}) next={} {}",
                now_ms,
                object.created_order,
                object.position.x,
                object.position.y,
                object.position.z,
                display.mode.label(),
                display.clock
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&session.snapshot(now_ms))?);
    Ok(())
}

/// End of the synthetic run and the tick spacing, both in ms.
///
/// Long configured periods widen the step so the run stays short.
fn demo_schedule(config: &GardenConfig) -> (u64, u64) {
    let cycle_ms = config
        .focus_duration_ms
        .saturating_add(config.break_duration_ms);
    let end_ms = cycle_ms.saturating_mul(DEMO_CYCLES);
    let step_ms = TICK_STEP_MS.max(cycle_ms / MAX_TICKS_PER_CYCLE);
    (end_ms, step_ms)
}

#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<String>,
    log_dir: Option<String>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            if arg == "--log-dir" {
                parsed.log_dir = Some(args.next().ok_or("--log-dir needs a value")?);
            } else if arg.starts_with("--") {
                return Err(format!("unknown flag `{arg}`"));
            } else if parsed.config_path.is_none() {
                parsed.config_path = Some(arg);
            } else {
                return Err(format!("unexpected argument `{arg}`"));
            }
        }
        Ok(parsed)
    }
}

// Stand-in for a studio export: a plain paper-colored canvas.
fn blank_png(width: u32, height: u32) -> Result<Vec<u8>, image::ImageError> {
    let canvas = RgbaImage::from_pixel(width, height, Rgba([255, 248, 241, 255]));
    let mut buffer = Cursor::new(Vec::new());
    canvas.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
