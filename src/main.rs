// src/main.rs

//! Headless demo: draws one frame of a small sketch into a recording surface
//! and prints the resulting device-space commands as JSON.

use sketch_core::color::{color_rgba, named};
use sketch_core::config::CONFIG;
use sketch_core::graphics::{ArcMode, GraphicsContext, RecordingSurface, ShapeMode};
use sketch_core::math::{HALF_PI, PI, QUARTER_PI, TWO_PI};

use anyhow::Context;
use log::info;

/// Spokes drawn around the center of the demo frame.
const SPOKES: usize = 6;

fn draw_frame(g: &mut GraphicsContext<RecordingSurface>) -> anyhow::Result<()> {
    let (w, h) = (g.width() as f32, g.height() as f32);

    g.background(CONFIG.color.background.0);
    g.translate(w / 2.0, h / 2.0);

    for i in 0..SPOKES {
        g.push_matrix().context("Failed to save transform for spoke")?;
        g.rotate(TWO_PI * i as f32 / SPOKES as f32);
        g.translate(w / 4.0, 0.0);
        g.stroke(named::NAVY);
        g.line(0.0, 0.0, w / 8.0, 0.0);
        g.pop_matrix().context("Failed to restore transform after spoke")?;
    }

    g.push_matrix()?;
    g.shear_x(QUARTER_PI / 2.0);
    g.fill(color_rgba(1.0, 0.5, 0.0, 0.75));
    g.rect_mode(ShapeMode::Center);
    g.rect(0.0, 0.0, w / 5.0, h / 5.0);
    g.pop_matrix()?;

    g.no_stroke();
    g.fill(named::TEAL);
    g.arc_with_mode(0.0, 0.0, w / 3.0, h / 3.0, HALF_PI, PI, ArcMode::Pie);

    let [sx, sy] = g.screen_point(0.0, 0.0);
    info!("Frame origin maps to device ({}, {})", sx, sy);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting sketch-core demo...");
    let config = &*CONFIG;
    info!(
        "Surface {}x{}, {:?} mode, stack capacity {}",
        config.surface.width,
        config.surface.height,
        config.surface.mode,
        config.transform.stack_capacity
    );

    let surface = RecordingSurface::new(config.surface.width, config.surface.height);
    let mut g = GraphicsContext::new(surface, config);

    g.begin_frame();
    draw_frame(&mut g).context("Demo frame failed")?;

    let commands = g.surface_mut().take_commands();
    info!("Recorded {} draw commands", commands.len());
    let json = serde_json::to_string_pretty(&commands).context("Failed to serialize draw commands")?;
    println!("{}", json);

    Ok(())
}
