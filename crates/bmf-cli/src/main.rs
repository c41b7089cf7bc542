//! bmfont-render - Main Entry Point

mod config;

use anyhow::{Context, Result};
use bmf_raster::Canvas;
use bmf_text::{Font, TextBox};
use tracing_subscriber::EnvFilter;

use config::{RenderConfig, cli};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = cli().get_matches();
    let config = RenderConfig::from_matches(&matches)?;
    run(&config)
}

fn run(config: &RenderConfig) -> Result<()> {
    let mut font = Font::load(&config.font, &config.image)
        .with_context(|| format!("Failed to load font {}", config.font.display()))?;
    for (metrics, image) in &config.subfonts {
        font.add_subfont(metrics, image)
            .with_context(|| format!("Failed to load subfont {}", metrics.display()))?;
    }
    tracing::info!(
        "Loaded {} ({} glyphs, {} subfonts)",
        config.font.display(),
        font.glyph_count(),
        font.subfont_count()
    );

    let mut canvas = Canvas::new(config.width, config.height)?;
    canvas.fill(config.background);

    let text_box = TextBox::new(config.x, config.y, config.box_width, config.box_height)
        .center_x(config.center_x)
        .center_y(config.center_y);
    let layout = text_box.render(&mut canvas, &config.text, &font);

    canvas.save_png(&config.output)?;
    tracing::info!(
        "Rendered {} lines to {} ({}x{})",
        layout.line_count(),
        config.output.display(),
        canvas.width(),
        canvas.height()
    );

    Ok(())
}
