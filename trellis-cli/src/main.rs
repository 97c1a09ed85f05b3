//! Trellis CLI
//!
//! Lays out JSON scene descriptions in a headless document and prints the
//! resulting geometry.
//!
//! Set `RUST_LOG=trellis_ui=trace` to follow every placement.

mod scene;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use trellis_common::warning::clear_warnings;
use trellis_ui::Quirks;

use scene::Scene;

/// Trellis: lay out widget scenes and inspect their geometry
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the laid out tree
    trellis scene.json

    # Lay out, then resize the root and print again
    trellis --resize 640x480 scene.json

    # Emulate legacy engine geometry
    trellis --quirks scene.json

    # Machine-readable output
    trellis --json scene.json
"#)]
struct Cli {
    /// Scene description files
    #[arg(value_name = "SCENE", required = true)]
    scenes: Vec<PathBuf>,

    /// Resize the root container after the first layout
    #[arg(long, value_name = "WxH")]
    resize: Option<Size>,

    /// Enable every legacy engine correction
    #[arg(long)]
    quirks: bool,

    /// Print the geometry as JSON
    #[arg(long)]
    json: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

/// A `WIDTHxHEIGHT` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Size {
    width: f32,
    height: f32,
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| format!("invalid dimension '{part}'"))
        };
        Ok(Self {
            width: parse(width)?,
            height: parse(height)?,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stdout().is_terminal();
    let quirks = if cli.quirks {
        Quirks::LEGACY
    } else {
        Quirks::NONE
    };

    for path in &cli.scenes {
        clear_warnings();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let scene =
            Scene::from_json(&text).with_context(|| format!("in {}", path.display()))?;
        let mut built = scene
            .build(quirks)
            .with_context(|| format!("failed to build {}", path.display()))?;

        if cli.scenes.len() > 1 {
            let header = format!("=== {} ===", path.display());
            if color {
                println!("{}", header.bold());
            } else {
                println!("{header}");
            }
        }
        print_report(&built.report(), cli.json, color)?;

        if let Some(size) = cli.resize {
            built.resize(size.width, size.height)?;
            let header = format!("--- resized to {}x{} ---", size.width, size.height);
            if color {
                println!("{}", header.yellow());
            } else {
                println!("{header}");
            }
            print_report(&built.report(), cli.json, color)?;
        }
    }
    Ok(())
}

fn print_report(report: &scene::Report, json: bool, color: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render(color));
    }
    Ok(())
}
