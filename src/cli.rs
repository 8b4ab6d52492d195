use crate::config::load_config;
use crate::dom::DocumentSnapshot;
use crate::dump::{overlay_dump, write_overlay_dump};
use crate::layout::compute_overlay_layout;
use crate::text_metrics::{CharCellMeasurer, FontMeasurer, LabelMeasurer};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "domlens",
    version,
    about = "Compute overlay label placements for a DOM snapshot"
)]
pub struct Args {
    /// Snapshot JSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Config JSON/JSON5 file (theme, thresholds, offsets)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Estimate text widths instead of querying system fonts. Gives
    /// machine-independent output, useful for golden files.
    #[arg(long = "estimate-text")]
    pub estimate_text: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Text,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let doc = DocumentSnapshot::from_json(&input).context("failed to read DOM snapshot")?;

    let measurer: Box<dyn LabelMeasurer> = if args.estimate_text {
        Box::new(CharCellMeasurer::default())
    } else {
        Box::new(FontMeasurer)
    };
    let layout = compute_overlay_layout(&doc, measurer.as_ref(), &config.theme, &config.layout);

    match args.format {
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_overlay_dump(path, &layout)?,
            None => {
                let dump = overlay_dump(&layout);
                serde_json::to_writer_pretty(io::stdout().lock(), &dump)?;
                println!();
            }
        },
        OutputFormat::Text => {
            let listing = text_listing(&layout);
            match args.output.as_deref() {
                Some(path) => std::fs::write(path, listing)?,
                None => print!("{listing}"),
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn text_listing(layout: &crate::layout::OverlayLayout) -> String {
    let mut out = String::new();
    for label in &layout.labels {
        let mut flags = String::new();
        if label.displaced {
            flags.push_str(" displaced");
        }
        if label.fallback {
            flags.push_str(" fallback");
        }
        out.push_str(&format!(
            "{:<40} {:<12} ({:.1}, {:.1}) {:.1}x{:.1}{}\n",
            label.text.to_string(),
            label.anchor.as_str(),
            label.rect.left,
            label.rect.top,
            label.rect.width,
            label.rect.height,
            flags
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::theme::OverlayTheme;

    #[test]
    fn text_listing_flags_displaced_labels() {
        let doc = DocumentSnapshot::from_json(
            r#"{
                "viewport": { "width": 1280, "height": 800 },
                "elements": [
                    { "tag": "section", "classes": ["outer"], "rect": { "left": 40, "top": 100, "width": 600, "height": 400 } },
                    { "tag": "p", "classes": ["text"], "parent": 0, "rect": { "left": 40, "top": 100, "width": 560, "height": 60 } }
                ]
            }"#,
        )
        .unwrap();
        let layout = compute_overlay_layout(
            &doc,
            &CharCellMeasurer::default(),
            &OverlayTheme::inspector(),
            &LayoutConfig::default(),
        );
        let listing = text_listing(&layout);
        assert!(listing.contains("section.outer"));
        assert!(listing.contains("displaced"));
    }
}
