//! Render the arrow-glyph histogram overlay for a single image.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use hog_features::{render, Hog, HogConfig};

#[derive(Parser, Debug)]
#[command(name = "hog_overlay", about = "Save a HOG cell-histogram overlay as an image")]
struct Args {
    /// Input image.
    input: PathBuf,
    /// Output image path.
    #[arg(default_value = "overlay.png")]
    output: PathBuf,
    /// Block side in pixels.
    #[arg(long, default_value_t = 16)]
    block_size: usize,
    /// Line thickness of the rendered glyphs.
    #[arg(long, default_value_t = 1)]
    thickness: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let gray = image::open(&args.input)?.to_luma8();
    info!("loaded {} ({}x{})", args.input.display(), gray.width(), gray.height());

    let mut hog = Hog::new(HogConfig::new(args.block_size))?;
    hog.process(&gray)?;

    let mask = render::vector_mask(&hog, args.thickness).expect("processed above");
    mask.save(&args.output)?;
    info!("overlay written to {}", args.output.display());
    Ok(())
}
