//! Batch HOG extraction over a directory of images.
//!
//! Loads every regular file in the input directory, resizes it to a fixed
//! crop, extracts the descriptor over the full crop, and appends one JSON
//! record with the filenames and the stacked descriptor matrix to the
//! output file.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use hog_core::Rect;
use hog_features::{BlockNorm, GradientRange, Hog, HogConfig};

#[derive(Parser, Debug)]
#[command(name = "describe_dir", about = "Extract HOG descriptors for a directory of images")]
struct Args {
    /// Directory of input images.
    input: PathBuf,
    /// Output file; one JSON record per run is appended.
    output: PathBuf,
    /// Height every image is resized to before extraction.
    #[arg(long, default_value_t = 256)]
    crop_height: u32,
    /// Width every image is resized to before extraction.
    #[arg(long, default_value_t = 128)]
    crop_width: u32,
    /// Block side in pixels.
    #[arg(long, default_value_t = 32)]
    block_size: usize,
    /// Cell side in pixels.
    #[arg(long, default_value_t = 16)]
    cell_size: usize,
    /// Block stride in pixels.
    #[arg(long, default_value_t = 16)]
    stride: usize,
    /// Orientation bins per cell.
    #[arg(long, default_value_t = 9)]
    bins: usize,
    /// Use the signed 0-360 degree gradient range.
    #[arg(long)]
    signed: bool,
    /// Block normalization scheme.
    #[arg(long, value_enum, default_value_t = NormArg::L2hys)]
    norm: NormArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NormArg {
    L1,
    L1sqrt,
    L2,
    L2hys,
    None,
}

impl From<NormArg> for BlockNorm {
    fn from(arg: NormArg) -> Self {
        match arg {
            NormArg::L1 => BlockNorm::L1,
            NormArg::L1sqrt => BlockNorm::L1Sqrt,
            NormArg::L2 => BlockNorm::L2,
            NormArg::L2hys => BlockNorm::L2Hys,
            NormArg::None => BlockNorm::None,
        }
    }
}

#[derive(Serialize)]
struct DescriptorRecord<'a> {
    filenames: &'a [String],
    hog_features: &'a [Vec<f32>],
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let range = if args.signed {
        GradientRange::Signed
    } else {
        GradientRange::Unsigned
    };
    let config = HogConfig::new(args.block_size)
        .with_cell_size(args.cell_size)
        .with_stride(args.stride)
        .with_bins(args.bins)
        .with_range(range)
        .with_norm(args.norm.into());
    let mut hog = Hog::new(config)?;

    let crop = Rect::new(0, 0, args.crop_width as usize, args.crop_height as usize);
    let expected_len = hog.descriptor_len(&crop);

    // regular files only, sorted so reruns emit identical records
    let mut filenames: Vec<String> = fs::read_dir(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    filenames.sort();

    let started = Instant::now();
    let total = filenames.len();
    let mut features: Vec<Vec<f32>> = Vec::with_capacity(total);

    for (i, name) in filenames.iter().enumerate() {
        let path = args.input.join(name);
        let gray = image::open(&path)?.to_luma8();
        let resized = image::imageops::resize(
            &gray,
            args.crop_width,
            args.crop_height,
            image::imageops::FilterType::Triangle,
        );

        hog.process(&resized)?;
        let descriptor = hog.retrieve(&crop)?;
        assert_eq!(descriptor.len(), expected_len);

        info!("({}/{}) {} -> {} values", i + 1, total, name, descriptor.len());
        features.push(descriptor);
    }

    let record = DescriptorRecord {
        filenames: &filenames,
        hog_features: &features,
    };
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.output)?;
    serde_json::to_writer(&mut file, &record)?;
    file.write_all(b"\n")?;

    info!(
        "described {} images in {} ms",
        total,
        started.elapsed().as_millis()
    );
    Ok(())
}
