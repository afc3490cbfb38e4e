//! CLI for frame fitting measurements.
//!
//! Usage:
//!   framefit <image> <landmarks.json>                 # Human-readable output
//!   framefit <image> <landmarks.json> --json          # JSON output
//!   framefit <image> <landmarks.json> -o fitting.json # Save record to file
//!
//! The landmark file is a JSON object mapping region names to arrays of
//! `{"x": .., "y": ..}` points; a full detector dump works as-is. An
//! annotated copy of the image is always written next to the input unless
//! `--annotated` picks another path.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use framefit::{AnnotationRenderer, LandmarkSet, Measurement};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framefit")]
#[command(author, version, about = "Eyeglass frame fitting measurements", long_about = None)]
struct Args {
    /// Input photo (frontal face)
    #[arg(required = true)]
    image: PathBuf,

    /// Landmark regions as JSON
    #[arg(required = true)]
    landmarks: PathBuf,

    /// Output the measurement record as JSON
    #[arg(short, long)]
    json: bool,

    /// Measurement output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Annotated image path (default: <image>_annotated.png)
    #[arg(long)]
    annotated: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let image = image::open(&args.image)
        .with_context(|| format!("failed to open image {}", args.image.display()))?
        .to_rgb8();
    debug!(
        "loaded {}x{} image from {}",
        image.width(),
        image.height(),
        args.image.display()
    );

    let payload = fs::read_to_string(&args.landmarks)
        .with_context(|| format!("failed to read landmarks {}", args.landmarks.display()))?;
    let landmarks = LandmarkSet::from_json(&payload)?;

    let measurement = Measurement::from_landmarks(&landmarks)?;

    let annotated = AnnotationRenderer::new().render(&image, &landmarks, &measurement)?;
    let annotated_path = args
        .annotated
        .clone()
        .unwrap_or_else(|| default_annotated_path(&args.image));
    annotated
        .save(&annotated_path)
        .with_context(|| format!("failed to write annotated image {}", annotated_path.display()))?;
    info!("annotated image written to {}", annotated_path.display());

    let output_str = if args.json {
        serde_json::to_string_pretty(&measurement.rounded())?
    } else {
        measurement.to_string()
    };

    if let Some(ref path) = args.output {
        fs::write(path, &output_str)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("measurements written to {}", path.display());
    } else {
        println!("{output_str}");
    }

    Ok(())
}

fn default_annotated_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    image.with_file_name(format!("{stem}_annotated.png"))
}
