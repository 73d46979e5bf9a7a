//! snapcrop - capture a photo, detect text regions, crop to one
//!
//! Runs the full pipeline against an image file: capture (file-backed
//! camera), text-region detection via the configured OCR provider,
//! largest-box default selection, crop, and the downstream handoff.

mod capture;
mod config;
mod crop;
mod detect;
mod error;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::capture::{Camera, FileCamera};
use crate::config::{AppConfig, ProviderKind};
use crate::crop::crop_image;
use crate::detect::Detector;
use crate::session::CaptureSession;

/// snapcrop - detect text regions in a photo and crop to one
#[derive(Parser, Debug)]
#[command(name = "snapcrop")]
#[command(about = "Detect text regions in a photo, pick one, crop it")]
struct Args {
    /// Photo to process
    image: PathBuf,

    /// Where to write the cropped region
    #[arg(short, long, default_value = "crop.jpg")]
    output: PathBuf,

    /// Subject tag attached to the downstream handoff
    #[arg(short, long, default_value = "untagged")]
    subject: String,

    /// Override the configured OCR provider
    #[arg(short, long, value_enum)]
    provider: Option<ProviderArg>,

    /// Crop a specific box id instead of the largest region
    #[arg(long)]
    select: Option<u32>,

    /// Configuration file path (defaults to the per-user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// CLI name for each OCR provider
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ProviderArg {
    Mock,
    Cloud,
    Local,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Mock => ProviderKind::Mock,
            ProviderArg::Cloud => ProviderKind::Cloud,
            ProviderArg::Local => ProviderKind::Local,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = load_or_create_config(args.config.as_deref());
    if let Some(provider) = args.provider {
        config.provider = provider.into();
    }

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(run(args, config))
}

/// Run the capture -> detect -> select -> crop -> handoff flow once
async fn run(args: Args, config: AppConfig) -> Result<()> {
    let camera = FileCamera::new(&args.image);
    let mut session = CaptureSession::new();

    let image = camera.take_picture().await?;
    info!("Captured {}x{} photo: {}", image.width, image.height, image.uri);

    let generation = session.begin_capture(image.clone());

    let detector = Detector::new(config.clone());
    let boxes = detector.detect(&image).await?;
    info!("Detection pass produced {} box(es)", boxes.len());

    session.apply_detection(generation, boxes);

    if session.boxes().is_empty() {
        info!("No text regions found; nothing to crop");
        return Ok(());
    }

    for b in session.boxes() {
        info!(
            "  [{}] ({:.0}, {:.0}) {:.0}x{:.0} conf {:.2} {:?}",
            b.id, b.x, b.y, b.width, b.height, b.confidence, b.text
        );
    }

    if let Some(id) = args.select {
        anyhow::ensure!(session.select(id), "no detection box with id {id}");
    }

    let chosen = session
        .selected_box()
        .cloned()
        .context("no detection box selected")?;
    info!("Selected box {} ({:.0} px^2)", chosen.id, chosen.area());

    // Crop failures surface, unlike detection failures
    let cropped = crop_image(Path::new(&image.uri), &chosen, &args.output, &config.crop)?;

    let handoff = session.handoff(cropped, &args.subject);
    info!(
        "Handed off {}x{} crop {:?} tagged '{}'",
        handoff.cropped.width, handoff.cropped.height, handoff.cropped.path, handoff.subject
    );

    Ok(())
}

/// Load configuration from file or create default
fn load_or_create_config(path: Option<&Path>) -> AppConfig {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => config::default_config_path().ok(),
    };

    if let Some(config_path) = config_path {
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                info!("Loaded configuration from {:?}", config_path);
                return config;
            }
        }
    }

    info!("Using default configuration");
    AppConfig::default()
}
