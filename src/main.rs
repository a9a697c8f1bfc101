//! realtime-ocr - live OCR results overlaid on a video feed
//!
//! Continuously reads frames from a capture device, runs tesseract on the
//! most recent frame in the background, and renders bounding boxes,
//! recognized text, and a throughput counter onto the displayed video.

mod app;
mod capture;
mod config;
mod lang;
mod overlay;
mod rate;
mod shared;
mod vision;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::PipelineConfig;
use crate::overlay::ViewMode;
use crate::vision::TesseractEngine;

/// Real-time OCR overlay on a live video feed
#[derive(Parser, Debug)]
#[command(name = "realtime-ocr")]
#[command(about = "Overlay live tesseract detections on a video stream")]
struct Args {
    /// Path to the tesseract executable
    #[arg(short, long)]
    tess_path: PathBuf,

    /// Crop margins in pixels (two values): width height
    #[arg(short, long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], allow_negative_numbers = true)]
    crop: Option<Vec<i32>>,

    /// View mode for OCR box display
    #[arg(short, long, default_value_t = 1)]
    view_mode: u32,

    /// Show the available view modes and exit
    #[arg(long)]
    show_views: bool,

    /// Tesseract language code, use + to add multiple (ex: chi_sim+chi_tra)
    #[arg(short, long)]
    language: Option<String>,

    /// Show the supported tesseract language codes and exit
    #[arg(long)]
    show_langs: bool,

    /// Video source index for capture
    #[arg(short, long, default_value_t = 0)]
    src: u32,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    // Configuration errors are fatal before any worker starts.
    let engine = TesseractEngine::new(&args.tess_path, args.language.clone())?;
    info!("using {}", engine.version()?);

    if args.show_langs {
        return lang::show_codes();
    }
    if args.show_views {
        println!("{}", ViewMode::describe());
        return Ok(());
    }

    let view_mode = ViewMode::try_from(args.view_mode)?;
    let config = PipelineConfig {
        source: args.src,
        view_mode,
        crop: args.crop.map(|values| (values[0], values[1])),
        language: args.language,
    };

    app::run(config, engine)
}
