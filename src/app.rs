//! Pipeline orchestrator
//!
//! Single-threaded foreground loop: polls the keyboard, reads the latest
//! published frame and detection set, composites the overlay passes, and
//! presents the result. Stays responsive no matter how slow OCR is.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use image::RgbImage;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::path::Path;
use tracing::{info, warn};

use crate::capture::FrameSource;
use crate::config::{self, PipelineConfig};
use crate::lang;
use crate::overlay;
use crate::rate::RateCounter;
use crate::vision::{DetectionWorker, TesseractEngine};

/// Directory for captured stills, created on first use
const IMAGES_DIR: &str = "images";

/// Run the capture/detect/render pipeline until the user quits.
///
/// `q` (or closing the window) stops both workers and exits; `c` saves the
/// current composited frame and prints its caption.
pub fn run(config: PipelineConfig, engine: TesseractEngine) -> Result<()> {
    let mut frames = FrameSource::new(config.source)?;
    let (width, height) = frames.dimensions();
    let (crop_w, crop_h) = config::validate_crop(config.crop, width, height);
    frames.start();

    let mut detector = DetectionWorker::new(engine, frames.frames(), (width, height), (crop_w, crop_h));
    detector.start();
    info!("OCR stream started");

    let language_label = lang::language_string(config.language.as_deref());
    let mut rate = RateCounter::new().start();
    let mut captures = 0u32;

    let mut window = Window::new(
        "realtime OCR",
        width as usize,
        height as usize,
        WindowOptions::default(),
    )
    .context("failed to open the video window")?;
    window.set_target_fps(60);

    println!("\nPUSH c TO CAPTURE AN IMAGE. PUSH q TO QUIT THE VIDEO STREAM\n");

    let outcome = loop {
        if !window.is_open() || window.is_key_pressed(Key::Q, KeyRepeat::No) {
            break Ok(());
        }
        if let Some(reason) = frames.failure() {
            break Err(anyhow!("frame acquisition stopped: {reason}"));
        }
        if let Some(reason) = detector.failure() {
            break Err(anyhow!("OCR worker stopped: {reason}"));
        }

        let Some(frame) = frames.latest_frame() else {
            continue;
        };
        let mut composited = frame.image.clone();

        overlay::draw_rate(&mut composited, rate.rate());
        overlay::draw_language(&mut composited, &language_label);
        overlay::draw_crop_box(&mut composited, crop_w, crop_h);
        let caption = match detector.latest_detections() {
            Some(detections) => overlay::draw_detections(
                &mut composited,
                &detections,
                config.view_mode,
                crop_w,
                crop_h,
            ),
            None => String::new(),
        };

        if window.is_key_pressed(Key::C, KeyRepeat::No) {
            println!("\n{caption}");
            match capture_image(&composited, Path::new(IMAGES_DIR), captures) {
                Ok(count) => captures = count,
                Err(e) => warn!("failed to save capture: {e}"),
            }
        }

        let buffer = rgb_to_argb(&composited);
        window
            .update_with_buffer(&buffer, width as usize, height as usize)
            .context("failed to present a frame")?;
        rate.increment();
    };

    frames.stop();
    detector.stop();
    info!("OCR stream stopped");
    info!("{captures} image(s) captured and saved to {IMAGES_DIR}/");
    outcome
}

/// File name for the nth capture of this session
fn capture_filename(now: &DateTime<Local>, captures: u32) -> String {
    format!(
        "OCR {} at {}-{}.jpg",
        now.format("%Y-%m-%d"),
        now.format("%H:%M:%S"),
        captures + 1
    )
}

/// Write a composited frame under `dir`, returning the new capture count
fn capture_image(frame: &RgbImage, dir: &Path, captures: u32) -> Result<u32> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let name = capture_filename(&Local::now(), captures);
    let path = dir.join(&name);
    frame
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("{name}");
    Ok(captures + 1)
}

/// Pack RGB pixels into the 0RGB words the window expects
fn rgb_to_argb(image: &RgbImage) -> Vec<u32> {
    image
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect()
}
