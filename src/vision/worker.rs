//! Background OCR detection worker

use crate::capture::CapturedFrame;
use crate::shared::Slot;
use crate::vision::ocr::TesseractEngine;
use crate::vision::parse::{self, DetectionSet};
use image::imageops;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Runs OCR passes against whatever frame is currently published.
///
/// The loop has no fixed period; its cadence is bounded by OCR latency,
/// not the frame rate. Engine, dimensions and crop are fixed before
/// `start()` and never mutated while the worker runs.
pub struct DetectionWorker {
    engine: TesseractEngine,
    frames: Arc<Slot<CapturedFrame>>,
    detections: Arc<Slot<DetectionSet>>,
    dimensions: (u32, u32),
    crop: (u32, u32),
    stopped: Arc<AtomicBool>,
    failure: Arc<RwLock<Option<String>>>,
    handle: Option<JoinHandle<()>>,
}

impl DetectionWorker {
    /// Wire a worker to the frame slot it consumes.
    ///
    /// `crop` must already be validated against `dimensions` (see
    /// `config::validate_crop`).
    pub fn new(
        engine: TesseractEngine,
        frames: Arc<Slot<CapturedFrame>>,
        dimensions: (u32, u32),
        crop: (u32, u32),
    ) -> Self {
        Self {
            engine,
            frames,
            detections: Arc::new(Slot::new()),
            dimensions,
            crop,
            stopped: Arc::new(AtomicBool::new(false)),
            failure: Arc::new(RwLock::new(None)),
            handle: None,
        }
    }

    /// The most recent detection set, or None before the first pass
    pub fn latest_detections(&self) -> Option<Arc<DetectionSet>> {
        self.detections.latest()
    }

    /// Why the detection worker died, if it has.
    ///
    /// A failed OCR invocation is not recovered; the render loop polls this
    /// so it can stop instead of displaying stale detections forever.
    pub fn failure(&self) -> Option<String> {
        self.failure.read().clone()
    }

    /// Begin continuous detection on a background thread
    pub fn start(&mut self) {
        let engine = self.engine.clone();
        let frames = self.frames.clone();
        let detections = self.detections.clone();
        let (width, height) = self.dimensions;
        let (crop_w, crop_h) = self.crop;
        let stopped = self.stopped.clone();
        let failure = self.failure.clone();

        self.handle = Some(std::thread::spawn(move || {
            while !stopped.load(Ordering::Relaxed) {
                let Some(frame) = frames.latest() else {
                    std::thread::sleep(Duration::from_millis(10));
                    continue;
                };

                let gray = imageops::grayscale(&frame.image);
                let cropped = imageops::crop_imm(
                    &gray,
                    crop_w,
                    crop_h,
                    width - 2 * crop_w,
                    height - 2 * crop_h,
                )
                .to_image();

                match engine.image_to_data(&cropped) {
                    Ok(raw) => detections.publish(parse::parse_tsv(&raw)),
                    Err(e) => {
                        *failure.write() = Some(e.to_string());
                        break;
                    }
                }
            }
        }));
    }

    /// Signal the detection loop to exit after its current pass
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
