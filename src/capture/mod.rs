//! Frame acquisition layer
//!
//! Owns the capture device and runs a background worker that keeps the
//! shared frame slot topped up with the newest frame. There is no
//! back-pressure in either direction: a slow consumer silently drops
//! frames, a fast one re-reads the same frame.

pub mod frame;

pub use frame::CapturedFrame;

use anyhow::{Context, Result};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{info, warn};

use crate::shared::Slot;

/// Consecutive failed reads before the device is treated as gone
const MAX_CONSECUTIVE_READ_FAILURES: u32 = 30;

/// Continuous frame acquisition from an indexed capture device
pub struct FrameSource {
    slot: Arc<Slot<CapturedFrame>>,
    stopped: Arc<AtomicBool>,
    failure: Arc<RwLock<Option<String>>>,
    dimensions: (u32, u32),
    camera: Option<Camera>,
    handle: Option<JoinHandle<()>>,
}

impl FrameSource {
    /// Open the capture device and read one initial frame so consumers
    /// always have something to display.
    pub fn new(source: u32) -> Result<Self> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(source), requested)
            .with_context(|| format!("failed to open video source {source}"))?;
        camera
            .open_stream()
            .with_context(|| format!("failed to start video source {source}"))?;

        let resolution = camera.resolution();
        let dimensions = (resolution.width(), resolution.height());
        info!(
            "video source {} opened at {}x{}",
            source, dimensions.0, dimensions.1
        );

        let slot = Arc::new(Slot::new());
        let initial = camera
            .frame()
            .and_then(|buffer| buffer.decode_image::<RgbFormat>())
            .with_context(|| format!("video source {source} produced no initial frame"))?;
        slot.publish(CapturedFrame::new(initial));

        Ok(Self {
            slot,
            stopped: Arc::new(AtomicBool::new(false)),
            failure: Arc::new(RwLock::new(None)),
            dimensions,
            camera: Some(camera),
            handle: None,
        })
    }

    /// Stream dimensions, fixed for the lifetime of the source
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// Handle to the published frame slot, for wiring up consumers
    pub fn frames(&self) -> Arc<Slot<CapturedFrame>> {
        self.slot.clone()
    }

    /// The most recently acquired frame
    pub fn latest_frame(&self) -> Option<Arc<CapturedFrame>> {
        self.slot.latest()
    }

    /// Why the acquisition worker died, if it has
    pub fn failure(&self) -> Option<String> {
        self.failure.read().clone()
    }

    /// Begin continuous acquisition on a background thread
    pub fn start(&mut self) {
        let Some(mut camera) = self.camera.take() else {
            return;
        };
        let slot = self.slot.clone();
        let stopped = self.stopped.clone();
        let failure = self.failure.clone();

        self.handle = Some(std::thread::spawn(move || {
            let mut consecutive_failures = 0u32;
            while !stopped.load(Ordering::Relaxed) {
                match camera
                    .frame()
                    .and_then(|buffer| buffer.decode_image::<RgbFormat>())
                {
                    Ok(image) => {
                        consecutive_failures = 0;
                        slot.publish(CapturedFrame::new(image));
                    }
                    Err(e) => {
                        // Keep the previous frame and carry on; a long run
                        // of failures means the device is gone for good.
                        consecutive_failures += 1;
                        if consecutive_failures >= MAX_CONSECUTIVE_READ_FAILURES {
                            *failure.write() =
                                Some(format!("capture device stopped responding: {e}"));
                            break;
                        }
                        warn!("dropped a camera read: {e}");
                    }
                }
            }
            let _ = camera.stop_stream();
        }));
    }

    /// Signal the acquisition loop to exit after its current read
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
