//! Frame data for captured video content

use image::RgbImage;
use std::time::Instant;

/// A frame pulled from the capture device
#[derive(Debug)]
pub struct CapturedFrame {
    /// Decoded RGB pixels
    pub image: RgbImage,
    /// When the frame was acquired
    pub timestamp: Instant,
}

impl CapturedFrame {
    /// Wrap a decoded frame, stamping it with the current time
    pub fn new(image: RgbImage) -> Self {
        Self {
            image,
            timestamp: Instant::now(),
        }
    }

}
