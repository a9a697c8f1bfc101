//! View mode policy: which detections get highlighted, and how

use image::Rgb;
use thiserror::Error;

const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Raised when the CLI asks for a view mode outside 1-4
#[derive(Debug, Error, PartialEq, Eq)]
#[error("view mode {0} does not exist, only modes 1-4 are available")]
pub struct InvalidViewMode(pub u32);

/// Display policy for detection boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Mode 1: only boxes above 75 confidence, drawn green
    Strict,
    /// Mode 2: every box, green at 50+ confidence, red below
    PassFail,
    /// Mode 3: every box, colored by confidence on a gradient
    Gradient,
    /// Mode 4: every box, drawn red
    All,
}

impl TryFrom<u32> for ViewMode {
    type Error = InvalidViewMode;

    fn try_from(mode: u32) -> Result<Self, Self::Error> {
        match mode {
            1 => Ok(ViewMode::Strict),
            2 => Ok(ViewMode::PassFail),
            3 => Ok(ViewMode::Gradient),
            4 => Ok(ViewMode::All),
            other => Err(InvalidViewMode(other)),
        }
    }
}

impl ViewMode {
    /// Listing for the --show-views flag
    pub fn describe() -> &'static str {
        "View modes:\n\
         \x20 1: draw boxes only above 75 confidence, in green (default)\n\
         \x20 2: draw all boxes, green at 50+ confidence, red below\n\
         \x20 3: draw all boxes, colored by confidence on a gradient\n\
         \x20 4: draw all boxes, in red"
    }
}

/// Confidence threshold and box color for a detection under a view mode.
///
/// A box is drawn only when its confidence strictly exceeds the returned
/// threshold.
pub fn policy(mode: ViewMode, confidence: i32) -> (i32, Rgb<u8>) {
    match mode {
        ViewMode::Strict => (75, GREEN),
        ViewMode::PassFail => (0, if confidence >= 50 { GREEN } else { RED }),
        ViewMode::Gradient => {
            let level = (confidence as f32 * 2.55).clamp(0.0, 255.0) as u8;
            (0, Rgb([level, level, 0]))
        }
        ViewMode::All => (0, RED),
    }
}
