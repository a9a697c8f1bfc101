//! Pipeline configuration
//!
//! Everything the orchestrator needs beyond the OCR engine itself, built
//! from the CLI in `main` and validated here.

use crate::overlay::ViewMode;
use tracing::warn;

/// Default crop margins when none are supplied, in pixels
pub const DEFAULT_CROP: (i32, i32) = (200, 200);

/// Validated settings handed to the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Capture device index
    pub source: u32,
    /// Box display policy
    pub view_mode: ViewMode,
    /// Requested crop margins (x, y), validated against the stream
    /// dimensions once they are known
    pub crop: Option<(i32, i32)>,
    /// Tesseract language spec ("xx" or "xx+yy+...")
    pub language: Option<String>,
}

/// Clamp requested crop margins to something the pipeline can honor.
///
/// A margin is usable only when `0 <= m` and `2m < dimension`; anything
/// else would invert or empty the crop rectangle and reverts both margins
/// to zero with a warning. Missing margins default to [`DEFAULT_CROP`].
pub fn validate_crop(requested: Option<(i32, i32)>, width: u32, height: u32) -> (u32, u32) {
    let (x, y) = requested.unwrap_or(DEFAULT_CROP);
    let fits = |margin: i32, dimension: u32| margin >= 0 && (margin as u32) * 2 < dimension;
    if fits(x, width) && fits(y, height) {
        (x as u32, y as u32)
    } else {
        warn!("impossible crop dimensions {x} {y} supplied, reverted to 0 0");
        (0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: u32 = 640;
    const HEIGHT: u32 = 480;

    #[test]
    fn missing_crop_defaults_to_fixed_margins() {
        assert_eq!(validate_crop(None, WIDTH, HEIGHT), (200, 200));
    }

    #[test]
    fn valid_margins_pass_through() {
        assert_eq!(validate_crop(Some((0, 0)), WIDTH, HEIGHT), (0, 0));
        assert_eq!(validate_crop(Some((100, 50)), WIDTH, HEIGHT), (100, 50));
        assert_eq!(validate_crop(Some((319, 239)), WIDTH, HEIGHT), (319, 239));
    }

    #[test]
    fn margin_past_the_dimension_reverts_to_zero() {
        assert_eq!(
            validate_crop(Some((WIDTH as i32 + 1, 0)), WIDTH, HEIGHT),
            (0, 0)
        );
    }

    #[test]
    fn negative_margin_reverts_to_zero() {
        assert_eq!(validate_crop(Some((-1, 5)), WIDTH, HEIGHT), (0, 0));
    }

    #[test]
    fn degenerate_margin_reverts_to_zero() {
        // Half the dimension leaves an empty crop rectangle
        assert_eq!(validate_crop(Some((320, 0)), WIDTH, HEIGHT), (0, 0));
        assert_eq!(validate_crop(Some((0, 240)), WIDTH, HEIGHT), (0, 0));
    }

    #[test]
    fn default_margins_revert_on_a_tiny_stream() {
        assert_eq!(validate_crop(None, 320, 240), (0, 0));
    }
}
