//! Overlay rendering
//!
//! Stateless passes that annotate a frame copy with the crop boundary,
//! throughput counter, active language, and detection boxes. Callers clone
//! the published frame before compositing, so the still-published source is
//! never touched.

pub mod font;
pub mod policy;

pub use policy::{policy, InvalidViewMode, ViewMode};

use crate::vision::DetectionSet;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

const HUD_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const CAPTION_COLOR: Rgb<u8> = Rgb([200, 200, 200]);
const CROP_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

const HUD_SCALE: u32 = 2;

/// Draw the iteration rate at the fixed top-left position
pub fn draw_rate(frame: &mut RgbImage, rate: f64) {
    let label = format!("{} Iterations/Second", rate as i64);
    font::draw_text(frame, &label, 10, 18, HUD_SCALE, HUD_COLOR);
}

/// Draw the resolved language display name below the rate
pub fn draw_language(frame: &mut RgbImage, language: &str) {
    font::draw_text(frame, language, 10, 40, HUD_SCALE, HUD_COLOR);
}

/// Outline the crop region fed to OCR.
///
/// Corners sit at `(crop_w, crop_h)` and `(width - crop_w, height - crop_h)`;
/// with zero margins the outline lands on the frame border and the
/// out-of-range edges clip away.
pub fn draw_crop_box(frame: &mut RgbImage, crop_w: u32, crop_h: u32) {
    let (width, height) = frame.dimensions();
    let rect = Rect::at(crop_w as i32, crop_h as i32)
        .of_size(width - 2 * crop_w + 1, height - 2 * crop_h + 1);
    draw_hollow_rect_mut(frame, rect, CROP_COLOR);
}

/// Draw every detection box that passes the view mode policy, offset back
/// into full-frame coordinates, and return the caption assembled from the
/// drawn tokens.
///
/// The caption line along the bottom is rendered only when it is plain
/// ASCII; the boxes themselves are always drawn.
pub fn draw_detections(
    frame: &mut RgbImage,
    detections: &DetectionSet,
    mode: ViewMode,
    crop_w: u32,
    crop_h: u32,
) -> String {
    let mut caption = String::new();
    for detection in &detections.boxes {
        let (threshold, color) = policy(mode, detection.confidence);
        if detection.confidence <= threshold {
            continue;
        }
        // Detections are reported relative to the cropped sub-image.
        let x = detection.x + crop_w as i32;
        let y = detection.y + crop_h as i32;
        let rect = Rect::at(x, y).of_size(
            detection.width.max(0) as u32 + 1,
            detection.height.max(0) as u32 + 1,
        );
        draw_hollow_rect_mut(frame, rect, color);
        caption.push(' ');
        caption.push_str(&detection.text);
    }

    if !caption.is_empty() && caption.is_ascii() {
        let (_, height) = frame.dimensions();
        let y = height as i32 - 5 - (font::GLYPH_HEIGHT * HUD_SCALE) as i32;
        font::draw_text(frame, caption.trim_start(), 5, y, HUD_SCALE, CAPTION_COLOR);
    }
    caption
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::DetectionBox;

    fn detection(x: i32, y: i32, confidence: i32, text: &str) -> DetectionBox {
        DetectionBox {
            x,
            y,
            width: 20,
            height: 10,
            confidence,
            text: text.to_string(),
        }
    }

    fn set_of(boxes: Vec<DetectionBox>) -> DetectionSet {
        let text = boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        DetectionSet { boxes, text }
    }

    #[test]
    fn crop_box_corners_sit_on_the_margins() {
        let (width, height, crop_w, crop_h) = (320u32, 240u32, 30u32, 20u32);
        let mut frame = RgbImage::new(width, height);
        draw_crop_box(&mut frame, crop_w, crop_h);

        assert_eq!(*frame.get_pixel(crop_w, crop_h), CROP_COLOR);
        assert_eq!(*frame.get_pixel(width - crop_w, height - crop_h), CROP_COLOR);
        assert_eq!(*frame.get_pixel(width - crop_w, crop_h), CROP_COLOR);
        assert_eq!(*frame.get_pixel(crop_w, height - crop_h), CROP_COLOR);
        // Interior stays untouched
        assert_eq!(*frame.get_pixel(width / 2, height / 2), Rgb([0, 0, 0]));
    }

    #[test]
    fn zero_margin_crop_box_is_clipped_to_the_frame() {
        let mut frame = RgbImage::new(64, 48);
        draw_crop_box(&mut frame, 0, 0);
        assert_eq!(*frame.get_pixel(0, 0), CROP_COLOR);
    }

    #[test]
    fn detection_boxes_are_offset_by_the_crop_margins() {
        for (crop_w, crop_h) in [(0u32, 0u32), (25, 40), (100, 7)] {
            let mut frame = RgbImage::new(400, 300);
            let set = set_of(vec![detection(10, 12, 90, "word")]);
            draw_detections(&mut frame, &set, ViewMode::Strict, crop_w, crop_h);

            let x = 10 + crop_w;
            let y = 12 + crop_h;
            assert_eq!(*frame.get_pixel(x, y), Rgb([0, 255, 0]));
            assert_eq!(*frame.get_pixel(x + 20, y + 10), Rgb([0, 255, 0]));
        }
    }

    #[test]
    fn strict_mode_draws_confident_tokens_and_captions_them() {
        let mut frame = RgbImage::new(400, 300);
        let set = set_of(vec![detection(10, 10, 80, "KEPT")]);
        let caption = draw_detections(&mut frame, &set, ViewMode::Strict, 0, 0);
        assert!(caption.contains("KEPT"));
        assert_eq!(*frame.get_pixel(10, 10), Rgb([0, 255, 0]));
    }

    #[test]
    fn strict_mode_suppresses_low_confidence_tokens() {
        let mut frame = RgbImage::new(400, 300);
        let set = set_of(vec![detection(10, 10, 60, "DROPPED")]);
        let caption = draw_detections(&mut frame, &set, ViewMode::Strict, 0, 0);
        assert!(!caption.contains("DROPPED"));
        assert_eq!(*frame.get_pixel(10, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn threshold_is_strictly_exceeded() {
        let mut frame = RgbImage::new(400, 300);
        let set = set_of(vec![detection(10, 10, 75, "EDGE")]);
        let caption = draw_detections(&mut frame, &set, ViewMode::Strict, 0, 0);
        assert!(caption.is_empty());
    }

    #[test]
    fn non_ascii_caption_is_omitted_but_boxes_still_drawn() {
        let mut frame = RgbImage::new(400, 300);
        let set = set_of(vec![detection(10, 10, 90, "\u{65e5}\u{672c}")]);
        let caption = draw_detections(&mut frame, &set, ViewMode::Strict, 0, 0);
        assert!(!caption.is_ascii());
        assert_eq!(*frame.get_pixel(10, 10), Rgb([0, 255, 0]));
        // The caption band at the bottom stays blank
        let (_, height) = frame.dimensions();
        assert_eq!(*frame.get_pixel(5, height - 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn rate_and_language_render_into_the_hud() {
        let mut frame = RgbImage::new(400, 300);
        draw_rate(&mut frame, 42.9);
        draw_language(&mut frame, "English");
        let lit = frame.pixels().filter(|p| p.0 == [255, 255, 255]).count();
        assert!(lit > 0);
    }
}
