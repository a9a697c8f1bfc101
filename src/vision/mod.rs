//! OCR inference layer
//!
//! Wraps the external tesseract executable, parses its structured output,
//! and runs the background detection worker.

pub mod ocr;
pub mod parse;
pub mod worker;

pub use ocr::TesseractEngine;
pub use parse::{DetectionBox, DetectionSet};
pub use worker::DetectionWorker;
