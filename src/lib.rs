//! OCR pipeline for photographed exam pages.
//!
//! Two binaries share this crate: `exam_ocr` resolves which images to
//! process and hands them to the conversion command, and `ocr_to_json`
//! runs Tesseract over each image and emits `{"questions": [...]}`.

pub mod args;
pub mod convert;
pub mod deps;
pub mod dispatch;
pub mod error;
pub mod inputs;
pub mod ocr;
pub mod questions;
