use std::path::Path;

use anyhow::{Context, Result};
use rusty_tesseract::{Args as TesseractArgs, Image as TesseractImage};
use tempfile::Builder;

/// Runs Tesseract over one image and returns the raw recognized text.
///
/// The page is flattened to grayscale and staged as a temporary PNG
/// first: photographed pages carry color noise that hurts recognition,
/// and the engine only reads from disk.
pub fn recognize(path: &Path, lang: &str) -> Result<String> {
    let img = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?;
    let gray = img.grayscale();

    let staged = Builder::new()
        .prefix("exam_ocr-")
        .suffix(".png")
        .tempfile()
        .context("failed to create a scratch file for OCR")?;
    gray.save_with_format(staged.path(), image::ImageFormat::Png)
        .with_context(|| format!("failed to write a grayscale copy of {}", path.display()))?;

    let page = TesseractImage::from_path(staged.path())
        .with_context(|| format!("failed to stage {} for OCR", path.display()))?;
    let args = TesseractArgs {
        lang: lang.to_string(),
        ..TesseractArgs::default()
    };

    rusty_tesseract::image_to_string(&page, &args)
        .with_context(|| format!("OCR failed for {}", path.display()))
}
