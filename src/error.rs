use std::path::PathBuf;
use thiserror::Error;

/// Terminal failures of the resolution phase, each carrying its own
/// remediation text. A non-zero exit from the dispatched converter is not
/// represented here: its status is propagated verbatim instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required executable could not be resolved on the search path.
    #[error("`{name}` was not found on PATH. Install Tesseract OCR and try again: https://tesseract-ocr.github.io/tessdoc/Installation.html")]
    MissingDependency { name: String },

    /// Input resolution produced nothing to process.
    #[error("no matching image files found{}", scan_hint(.scanned))]
    NoInputsFound { scanned: Option<PathBuf> },
}

/// Tail of the `NoInputsFound` message: a directory scan that came up
/// empty tells the user where it looked, explicit inputs that expanded to
/// nothing get the generic hint.
fn scan_hint(scanned: &Option<PathBuf>) -> String {
    match scanned {
        Some(dir) => format!(
            " in {}. Pass image paths on the command line or place images (png, jpg, jpeg, tiff, bmp, gif) there",
            dir.display()
        ),
        None => String::from(". Check that the given paths, directories, or patterns name image files"),
    }
}
