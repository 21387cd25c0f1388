use std::path::PathBuf;

use clap::Parser;

/// Run OCR over exam page images and emit JSON question/answer records.
///
/// With no arguments the invocation directory is scanned for images
/// (depth 1, sorted); explicit paths are forwarded to the converter
/// untouched, in the given order.
#[derive(Parser, Debug)]
#[command(name = "exam_ocr", version, about)]
pub struct DispatchArgs {
    /// Image files to process, in this order. When omitted, the working
    /// directory is scanned instead.
    #[arg(required = false, num_args = 0..)]
    pub files: Vec<PathBuf>,
}

/// Extract OCR text from images into JSON questions/answers.
#[derive(Parser, Debug)]
#[command(name = "ocr_to_json", version, about)]
pub struct ConvertArgs {
    /// Image files, directories, or glob patterns to process (e.g. '*.jpeg').
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Language code for Tesseract OCR.
    #[arg(long, default_value = "eng")]
    pub lang: String,

    /// Optional output JSON file. Prints to stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Indentation level for JSON output; 0 emits compact JSON.
    #[arg(long, default_value_t = 2)]
    pub indent: usize,

    /// Number of OCR worker threads. Defaults to half the logical CPUs.
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,
}

impl ConvertArgs {
    /// Resolves the worker count when `--jobs` was not given.
    pub fn worker_count(&self) -> usize {
        self.jobs.unwrap_or_else(|| (num_cpus::get() / 2).max(1))
    }
}
