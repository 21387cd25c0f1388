use std::process::ExitStatus;

use clap::Parser;

use exam_ocr::args::DispatchArgs;
use exam_ocr::deps::{self, OCR_BINARY};
use exam_ocr::dispatch;
use exam_ocr::inputs;

fn main() {
    match run() {
        // The converter owns all reporting; its status becomes ours.
        Ok(status) => std::process::exit(dispatch::exit_code(status)),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<ExitStatus> {
    // Parse command line arguments
    let args = DispatchArgs::parse();

    // Probe for the OCR engine before touching the filesystem
    deps::ensure_binary(OCR_BINARY)?;

    // Resolve inputs: explicit paths as given, or a scan of the
    // invocation directory
    let dir = inputs::working_directory()?;
    let files = inputs::resolve_inputs(args.files, &dir)?;

    // Hand the resolved list to the converter and wait for it
    dispatch::run_converter(&files)
}
