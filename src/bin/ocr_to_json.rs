use clap::Parser;

use exam_ocr::args::ConvertArgs;
use exam_ocr::convert;
use exam_ocr::deps::{self, OCR_BINARY};
use exam_ocr::inputs;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = ConvertArgs::parse();

    // Probe for the OCR engine before touching the filesystem
    deps::ensure_binary(OCR_BINARY)?;

    // Expand files, directories, and glob patterns into image paths
    let paths = inputs::collect_image_paths(&args.inputs)?;

    // OCR every page and split the text into question records
    let payload = convert::build_questions(&paths, &args.lang, args.worker_count())?;

    // Serialize and deliver
    let json = convert::render_json(&payload, args.indent)?;
    convert::write_output(&json, args.output.as_deref())?;

    Ok(())
}
