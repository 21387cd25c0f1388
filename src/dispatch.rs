use std::env;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

/// Name of the conversion command the orchestrator hands inputs to.
pub const CONVERTER_BINARY: &str = "ocr_to_json";

/// Locates the converter: a sibling of the running executable when one
/// exists (`cargo install` and `target/` layouts), otherwise the bare
/// name, leaving resolution to the search path.
pub fn converter_command() -> PathBuf {
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join(CONVERTER_BINARY);
            if sibling.is_file() {
                return sibling;
            }
        }
    }
    PathBuf::from(CONVERTER_BINARY)
}

/// Runs the converter over `inputs` with inherited stdio, blocking until
/// it finishes.
///
/// Pure pass-through: the child owns all reporting, and the caller's only
/// signal is the returned exit status, to be propagated unchanged.
pub fn run_converter(inputs: &[PathBuf]) -> Result<ExitStatus> {
    let command = converter_command();
    Command::new(&command)
        .args(inputs)
        .status()
        .with_context(|| format!("failed to launch `{}`", command.display()))
}

/// Maps a child's exit status onto this process's own exit code: the
/// code verbatim for normal exits, `128 + signal` when the child died to
/// a signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match status.code() {
        Some(code) => code,
        None => status.signal().map(|sig| 128 + sig).unwrap_or(1),
    }
}
