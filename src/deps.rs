use std::io::ErrorKind;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::error::PipelineError;

/// Name of the OCR engine every stage of the pipeline leans on.
pub const OCR_BINARY: &str = "tesseract";

/// Fails fast when `name` cannot be spawned from the search path.
///
/// Spawns `name --version` with all stdio suppressed: the probe only cares
/// whether the OS can resolve the executable, not what it prints or which
/// status it returns. Runs before any filesystem work so a missing engine
/// is always the first diagnostic the user sees.
pub fn ensure_binary(name: &str) -> Result<()> {
    match Command::new(name)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(PipelineError::MissingDependency {
            name: name.to_string(),
        }
        .into()),
        Err(e) => Err(e).with_context(|| format!("failed to probe for `{name}`")),
    }
}
