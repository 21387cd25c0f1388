use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::error::PipelineError;

/// Extensions (lowercase) accepted as OCR-able images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp", "gif"];

/// Whether `path` carries one of the recognized image extensions,
/// compared case-insensitively.
pub fn is_image_path(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        None => false,
    }
}

/// The directory anchoring relative scans: the caller's working directory
/// as an absolute path. Scans anchor at the invocation directory, so
/// running the tool inside a folder of page images picks them up without
/// any arguments.
pub fn working_directory() -> Result<PathBuf> {
    env::current_dir().context("failed to resolve the working directory")
}

/// The orchestrator's input contract.
///
/// Explicit paths pass through untouched, in the given order: callers may
/// deliberately order pages, and nothing is filtered or checked for
/// existence here. An empty argument list falls back to a depth-1 scan of
/// `dir`; an empty scan is `NoInputsFound`.
pub fn resolve_inputs(args: Vec<PathBuf>, dir: &Path) -> Result<Vec<PathBuf>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let found = scan_directory(dir)?;
    if found.is_empty() {
        return Err(PipelineError::NoInputsFound {
            scanned: Some(dir.to_path_buf()),
        }
        .into());
    }
    Ok(found)
}

/// Lists the image files directly inside `dir` (no recursion), sorted
/// lexicographically so the scan order is stable across platforms.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry_result in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                if let Some(path) = err.path() {
                    eprintln!("Warning: failed to access {}: {}", path.display(), err);
                } else {
                    eprintln!("Warning: scan error in {}: {}", dir.display(), err);
                }
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_image_path(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// The converter's input expansion: each raw input is a file, a
/// directory, or a glob pattern.
///
/// Explicit files are kept only when they carry an image extension
/// (silently dropped otherwise; the converter filters where the
/// orchestrator trusts). Directories expand recursively and patterns
/// expand against the working directory, both in sorted order. The raw
/// inputs themselves keep their given order, and duplicates are not
/// collapsed.
pub fn collect_image_paths(raw: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in raw {
        let path = Path::new(input);
        if path.is_file() {
            if is_image_path(path) {
                paths.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            paths.extend(walk_images(path));
        } else {
            paths.extend(expand_glob(input)?);
        }
    }

    if paths.is_empty() {
        return Err(PipelineError::NoInputsFound { scanned: None }.into());
    }
    Ok(paths)
}

/// Every image file under `dir`, any depth, sorted lexicographically by
/// full path (component-wise, so `a/z.png` sorts before `a.png`'s
/// neighbors the same way the directory tree reads).
fn walk_images(dir: &Path) -> Vec<PathBuf> {
    eprintln!("Scanning directory: {}", dir.display());

    let mut found = Vec::new();
    for entry_result in WalkDir::new(dir).min_depth(1) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                if let Some(path) = err.path() {
                    eprintln!("Warning: failed to access {}: {}", path.display(), err);
                } else {
                    eprintln!("Warning: scan error in {}: {}", dir.display(), err);
                }
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_image_path(path) {
            found.push(path.to_path_buf());
        }
    }

    found.sort();
    found
}

/// Expands a glob pattern to matching image files, sorted. A pattern that
/// matches nothing contributes nothing; only a malformed pattern is an
/// error.
fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let walker = glob::glob(pattern)
        .with_context(|| format!("invalid input pattern `{pattern}`"))?;

    let mut found = Vec::new();
    for entry in walker {
        match entry {
            Ok(path) => {
                if path.is_file() && is_image_path(&path) {
                    found.push(path);
                }
            }
            Err(err) => {
                eprintln!("Warning: failed to access {}: {}", err.path().display(), err);
            }
        }
    }

    found.sort();
    Ok(found)
}
