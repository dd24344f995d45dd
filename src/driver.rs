//! File and directory front end.
//!
//! Names the core needs but the caller left unset are taken from paths:
//! the type name from the output file stem, the package from the output
//! directory. A directory run gives every document its own copy of the
//! options with the type name cleared, so one file's name never carries over
//! to the next.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::naming::normalize_name;
use crate::options::Options;

/// What a directory run does when one document fails, or when an entry of
/// the input directory cannot be read while searching for documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnError {
    /// Stop at the first failure and return it. Files written so far stay.
    /// Unreadable directory entries fail the run before any file is generated.
    #[default]
    Abort,
    /// Log, record the failure in the report and move on. Unreadable directory
    /// entries are recorded under their own path.
    Continue,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written, in processing order.
    pub generated: Vec<PathBuf>,
    /// Inputs that failed (only populated with [`OnError::Continue`]).
    pub failed: Vec<(PathBuf, Error)>,
}

/// Converts one JSON file into one Rust file.
///
/// The output is written only after generation succeeded; parent directories
/// are created as needed.
pub fn generate_file(json_path: &Path, out_path: &Path, options: &Options) -> Result<()> {
    let options = resolve_names(out_path, options)?;
    options.validate()?;

    let json = fs::read(json_path).map_err(|e| Error::io("read", json_path, e))?;
    let src = crate::generate_to_string(&json, &options)?;

    if let Some(dir) = out_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io("create directory", dir, e))?;
    }
    fs::write(out_path, src).map_err(|e| Error::io("write", out_path, e))?;
    info!(input = %json_path.display(), output = %out_path.display(), "generated");
    Ok(())
}

/// Converts every `*.json` under `json_dir` into a `.rs` file at the same
/// relative path under `out_dir`.
pub fn generate_dir(
    json_dir: &Path,
    out_dir: &Path,
    options: &Options,
    on_error: OnError,
) -> Result<BatchReport> {
    let found = find_json_files(json_dir)?;
    debug!(
        dir = %json_dir.display(),
        count = found.files.len(),
        unreadable = found.unreadable.len(),
        "found inputs"
    );

    let mut report = BatchReport::default();
    for (path, err) in found.unreadable {
        report.record_failure(path, err, on_error)?;
    }
    for input in found.files {
        let output = output_path(json_dir, out_dir, &input);
        let mut per_file = options.clone();
        per_file.type_name = None;

        match generate_file(&input, &output, &per_file) {
            Ok(()) => report.generated.push(output),
            Err(err) => report.record_failure(input, err, on_error)?,
        }
    }
    Ok(report)
}

impl BatchReport {
    /// Returns `err` under [`OnError::Abort`]; otherwise logs and keeps it.
    fn record_failure(&mut self, path: PathBuf, err: Error, on_error: OnError) -> Result<()> {
        match on_error {
            OnError::Abort => Err(err),
            OnError::Continue => {
                warn!(path = %path.display(), error = %err, "skipped");
                self.failed.push((path, err));
                Ok(())
            }
        }
    }
}

/// `some/in/x/name.json` under `some/in` → `out/x/name.rs`.
pub fn output_path(json_dir: &Path, out_dir: &Path, input: &Path) -> PathBuf {
    let rel = input
        .strip_prefix(json_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| input.file_name().map(PathBuf::from).unwrap_or_default());
    out_dir.join(rel).with_extension("rs")
}

struct FoundInputs {
    files: Vec<PathBuf>,
    /// Entries the directory walk could not read.
    unreadable: Vec<(PathBuf, Error)>,
}

fn find_json_files(json_dir: &Path) -> Result<FoundInputs> {
    let dir = json_dir.to_str().ok_or_else(|| {
        Error::config(format!("input directory {} is not valid UTF-8", json_dir.display()))
    })?;
    let dir = match dir.trim_end_matches('/') {
        "" if dir.is_empty() => ".",
        "" => "/",
        trimmed => trimmed,
    };
    let pattern = format!("{}/**/*.json", glob::Pattern::escape(dir).trim_end_matches('/'));

    let mut found = FoundInputs { files: Vec::new(), unreadable: Vec::new() };
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => found.files.push(path),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                let err = Error::io("walk", path.clone(), e.into_error());
                found.unreadable.push((path, err));
            }
        }
    }
    found.files.sort();
    found.unreadable.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}

/// Fills in type and package names from `out_path` where `options` leaves them empty.
pub(crate) fn resolve_names(out_path: &Path, options: &Options) -> Result<Options> {
    let mut options = options.clone();
    if options.type_name.as_deref().is_none_or(|t| t.trim().is_empty()) {
        let stem = out_path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        options.type_name = Some(normalize_name(&stem));
    }
    if options.package.trim().is_empty() {
        let dir = out_path.parent().unwrap_or(Path::new(""));
        options.package = package_from_dir(dir)?;
    }
    Ok(options)
}

fn package_from_dir(dir: &Path) -> Result<String> {
    if let Some(base) = dir.file_name() {
        return Ok(normalize_name(&base.to_string_lossy()));
    }
    // "", "." or a path ending in ".."
    let cwd = std::env::current_dir().map_err(|e| Error::io("resolve", dir, e))?;
    let abs = lexical_clean(&cwd.join(dir));
    Ok(abs.file_name().map(|b| normalize_name(&b.to_string_lossy())).unwrap_or_default())
}

fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
