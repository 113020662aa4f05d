use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::aggregate::{Aggregation, BundleOutcome, RunSummary};
use crate::{PageResult, PageStatus};

pub const BUNDLE_FILENAME: &str = "knowledge.md";
pub const BUNDLE_MIME: &str = "text/markdown";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub bundle_filename: String,
    pub manifest_filename: Option<String>,
    /// Timestamp recorded in the manifest; left out when `None`.
    pub generated_utc: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            bundle_filename: BUNDLE_FILENAME.to_string(),
            manifest_filename: Some("manifest.json".to_string()),
            generated_utc: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub bundle_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
    pub bytes_written: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no content was retrieved; refusing to write an empty bundle")]
    EmptyBundle,
    #[error("output path {0:?} is not a directory")]
    NotADirectory(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Manifest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_utc: Option<&'a str>,
    bundle: &'a str,
    mime: &'static str,
    summary: RunSummary,
    pages: Vec<ManifestPage<'a>>,
}

#[derive(Serialize)]
struct ManifestPage<'a> {
    url: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    content_bytes: usize,
}

/// Writes the bundle (and optionally a JSON manifest) into `output_dir`.
///
/// Each file is written to a temp file in the same directory and renamed into
/// place, so readers never observe a half-written bundle.
pub fn export_bundle(
    output_dir: &Path,
    aggregation: &Aggregation,
    results: &[PageResult],
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let bundle = match &aggregation.outcome {
        BundleOutcome::Ready(bundle) => bundle,
        BundleOutcome::NoContent => return Err(ExportError::EmptyBundle),
    };

    prepare_dir(output_dir)?;
    let bundle_path = write_atomic(output_dir, &options.bundle_filename, bundle.as_str())?;

    let manifest_path = match &options.manifest_filename {
        Some(name) => {
            let manifest = Manifest {
                generated_utc: options.generated_utc.as_deref(),
                bundle: &options.bundle_filename,
                mime: BUNDLE_MIME,
                summary: aggregation.summary,
                pages: results
                    .iter()
                    .map(|result| ManifestPage {
                        url: &result.url,
                        status: match result.status() {
                            PageStatus::Success => "success",
                            PageStatus::Error => "error",
                        },
                        error: result.error_message(),
                        content_bytes: result.content().map_or(0, str::len),
                    })
                    .collect(),
            };
            let text = serde_json::to_string_pretty(&manifest)?;
            Some(write_atomic(output_dir, name, &text)?)
        }
        None => None,
    };

    engine_info!(
        "exported {} bytes to {:?}",
        bundle.len(),
        bundle_path
    );
    Ok(ExportSummary {
        bundle_path,
        manifest_path,
        bytes_written: bundle.len() as u64,
    })
}

fn prepare_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, ExportError> {
    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(&target).map_err(|err| err.error)?;
    Ok(target)
}
