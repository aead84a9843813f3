//! Recursive folder processing.
//!
//! Every regular file under the input directory is processed independently
//! and written to the same relative path under the output directory. A file
//! that fails is recorded in the report and the walk continues.

use crate::container::Algorithm;
use crate::error::{CryptError, Result};
use crate::file::{self, Mode, ENCRYPTED_EXTENSION};
use crate::key::KeyMaterial;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Outcome of a folder run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// (input, output) pairs that succeeded
    pub processed: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<(PathBuf, CryptError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Encrypt every file under `input_dir` into `output_dir`, appending `.crypt`
pub fn encrypt_folder(
    algorithm: Algorithm,
    input_dir: &Path,
    output_dir: &Path,
    key: &KeyMaterial,
) -> Result<BatchReport> {
    process_folder(Mode::Encrypt, algorithm, input_dir, output_dir, key)
}

/// Decrypt every `.crypt` file under `input_dir` into `output_dir`
pub fn decrypt_folder(
    algorithm: Algorithm,
    input_dir: &Path,
    output_dir: &Path,
    key: &KeyMaterial,
) -> Result<BatchReport> {
    process_folder(Mode::Decrypt, algorithm, input_dir, output_dir, key)
}

fn process_folder(
    mode: Mode,
    algorithm: Algorithm,
    input_dir: &Path,
    output_dir: &Path,
    key: &KeyMaterial,
) -> Result<BatchReport> {
    if !input_dir.is_dir() {
        return Err(CryptError::InvalidArgument(format!(
            "input folder does not exist: {}",
            input_dir.display()
        )));
    }
    fs::create_dir_all(output_dir)?;
    // The output folder may live inside the input folder; never walk into it
    let output_root = fs::canonicalize(output_dir)?;

    let mut report = BatchReport::default();

    let walker = WalkDir::new(input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_output_root(entry, &output_root));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                report.failed.push((path, CryptError::Io(e.into())));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let input = entry.path();
        if mode == Mode::Decrypt
            && !input
                .extension()
                .is_some_and(|ext| ext == ENCRYPTED_EXTENSION)
        {
            continue;
        }

        let relative = input.strip_prefix(input_dir).unwrap_or(input);
        let output = file::default_output_path(&output_dir.join(relative), mode);

        let result = match mode {
            Mode::Encrypt => file::encrypt_file(algorithm, input, &output, key),
            Mode::Decrypt => file::decrypt_file(algorithm, input, &output, key),
        };

        match result {
            Ok(()) => report.processed.push((input.to_path_buf(), output)),
            Err(e) => {
                tracing::warn!(input = %input.display(), error = %e, "file failed");
                report.failed.push((input.to_path_buf(), e));
            }
        }
    }

    tracing::debug!(
        processed = report.processed.len(),
        failed = report.failed.len(),
        "folder run finished"
    );
    Ok(report)
}

fn is_output_root(entry: &DirEntry, output_root: &Path) -> bool {
    entry.file_type().is_dir()
        && fs::canonicalize(entry.path()).is_ok_and(|path| path == output_root)
}
