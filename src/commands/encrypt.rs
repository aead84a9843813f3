use anucrypt::batch::{self, BatchReport};
use anucrypt::config::Settings;
use anucrypt::container::Algorithm;
use anucrypt::error::{CryptError, Result};
use anucrypt::file::{self, Mode};
use anucrypt::key;
use std::path::Path;

/// Encrypt a file, or every file in a folder
pub fn encrypt(
    settings: &Settings,
    algorithm: Algorithm,
    input: &Path,
    output: Option<&Path>,
    key_file: Option<&Path>,
    folder: bool,
) -> Result<()> {
    let key_path = settings.resolve_key_path(key_file)?;
    let key = key::load_key_file(&key_path)?;

    if folder {
        let output = output.ok_or_else(|| {
            CryptError::InvalidArgument("--output is required with --folder".into())
        })?;
        let report = batch::encrypt_folder(algorithm, input, output, &key)?;
        for (from, to) in &report.processed {
            println!("Encrypted: {} -> {}", from.display(), to.display());
        }
        for (path, err) in &report.failed {
            eprintln!("Error encrypting {}: {}", path.display(), err);
        }
        return finish(&report);
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| file::default_output_path(input, Mode::Encrypt));
    file::encrypt_file(algorithm, input, &output, &key)?;

    println!("Encrypted: {}", output.display());
    Ok(())
}

pub(crate) fn finish(report: &BatchReport) -> Result<()> {
    if report.is_success() {
        Ok(())
    } else {
        Err(CryptError::InvalidArgument(format!(
            "{} file(s) failed",
            report.failed.len()
        )))
    }
}
