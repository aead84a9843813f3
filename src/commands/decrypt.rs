use super::encrypt::finish;
use anucrypt::batch;
use anucrypt::config::Settings;
use anucrypt::container::Algorithm;
use anucrypt::error::{CryptError, Result};
use anucrypt::file::{self, Mode};
use anucrypt::key;
use std::path::Path;

/// Decrypt a container file, or every `.crypt` file in a folder
pub fn decrypt(
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
        let report = batch::decrypt_folder(algorithm, input, output, &key)?;
        for (from, to) in &report.processed {
            println!("Decrypted: {} -> {}", from.display(), to.display());
        }
        for (path, err) in &report.failed {
            eprintln!("Error decrypting {}: {}", path.display(), err);
        }
        return finish(&report);
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| file::default_output_path(input, Mode::Decrypt));
    file::decrypt_file(algorithm, input, &output, &key)?;

    println!("Decrypted: {}", output.display());
    Ok(())
}
