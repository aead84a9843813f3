use anucrypt::config::Settings;
use anucrypt::error::{CryptError, Result};
use anucrypt::key::{self, KeySize};
use std::path::Path;

/// Generate a random key and save it as a raw key file
pub fn gen_key(size: KeySize, output: Option<&Path>) -> Result<()> {
    let (_key, path) = key::generate_key_file(size, output, ".")?;
    println!("Key generated: {}", path.display());
    Ok(())
}

/// Check that a key file holds a 128, 192 or 256-bit key
pub fn validate_key(path: &Path) -> Result<()> {
    let key = key::load_key_file(path)?;
    match key.size() {
        Some(size) => {
            println!("Key is valid ({size}-bit).");
            Ok(())
        }
        None => Err(CryptError::InvalidArgument(format!(
            "Invalid key: {} bytes (expected 16, 24 or 32)",
            key.len()
        ))),
    }
}

/// Store `key_path` as the default key in the settings file
pub fn default_key(settings: &Settings, settings_path: &Path, key_path: &Path) -> Result<()> {
    if !key::validate_key_file(key_path)? {
        return Err(CryptError::InvalidArgument(format!(
            "{} does not contain a valid key",
            key_path.display()
        )));
    }

    // Absolute so the setting works from any directory
    let key_path = std::fs::canonicalize(key_path)?;
    let mut updated = settings.clone();
    updated.default_key = Some(key_path.clone());
    updated.save(settings_path)?;

    println!("Default key set to: {}", key_path.display());
    Ok(())
}
