//! # File Operations
//!
//! Whole-file encryption and decryption. Input is read fully into memory and
//! output is written in one atomic step (temp file in the target directory,
//! fsync, rename), so an interrupted run never leaves a half-written file.
//!
//! After decrypting, the written output is read back and hashed again. If
//! that digest disagrees with the one stored in the container, the output is
//! removed and [`CryptError::IntegrityMismatch`] is returned.

use crate::container::{Algorithm, Container};
use crate::crypto;
use crate::digest::{digest_eq, md5_hex};
use crate::error::{CryptError, Result};
use crate::key::KeyMaterial;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Extension appended to encrypted files
pub const ENCRYPTED_EXTENSION: &str = "crypt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

/// Output path used when none is given.
///
/// Encrypting appends `.crypt`. Decrypting strips a trailing `.crypt`, or
/// appends `.decrypted` when there is none.
pub fn default_output_path(input: &Path, mode: Mode) -> PathBuf {
    match mode {
        Mode::Encrypt => append_extension(input, ENCRYPTED_EXTENSION),
        Mode::Decrypt => {
            if input.extension().is_some_and(|ext| ext == ENCRYPTED_EXTENSION) {
                input.with_extension("")
            } else {
                append_extension(input, "decrypted")
            }
        }
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Encrypt `input` into a container at `output`
pub fn encrypt_file(
    algorithm: Algorithm,
    input: &Path,
    output: &Path,
    key: &KeyMaterial,
) -> Result<()> {
    let plaintext = fs::read(input)?;
    let container = crypto::encrypt(algorithm, key, &plaintext)?;
    write_atomic(output, &container)?;

    tracing::debug!(
        %algorithm,
        input = %input.display(),
        output = %output.display(),
        "encrypted file"
    );
    Ok(())
}

/// Decrypt the container at `input` into `output`
pub fn decrypt_file(
    algorithm: Algorithm,
    input: &Path,
    output: &Path,
    key: &KeyMaterial,
) -> Result<()> {
    let data = fs::read(input)?;
    let container = Container::decode(&data)?;
    let plaintext = crypto::open(algorithm, key, &container)?;

    write_atomic(output, &plaintext)?;
    drop(plaintext);

    discard_on_mismatch(output, &container.digest)?;

    tracing::debug!(
        %algorithm,
        input = %input.display(),
        output = %output.display(),
        "decrypted file"
    );
    Ok(())
}

/// Verify a written file against the stored digest, removing it on mismatch.
///
/// The integrity error is returned once the file is gone. If the file cannot
/// be removed, the error names the path that was left behind.
fn discard_on_mismatch(path: &Path, stored: &[u8]) -> Result<()> {
    let err = match verify_written(path, stored) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    match fs::remove_file(path) {
        Ok(()) => {
            tracing::warn!(output = %path.display(), error = %err, "removed output that failed integrity check");
            Err(err)
        }
        Err(remove_err) => {
            tracing::error!(
                output = %path.display(),
                error = %remove_err,
                "failed to remove output that failed integrity check"
            );
            Err(CryptError::Io(std::io::Error::new(
                remove_err.kind(),
                format!(
                    "{err}; corrupt output left at {}: {remove_err}",
                    path.display()
                ),
            )))
        }
    }
}

/// Re-read a written file and compare its MD5 with the stored digest
fn verify_written(path: &Path, stored: &[u8]) -> Result<()> {
    let written = fs::read(path)?;
    let computed = md5_hex(&written);
    if digest_eq(stored, computed.as_bytes()) {
        Ok(())
    } else {
        Err(CryptError::IntegrityMismatch {
            expected: String::from_utf8_lossy(stored).into_owned(),
            actual: computed,
        })
    }
}

/// Write `data` to `path` via a temp file in the same directory
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| CryptError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::HEADER_LEN;
    use tempfile::TempDir;

    #[test]
    fn test_default_output_paths() {
        assert_eq!(
            default_output_path(Path::new("dir/file.txt"), Mode::Encrypt),
            PathBuf::from("dir/file.txt.crypt")
        );
        assert_eq!(
            default_output_path(Path::new("dir/file.txt.crypt"), Mode::Decrypt),
            PathBuf::from("dir/file.txt")
        );
        assert_eq!(
            default_output_path(Path::new("dir/file.bin"), Mode::Decrypt),
            PathBuf::from("dir/file.bin.decrypted")
        );
        assert_eq!(
            default_output_path(Path::new("noext"), Mode::Encrypt),
            PathBuf::from("noext.crypt")
        );
    }

    #[test]
    fn test_file_roundtrip() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("plain.txt");
        let encrypted = temp.path().join("plain.txt.crypt");
        let decrypted = temp.path().join("out").join("plain.txt");
        fs::write(&input, b"file contents").unwrap();

        for alg in Algorithm::ALL {
            let key = KeyMaterial::generate(alg.key_size());
            encrypt_file(alg, &input, &encrypted, &key).unwrap();
            assert_eq!(fs::read(&encrypted).unwrap()[0], alg.tag());

            decrypt_file(alg, &encrypted, &decrypted, &key).unwrap();
            assert_eq!(fs::read(&decrypted).unwrap(), b"file contents");
        }
    }

    #[test]
    fn test_wrong_key_leaves_no_output() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("plain.txt");
        let encrypted = temp.path().join("plain.txt.crypt");
        let decrypted = temp.path().join("plain.out");
        fs::write(&input, b"secret").unwrap();

        let key = KeyMaterial::generate(Algorithm::Aes128Gcm.key_size());
        encrypt_file(Algorithm::Aes128Gcm, &input, &encrypted, &key).unwrap();

        let other = KeyMaterial::generate(Algorithm::Aes128Gcm.key_size());
        let result = decrypt_file(Algorithm::Aes128Gcm, &encrypted, &decrypted, &other);
        assert!(matches!(result, Err(CryptError::AuthenticationFailure)));
        assert!(!decrypted.exists());
    }

    #[test]
    fn test_corrupt_digest_leaves_no_output() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("plain.txt");
        let encrypted = temp.path().join("plain.txt.crypt");
        let decrypted = temp.path().join("plain.out");
        fs::write(&input, b"integrity").unwrap();

        let key = KeyMaterial::generate(Algorithm::Aes256Gcm.key_size());
        encrypt_file(Algorithm::Aes256Gcm, &input, &encrypted, &key).unwrap();

        let mut data = fs::read(&encrypted).unwrap();
        let pos = HEADER_LEN - 1;
        data[pos] = if data[pos] == b'0' { b'1' } else { b'0' };
        fs::write(&encrypted, &data).unwrap();

        let result = decrypt_file(Algorithm::Aes256Gcm, &encrypted, &decrypted, &key);
        assert!(matches!(result, Err(CryptError::IntegrityMismatch { .. })));
        assert!(!decrypted.exists());
    }

    #[test]
    fn test_verify_written_compares_digest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data");
        fs::write(&path, b"abc").unwrap();

        assert!(verify_written(&path, md5_hex(b"abc").as_bytes()).is_ok());
        assert!(matches!(
            verify_written(&path, md5_hex(b"abd").as_bytes()),
            Err(CryptError::IntegrityMismatch { .. })
        ));
    }

    #[test]
    fn test_mismatched_output_is_removed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("restored.txt");
        fs::write(&path, b"tampered plaintext").unwrap();

        let result = discard_on_mismatch(&path, md5_hex(b"original plaintext").as_bytes());
        assert!(matches!(result, Err(CryptError::IntegrityMismatch { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_matching_output_is_kept() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("restored.txt");
        fs::write(&path, b"plaintext").unwrap();

        discard_on_mismatch(&path, md5_hex(b"plaintext").as_bytes()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"plaintext");
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let key = KeyMaterial::generate(Algorithm::Aes128Gcm.key_size());
        let result = encrypt_file(
            Algorithm::Aes128Gcm,
            &temp.path().join("missing"),
            &temp.path().join("out"),
            &key,
        );
        assert!(matches!(result, Err(CryptError::Io(_))));
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("target");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }
}
