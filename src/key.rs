//! # Key Material
//!
//! Keys are plain byte buffers. A key is usable when its length is one of the
//! AES key sizes:
//!
//! | Size | Bytes | Encrypt/decrypt support |
//! |------|-------|-------------------------|
//! | 128  | 16    | AES-128-GCM             |
//! | 192  | 24    | generation only         |
//! | 256  | 32    | AES-256-GCM             |
//!
//! ## Key Files
//!
//! - **Format**: raw key bytes, no header, no checksum
//! - **Default name**: `key_<bits>.crypt.key`
//! - **Permissions**: 0600 on Unix (owner read/write only)
//!
//! A lost or damaged key file cannot be recovered.
//!
//! ## Unit Tests
//!
//! ```bash
//! cargo test key::
//! ```

use crate::error::{CryptError, Result};
use aes_gcm::aead::OsRng;
use rand::RngCore;
use std::fmt;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Bits128,
    Bits192,
    Bits256,
}

impl KeySize {
    pub const ALL: [KeySize; 3] = [KeySize::Bits128, KeySize::Bits192, KeySize::Bits256];

    pub fn bits(self) -> usize {
        match self {
            KeySize::Bits128 => 128,
            KeySize::Bits192 => 192,
            KeySize::Bits256 => 256,
        }
    }

    pub fn bytes(self) -> usize {
        self.bits() / 8
    }

    pub fn from_bits(bits: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.bits() == bits)
    }

    /// File name used when a generated key is saved without an explicit path
    pub fn default_file_name(self) -> String {
        format!("key_{}.crypt.key", self.bits())
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl FromStr for KeySize {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_bits)
            .ok_or_else(|| {
                CryptError::InvalidArgument(format!(
                    "invalid key size '{s}'. Use 128, 192, or 256"
                ))
            })
    }
}

/// Raw key bytes.
///
/// Construction never rejects a length; [`KeyMaterial::is_valid`] and the
/// encryption pipeline decide whether a given length is usable.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    bytes: Vec<u8>,
}

impl KeyMaterial {
    /// Generate a new random key of the given size
    pub fn generate(size: KeySize) -> Self {
        let mut bytes = vec![0u8; size.bytes()];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Size class of this key, if its length is a valid AES key length
    pub fn size(&self) -> Option<KeySize> {
        KeySize::ALL
            .into_iter()
            .find(|size| size.bytes() == self.bytes.len())
    }

    pub fn is_valid(&self) -> bool {
        validate(&self.bytes)
    }
}

// Key bytes never reach logs or panic messages.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// True iff `key` has exactly 16, 24 or 32 bytes.
///
/// A length check only: a wrong key of the right length passes.
pub fn validate(key: &[u8]) -> bool {
    KeySize::ALL.iter().any(|size| size.bytes() == key.len())
}

/// Write a key to disk as raw bytes
pub fn save_key_file(path: impl AsRef<Path>, key: &KeyMaterial) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(key.as_bytes())?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    tracing::debug!(path = %path.display(), bits = key.len() * 8, "saved key file");
    Ok(())
}

/// Read a key file. The length is not checked here.
pub fn load_key_file(path: impl AsRef<Path>) -> Result<KeyMaterial> {
    let mut file = File::open(path.as_ref())?;
    let mut key_bytes = Vec::new();
    file.read_to_end(&mut key_bytes)?;

    Ok(KeyMaterial::from_bytes(key_bytes))
}

/// Load a key file and report whether it holds a valid-length key
pub fn validate_key_file(path: impl AsRef<Path>) -> Result<bool> {
    Ok(load_key_file(path)?.is_valid())
}

/// Generate a key and save it to `path`, or to the default name in `dir`
pub fn generate_key_file(
    size: KeySize,
    path: Option<&Path>,
    dir: impl AsRef<Path>,
) -> Result<(KeyMaterial, PathBuf)> {
    let key = KeyMaterial::generate(size);
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => dir.as_ref().join(size.default_file_name()),
    };
    save_key_file(&path, &key)?;
    Ok((key, path))
}
