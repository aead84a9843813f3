//! Hex digests over bytes, text and files.
//!
//! Digests are rendered as upper-case hex, which is also the form stored in
//! the container's digest field. Comparisons go through [`digest_eq`], which
//! ignores ASCII case.

use crate::error::{CryptError, Result};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    /// Length of the hex rendering of this digest
    pub fn hex_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha256 => 64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            _ => Err(CryptError::InvalidArgument(format!(
                "unsupported hash algorithm '{s}'"
            ))),
        }
    }
}

pub fn hash_bytes(alg: HashAlgorithm, data: &[u8]) -> String {
    match alg {
        HashAlgorithm::Md5 => hex::encode_upper(Md5::digest(data)),
        HashAlgorithm::Sha1 => hex::encode_upper(Sha1::digest(data)),
        HashAlgorithm::Sha256 => hex::encode_upper(Sha256::digest(data)),
    }
}

pub fn hash_text(alg: HashAlgorithm, text: &str) -> String {
    hash_bytes(alg, text.as_bytes())
}

pub fn hash_file(alg: HashAlgorithm, path: impl AsRef<Path>) -> Result<String> {
    let data = fs::read(path)?;
    Ok(hash_bytes(alg, &data))
}

/// Hex MD5 of `data`, in the form stored in a container
pub fn md5_hex(data: &[u8]) -> String {
    hash_bytes(HashAlgorithm::Md5, data)
}

/// Compare two hex digests ignoring ASCII case
pub fn digest_eq(a: &[u8], b: &[u8]) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_known_empty_digests() {
        assert_eq!(hash_bytes(HashAlgorithm::Md5, b""), "D41D8CD98F00B204E9800998ECF8427E");
        assert_eq!(
            hash_bytes(HashAlgorithm::Sha1, b""),
            "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709"
        );
        assert_eq!(
            hash_bytes(HashAlgorithm::Sha256, b""),
            "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
        );
    }

    #[test]
    fn test_known_text_digest() {
        assert_eq!(
            hash_text(HashAlgorithm::Md5, "hello"),
            "5D41402ABC4B2A76B9719D911017C592"
        );
    }

    #[test]
    fn test_hex_lengths() {
        for alg in [HashAlgorithm::Md5, HashAlgorithm::Sha1, HashAlgorithm::Sha256] {
            assert_eq!(hash_bytes(alg, b"data").len(), alg.hex_len());
        }
    }

    #[test]
    fn test_hash_file_matches_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.bin");
        let data: Vec<u8> = (0..=255).collect();
        fs::write(&path, &data).unwrap();

        assert_eq!(
            hash_file(HashAlgorithm::Sha256, &path).unwrap(),
            hash_bytes(HashAlgorithm::Sha256, &data)
        );
    }

    #[test]
    fn test_hash_missing_file() {
        assert!(hash_file(HashAlgorithm::Md5, "/nonexistent/file").is_err());
    }

    #[test]
    fn test_digest_eq_ignores_case() {
        assert!(digest_eq(b"d41d8cd98f00b204e9800998ecf8427e", b"D41D8CD98F00B204E9800998ECF8427E"));
        assert!(!digest_eq(b"d41d8cd98f00b204e9800998ecf8427e", b"d41d8cd98f00b204e9800998ecf8427f"));
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("sha1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert!("crc32".parse::<HashAlgorithm>().is_err());
    }
}
