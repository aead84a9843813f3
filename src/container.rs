//! # Container Format
//!
//! Every encrypted file is a flat byte layout with three fixed-width fields
//! followed by the AEAD output:
//!
//! ```text
//! [1-byte algorithm tag][12-byte nonce][32-byte hex MD5 of plaintext][ciphertext + 16-byte GCM tag]
//! ```
//!
//! | Tag  | Algorithm   |
//! |------|-------------|
//! | 0x01 | AES-128-GCM |
//! | 0x02 | AES-256-GCM |
//!
//! The digest field holds the 32 ASCII hex characters of the plaintext MD5,
//! not the 16 raw digest bytes.
//!
//! Decoding is purely structural. It never checks the digest and never
//! decrypts; that is the job of [`crate::crypto`].

use crate::error::{CryptError, Result};
use crate::key::KeySize;
use std::fmt;
use std::str::FromStr;

pub const TAG_LEN: usize = 1;
pub const NONCE_SIZE: usize = 12;
pub const DIGEST_HEX_LEN: usize = 32;
pub const HEADER_LEN: usize = TAG_LEN + NONCE_SIZE + DIGEST_HEX_LEN;

/// AEAD algorithms a container can be sealed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Aes128Gcm,
    Aes256Gcm,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Aes128Gcm, Algorithm::Aes256Gcm];

    /// On-disk tag byte
    pub fn tag(self) -> u8 {
        match self {
            Algorithm::Aes128Gcm => 0x01,
            Algorithm::Aes256Gcm => 0x02,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0x01 => Ok(Algorithm::Aes128Gcm),
            0x02 => Ok(Algorithm::Aes256Gcm),
            other => Err(CryptError::UnknownAlgorithmTag(other)),
        }
    }

    pub fn key_size(self) -> KeySize {
        match self {
            Algorithm::Aes128Gcm => KeySize::Bits128,
            Algorithm::Aes256Gcm => KeySize::Bits256,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Aes128Gcm => "AES-128-GCM",
            Algorithm::Aes256Gcm => "AES-256-GCM",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().trim_start_matches('-') {
            "aes128" | "aes-128" | "aes-128-gcm" => Ok(Algorithm::Aes128Gcm),
            "aes256" | "aes-256" | "aes-256-gcm" => Ok(Algorithm::Aes256Gcm),
            _ => Err(CryptError::InvalidArgument(format!(
                "invalid encryption mode '{s}'. Use aes128 or aes256"
            ))),
        }
    }
}

/// One encrypted file, split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub algorithm: Algorithm,
    pub nonce: [u8; NONCE_SIZE],
    pub digest: [u8; DIGEST_HEX_LEN],
    pub ciphertext: Vec<u8>,
}

impl Container {
    /// Serialize as tag || nonce || digest || ciphertext
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        out.push(self.algorithm.tag());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.digest);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse a container without verifying anything beyond its structure
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(CryptError::TruncatedInput { len: bytes.len() });
        }

        let algorithm = Algorithm::from_tag(bytes[0])?;

        let (nonce_bytes, rest) = bytes[TAG_LEN..].split_at(NONCE_SIZE);
        let (digest_bytes, ciphertext) = rest.split_at(DIGEST_HEX_LEN);

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(nonce_bytes);
        let mut digest = [0u8; DIGEST_HEX_LEN];
        digest.copy_from_slice(digest_bytes);

        Ok(Self {
            algorithm,
            nonce,
            digest,
            ciphertext: ciphertext.to_vec(),
        })
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.ciphertext.len()
    }
}
