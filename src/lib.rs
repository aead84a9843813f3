//! # anucrypt
//!
//! Authenticated file encryption with AES-GCM, an embedded plaintext digest
//! as a second integrity check, and a content-based format identifier.
//!
//! ## Features
//!
//! - **AES-128-GCM and AES-256-GCM**: random 96-bit nonce per encryption
//! - **Two integrity checks**: the GCM tag, then an MD5 of the plaintext stored in the file
//! - **Format identification**: tells containers, hex digests and Base64 text apart by content alone
//! - **Raw key files**: 128, 192 or 256-bit keys from the OS random number generator
//! - **Folder mode**: encrypt or decrypt a directory tree file by file
//!
//! ## Basic Usage
//!
//! ```bash
//! # Generate a key
//! anucrypt gen-key 256
//!
//! # Encrypt and decrypt
//! anucrypt encrypt --alg aes256 --key key_256.crypt.key secrets.txt
//! anucrypt decrypt --alg aes256 --key key_256.crypt.key secrets.txt.crypt
//!
//! # Remember the key so --key can be omitted
//! anucrypt default-key key_256.crypt.key
//!
//! # What is this?
//! anucrypt identify d41d8cd98f00b204e9800998ecf8427e
//! ```
//!
//! ## Library Usage
//!
//! ```
//! use anucrypt::{crypto, Algorithm, KeyMaterial};
//!
//! let key = KeyMaterial::generate(Algorithm::Aes128Gcm.key_size());
//! let container = crypto::encrypt(Algorithm::Aes128Gcm, &key, b"hello").unwrap();
//! let plaintext = crypto::decrypt(Algorithm::Aes128Gcm, &key, &container).unwrap();
//! assert_eq!(plaintext, b"hello");
//!
//! assert_eq!(anucrypt::classify(&container), anucrypt::Format::Aes128);
//! ```
//!
//! ## Encrypted File Format
//!
//! ```text
//! [1-byte tag][12-byte nonce][32-char hex MD5 of plaintext][ciphertext + 16-byte GCM tag]
//! ```
//!
//! Tag `0x01` is AES-128-GCM and `0x02` is AES-256-GCM. See [`container`].
//!
//! ## Module Overview
//!
//! - [`key`] - Key generation, validation and raw key files
//! - [`container`] - Container layout encode/decode
//! - [`crypto`] - AES-GCM encryption pipeline and the two verification stages
//! - [`identify`] - Content-based format identification
//! - [`digest`] - MD5, SHA-1 and SHA-256 hex digests
//! - [`encoding`] - Base64
//! - [`file`] - File-level encrypt/decrypt with atomic writes
//! - [`batch`] - Recursive folder processing
//! - [`config`] - Settings file (default key path)
//! - [`error`] - Error types
//!
//! ## Security Considerations
//!
//! **Not provided:**
//! - Password-based keys (keys are raw random bytes)
//! - Key recovery: a lost key file means lost data
//! - Streaming: files are held in memory while processed
//!
//! The embedded MD5 detects corruption. It is not a security boundary; the
//! GCM tag is.

pub mod batch;
pub mod config;
pub mod container;
pub mod crypto;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod file;
pub mod identify;
pub mod key;

// Re-export commonly used types
pub use container::{Algorithm, Container};
pub use error::{CryptError, Result};
pub use identify::{classify, classify_file, classify_text, Format};
pub use key::{KeyMaterial, KeySize};
