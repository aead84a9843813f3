//! # Cryptographic Operations
//!
//! Authenticated encryption of whole buffers with AES-GCM, packed into the
//! [`Container`] format.
//!
//! ## Algorithms
//!
//! - **Cipher**: AES-128-GCM or AES-256-GCM
//! - **Nonce size**: 96 bits (12 bytes), drawn from the OS RNG for every encryption
//! - **Authentication**: built into GCM mode (16-byte tag), no associated data
//! - **Digest**: hex MD5 of the plaintext, stored next to the nonce
//!
//! ## Decryption Checks
//!
//! Decryption runs two independent stages, in order, and both must pass:
//!
//! 1. **Authentication**: the GCM tag is verified. A wrong key or any change
//!    to nonce or ciphertext fails here with
//!    [`CryptError::AuthenticationFailure`] and no plaintext is returned.
//! 2. **Digest**: the MD5 of the recovered plaintext is compared with the
//!    stored digest. A mismatch fails with [`CryptError::IntegrityMismatch`].
//!
//! The digest field is not covered by the GCM tag, so stage 2 catches damage
//! to the stored digest itself. It is a corruption check, not a security
//! boundary.
//!
//! ## Unit Tests
//!
//! ```bash
//! cargo test crypto::
//! ```

use crate::container::{Algorithm, Container, NONCE_SIZE};
use crate::digest::{digest_eq, md5_hex};
use crate::error::{CryptError, Result};
use crate::key::KeyMaterial;
use aes_gcm::{
    aead::{self, Aead, KeyInit, OsRng},
    Aes128Gcm, Aes256Gcm,
};
use rand::RngCore;

/// Length of the GCM authentication tag appended to the ciphertext
pub const GCM_TAG_SIZE: usize = 16;

/// Encrypt `plaintext` and return the encoded container bytes
pub fn encrypt(algorithm: Algorithm, key: &KeyMaterial, plaintext: &[u8]) -> Result<Vec<u8>> {
    Ok(seal(algorithm, key, plaintext)?.encode())
}

/// Encrypt `plaintext` into a [`Container`]
pub fn seal(algorithm: Algorithm, key: &KeyMaterial, plaintext: &[u8]) -> Result<Container> {
    check_key(algorithm, key)?;

    let digest_hex = md5_hex(plaintext);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(digest_hex.as_bytes());

    // Generate random nonce
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = match algorithm {
        Algorithm::Aes128Gcm => aead_encrypt::<Aes128Gcm>(key, &nonce, plaintext)?,
        Algorithm::Aes256Gcm => aead_encrypt::<Aes256Gcm>(key, &nonce, plaintext)?,
    };

    tracing::debug!(
        %algorithm,
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "sealed container"
    );

    Ok(Container {
        algorithm,
        nonce,
        digest,
        ciphertext,
    })
}

/// Decode container bytes and decrypt them
pub fn decrypt(algorithm: Algorithm, key: &KeyMaterial, data: &[u8]) -> Result<Vec<u8>> {
    let container = Container::decode(data)?;
    open(algorithm, key, &container)
}

/// Decrypt a parsed container, running both verification stages
pub fn open(algorithm: Algorithm, key: &KeyMaterial, container: &Container) -> Result<Vec<u8>> {
    if container.algorithm != algorithm {
        return Err(CryptError::AlgorithmMismatch {
            expected: algorithm,
            found: container.algorithm,
        });
    }
    check_key(algorithm, key)?;

    if container.ciphertext.len() < GCM_TAG_SIZE {
        return Err(CryptError::TruncatedInput {
            len: container.encoded_len(),
        });
    }

    let plaintext = authenticate(key, container)?;
    verify_digest(&container.digest, &plaintext)?;

    tracing::debug!(%algorithm, plaintext_len = plaintext.len(), "opened container");
    Ok(plaintext)
}

/// Stage 1: GCM tag check and decryption
pub fn authenticate(key: &KeyMaterial, container: &Container) -> Result<Vec<u8>> {
    match container.algorithm {
        Algorithm::Aes128Gcm => aead_decrypt::<Aes128Gcm>(key, &container.nonce, &container.ciphertext),
        Algorithm::Aes256Gcm => aead_decrypt::<Aes256Gcm>(key, &container.nonce, &container.ciphertext),
    }
}

/// Stage 2: compare the plaintext MD5 with the stored hex digest
pub fn verify_digest(stored: &[u8], plaintext: &[u8]) -> Result<()> {
    let computed = md5_hex(plaintext);
    if digest_eq(stored, computed.as_bytes()) {
        Ok(())
    } else {
        Err(CryptError::IntegrityMismatch {
            expected: String::from_utf8_lossy(stored).into_owned(),
            actual: computed,
        })
    }
}

fn check_key(algorithm: Algorithm, key: &KeyMaterial) -> Result<()> {
    let expected = algorithm.key_size().bytes();
    if key.len() != expected {
        return Err(CryptError::InvalidKeySize {
            expected,
            actual: key.len(),
        });
    }
    Ok(())
}

fn aead_encrypt<C: Aead + KeyInit>(
    key: &KeyMaterial,
    nonce: &[u8; NONCE_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key.as_bytes()).map_err(|_| CryptError::InvalidKeySize {
        expected: C::key_size(),
        actual: key.len(),
    })?;

    cipher
        .encrypt(aead::Nonce::<C>::from_slice(nonce), plaintext)
        .map_err(|_| CryptError::InvalidArgument("plaintext too large for AES-GCM".into()))
}

fn aead_decrypt<C: Aead + KeyInit>(
    key: &KeyMaterial,
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key.as_bytes()).map_err(|_| CryptError::InvalidKeySize {
        expected: C::key_size(),
        actual: key.len(),
    })?;

    cipher
        .decrypt(aead::Nonce::<C>::from_slice(nonce), ciphertext)
        .map_err(|_| CryptError::AuthenticationFailure)
}
