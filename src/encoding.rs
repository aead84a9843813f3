//! Base64 (standard alphabet, padded).

use crate::error::{CryptError, Result};
use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

/// Padding is required on decode, but non-zero unused bits in the final
/// symbol are accepted (`SGVsbG9=` decodes to `Hello`).
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

pub fn encode(data: &[u8]) -> String {
    ENGINE.encode(data)
}

/// Decode Base64 text. ASCII whitespace, including line breaks, is ignored.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    ENGINE
        .decode(compact)
        .map_err(|e| CryptError::InvalidArgument(format!("invalid Base64 input: {e}")))
}
