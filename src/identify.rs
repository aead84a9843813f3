//! # Format Identification
//!
//! Guesses what produced a blob of bytes using only its content. File names
//! and extensions are never consulted.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. **Container**: byte input, first byte `0x01`/`0x02`, at least a full
//!    container header long. Structural only; nothing is decrypted.
//! 2. **Hex digest**: after stripping whitespace, only hex digits remain.
//!    The length decides the hash (32 MD5, 40 SHA-1, 64 SHA-256); any other
//!    length is [`Format::Unknown`].
//! 3. **Base64**: after stripping whitespace, only Base64 alphabet characters
//!    remain and the text actually decodes to at least one byte.
//!
//! Hex is tried before Base64 because every hex string is also made of
//! Base64 characters.

use crate::container::{Algorithm, HEADER_LEN};
use crate::digest::HashAlgorithm;
use crate::encoding;
use std::fmt;
use std::fs;
use std::path::Path;

/// What a blob looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Aes128,
    Aes256,
    Base64Encoded,
    Md5Hash,
    Sha1Hash,
    Sha256Hash,
    Unknown,
}

impl Format {
    pub fn name(self) -> &'static str {
        match self {
            Format::Aes128 => "AES-128",
            Format::Aes256 => "AES-256",
            Format::Base64Encoded => "Base64 Encoded",
            Format::Md5Hash => "MD5 Hash",
            Format::Sha1Hash => "SHA-1 Hash",
            Format::Sha256Hash => "SHA-256 Hash",
            Format::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the input came from. Only raw bytes are eligible for the container rule.
#[derive(Debug, Clone, Copy)]
enum Input<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
}

impl<'a> Input<'a> {
    fn raw(&self) -> &'a [u8] {
        match *self {
            Input::Bytes(b) => b,
            Input::Text(t) => t.as_bytes(),
        }
    }
}

type Rule = fn(&Input<'_>, &[u8]) -> Option<Format>;

/// Ordered rules. Each sees the raw input and its whitespace-stripped form.
const RULES: &[(&str, Rule)] = &[
    ("container", container_rule),
    ("hex-digest", hex_digest_rule),
    ("base64", base64_rule),
];

/// Classify raw bytes (file contents, buffers)
pub fn classify(data: &[u8]) -> Format {
    run_rules(Input::Bytes(data))
}

/// Classify literal text. The container rule does not apply to text.
pub fn classify_text(text: &str) -> Format {
    run_rules(Input::Text(text))
}

/// Classify the contents of a file. An unreadable file is [`Format::Unknown`].
pub fn classify_file(path: impl AsRef<Path>) -> Format {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(data) => classify(&data),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot read input for identification");
            Format::Unknown
        }
    }
}

/// Classify a command-line argument: a readable file is classified by its
/// contents, anything else as literal text.
pub fn identify_argument(arg: &str) -> Format {
    match fs::read(arg) {
        Ok(data) => classify(&data),
        Err(_) => classify_text(arg),
    }
}

fn run_rules(input: Input<'_>) -> Format {
    let raw = input.raw();
    if raw.is_empty() {
        return Format::Unknown;
    }

    let stripped: Vec<u8> = raw.iter().copied().filter(|b| !is_space(*b)).collect();

    for (name, rule) in RULES {
        if let Some(format) = rule(&input, &stripped) {
            tracing::debug!(rule = *name, %format, "input classified");
            return format;
        }
    }
    Format::Unknown
}

// Matches C `isspace`: includes vertical tab, unlike `u8::is_ascii_whitespace`.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

fn container_rule(input: &Input<'_>, _stripped: &[u8]) -> Option<Format> {
    let Input::Bytes(data) = *input else {
        return None;
    };
    if data.len() < HEADER_LEN {
        return None;
    }
    match Algorithm::from_tag(data[0]).ok()? {
        Algorithm::Aes128Gcm => Some(Format::Aes128),
        Algorithm::Aes256Gcm => Some(Format::Aes256),
    }
}

fn hex_digest_rule(_input: &Input<'_>, stripped: &[u8]) -> Option<Format> {
    if stripped.is_empty() || !stripped.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let format = [
        (HashAlgorithm::Md5, Format::Md5Hash),
        (HashAlgorithm::Sha1, Format::Sha1Hash),
        (HashAlgorithm::Sha256, Format::Sha256Hash),
    ]
    .into_iter()
    .find(|(alg, _)| alg.hex_len() == stripped.len())
    .map_or(Format::Unknown, |(_, format)| format);
    Some(format)
}

fn base64_rule(_input: &Input<'_>, stripped: &[u8]) -> Option<Format> {
    if stripped.is_empty() || !stripped.iter().all(|b| is_base64_char(*b)) {
        return None;
    }
    // All bytes are ASCII at this point
    let text = std::str::from_utf8(stripped).ok()?;
    match encoding::decode(text) {
        Ok(decoded) if !decoded.is_empty() => Some(Format::Base64Encoded),
        _ => None,
    }
}

fn is_base64_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::HEADER_LEN;
    use tempfile::TempDir;

    #[test]
    fn test_md5_hex() {
        assert_eq!(classify_text("d41d8cd98f00b204e9800998ecf8427e"), Format::Md5Hash);
        assert_eq!(classify_text("D41D8CD98F00B204E9800998ECF8427E"), Format::Md5Hash);
    }

    #[test]
    fn test_sha1_and_sha256_hex() {
        assert_eq!(
            classify_text("da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            Format::Sha1Hash
        );
        assert_eq!(
            classify_text("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
            Format::Sha256Hash
        );
    }

    #[test]
    fn test_hex_other_length_is_unknown() {
        // Pure hex never falls through to Base64, even when it would decode
        assert_eq!(classify_text("abcd"), Format::Unknown);
        assert_eq!(classify_text("deadbeef"), Format::Unknown);
    }

    #[test]
    fn test_hex_with_whitespace() {
        assert_eq!(
            classify_text("  d41d8cd98f00b204\n e9800998ecf8427e\r\n"),
            Format::Md5Hash
        );
    }

    #[test]
    fn test_base64() {
        assert_eq!(classify_text("SGVsbG8="), Format::Base64Encoded);
        assert_eq!(classify_text("SGVs\nbG8gV29y\nbGQ="), Format::Base64Encoded);
    }

    #[test]
    fn test_base64_nonzero_trailing_bits() {
        assert_eq!(classify_text("SGVsbG9="), Format::Base64Encoded);
        assert_eq!(classify_text("QR=="), Format::Base64Encoded);
    }

    #[test]
    fn test_base64_charset_but_undecodable() {
        assert_eq!(classify_text("SGVsbG8"), Format::Unknown);
        assert_eq!(classify_text("SG=VsbG8"), Format::Unknown);
        assert_eq!(classify_text("===="), Format::Unknown);
    }

    #[test]
    fn test_other_text_unknown() {
        assert_eq!(classify_text("hello, world!"), Format::Unknown);
        assert_eq!(classify_text("   \n\t"), Format::Unknown);
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(classify_text(""), Format::Unknown);
        assert_eq!(classify(b""), Format::Unknown);
    }

    #[test]
    fn test_container_bytes() {
        let mut data = vec![0x01];
        data.extend_from_slice(&[0x55; HEADER_LEN]);
        assert_eq!(classify(&data), Format::Aes128);

        data[0] = 0x02;
        assert_eq!(classify(&data), Format::Aes256);
    }

    #[test]
    fn test_container_exactly_header_len() {
        let mut data = vec![0x01];
        data.extend_from_slice(&[0x55; HEADER_LEN - 1]);
        assert_eq!(data.len(), HEADER_LEN);
        assert_eq!(classify(&data), Format::Aes128);
    }

    #[test]
    fn test_short_container_prefix_not_container() {
        let mut data = vec![0x01];
        data.extend_from_slice(&[0x55; HEADER_LEN - 2]);
        assert_eq!(classify(&data), Format::Unknown);
    }

    #[test]
    fn test_other_tag_not_container() {
        let mut data = vec![0x03];
        data.extend_from_slice(&[0x55; 64]);
        assert_eq!(classify(&data), Format::Unknown);
    }

    #[test]
    fn test_text_skips_container_rule() {
        let mut text = String::from("\u{1}");
        text.push_str(&"a".repeat(HEADER_LEN));
        assert_eq!(classify_text(&text), Format::Unknown);
    }

    #[test]
    fn test_real_container() {
        use crate::key::KeyMaterial;

        let key = KeyMaterial::generate(Algorithm::Aes256Gcm.key_size());
        let container = crate::crypto::encrypt(Algorithm::Aes256Gcm, &key, b"").unwrap();
        assert_eq!(classify(&container), Format::Aes256);
    }

    #[test]
    fn test_classify_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("digest.txt");
        std::fs::write(&path, "da39a3ee5e6b4b0d3255bfef95601890afd80709\n").unwrap();

        assert_eq!(classify_file(&path), Format::Sha1Hash);
        assert_eq!(classify_file(temp.path().join("missing")), Format::Unknown);
    }

    #[test]
    fn test_identify_argument_falls_back_to_text() {
        assert_eq!(identify_argument("SGVsbG8="), Format::Base64Encoded);
    }

    #[test]
    fn test_names() {
        assert_eq!(Format::Aes128.to_string(), "AES-128");
        assert_eq!(Format::Sha1Hash.name(), "SHA-1 Hash");
        assert_eq!(Format::Unknown.name(), "Unknown");
    }
}
