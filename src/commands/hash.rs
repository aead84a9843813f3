use anucrypt::digest::{self, HashAlgorithm};
use anucrypt::error::Result;
use std::path::Path;

/// Print the hex digest of a file, or of literal text with `text`
pub fn hash(algorithm: HashAlgorithm, input: &str, text: bool) -> Result<()> {
    let hex = if text {
        digest::hash_text(algorithm, input)
    } else {
        digest::hash_file(algorithm, Path::new(input))?
    };
    println!("{algorithm}: {hex}");
    Ok(())
}
