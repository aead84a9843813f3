use anucrypt::encoding;
use anucrypt::error::Result;
use anucrypt::file::write_atomic;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub fn base64_encode(input: &str, text: bool) -> Result<()> {
    let data = if text {
        input.as_bytes().to_vec()
    } else {
        fs::read(input)?
    };
    println!("{}", encoding::encode(&data));
    Ok(())
}

/// Decode Base64 to `output`, or to stdout when no output is given
pub fn base64_decode(input: &str, text: bool, output: Option<&Path>) -> Result<()> {
    let encoded = if text {
        input.to_string()
    } else {
        fs::read_to_string(input)?
    };
    let decoded = encoding::decode(&encoded)?;

    match output {
        Some(path) => {
            write_atomic(path, &decoded)?;
            println!("Decoded: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&decoded)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
