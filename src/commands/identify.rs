use anucrypt::error::Result;
use anucrypt::identify::identify_argument;

/// Print what the input (a file path or literal text) looks like
pub fn identify(input: &str) -> Result<()> {
    let format = identify_argument(input);
    println!("Detected: {format}");
    Ok(())
}
