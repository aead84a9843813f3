mod commands;

use anucrypt::config::Settings;
use anucrypt::container::Algorithm;
use anucrypt::digest::HashAlgorithm;
use anucrypt::key::KeySize;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anucrypt")]
#[command(version)]
#[command(about = "AES-GCM file encryption with integrity checks", long_about = None)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); ANUCRYPT_LOG overrides
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random key (128, 192 or 256 bits)
    GenKey {
        bits: KeySize,

        /// Output key file (default: key_<bits>.crypt.key)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a key file has a valid size
    ValidateKey { key: PathBuf },

    /// Set the key used when --key is omitted
    DefaultKey { key: PathBuf },

    /// Encrypt a file or folder
    Encrypt {
        /// aes128 or aes256
        #[arg(short, long, default_value = "aes256")]
        alg: Algorithm,

        input: PathBuf,

        /// Output file (default: <input>.crypt), required with --folder
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Key file (default: configured default key)
        #[arg(short, long)]
        key: Option<PathBuf>,

        /// Encrypt every file in the input folder, recursively
        #[arg(short, long)]
        folder: bool,
    },

    /// Decrypt a file or folder
    Decrypt {
        /// aes128 or aes256
        #[arg(short, long, default_value = "aes256")]
        alg: Algorithm,

        input: PathBuf,

        /// Output file (default: <input> without .crypt), required with --folder
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Key file (default: configured default key)
        #[arg(short, long)]
        key: Option<PathBuf>,

        /// Decrypt every .crypt file in the input folder, recursively
        #[arg(short, long)]
        folder: bool,
    },

    /// Identify the format of a file or literal text
    Identify { input: String },

    /// Hash a file, or literal text with --text
    Hash {
        /// md5, sha1 or sha256
        #[arg(short, long, default_value = "sha256")]
        alg: HashAlgorithm,

        input: String,

        #[arg(long)]
        text: bool,
    },

    /// Base64 encode or decode
    Base64 {
        #[command(subcommand)]
        action: Base64Action,
    },
}

#[derive(Subcommand)]
enum Base64Action {
    Encode {
        input: String,

        /// Treat INPUT as literal text instead of a path
        #[arg(long)]
        text: bool,
    },
    Decode {
        input: String,

        /// Treat INPUT as literal text instead of a path
        #[arg(long)]
        text: bool,

        /// Write decoded bytes here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log);

    // Only key-using commands read the settings file
    let settings_path = cli.config.unwrap_or_else(Settings::default_path);
    let load_settings = || {
        Settings::load(&settings_path)
            .with_context(|| format!("loading settings from {}", settings_path.display()))
    };

    match cli.command {
        Commands::GenKey { bits, output } => commands::gen_key(bits, output.as_deref())?,
        Commands::ValidateKey { key } => commands::validate_key(&key)?,
        Commands::DefaultKey { key } => {
            commands::default_key(&load_settings()?, &settings_path, &key)?
        }
        Commands::Encrypt {
            alg,
            input,
            output,
            key,
            folder,
        } => commands::encrypt(
            &load_settings()?,
            alg,
            &input,
            output.as_deref(),
            key.as_deref(),
            folder,
        )
        .with_context(|| format!("Encryption failed for {}", input.display()))?,
        Commands::Decrypt {
            alg,
            input,
            output,
            key,
            folder,
        } => commands::decrypt(
            &load_settings()?,
            alg,
            &input,
            output.as_deref(),
            key.as_deref(),
            folder,
        )
        .with_context(|| format!("Decryption failed for {}", input.display()))?,
        Commands::Identify { input } => commands::identify(&input)?,
        Commands::Hash { alg, input, text } => commands::hash(alg, &input, text)?,
        Commands::Base64 { action } => match action {
            Base64Action::Encode { input, text } => commands::base64_encode(&input, text)?,
            Base64Action::Decode {
                input,
                text,
                output,
            } => commands::base64_decode(&input, text, output.as_deref())?,
        },
    }

    Ok(())
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_env("ANUCRYPT_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
