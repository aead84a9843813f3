use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory with its own settings file path.
#[allow(dead_code)]
pub struct Workspace {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.join("settings.toml")
    }

    /// anucrypt command running in this workspace, isolated from the user's settings
    pub fn cmd(&self) -> Command {
        let mut cmd = anucrypt_cmd();
        cmd.current_dir(self.path())
            .env_remove("ANUCRYPT_DEFAULT_KEY")
            .env_remove("ANUCRYPT_LOG")
            .arg("--config")
            .arg(self.settings_path());
        cmd
    }

    /// Generate a key of `bits` into the workspace and return its path
    pub fn gen_key(&self, bits: u32) -> PathBuf {
        self.cmd().args(["gen-key", bits.to_string().as_str()]).assert().success();
        self.join(&format!("key_{bits}.crypt.key"))
    }
}

/// Convenience helper for spawning the anucrypt binary via assert_cmd.
pub fn anucrypt_cmd() -> Command {
    cargo_bin_cmd!("anucrypt")
}
