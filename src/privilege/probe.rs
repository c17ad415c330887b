use anyhow::{Context, Result, anyhow};
use duct::cmd;

use crate::common::platform::Platform;

/// The system facts the privilege resolver depends on.
pub trait PrivilegeProbe {
    /// Login name of the invoking user
    fn username(&self) -> Result<String>;

    /// True when the process already runs with an effective uid of 0
    fn is_effective_root(&self) -> bool;

    /// Whether a sudo binary is installed
    fn sudo_installed(&self) -> bool;

    /// Output of `sudo -l` for the invoking user
    fn sudo_listing(&self) -> Result<String>;

    /// Whether a doas binary is installed
    fn doas_installed(&self) -> bool;

    /// Contents of the first readable doas configuration
    fn doas_config(&self, platform: Platform) -> Option<String>;

    /// Groups the user belongs to
    fn user_groups(&self, username: &str) -> Result<Vec<String>>;
}

/// Probe backed by the real system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPrivilegeProbe;

impl PrivilegeProbe for SystemPrivilegeProbe {
    fn username(&self) -> Result<String> {
        current_username()
    }

    fn is_effective_root(&self) -> bool {
        effective_root()
    }

    fn sudo_installed(&self) -> bool {
        which::which("sudo").is_ok()
    }

    fn sudo_listing(&self) -> Result<String> {
        // stdin stays attached so sudo can ask for the password once; the
        // credential is then cached for the update steps
        cmd!("sudo", "-l")
            .stderr_capture()
            .read()
            .context("Failed to list sudo permissions")
    }

    fn doas_installed(&self) -> bool {
        which::which("doas").is_ok()
    }

    fn doas_config(&self, platform: Platform) -> Option<String> {
        platform
            .doas_config_paths()
            .iter()
            .find_map(|path| std::fs::read_to_string(path).ok())
    }

    fn user_groups(&self, username: &str) -> Result<Vec<String>> {
        let output = cmd!("id", "-Gn", username)
            .stderr_capture()
            .read()
            .with_context(|| format!("Failed to list groups of {}", username))?;
        Ok(output.split_whitespace().map(str::to_string).collect())
    }
}

#[cfg(unix)]
fn current_username() -> Result<String> {
    use nix::unistd::{Uid, User};

    let uid = Uid::current();
    User::from_uid(uid)
        .context("Failed to read the user database")?
        .map(|user| user.name)
        .ok_or_else(|| anyhow!("No user entry for uid {}", uid))
}

#[cfg(not(unix))]
fn current_username() -> Result<String> {
    std::env::var("USERNAME").map_err(|_| anyhow!("USERNAME is not set"))
}

#[cfg(unix)]
fn effective_root() -> bool {
    matches!(sudo::check(), sudo::RunningAs::Root)
}

#[cfg(not(unix))]
fn effective_root() -> bool {
    false
}
