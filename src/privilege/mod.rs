//! Privilege resolution: decide once per run how elevated commands are invoked.
//!
//! Root needs nothing. Otherwise sudo is probed first and doas second; the
//! first that grants the user elevation wins. Windows elevates through the
//! installers' own prompts.

mod doas;
mod probe;

pub use probe::{PrivilegeProbe, SystemPrivilegeProbe};

use thiserror::Error;

use crate::context::RunContext;
use crate::ui::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationMethod {
    /// Already root, or elevation is handled out of band
    None,
    Sudo,
    Doas,
}

impl ElevationMethod {
    /// Program that prefixes elevated commands, if any.
    pub fn program(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Sudo => Some("sudo"),
            Self::Doas => Some("doas"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PrivilegeError {
    #[error("user {0} has neither sudo nor doas permissions (missing root privileges)")]
    NoElevationAvailable(String),
    #[error("could not determine the current user: {0}")]
    UnknownUser(String),
}

pub fn resolve(
    probe: &dyn PrivilegeProbe,
    ctx: &RunContext,
) -> Result<ElevationMethod, PrivilegeError> {
    let username = probe
        .username()
        .map_err(|e| PrivilegeError::UnknownUser(format!("{:#}", e)))?;
    ctx.debug("privilege.user", format!("username: {}", username));

    if username == "root" || probe.is_effective_root() {
        emit(Level::Info, "privilege.root", "* Running as root", None);
        return Ok(ElevationMethod::None);
    }

    if ctx.platform.is_windows() {
        ctx.debug(
            "privilege.windows",
            "elevation is left to the installers' own prompts",
        );
        return Ok(ElevationMethod::None);
    }

    emit(
        Level::Info,
        "privilege.probe",
        &format!(
            "* Not running as root, checking if user {} has sudo/doas permission...",
            username
        ),
        None,
    );

    if has_sudo(probe, &username, ctx) {
        emit(
            Level::Success,
            "privilege.sudo",
            &format!("\t* User {} has sudo permissions, continuing...", username),
            None,
        );
        return Ok(ElevationMethod::Sudo);
    }

    if has_doas(probe, &username, ctx) {
        emit(
            Level::Success,
            "privilege.doas",
            &format!("\t* User {} has doas permissions, continuing...", username),
            None,
        );
        return Ok(ElevationMethod::Doas);
    }

    Err(PrivilegeError::NoElevationAvailable(username))
}

fn has_sudo(probe: &dyn PrivilegeProbe, username: &str, ctx: &RunContext) -> bool {
    if !probe.sudo_installed() {
        emit(Level::Info, "privilege.sudo.missing", "* sudo not found...", None);
        return false;
    }

    match probe.sudo_listing() {
        Ok(listing) if grants_all(&listing) => true,
        Ok(listing) => {
            emit(Level::Info, "privilege.sudo.none", "* no sudo detected...", None);
            ctx.debug("privilege.sudo.listing", listing.trim());
            false
        }
        Err(e) => {
            emit(
                Level::Info,
                "privilege.sudo.refused",
                &format!("* sudo is installed, but user {} may not run it...", username),
                None,
            );
            ctx.debug("privilege.sudo.error", format!("{:#}", e));
            false
        }
    }
}

/// Whether a `sudo -l` listing contains a rule allowing ALL commands.
fn grants_all(listing: &str) -> bool {
    listing
        .lines()
        .map(str::trim)
        .any(|line| line.starts_with('(') && line.contains("ALL"))
}

fn has_doas(probe: &dyn PrivilegeProbe, username: &str, ctx: &RunContext) -> bool {
    if !probe.doas_installed() {
        ctx.debug("privilege.doas.missing", "doas is not installed");
        return false;
    }

    let (users, groups) = match probe.doas_config(ctx.platform) {
        Some(config) => (doas::permitted_users(&config), doas::permitted_groups(&config)),
        None => {
            ctx.debug(
                "privilege.doas.config",
                format!("no readable doas.conf, assuming group {}", doas::FALLBACK_GROUP),
            );
            (Vec::new(), vec![doas::FALLBACK_GROUP.to_string()])
        }
    };

    if users.iter().any(|u| u == username) {
        return true;
    }

    match probe.user_groups(username) {
        Ok(member_of) => {
            let granted = member_of.iter().any(|g| groups.contains(g));
            if !granted {
                emit(Level::Info, "privilege.doas.none", "* no doas detected...", None);
                ctx.debug(
                    "privilege.doas.groups",
                    format!("user groups {:?}, permitted {:?}", member_of, groups),
                );
            }
            granted
        }
        Err(e) => {
            ctx.debug("privilege.doas.error", format!("{:#}", e));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::platform::Platform;
    use anyhow::{Result, anyhow};
    use std::cell::Cell;

    const SUDO_ALL: &str = "User alice may run the following commands on host:\n    (ALL : ALL) ALL\n";

    struct FakeProbe {
        username: &'static str,
        sudo_installed: bool,
        sudo: Option<&'static str>,
        doas_installed: bool,
        doas_config: Option<&'static str>,
        groups: Option<Vec<&'static str>>,
        sudo_calls: Cell<usize>,
        doas_calls: Cell<usize>,
    }

    impl FakeProbe {
        fn user(username: &'static str) -> Self {
            Self {
                username,
                sudo_installed: true,
                sudo: None,
                doas_installed: false,
                doas_config: None,
                groups: Some(vec![]),
                sudo_calls: Cell::new(0),
                doas_calls: Cell::new(0),
            }
        }
    }

    impl PrivilegeProbe for FakeProbe {
        fn username(&self) -> Result<String> {
            Ok(self.username.to_string())
        }

        fn is_effective_root(&self) -> bool {
            false
        }

        fn sudo_installed(&self) -> bool {
            self.sudo_installed
        }

        fn sudo_listing(&self) -> Result<String> {
            self.sudo_calls.set(self.sudo_calls.get() + 1);
            self.sudo
                .map(str::to_string)
                .ok_or_else(|| anyhow!("Sorry, user {} may not run sudo", self.username))
        }

        fn doas_installed(&self) -> bool {
            self.doas_calls.set(self.doas_calls.get() + 1);
            self.doas_installed
        }

        fn doas_config(&self, _platform: Platform) -> Option<String> {
            self.doas_config.map(str::to_string)
        }

        fn user_groups(&self, username: &str) -> Result<Vec<String>> {
            match &self.groups {
                Some(groups) => Ok(groups.iter().map(|g| g.to_string()).collect()),
                None => Err(anyhow!("id: '{}': no such user", username)),
            }
        }
    }

    fn linux() -> RunContext {
        RunContext::new(Platform::Linux, false)
    }

    #[test]
    fn test_root_needs_no_elevation() {
        let probe = FakeProbe::user("root");
        assert_eq!(resolve(&probe, &linux()).unwrap(), ElevationMethod::None);
        assert_eq!(probe.sudo_calls.get(), 0);
    }

    #[test]
    fn test_windows_resolves_immediately() {
        let probe = FakeProbe::user("alice");
        let ctx = RunContext::new(Platform::Windows, false);
        assert_eq!(resolve(&probe, &ctx).unwrap(), ElevationMethod::None);
        assert_eq!(probe.sudo_calls.get(), 0);
        assert_eq!(probe.doas_calls.get(), 0);
    }

    #[test]
    fn test_sudo_wins_over_doas() {
        let probe = FakeProbe {
            sudo: Some(SUDO_ALL),
            doas_installed: true,
            doas_config: Some("permit :wheel\n"),
            groups: Some(vec!["alice", "wheel"]),
            ..FakeProbe::user("alice")
        };
        assert_eq!(resolve(&probe, &linux()).unwrap(), ElevationMethod::Sudo);
        assert_eq!(probe.doas_calls.get(), 0);
    }

    #[test]
    fn test_doas_when_sudo_grants_nothing() {
        let probe = FakeProbe {
            sudo: Some("Sorry, user alice may not run sudo on host.\n"),
            doas_installed: true,
            doas_config: Some("permit persist :staff\n"),
            groups: Some(vec!["alice", "staff"]),
            ..FakeProbe::user("alice")
        };
        assert_eq!(resolve(&probe, &linux()).unwrap(), ElevationMethod::Doas);
    }

    #[test]
    fn test_doas_falls_back_to_wheel_without_config() {
        let probe = FakeProbe {
            doas_installed: true,
            groups: Some(vec!["wheel"]),
            ..FakeProbe::user("alice")
        };
        assert_eq!(resolve(&probe, &linux()).unwrap(), ElevationMethod::Doas);
    }

    #[test]
    fn test_doas_user_rule() {
        let probe = FakeProbe {
            doas_installed: true,
            doas_config: Some("permit nopass alice\n"),
            ..FakeProbe::user("alice")
        };
        assert_eq!(resolve(&probe, &linux()).unwrap(), ElevationMethod::Doas);
    }

    #[test]
    fn test_no_elevation_is_an_error() {
        let probe = FakeProbe {
            doas_installed: true,
            doas_config: Some("permit :wheel\n"),
            groups: Some(vec!["users"]),
            ..FakeProbe::user("bob")
        };
        let err = resolve(&probe, &linux()).unwrap_err();
        assert!(matches!(err, PrivilegeError::NoElevationAvailable(ref u) if u == "bob"));
    }

    #[test]
    fn test_missing_sudo_is_never_listed() {
        let probe = FakeProbe {
            sudo_installed: false,
            doas_installed: true,
            groups: Some(vec!["wheel"]),
            ..FakeProbe::user("alice")
        };
        assert_eq!(resolve(&probe, &linux()).unwrap(), ElevationMethod::Doas);
        assert_eq!(probe.sudo_calls.get(), 0);
    }

    #[test]
    fn test_refused_sudo_falls_through_to_doas() {
        let probe = FakeProbe {
            doas_installed: true,
            doas_config: Some("permit :wheel\n"),
            groups: Some(vec!["wheel"]),
            ..FakeProbe::user("alice")
        };
        assert_eq!(resolve(&probe, &linux()).unwrap(), ElevationMethod::Doas);
        assert_eq!(probe.sudo_calls.get(), 1);
    }

    #[test]
    fn test_failed_group_lookup_grants_nothing() {
        let probe = FakeProbe {
            doas_installed: true,
            doas_config: Some("permit :wheel\n"),
            groups: None,
            ..FakeProbe::user("carol")
        };
        let err = resolve(&probe, &linux()).unwrap_err();
        assert!(matches!(err, PrivilegeError::NoElevationAvailable(ref u) if u == "carol"));
        assert_eq!(probe.doas_calls.get(), 1);
    }

    #[test]
    fn test_grants_all() {
        assert!(grants_all(SUDO_ALL));
        assert!(grants_all("    (root) NOPASSWD: ALL\n"));
        assert!(!grants_all("    (root) /usr/bin/apt\n"));
        assert!(!grants_all(""));
    }

    #[test]
    fn test_program() {
        assert_eq!(ElevationMethod::None.program(), None);
        assert_eq!(ElevationMethod::Sudo.program(), Some("sudo"));
        assert_eq!(ElevationMethod::Doas.program(), Some("doas"));
    }
}
