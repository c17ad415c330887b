use duct::cmd;

use crate::registry::ManagerId;

/// Capability probe: is this package manager installed and executable?
pub trait ManagerProbe {
    fn is_available(&self, id: ManagerId) -> bool;
}

/// Probe that looks the binary up on `PATH` and asks it for `--help`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HelpProbe;

impl ManagerProbe for HelpProbe {
    fn is_available(&self, id: ManagerId) -> bool {
        let binary = id.binary();
        if which::which(binary).is_err() {
            return false;
        }
        cmd!(binary, "--help")
            .stdout_null()
            .stderr_null()
            .stdin_null()
            .run()
            .is_ok()
    }
}
