use thiserror::Error;

use crate::connectivity::ConnectivityError;
use crate::privilege::PrivilegeError;
use crate::registry::RegistryError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USER: i32 = 1;
pub const EXIT_DEVELOPER: i32 = 3;
pub const EXIT_ENVIRONMENT: i32 = 4;
pub const EXIT_CANCELLED: i32 = 130;

/// Exit codes with their meaning, as listed in `--help`.
pub const EXIT_CODES: &[(i32, &str)] = &[
    (EXIT_SUCCESS, "Successful operation"),
    (EXIT_USER, "Error on behalf of USER"),
    (EXIT_DEVELOPER, "Error on behalf of DEVELOPER"),
    (EXIT_ENVIRONMENT, "Other error (environmental, incompatible, etc)"),
    (EXIT_CANCELLED, "Cancelled by USER"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    User,
    Developer,
    Environmental,
}

/// Errors that abort a run. Failures of individual update steps are not
/// among them; the engine reports those and carries on.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("incompatible arguments [--alt-only && --official-only]")]
    IncompatibleFlags,
    #[error("custom domain must not be empty")]
    EmptyCustomDomain,
    #[error(transparent)]
    Privilege(#[from] PrivilegeError),
    #[error(transparent)]
    Connectivity(#[from] ConnectivityError),
    #[error("developer error: {0}")]
    Registry(#[from] RegistryError),
    #[error("missing official package manager")]
    MissingOfficialManager,
    #[error("missing alternative package manager, forced by --alt-only")]
    MissingAlternativeManager,
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl UpdateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IncompatibleFlags
            | Self::EmptyCustomDomain
            | Self::Connectivity(_)
            | Self::Privilege(PrivilegeError::NoElevationAvailable(_)) => ErrorKind::User,
            Self::Registry(_) | Self::Privilege(PrivilegeError::UnknownUser(_)) => {
                ErrorKind::Developer
            }
            Self::MissingOfficialManager
            | Self::MissingAlternativeManager
            | Self::Runtime(_) => ErrorKind::Environmental,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::User => EXIT_USER,
            ErrorKind::Developer => EXIT_DEVELOPER,
            ErrorKind::Environmental => EXIT_ENVIRONMENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ManagerId, Tier};

    #[test]
    fn test_exit_codes() {
        assert_eq!(UpdateError::IncompatibleFlags.exit_code(), 1);
        assert_eq!(UpdateError::EmptyCustomDomain.exit_code(), 1);
        assert_eq!(
            UpdateError::from(PrivilegeError::NoElevationAvailable("bob".into())).exit_code(),
            1
        );
        assert_eq!(
            UpdateError::from(ConnectivityError::Unreachable {
                target: "example.org".into(),
                reason: "timeout".into(),
            })
            .exit_code(),
            1
        );
        assert_eq!(
            UpdateError::from(RegistryError::UnknownManager {
                id: ManagerId::Snap,
                tier: Tier::Official,
            })
            .exit_code(),
            3
        );
        assert_eq!(
            UpdateError::from(PrivilegeError::UnknownUser("no passwd entry".into())).exit_code(),
            3
        );
        assert_eq!(UpdateError::MissingOfficialManager.exit_code(), 4);
        assert_eq!(UpdateError::MissingAlternativeManager.exit_code(), 4);
    }

    #[test]
    fn test_connectivity_error_names_target() {
        let err = UpdateError::from(ConnectivityError::Unreachable {
            target: "mirror.example.org".into(),
            reason: "dns error".into(),
        });
        assert_eq!(
            err.to_string(),
            "could not reach [mirror.example.org]: dns error"
        );
    }
}
