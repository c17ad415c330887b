//! Command registry: which subcommands each package manager runs, in what order.
//!
//! # Architecture
//!
//! - [`ManagerId`]: every supported package manager, one variant each
//! - [`ManagerSpec`]: the manager's tier, confirmation token and ordered steps
//! - [`CommandStep`]: the tokens of one invocation, plus whether the
//!   confirmation token is suppressed for it
//!
//! The table is the single source of truth. Dispatch is a lookup into it,
//! never a branch on the manager.

mod manager;
mod table;

pub use manager::{CommandStep, ManagerId, ManagerSpec, Tier};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("package manager {id} is not registered as an {tier} manager")]
    UnknownManager { id: ManagerId, tier: Tier },
}

/// Look up the command table of a manager within a tier.
///
/// A miss means the registry and its callers disagree, which is a defect.
pub fn lookup(id: ManagerId, tier: Tier) -> Result<&'static ManagerSpec, RegistryError> {
    table::MANAGERS
        .iter()
        .find(|spec| spec.id == id && spec.tier == tier)
        .ok_or(RegistryError::UnknownManager { id, tier })
}

/// Managers of a tier in probe order.
pub fn priority(tier: Tier) -> &'static [ManagerId] {
    match tier {
        Tier::Official => table::OFFICIAL_PRIORITY,
        Tier::Alternative => table::ALTERNATIVE_PRIORITY,
    }
}

/// Every registered manager, official first.
pub fn all() -> &'static [ManagerSpec] {
    table::MANAGERS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_prioritized_manager_is_registered() {
        for tier in [Tier::Official, Tier::Alternative] {
            for id in priority(tier) {
                let spec = lookup(*id, tier).unwrap();
                assert_eq!(spec.tier, tier);
                assert_eq!(id.tier(), tier, "{} listed under the wrong tier", id);
            }
        }
    }

    #[test]
    fn test_every_registered_manager_is_prioritized_once() {
        let official: HashSet<_> = priority(Tier::Official).iter().collect();
        let alternative: HashSet<_> = priority(Tier::Alternative).iter().collect();
        assert_eq!(official.len(), priority(Tier::Official).len());
        assert_eq!(alternative.len(), priority(Tier::Alternative).len());
        assert_eq!(official.len() + alternative.len(), all().len());
        for spec in all() {
            assert!(official.contains(&spec.id) || alternative.contains(&spec.id));
        }
    }

    #[test]
    fn test_managers_have_steps_and_tokens() {
        for spec in all() {
            assert!(!spec.steps.is_empty(), "{} has no steps", spec.id);
            assert!(!spec.confirm_token.is_empty());
        }
    }

    #[test]
    fn test_lookup_wrong_tier_is_developer_error() {
        assert_eq!(
            lookup(ManagerId::Brew, Tier::Official),
            Err(RegistryError::UnknownManager {
                id: ManagerId::Brew,
                tier: Tier::Official,
            })
        );
    }

    #[test]
    fn test_apt_table() {
        let apt = lookup(ManagerId::Apt, Tier::Official).unwrap();
        let tokens: Vec<_> = apt.steps.iter().map(|s| s.tokens).collect();
        assert_eq!(
            tokens,
            vec![
                &["update"][..],
                &["dist-upgrade"][..],
                &["-f", "install"][..],
                &["autoremove"][..],
                &["autoclean"][..],
            ]
        );
        assert!(!apt.confirms_step(0));
        assert!((1..5).all(|i| apt.confirms_step(i)));
        assert!(!apt.confirms_step(5));
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(priority(Tier::Official)[0], ManagerId::Apt);
        assert_eq!(priority(Tier::Official)[1], ManagerId::Dnf);
        assert_eq!(
            priority(Tier::Alternative),
            &[
                ManagerId::Brew,
                ManagerId::Snap,
                ManagerId::Choco,
                ManagerId::Flatpak
            ]
        );
        assert_eq!(all().len(), 19);
    }

    #[test]
    fn test_fully_suppressed_managers() {
        for id in [
            ManagerId::TransactionalUpdate,
            ManagerId::RpmOstree,
            ManagerId::Apk,
            ManagerId::Winget,
        ] {
            let spec = lookup(id, Tier::Official).unwrap();
            assert!(spec.steps.iter().all(|s| s.suppress_confirm), "{}", id);
        }
        let brew = lookup(ManagerId::Brew, Tier::Alternative).unwrap();
        assert!(brew.steps.iter().all(|s| s.suppress_confirm));
    }
}
