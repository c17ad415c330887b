//! Detection and selection of the package manager to drive per tier.

mod probe;

pub use probe::{HelpProbe, ManagerProbe};

use crate::context::RunContext;
use crate::registry::{self, ManagerId, ManagerSpec, RegistryError, Tier};
use crate::ui::prelude::*;

/// Outcome of probing one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub tier: Tier,
    pub manager: Option<&'static ManagerSpec>,
}

impl Selection {
    pub fn id(&self) -> Option<ManagerId> {
        self.manager.map(|spec| spec.id)
    }
}

/// Probe the tier's managers in priority order and pick the first available
/// one. Nothing is probed after the first hit.
pub fn select(
    tier: Tier,
    probe: &dyn ManagerProbe,
    ctx: &RunContext,
) -> Result<Selection, RegistryError> {
    for id in registry::priority(tier) {
        ctx.debug("detect.probe", format!("probing {} manager {}", tier, id));
        if probe.is_available(*id) {
            ctx.debug("detect.found", format!("FOUND PACKAGE MANAGER: {}", id));
            return Ok(Selection {
                tier,
                manager: Some(registry::lookup(*id, tier)?),
            });
        }
    }
    Ok(Selection {
        tier,
        manager: None,
    })
}

/// When dnf was selected and the legacy preference is set, switch to yum if
/// it is installed. Keep dnf otherwise.
pub fn apply_legacy_preference(
    selection: Selection,
    prefer_legacy: bool,
    probe: &dyn ManagerProbe,
    ctx: &RunContext,
) -> Result<Selection, RegistryError> {
    if !prefer_legacy || selection.id() != Some(ManagerId::Dnf) {
        return Ok(selection);
    }

    if probe.is_available(ManagerId::Yum) {
        ctx.debug("detect.legacy", "USING YUM over DNF");
        return Ok(Selection {
            manager: Some(registry::lookup(ManagerId::Yum, selection.tier)?),
            ..selection
        });
    }

    emit(
        Level::Warn,
        "detect.legacy.missing",
        "--yum-update flag used, but YUM does NOT exist. Using DNF instead",
        None,
    );
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::platform::Platform;
    use std::cell::RefCell;

    /// Reports the listed managers as installed and records every probe.
    struct FakeProbe {
        installed: Vec<ManagerId>,
        probed: RefCell<Vec<ManagerId>>,
    }

    impl FakeProbe {
        fn new(installed: &[ManagerId]) -> Self {
            Self {
                installed: installed.to_vec(),
                probed: RefCell::new(Vec::new()),
            }
        }
    }

    impl ManagerProbe for FakeProbe {
        fn is_available(&self, id: ManagerId) -> bool {
            self.probed.borrow_mut().push(id);
            self.installed.contains(&id)
        }
    }

    fn ctx() -> RunContext {
        RunContext::new(Platform::Linux, false)
    }

    #[test]
    fn test_first_available_in_priority_order_wins() {
        // Listed out of priority order on purpose
        let probe = FakeProbe::new(&[ManagerId::Pacman, ManagerId::Zypper, ManagerId::Dnf]);
        let selection = select(Tier::Official, &probe, &ctx()).unwrap();
        assert_eq!(selection.id(), Some(ManagerId::Dnf));
        assert_eq!(
            *probe.probed.borrow(),
            vec![ManagerId::Apt, ManagerId::Dnf],
            "probing must stop at the first hit"
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        for _ in 0..3 {
            let probe = FakeProbe::new(&[ManagerId::Flatpak, ManagerId::Snap]);
            let selection = select(Tier::Alternative, &probe, &ctx()).unwrap();
            assert_eq!(selection.id(), Some(ManagerId::Snap));
            assert_eq!(selection.tier, Tier::Alternative);
        }
    }

    #[test]
    fn test_nothing_found() {
        let probe = FakeProbe::new(&[ManagerId::Brew]);
        let selection = select(Tier::Official, &probe, &ctx()).unwrap();
        assert_eq!(selection.manager, None);
        assert_eq!(
            probe.probed.borrow().len(),
            registry::priority(Tier::Official).len()
        );
        assert!(!probe.probed.borrow().contains(&ManagerId::Brew));
    }

    #[test]
    fn test_legacy_preference_switches_to_yum() {
        let probe = FakeProbe::new(&[ManagerId::Dnf, ManagerId::Yum]);
        let selection = select(Tier::Official, &probe, &ctx()).unwrap();
        let selection = apply_legacy_preference(selection, true, &probe, &ctx()).unwrap();
        assert_eq!(selection.id(), Some(ManagerId::Yum));
    }

    #[test]
    fn test_legacy_preference_falls_back_to_dnf() {
        let probe = FakeProbe::new(&[ManagerId::Dnf]);
        let selection = select(Tier::Official, &probe, &ctx()).unwrap();
        let selection = apply_legacy_preference(selection, true, &probe, &ctx()).unwrap();
        assert_eq!(selection.id(), Some(ManagerId::Dnf));
    }

    #[test]
    fn test_legacy_preference_ignored_when_unset_or_not_dnf() {
        let probe = FakeProbe::new(&[ManagerId::Dnf, ManagerId::Yum, ManagerId::Apt]);
        let dnf = Selection {
            tier: Tier::Official,
            manager: Some(registry::lookup(ManagerId::Dnf, Tier::Official).unwrap()),
        };
        let kept = apply_legacy_preference(dnf, false, &probe, &ctx()).unwrap();
        assert_eq!(kept.id(), Some(ManagerId::Dnf));

        let apt = select(Tier::Official, &probe, &ctx()).unwrap();
        let probes_before = probe.probed.borrow().len();
        let kept = apply_legacy_preference(apt, true, &probe, &ctx()).unwrap();
        assert_eq!(kept.id(), Some(ManagerId::Apt));
        assert_eq!(probe.probed.borrow().len(), probes_before);
    }
}
