//! The audited command table.
//!
//! Each entry was written against the manager's own CLI. Step order is the
//! dependency chain of a full update and must never be reordered.

use super::manager::{CommandStep as Step, ManagerId, ManagerSpec, Tier};

const YES: &str = "-y";

pub(super) static MANAGERS: &[ManagerSpec] = &[
    // =========================================================================
    // Official
    // =========================================================================
    ManagerSpec {
        id: ManagerId::Apt,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            // Prints a hint instead of accepting -y
            Step::new(&["update"]).without_confirm(),
            Step::new(&["dist-upgrade"]),
            Step::new(&["-f", "install"]),
            Step::new(&["autoremove"]),
            Step::new(&["autoclean"]),
        ],
    },
    ManagerSpec {
        id: ManagerId::Dnf,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            // Exits 100 when updates are pending
            Step::new(&["check-update"]),
            Step::new(&["update"]),
            Step::new(&["autoremove"]),
        ],
    },
    ManagerSpec {
        id: ManagerId::TransactionalUpdate,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            Step::new(&[]).without_confirm(),
            Step::new(&["patch"]).without_confirm(),
        ],
    },
    ManagerSpec {
        id: ManagerId::Zypper,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            Step::new(&["list-updates"]).without_confirm(),
            Step::new(&["patch-check"]).without_confirm(),
            Step::new(&["update"]),
            Step::new(&["patch"]),
            Step::new(&["purge-kernels"]).without_confirm(),
        ],
    },
    ManagerSpec {
        id: ManagerId::Yum,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            Step::new(&["check-update"]),
            Step::new(&["update"]),
            Step::new(&["autoremove"]),
        ],
    },
    ManagerSpec {
        id: ManagerId::RpmOstree,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            Step::new(&["cancel"]).without_confirm(),
            Step::new(&["upgrade", "--check"]).without_confirm(),
            Step::new(&["upgrade"]).without_confirm(),
        ],
    },
    ManagerSpec {
        id: ManagerId::Apk,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            Step::new(&["update"]).without_confirm(),
            Step::new(&["upgrade"]).without_confirm(),
            Step::new(&["fix"]).without_confirm(),
        ],
    },
    ManagerSpec {
        id: ManagerId::Swupd,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            // Exits 1 when no update is available
            Step::new(&["check-update"]),
            Step::new(&["update"]),
        ],
    },
    ManagerSpec {
        id: ManagerId::Pacman,
        tier: Tier::Official,
        confirm_token: "--noconfirm",
        steps: &[Step::new(&["-Syu"]), Step::new(&["-Sc"])],
    },
    ManagerSpec {
        id: ManagerId::PkgAdd,
        tier: Tier::Official,
        confirm_token: "-I",
        steps: &[Step::new(&["-Uuvm"])],
    },
    ManagerSpec {
        id: ManagerId::Pkg,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            Step::new(&["update"]),
            Step::new(&["upgrade"]),
            Step::new(&["autoremove"]),
            Step::new(&["clean"]),
            Step::new(&["audit", "-F"]),
        ],
    },
    ManagerSpec {
        id: ManagerId::Eopkg,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[Step::new(&["update-repo"]), Step::new(&["upgrade"])],
    },
    ManagerSpec {
        id: ManagerId::Slackpkg,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            Step::new(&["update"]),
            Step::new(&["install-new"]),
            Step::new(&["upgrade-all"]),
            Step::new(&["clean-system"]),
        ],
    },
    ManagerSpec {
        id: ManagerId::Xbps,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[
            Step::new(&["-S"]),
            // xbps itself must be current before the system upgrade
            Step::new(&["-u", "xbps"]),
            Step::new(&["-Su"]),
        ],
    },
    ManagerSpec {
        id: ManagerId::Winget,
        tier: Tier::Official,
        confirm_token: YES,
        steps: &[Step::new(&["upgrade", "--all"]).without_confirm()],
    },
    // =========================================================================
    // Alternative
    // =========================================================================
    ManagerSpec {
        id: ManagerId::Brew,
        tier: Tier::Alternative,
        confirm_token: YES,
        steps: &[
            Step::new(&["update"]).without_confirm(),
            Step::new(&["upgrade", "-v"]).without_confirm(),
            Step::new(&["cleanup", "-v"]).without_confirm(),
        ],
    },
    ManagerSpec {
        id: ManagerId::Snap,
        tier: Tier::Alternative,
        confirm_token: YES,
        steps: &[Step::new(&["refresh"]).without_confirm()],
    },
    ManagerSpec {
        id: ManagerId::Choco,
        tier: Tier::Alternative,
        confirm_token: YES,
        steps: &[Step::new(&["upgrade", "all"])],
    },
    ManagerSpec {
        id: ManagerId::Flatpak,
        tier: Tier::Alternative,
        confirm_token: YES,
        steps: &[Step::new(&["update"]), Step::new(&["uninstall", "--unused"])],
    },
];

/// Official managers in probe order. Position doubles as tie-break.
pub(super) const OFFICIAL_PRIORITY: &[ManagerId] = &[
    ManagerId::Apt,
    ManagerId::Dnf,
    ManagerId::TransactionalUpdate,
    ManagerId::Zypper,
    ManagerId::Yum,
    ManagerId::RpmOstree,
    ManagerId::Apk,
    ManagerId::Swupd,
    ManagerId::Pacman,
    ManagerId::PkgAdd,
    ManagerId::Pkg,
    ManagerId::Eopkg,
    ManagerId::Slackpkg,
    ManagerId::Xbps,
    ManagerId::Winget,
];

/// Alternative managers in probe order.
pub(super) const ALTERNATIVE_PRIORITY: &[ManagerId] = &[
    ManagerId::Brew,
    ManagerId::Snap,
    ManagerId::Choco,
    ManagerId::Flatpak,
];
