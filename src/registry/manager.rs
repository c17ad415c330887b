//! Package manager identities and their command tables.

/// Which of the two manager categories a package manager belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Provided by the OS vendor; exactly one is expected per system
    Official,
    /// Third-party, cross-platform; optional
    Alternative,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Alternative => "alternative",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Every package manager the updater knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerId {
    // =========================================================================
    // Official
    // =========================================================================
    /// Debian family
    Apt,
    /// Red Hat family
    Dnf,
    /// openSUSE immutable (MicroOS, Aeon)
    TransactionalUpdate,
    /// openSUSE
    Zypper,
    /// Legacy Red Hat
    Yum,
    /// Red Hat immutable (Silverblue, CoreOS)
    RpmOstree,
    /// Alpine Linux
    Apk,
    /// Clear Linux
    Swupd,
    /// Arch Linux
    Pacman,
    /// OpenBSD
    PkgAdd,
    /// FreeBSD
    Pkg,
    /// Solus
    Eopkg,
    /// Slackware
    Slackpkg,
    /// Void Linux
    Xbps,
    /// Windows
    Winget,

    // =========================================================================
    // Alternative
    // =========================================================================
    Brew,
    Snap,
    Choco,
    Flatpak,
}

impl ManagerId {
    /// Name of the executable that is probed and invoked.
    pub fn binary(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::TransactionalUpdate => "transactional-update",
            Self::Zypper => "zypper",
            Self::Yum => "yum",
            Self::RpmOstree => "rpm-ostree",
            Self::Apk => "apk",
            Self::Swupd => "swupd",
            Self::Pacman => "pacman",
            Self::PkgAdd => "pkg_add",
            Self::Pkg => "pkg",
            Self::Eopkg => "eopkg",
            Self::Slackpkg => "slackpkg",
            Self::Xbps => "xbps-install",
            Self::Winget => "winget",
            Self::Brew => "brew",
            Self::Snap => "snap",
            Self::Choco => "choco",
            Self::Flatpak => "flatpak",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            Self::Brew | Self::Snap | Self::Choco | Self::Flatpak => Tier::Alternative,
            _ => Tier::Official,
        }
    }
}

impl std::fmt::Display for ManagerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// One invocation of a package manager: its argument tokens, and whether the
/// non-interactive confirmation token must be left off even in unattended runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStep {
    pub tokens: &'static [&'static str],
    pub suppress_confirm: bool,
}

impl CommandStep {
    pub const fn new(tokens: &'static [&'static str]) -> Self {
        Self {
            tokens,
            suppress_confirm: false,
        }
    }

    /// Mark this step as rejecting (or not needing) the confirmation token.
    pub const fn without_confirm(self) -> Self {
        Self {
            suppress_confirm: true,
            ..self
        }
    }

    /// Tokens that actually end up on the command line.
    pub fn args(&self) -> impl Iterator<Item = &'static str> {
        self.tokens.iter().copied().filter(|t| !t.is_empty())
    }
}

/// Everything the engine needs to fully update through one package manager.
#[derive(Debug, PartialEq, Eq)]
pub struct ManagerSpec {
    pub id: ManagerId,
    pub tier: Tier,
    /// Argument that makes the manager proceed without prompting
    pub confirm_token: &'static str,
    /// Ordered: metadata refresh, upgrade, cleanup
    pub steps: &'static [CommandStep],
}

impl ManagerSpec {
    pub fn binary(&self) -> &'static str {
        self.id.binary()
    }

    /// Whether the confirmation token is appended to the given step in an
    /// unattended run.
    pub fn confirms_step(&self, index: usize) -> bool {
        self.steps
            .get(index)
            .is_some_and(|step| !step.suppress_confirm)
    }
}
