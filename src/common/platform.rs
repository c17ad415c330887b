/// The host operating system family, as far as package management cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
    MacOS,
    FreeBSD,
    OpenBSD,
    Other(&'static str),
}

impl Platform {
    /// Detect the platform this binary was built for and is running on.
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    fn from_os(os: &'static str) -> Self {
        match os {
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            "macos" => Self::MacOS,
            "freebsd" => Self::FreeBSD,
            "openbsd" => Self::OpenBSD,
            other => Self::Other(other),
        }
    }

    /// Windows handles elevation through installer prompts, not sudo/doas.
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::MacOS => "macos",
            Self::FreeBSD => "freebsd",
            Self::OpenBSD => "openbsd",
            Self::Other(os) => os,
        }
    }

    /// Locations of the doas configuration, most specific first.
    pub fn doas_config_paths(&self) -> &'static [&'static str] {
        match self {
            Self::FreeBSD => &["/usr/local/etc/doas.conf", "/etc/doas.conf"],
            _ => &["/etc/doas.conf", "/usr/local/etc/doas.conf"],
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
