use clap::Parser;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::error::EXIT_CODES;
use crate::ui::OutputFormat;

pub const WARRANTY: &str = "\
THERE IS NO WARRANTY FOR THE PROGRAM, TO THE EXTENT PERMITTED BY
APPLICABLE LAW. EXCEPT WHEN OTHERWISE STATED IN WRITING THE COPYRIGHT
HOLDERS AND/OR OTHER PARTIES PROVIDE THE PROGRAM \"AS IS\" WITHOUT WARRANTY
OF ANY KIND, EITHER EXPRESSED OR IMPLIED, INCLUDING, BUT NOT LIMITED TO,
THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
PURPOSE. THE ENTIRE RISK AS TO THE QUALITY AND PERFORMANCE OF THE PROGRAM
IS WITH YOU. SHOULD THE PROGRAM PROVE DEFECTIVE, YOU ASSUME THE COST OF
ALL NECESSARY SERVICING, REPAIR OR CORRECTION.";

pub const FLAGS: &str = "\
--ma, --manual-all        Never pass the confirmation token; approve every step by hand
--ao, --alt-only          Only update with an alternative package manager
--oo, --official-only     Only update with the official package manager
--cd, --custom-domain     Also require this host to be reachable
--yu, --yum-update        Prefer yum over dnf
-d,   --debug             Print debug traces
-w,   --warranty          Print the warranty disclaimer
-f,   --flags             Print this list";

static EXIT_HELP: LazyLock<String> = LazyLock::new(|| {
    let mut help = String::from("Exit codes:\n");
    for (code, meaning) in EXIT_CODES {
        help.push_str(&format!("  {:<5}{}\n", code, meaning));
    }
    help
});

/// Update every package manager on the system in one go
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = EXIT_HELP.as_str())]
pub struct Cli {
    /// Approve every step manually
    #[arg(long = "manual-all", alias = "ma")]
    pub manual_all: bool,

    /// Only use alternative package managers
    #[arg(long = "alt-only", alias = "ao")]
    pub alt_only: bool,

    /// Only use the official package manager
    #[arg(long = "official-only", alias = "oo")]
    pub official_only: bool,

    /// Additional host that must be reachable
    #[arg(long = "custom-domain", alias = "cd", value_name = "HOST")]
    pub custom_domain: Option<String>,

    /// Prefer yum over dnf when both are installed
    #[arg(long = "yum-update", alias = "yu")]
    pub yum_update: bool,

    /// Print debug traces
    #[arg(short, long)]
    pub debug: bool,

    /// Print the warranty disclaimer and exit
    #[arg(short, long)]
    pub warranty: bool,

    /// Print a summary of the flags and exit
    #[arg(short, long)]
    pub flags: bool,

    /// Do not clear the screen before running
    #[arg(long)]
    pub no_clear: bool,

    /// Output format for status messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to a config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
