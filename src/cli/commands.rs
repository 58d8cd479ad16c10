use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use sectionnav::ActivePolicy;
use sectionnav::config::SettingsOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sectionnav")]
#[command(version)]
#[command(about = "Section navigation bar for markdown pages")]
#[command(
    long_about = "sectionnav - Read a markdown page with a navigation bar built from its sections.\n\n\
    The bar highlights the section you are reading, jumps smoothly to a section\n\
    when an entry is activated, and hides itself after a few seconds without scrolling.\n\n\
    Examples:\n  \
    sectionnav README.md              # Interactive TUI mode\n  \
    sectionnav --list README.md       # Print navigation entries\n  \
    sectionnav --json -L 3 doc.md     # Entries for ### sections as JSON\n  \
    sectionnav --completions zsh      # Print a completion script"
)]
pub struct Cli {
    /// Markdown file to read, or '-' for stdin
    ///
    /// Stdin is only accepted with --list or --json, since the interactive
    /// mode reads keys from the terminal.
    pub file: Option<PathBuf>,

    /// Print the navigation entries and exit (non-interactive)
    ///
    /// One entry per line as `label<TAB>target`. The trailing expand control
    /// is included as `+` with an empty target.
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Print the navigation entries as JSON and exit (non-interactive)
    #[arg(long = "json", conflicts_with = "list")]
    pub json: bool,

    /// Heading level that starts a section (1-6)
    ///
    /// Shallower headings become plain text; deeper ones stay inside the
    /// section body.
    ///
    /// Example: -L 3 builds the bar from ### headings
    #[arg(short = 'L', long = "level", value_name = "LEVEL")]
    pub level: Option<usize>,

    /// Fraction of a section that must be on screen for it to count as in view
    ///
    /// Example: --threshold 0.5
    #[arg(long = "threshold", value_name = "RATIO")]
    pub threshold: Option<f32>,

    /// Milliseconds without scrolling before the navigation bar hides
    #[arg(long = "idle-delay", value_name = "MS")]
    pub idle_delay: Option<u64>,

    /// How sections in view map to highlighted entries
    ///
    ///   exclusive - only the last section in view is highlighted (default)
    ///   mirror    - every section in view carries the active marker
    #[arg(long = "policy", value_name = "POLICY")]
    pub policy: Option<PolicyArg>,

    /// Write debug logs to this file (the TUI never logs to the terminal)
    ///
    /// Filter with RUST_LOG, e.g. RUST_LOG=sectionnav=trace
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print a shell completion script and exit
    #[arg(long = "completions", value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Whether the run prints entries instead of opening the TUI
    pub fn is_list_mode(&self) -> bool {
        self.list || self.json
    }

    /// Settings given on the command line, applied over the config file
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            threshold: self.threshold,
            idle_delay_ms: self.idle_delay,
            section_level: self.level,
            active_policy: self.policy.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Exclusive,
    Mirror,
}

impl From<PolicyArg> for ActivePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Exclusive => ActivePolicy::Exclusive,
            PolicyArg::Mirror => ActivePolicy::Mirror,
        }
    }
}
