use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    /// Directory to start the node_modules lookup from
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub cwd: Option<String>,

    /// Override the operating system identifier (npm spelling, e.g. win32)
    #[arg(long, global = true)]
    pub os: Option<String>,

    /// Override the architecture identifier (npm spelling, e.g. arm64)
    #[arg(long, global = true)]
    pub arch: Option<String>,

    /// Fail on platforms without a published package
    #[arg(long, global = true)]
    pub strict: bool,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Default)]
pub enum Commands {
    /// Print the path of the commitfmt binary for this platform
    #[default]
    Path,

    /// Show the normalized platform and the package it maps to
    Platform,

    /// Resolve the binary and check that it is present and executable
    Check,

    /// List platform packages published for commitfmt
    Targets,

    /// Print a default configuration file to stdout
    #[clap(name = "defconfig")]
    DefConfig,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_path() {
        let args = Args::parse_from(["commitfmt-locate", "--os", "win32"]);
        assert!(args.command.is_none());
        assert_eq!(args.os.as_deref(), Some("win32"));
        assert!(matches!(args.command.unwrap_or_default(), Commands::Path));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from(["commitfmt-locate", "check", "-vv", "--json", "--strict"]);
        assert!(matches!(args.command, Some(Commands::Check)));
        assert_eq!(args.verbose, 2);
        assert!(args.json);
        assert!(args.strict);
    }
}
