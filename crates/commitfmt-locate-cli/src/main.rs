use clap::Parser;
use cli::{Args, Commands};
use commitfmt_locate::config::Config;
use context::{load_config, LocateContext};
use error::CliResult;
use locate::{check_binary, print_path, print_platform};
use logging::setup_logging;
use targets::list_targets;
use tracing::debug;
use utils::set_color;

mod cli;
mod context;
mod error;
mod locate;
mod logging;
mod targets;
mod utils;

fn context(args: &Args) -> CliResult<LocateContext> {
    let ctx = LocateContext::new(load_config(args)?)?;
    debug!("architecture policy: {:?}", ctx.config.arch_policy());
    Ok(ctx)
}

fn handle_cli() -> CliResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        set_color(false);
    }

    run(args)
}

fn run(mut args: Args) -> CliResult<()> {
    let json = args.json;

    match args.command.take().unwrap_or_default() {
        Commands::Path => print_path(&context(&args)?, json)?,
        Commands::Platform => print_platform(&context(&args)?, json)?,
        Commands::Check => check_binary(&context(&args)?, json)?,
        Commands::Targets => list_targets(&context(&args)?, json)?,
        Commands::DefConfig => print!("{}", Config::default_config().to_toml()?),
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::error::CliError;

    fn broken_config() -> (tempfile::TempDir, String) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locate.toml");
        fs::write(&path, "strict_arch = \"maybe\"").unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn test_defconfig_skips_config_loading() {
        let (_dir, path) = broken_config();
        let args = Args::parse_from(["commitfmt-locate", "--config", path.as_str(), "defconfig"]);
        assert!(run(args).is_ok());
    }

    #[test]
    fn test_path_loads_config() {
        let (_dir, path) = broken_config();
        let args = Args::parse_from(["commitfmt-locate", "--config", path.as_str(), "path"]);
        assert!(matches!(run(args), Err(CliError::Config(_))));
    }
}
