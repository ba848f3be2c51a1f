use commitfmt_locate::{
    config::Config,
    locator::NodeModulesLocator,
    resolve::{BinaryResolver, Resolution},
    ResolveResult,
};
use commitfmt_utils::{path::resolve_path, system::HostPlatform};
use tracing::debug;

use crate::{cli::Args, error::CliResult};

/// Everything a command needs, assembled once from the config file and flags.
pub struct LocateContext {
    pub config: Config,
    pub host: HostPlatform,
    resolver: BinaryResolver<NodeModulesLocator>,
}

impl LocateContext {
    pub fn new(config: Config) -> CliResult<Self> {
        let host = config.host_platform();
        let resolver = BinaryResolver::new(config.locator()?).with_arch_policy(config.arch_policy());

        debug!(
            "host {} searching from {}",
            host,
            resolver.locator().start_dir().display()
        );

        Ok(Self {
            config,
            host,
            resolver,
        })
    }

    pub fn resolve(&self) -> ResolveResult<Resolution> {
        self.resolver.resolve_with_descriptor(&self.host)
    }
}

/// Reads the config file named by `--config` (or the default one) and layers flags on top.
pub fn load_config(args: &Args) -> CliResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(&resolve_path(path)?)?,
        None => Config::load()?,
    };

    if let Some(cwd) = &args.cwd {
        config.start_dir = Some(cwd.clone());
    }
    if let Some(os) = &args.os {
        config.os = Some(os.clone());
    }
    if let Some(arch) = &args.arch {
        config.arch = Some(arch.clone());
    }
    if args.strict {
        config.strict_arch = Some(true);
    }

    Ok(config)
}
