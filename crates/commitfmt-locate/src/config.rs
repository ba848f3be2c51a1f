use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use commitfmt_utils::{
    error::{FileSystemError, PathError},
    path::{resolve_path, split_path_list, xdg_config_home},
    system::HostPlatform,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::{CONFIG_ENV, NODE_PATH_ENV},
    error::{ConfigError, ConfigResult},
    locator::NodeModulesLocator,
    resolve::ArchPolicy,
};

/// Locator configuration, read from `locate.toml`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Directory the `node_modules` walk starts from.
    /// Default: the current directory
    pub start_dir: Option<String>,

    /// Extra package folders searched after the `node_modules` walk.
    /// Default: entries of `NODE_PATH`
    pub node_path: Option<Vec<String>>,

    /// If true, also searches `~/.node_modules` and `~/.node_libraries`.
    /// Default: true
    pub global_dirs: Option<bool>,

    /// If true, refuses platforms without a published package.
    /// Default: false
    pub strict_arch: Option<bool>,

    /// Overrides the host operating system identifier (npm spelling, e.g. `win32`).
    pub os: Option<String>,

    /// Overrides the host architecture identifier (npm spelling, e.g. `arm64`).
    pub arch: Option<String>,
}

impl Config {
    /// Location of the configuration file: `$COMMITFMT_LOCATE_CONFIG`, otherwise
    /// `$XDG_CONFIG_HOME/commitfmt/locate.toml`.
    pub fn default_path() -> ConfigResult<Option<PathBuf>> {
        match env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Ok(Some(resolve_path(&path)?)),
            _ => Ok(xdg_config_home().map(|dir| dir.join("commitfmt").join("locate.toml"))),
        }
    }

    /// Loads the configuration from [`Config::default_path`], falling back to defaults.
    pub fn load() -> ConfigResult<Self> {
        match Self::default_path()? {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Reads `path`. A missing file is not an error and yields the defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(FileSystemError::File {
                    path: path.to_path_buf(),
                    action: "read",
                    source: err,
                }
                .into());
            }
        };

        debug!("loading config from {}", path.display());
        Ok(toml::from_str(&content)?)
    }

    /// Host facts with the `os`/`arch` overrides applied.
    pub fn host_platform(&self) -> HostPlatform {
        let mut host = HostPlatform::current();
        if let Some(os) = &self.os {
            host.os.clone_from(os);
        }
        if let Some(arch) = &self.arch {
            host.arch.clone_from(arch);
        }
        host
    }

    pub fn start_dir(&self) -> ConfigResult<PathBuf> {
        match &self.start_dir {
            Some(dir) => Ok(resolve_path(dir)?),
            None => Ok(env::current_dir().map_err(|err| PathError::CurrentDir { source: err })?),
        }
    }

    pub fn node_path(&self) -> ConfigResult<Vec<PathBuf>> {
        match &self.node_path {
            Some(entries) => entries
                .iter()
                .map(|entry| resolve_path(entry).map_err(ConfigError::from))
                .collect(),
            None => Ok(env::var_os(NODE_PATH_ENV)
                .map(split_path_list)
                .unwrap_or_default()),
        }
    }

    pub fn global_dirs(&self) -> bool {
        self.global_dirs.unwrap_or(true)
    }

    pub fn arch_policy(&self) -> ArchPolicy {
        if self.strict_arch.unwrap_or(false) {
            ArchPolicy::Strict
        } else {
            ArchPolicy::Lenient
        }
    }

    /// Builds the filesystem locator this configuration describes.
    pub fn locator(&self) -> ConfigResult<NodeModulesLocator> {
        let start_dir = self.start_dir()?;
        let locator = if self.global_dirs() {
            NodeModulesLocator::from_env(start_dir)
        } else {
            NodeModulesLocator::new(start_dir)
        };

        Ok(locator.with_node_path(self.node_path()?))
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Configuration with every default spelled out, suitable as a starting file.
    pub fn default_config() -> Self {
        Self {
            start_dir: Some(".".to_string()),
            node_path: Some(Vec::new()),
            global_dirs: Some(true),
            strict_arch: Some(false),
            os: None,
            arch: None,
        }
    }
}
