use std::{
    env,
    ffi::OsStr,
    path::{Path, PathBuf},
};

use crate::error::{PathError, PathResult};

pub trait PathResolver {
    /// Resolves a path string that may contain environment variables
    ///
    /// This method expands environment variables in the format `$VAR` or `${VAR}`, resolves tilde
    /// (`~`) to the user's home directory when it appears at the start of the path, and converts
    /// relative paths to absolute paths based on the current working directory.
    ///
    /// # Errors
    ///
    /// * [`PathError::Empty`] if the path is empty
    /// * [`PathError::CurrentDir`] if the current directory cannot be determined
    /// * [`PathError::MissingEnvVar`] if a referenced variable (or the home directory) is undefined
    /// * [`PathError::UnclosedVariable`] if a `${` is never closed
    ///
    /// # Example
    ///
    /// ```
    /// use commitfmt_utils::error::PathResult;
    /// use commitfmt_utils::path::{PathResolver, SystemPathResolver};
    ///
    /// fn main() -> PathResult<()> {
    ///     let resolver = SystemPathResolver;
    ///     let resolved = resolver.resolve_path("/opt/project/node_modules")?;
    ///     assert!(resolved.is_absolute());
    ///     Ok(())
    /// }
    /// ```
    fn resolve_path(&self, path: &str) -> PathResult<PathBuf>;

    /// Returns the user's home directory
    ///
    /// Checks `HOME` first and falls back to `USERPROFILE`, which is what Windows shells set.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Returns the user's config directory following XDG Base Directory Specification
    ///
    /// This method checks the `XDG_CONFIG_HOME` environment variable. If not set, it defaults to
    /// `$HOME/.config`
    fn xdg_config_home(&self) -> Option<PathBuf>;
}

/// The default [`PathResolver`] implementation using environment variables and filesystem calls.
pub struct SystemPathResolver;

impl PathResolver for SystemPathResolver {
    fn resolve_path(&self, path: &str) -> PathResult<PathBuf> {
        let path = path.trim();

        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let resolved = self.expand_variables(path)?;
        let path_buf = PathBuf::from(resolved);

        if path_buf.is_absolute() {
            Ok(path_buf)
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(path_buf))
                .map_err(|err| PathError::CurrentDir { source: err })
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        non_empty_var("HOME")
            .or_else(|| non_empty_var("USERPROFILE"))
            .map(PathBuf::from)
    }

    fn xdg_config_home(&self) -> Option<PathBuf> {
        non_empty_var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| self.home_dir().map(|home| home.join(".config")))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

impl SystemPathResolver {
    fn expand_variables(&self, path: &str) -> PathResult<String> {
        let mut result = String::with_capacity(path.len());
        let mut chars = path.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '$' => {
                    if chars.peek() == Some(&'{') {
                        chars.next();
                        let var_name = self.consume_until(&mut chars, '}')?;
                        self.expand_env_var(&var_name, &mut result, path)?;
                    } else {
                        let var_name = self.consume_var_name(&mut chars);
                        if var_name.is_empty() {
                            result.push('$');
                        } else {
                            self.expand_env_var(&var_name, &mut result, path)?;
                        }
                    }
                }
                '~' if result.is_empty() => {
                    let home = self.home_dir().ok_or_else(|| {
                        PathError::MissingEnvVar {
                            var: "HOME".into(),
                            input: path.into(),
                        }
                    })?;
                    result.push_str(&home.to_string_lossy());
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    fn consume_until(
        &self,
        chars: &mut std::iter::Peekable<std::str::Chars>,
        delimiter: char,
    ) -> PathResult<String> {
        let mut var_name = String::new();

        for c in chars.by_ref() {
            if c == delimiter {
                return Ok(var_name);
            }
            var_name.push(c);
        }

        Err(PathError::UnclosedVariable {
            input: format!("${{{var_name}"),
        })
    }

    fn consume_var_name(&self, chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
        let mut var_name = String::new();

        while let Some(&c) = chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                var_name.push(c);
                chars.next();
            } else {
                break;
            }
        }

        var_name
    }

    fn expand_env_var(
        &self,
        var_name: &str,
        result: &mut String,
        original: &str,
    ) -> PathResult<()> {
        let value = match var_name {
            "HOME" => self.home_dir().map(|p| p.to_string_lossy().into_owned()),
            "XDG_CONFIG_HOME" => self
                .xdg_config_home()
                .map(|p| p.to_string_lossy().into_owned()),
            _ => env::var(var_name).ok(),
        };

        let value = value.ok_or_else(|| {
            PathError::MissingEnvVar {
                input: original.into(),
                var: var_name.into(),
            }
        })?;
        result.push_str(&value);
        Ok(())
    }
}

/// Resolves a path string using the system path resolver.
///
/// See [`PathResolver::resolve_path`] for detailed documentation.
pub fn resolve_path(path: &str) -> PathResult<PathBuf> {
    SystemPathResolver.resolve_path(path)
}

/// Returns the user's home directory using the system path resolver.
pub fn home_dir() -> Option<PathBuf> {
    SystemPathResolver.home_dir()
}

/// Returns the user's config directory using the system path resolver.
pub fn xdg_config_home() -> Option<PathBuf> {
    SystemPathResolver.xdg_config_home()
}

/// Splits a search path list such as `NODE_PATH` into its entries.
///
/// Entries are separated by `;` on Windows and `:` everywhere else. Empty entries are dropped.
pub fn split_path_list<S: AsRef<OsStr>>(value: S) -> Vec<PathBuf> {
    env::split_paths(value.as_ref())
        .filter(|entry| !entry.as_os_str().is_empty())
        .collect()
}

/// Returns `path` and each of its ancestors, nearest first.
pub fn ancestors(path: &Path) -> impl Iterator<Item = &Path> {
    path.ancestors().filter(|p| !p.as_os_str().is_empty())
}
