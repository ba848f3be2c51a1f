//! Package lookup by name.
//!
//! [`NodeModulesLocator`] follows the order Node's `require.resolve` uses for bare package
//! names; [`MemoryLocator`] answers from a fixed table.

use std::{
    collections::HashMap,
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use commitfmt_utils::{
    error::FileSystemError,
    path::{ancestors, home_dir, split_path_list},
};
use tracing::{debug, trace};

use crate::{
    constants::{GLOBAL_FOLDERS, MANIFEST_FILE, NODE_MODULES, NODE_PATH_ENV},
    error::LocateError,
};

pub trait PackageLocator {
    /// Returns the directory holding `package`'s manifest.
    ///
    /// # Errors
    ///
    /// * [`LocateError::PackageNotFound`] if no installed package has that name
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError>;
}

impl<T: PackageLocator + ?Sized> PackageLocator for &T {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        (**self).locate(package)
    }
}

impl<T: PackageLocator + ?Sized> PackageLocator for Box<T> {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        (**self).locate(package)
    }
}

/// Filesystem locator mirroring Node's module lookup for bare names.
#[derive(Debug, Clone)]
pub struct NodeModulesLocator {
    start_dir: PathBuf,
    node_path: Vec<PathBuf>,
    global_dirs: Vec<PathBuf>,
}

impl NodeModulesLocator {
    /// Creates a locator that only walks `node_modules` folders upwards from `start_dir`.
    ///
    /// A relative `start_dir` is anchored to the current directory so the walk reaches every
    /// parent folder.
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        let start_dir = start_dir.into();
        let start_dir = std::path::absolute(&start_dir).unwrap_or(start_dir);

        Self {
            start_dir,
            node_path: Vec::new(),
            global_dirs: Vec::new(),
        }
    }

    /// Creates a locator that also consults `NODE_PATH` and the global folders under the home
    /// directory, the same extra locations Node searches.
    pub fn from_env(start_dir: impl Into<PathBuf>) -> Self {
        let node_path = env::var_os(NODE_PATH_ENV)
            .map(split_path_list)
            .unwrap_or_default();

        Self::new(start_dir)
            .with_node_path(node_path)
            .with_global_dirs(default_global_dirs())
    }

    pub fn with_node_path(mut self, node_path: Vec<PathBuf>) -> Self {
        self.node_path = node_path;
        self
    }

    pub fn with_global_dirs(mut self, global_dirs: Vec<PathBuf>) -> Self {
        self.global_dirs = global_dirs;
        self
    }

    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Every directory that may contain the package, in lookup order.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = ancestors(&self.start_dir)
            .filter(|dir| dir.file_name() != Some(OsStr::new(NODE_MODULES)))
            .map(|dir| dir.join(NODE_MODULES))
            .collect();

        dirs.extend(self.node_path.iter().cloned());
        dirs.extend(self.global_dirs.iter().cloned());
        dirs
    }
}

impl PackageLocator for NodeModulesLocator {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        let mut searched = Vec::new();

        for dir in self.search_dirs() {
            let manifest = dir.join(package).join(MANIFEST_FILE);
            trace!("probing {}", manifest.display());

            if is_file(&manifest) {
                let real = fs::canonicalize(&manifest).map_err(|err| {
                    FileSystemError::File {
                        path: manifest.clone(),
                        action: "canonicalize",
                        source: err,
                    }
                })?;
                let package_dir = real
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.join(package));

                debug!("found {} in {}", package, package_dir.display());
                return Ok(package_dir);
            }

            searched.push(manifest);
        }

        debug!("{} not found after {} probes", package, searched.len());
        Err(LocateError::PackageNotFound {
            package: package.to_string(),
            searched: searched.into(),
        })
    }
}

fn is_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

fn default_global_dirs() -> Vec<PathBuf> {
    home_dir()
        .map(|home| GLOBAL_FOLDERS.iter().map(|dir| home.join(dir)).collect())
        .unwrap_or_default()
}

/// Locator backed by a fixed name-to-directory table.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocator {
    packages: HashMap<String, PathBuf>,
}

impl MemoryLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.insert(package, dir);
        self
    }

    pub fn insert(&mut self, package: impl Into<String>, dir: impl Into<PathBuf>) {
        self.packages.insert(package.into(), dir.into());
    }
}

impl PackageLocator for MemoryLocator {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        self.packages.get(package).cloned().ok_or_else(|| {
            LocateError::PackageNotFound {
                package: package.to_string(),
                searched: Default::default(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::tempdir;

    use super::*;
    use crate::test_utils::install_package;

    #[test]
    fn test_locate_in_start_dir() {
        let root = tempdir().unwrap();
        let root = fs::canonicalize(root.path()).unwrap();
        install_package(&root, "commitfmt-linux-x64");

        let locator = NodeModulesLocator::new(&root);
        let dir = locator.locate("commitfmt-linux-x64").unwrap();
        assert_eq!(dir, root.join("node_modules").join("commitfmt-linux-x64"));
    }

    #[test]
    fn test_locate_walks_up_from_nested_package() {
        let root = tempdir().unwrap();
        let root = fs::canonicalize(root.path()).unwrap();
        install_package(&root, "commitfmt-darwin-arm64");

        let nested = root.join("node_modules").join("commitfmt").join("lib");
        fs::create_dir_all(&nested).unwrap();

        let locator = NodeModulesLocator::new(&nested);
        let dir = locator.locate("commitfmt-darwin-arm64").unwrap();
        assert_eq!(dir, root.join("node_modules").join("commitfmt-darwin-arm64"));
    }

    #[test]
    #[serial]
    fn test_relative_start_walks_every_parent() {
        let root = tempdir().unwrap();
        let root = fs::canonicalize(root.path()).unwrap();
        let expected = install_package(&root, "commitfmt-linux-x64");
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let original_cwd = env::current_dir().unwrap();
        env::set_current_dir(&nested).unwrap();

        let locator = NodeModulesLocator::new(".");
        let dirs = locator.search_dirs();
        let found = locator.locate("commitfmt-linux-x64");

        env::set_current_dir(original_cwd).unwrap();

        assert!(locator.start_dir().is_absolute());
        assert!(dirs.iter().all(|dir| dir.is_absolute()));
        assert!(dirs.len() > 3);
        assert_eq!(found.unwrap(), expected);
    }

    #[test]
    fn test_nearest_install_wins() {
        let root = tempdir().unwrap();
        let root = fs::canonicalize(root.path()).unwrap();
        let app = root.join("app");
        fs::create_dir_all(&app).unwrap();
        install_package(&root, "commitfmt-linux-arm64");
        install_package(&app, "commitfmt-linux-arm64");

        let dir = NodeModulesLocator::new(&app)
            .locate("commitfmt-linux-arm64")
            .unwrap();
        assert_eq!(dir, app.join("node_modules").join("commitfmt-linux-arm64"));
    }

    #[test]
    fn test_directory_without_manifest_is_skipped() {
        let root = tempdir().unwrap();
        let root = fs::canonicalize(root.path()).unwrap();
        fs::create_dir_all(root.join("node_modules").join("commitfmt-linux-x64")).unwrap();

        let err = NodeModulesLocator::new(&root)
            .locate("commitfmt-linux-x64")
            .unwrap_err();
        assert!(matches!(err, LocateError::PackageNotFound { .. }));
    }

    #[test]
    fn test_node_path_and_global_dirs_are_searched_last() {
        let root = tempdir().unwrap();
        let root = fs::canonicalize(root.path()).unwrap();
        let project = root.join("project");
        let extra = root.join("extra");
        let global = root.join("global");
        fs::create_dir_all(&project).unwrap();

        fs::create_dir_all(extra.join("commitfmt-linux-x64")).unwrap();
        fs::write(extra.join("commitfmt-linux-x64").join(MANIFEST_FILE), "{}").unwrap();
        fs::create_dir_all(global.join("commitfmt-darwin-x64")).unwrap();
        fs::write(global.join("commitfmt-darwin-x64").join(MANIFEST_FILE), "{}").unwrap();

        let locator = NodeModulesLocator::new(&project)
            .with_node_path(vec![extra.clone()])
            .with_global_dirs(vec![global.clone()]);

        assert_eq!(
            locator.locate("commitfmt-linux-x64").unwrap(),
            extra.join("commitfmt-linux-x64")
        );
        assert_eq!(
            locator.locate("commitfmt-darwin-x64").unwrap(),
            global.join("commitfmt-darwin-x64")
        );

        let dirs = locator.search_dirs();
        assert_eq!(dirs.first(), Some(&project.join(NODE_MODULES)));
        assert_eq!(dirs[dirs.len() - 2], extra);
        assert_eq!(dirs.last(), Some(&global));
    }

    #[test]
    fn test_search_dirs_skip_node_modules_segments() {
        let locator = NodeModulesLocator::new(PathBuf::from("/a/node_modules/b"));
        let dirs = locator.search_dirs();
        assert!(dirs.contains(&PathBuf::from("/a/node_modules/b/node_modules")));
        assert!(dirs.contains(&PathBuf::from("/a/node_modules")));
        assert!(!dirs.contains(&PathBuf::from("/a/node_modules/node_modules")));
    }

    #[test]
    fn test_not_found_lists_every_probe() {
        let root = tempdir().unwrap();
        let root = fs::canonicalize(root.path()).unwrap();
        let locator = NodeModulesLocator::new(&root);

        match locator.locate("commitfmt-linux-s390x").unwrap_err() {
            LocateError::PackageNotFound { package, searched } => {
                assert_eq!(package, "commitfmt-linux-s390x");
                assert_eq!(searched.0.len(), locator.search_dirs().len());
                assert_eq!(
                    searched.0[0],
                    root.join(NODE_MODULES)
                        .join("commitfmt-linux-s390x")
                        .join(MANIFEST_FILE)
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_package_resolves_to_real_dir() {
        let root = tempdir().unwrap();
        let root = fs::canonicalize(root.path()).unwrap();
        let store = root.join("store").join("commitfmt-linux-x64");
        fs::create_dir_all(&store).unwrap();
        fs::write(store.join(MANIFEST_FILE), "{}").unwrap();

        let node_modules = root.join("project").join(NODE_MODULES);
        fs::create_dir_all(&node_modules).unwrap();
        std::os::unix::fs::symlink(&store, node_modules.join("commitfmt-linux-x64")).unwrap();

        let dir = NodeModulesLocator::new(root.join("project"))
            .locate("commitfmt-linux-x64")
            .unwrap();
        assert_eq!(dir, store);
    }

    #[test]
    fn test_memory_locator() {
        let locator = MemoryLocator::new().with_package("commitfmt-linux-x64", "/pkgs/linux");
        assert_eq!(
            locator.locate("commitfmt-linux-x64").unwrap(),
            PathBuf::from("/pkgs/linux")
        );
        assert!(matches!(
            locator.locate("commitfmt-darwin-x64"),
            Err(LocateError::PackageNotFound { .. })
        ));
    }

    #[test]
    fn test_boxed_locator() {
        let boxed: Box<dyn PackageLocator> =
            Box::new(MemoryLocator::new().with_package("commitfmt-linux-x64", "/pkgs/linux"));
        assert_eq!(
            boxed.locate("commitfmt-linux-x64").unwrap(),
            PathBuf::from("/pkgs/linux")
        );
    }
}
