use std::{
    fs, io,
    path::{Path, PathBuf},
};

use commitfmt_utils::error::{FileSystemError, FileSystemResult};
use serde::Serialize;

/// What is actually on disk at a resolved binary path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub is_file: bool,
    pub executable: bool,
}

impl BinaryStatus {
    pub fn is_usable(&self) -> bool {
        self.is_file && self.executable
    }
}

/// Stats `path` without following up on what it finds.
///
/// # Errors
///
/// * [`FileSystemError::File`] if the metadata cannot be read for a reason other than the file
///   being absent
pub fn inspect_binary(path: &Path) -> FileSystemResult<BinaryStatus> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(BinaryStatus {
                path: path.to_path_buf(),
                exists: false,
                is_file: false,
                executable: false,
            });
        }
        Err(err) => {
            return Err(FileSystemError::File {
                path: path.to_path_buf(),
                action: "inspect",
                source: err,
            });
        }
    };

    Ok(BinaryStatus {
        path: path.to_path_buf(),
        exists: true,
        is_file: meta.is_file(),
        executable: meta.is_file() && is_executable(path, &meta),
    })
}

#[cfg(unix)]
fn is_executable(_: &Path, meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(path: &Path, _: &fs::Metadata) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("exe"))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::test_utils::install_package_with_binary;

    #[test]
    fn test_missing_binary() {
        let dir = tempdir().unwrap();
        let status = inspect_binary(&dir.path().join("commitfmt")).unwrap();
        assert!(!status.exists);
        assert!(!status.is_usable());
    }

    #[test]
    fn test_directory_is_not_usable() {
        let dir = tempdir().unwrap();
        let status = inspect_binary(dir.path()).unwrap();
        assert!(status.exists);
        assert!(!status.is_file);
        assert!(!status.is_usable());
    }

    #[test]
    fn test_installed_binary() {
        let root = tempdir().unwrap();
        let name = if cfg!(windows) { "commitfmt.exe" } else { "commitfmt" };
        let binary = install_package_with_binary(root.path(), "commitfmt-linux-x64", name);

        let status = inspect_binary(&binary).unwrap();
        assert!(status.exists);
        assert!(status.is_usable());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commitfmt");
        fs::write(&path, b"data").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        }

        let status = inspect_binary(&path).unwrap();
        assert!(status.is_file);
        assert!(!status.executable);
    }
}
