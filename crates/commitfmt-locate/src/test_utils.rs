use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::constants::{MANIFEST_FILE, NODE_MODULES};

/// Lays out `<root>/node_modules/<package>/package.json` and returns the package directory.
pub fn install_package(root: &Path, package: &str) -> PathBuf {
    let dir = root.join(NODE_MODULES).join(package);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(MANIFEST_FILE),
        format!(r#"{{ "name": "{package}", "version": "0.0.0" }}"#),
    )
    .unwrap();
    dir
}

/// Like [`install_package`] but also drops a placeholder binary named `binary`.
pub fn install_package_with_binary(root: &Path, package: &str, binary: &str) -> PathBuf {
    let dir = install_package(root, package);
    let binary = dir.join(binary);
    fs::write(&binary, b"#!/bin/sh\n").unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();
    }

    binary
}
