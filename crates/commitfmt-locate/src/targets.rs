//! Platform packages published to npm alongside the `commitfmt` wrapper.

use serde::Serialize;

use crate::{
    constants::{BINARY_NAME, PACKAGE_DELIMITER, PACKAGE_PREFIX, WINDOWS_EXTENSION, WINDOWS_TAG},
    platform::PlatformDescriptor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Normalized os tag used in the package name.
    pub os: &'static str,
    pub arch: &'static str,
    /// Rust target triple the packaged binary is built for.
    pub triple: &'static str,
}

impl Target {
    pub fn package_name(&self) -> String {
        format!(
            "{PACKAGE_PREFIX}{PACKAGE_DELIMITER}{}{PACKAGE_DELIMITER}{}",
            self.os, self.arch
        )
    }

    pub fn binary_file_name(&self) -> String {
        if self.os == WINDOWS_TAG {
            format!("{BINARY_NAME}{WINDOWS_EXTENSION}")
        } else {
            BINARY_NAME.to_string()
        }
    }

    pub fn matches(&self, descriptor: &PlatformDescriptor) -> bool {
        self.os == descriptor.os_tag && self.arch == descriptor.arch_tag
    }
}

pub static TARGETS: [Target; 6] = [
    Target {
        os: "darwin",
        arch: "arm64",
        triple: "aarch64-apple-darwin",
    },
    Target {
        os: "darwin",
        arch: "x64",
        triple: "x86_64-apple-darwin",
    },
    Target {
        os: "linux",
        arch: "arm64",
        triple: "aarch64-unknown-linux-gnu",
    },
    Target {
        os: "linux",
        arch: "x64",
        triple: "x86_64-unknown-linux-gnu",
    },
    Target {
        os: "windows",
        arch: "arm64",
        triple: "aarch64-pc-windows-msvc",
    },
    Target {
        os: "windows",
        arch: "x64",
        triple: "x86_64-pc-windows-msvc",
    },
];

pub fn find_target(descriptor: &PlatformDescriptor) -> Option<&'static Target> {
    TARGETS.iter().find(|target| target.matches(descriptor))
}

pub fn is_published(descriptor: &PlatformDescriptor) -> bool {
    find_target(descriptor).is_some()
}
