use std::fmt;

use commitfmt_utils::system::HostPlatform;
use serde::Serialize;

use crate::constants::{
    BINARY_NAME, PACKAGE_DELIMITER, PACKAGE_PREFIX, WINDOWS_EXTENSION, WINDOWS_FAMILY, WINDOWS_TAG,
};

/// Normalized view of a host, computed fresh for every resolution.
///
/// Only the canonical `windows` tag carries a non-empty executable extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlatformDescriptor {
    pub os_tag: String,
    pub arch_tag: String,
    pub executable_extension: &'static str,
}

impl PlatformDescriptor {
    /// Folds every Windows-family identifier into `windows` and leaves the rest untouched.
    ///
    /// The architecture is carried over verbatim.
    pub fn normalize(host: &HostPlatform) -> Self {
        let (os_tag, executable_extension) = if is_windows_family(&host.os) {
            (WINDOWS_TAG.to_string(), WINDOWS_EXTENSION)
        } else {
            (host.os.clone(), "")
        };

        Self {
            os_tag,
            arch_tag: host.arch.clone(),
            executable_extension,
        }
    }

    /// Name of the npm package that ships the binary for this platform.
    pub fn package_name(&self) -> String {
        format!(
            "{PACKAGE_PREFIX}{PACKAGE_DELIMITER}{}{PACKAGE_DELIMITER}{}",
            self.os_tag, self.arch_tag
        )
    }

    pub fn binary_file_name(&self) -> String {
        format!("{BINARY_NAME}{}", self.executable_extension)
    }

    pub fn is_windows(&self) -> bool {
        self.os_tag == WINDOWS_TAG
    }
}

impl From<&HostPlatform> for PlatformDescriptor {
    fn from(host: &HostPlatform) -> Self {
        Self::normalize(host)
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os_tag, self.arch_tag)
    }
}

pub fn is_windows_family(os: &str) -> bool {
    WINDOWS_FAMILY.contains(&os)
}
