//! Host operating system and architecture facts, spelled the way npm spells them.
//!
//! npm publishes optional platform packages keyed by Node's `process.platform` and
//! `process.arch` values, which differ from Rust's `std::env::consts` names (`win32` vs
//! `windows`, `x64` vs `x86_64`). Everything here translates into the npm vocabulary.

use std::fmt;

/// The two raw host facts that decide which platform package applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPlatform {
    /// Raw operating system identifier, e.g. `linux`, `darwin`, `win32`, `cygwin`.
    pub os: String,
    /// Raw architecture identifier, e.g. `x64`, `arm64`, `ia32`.
    pub arch: String,
}

impl HostPlatform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Reads the running host's identifiers.
    pub fn current() -> Self {
        Self::new(host_os(), host_arch())
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Translates a Rust `target_os` name into the matching `process.platform` value.
pub fn npm_os(rust_os: &str) -> &str {
    match rust_os {
        "windows" => "win32",
        "macos" => "darwin",
        "solaris" | "illumos" => "sunos",
        other => other,
    }
}

/// Translates a Rust `target_arch` name into the matching `process.arch` value.
pub fn npm_arch(rust_arch: &str) -> &str {
    match rust_arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "powerpc" => "ppc",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}

pub fn host_os() -> &'static str {
    npm_os(std::env::consts::OS)
}

pub fn host_arch() -> &'static str {
    npm_arch(std::env::consts::ARCH)
}

/// Retrieves the platform string in the format `os-arch` using npm identifiers.
pub fn platform() -> String {
    HostPlatform::current().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npm_os() {
        assert_eq!(npm_os("windows"), "win32");
        assert_eq!(npm_os("macos"), "darwin");
        assert_eq!(npm_os("linux"), "linux");
        assert_eq!(npm_os("illumos"), "sunos");
        assert_eq!(npm_os("freebsd"), "freebsd");
    }

    #[test]
    fn test_npm_arch() {
        assert_eq!(npm_arch("x86_64"), "x64");
        assert_eq!(npm_arch("aarch64"), "arm64");
        assert_eq!(npm_arch("x86"), "ia32");
        assert_eq!(npm_arch("powerpc64"), "ppc64");
        assert_eq!(npm_arch("loongarch64"), "loong64");
        assert_eq!(npm_arch("riscv64"), "riscv64");
    }

    #[test]
    fn test_platform() {
        #[cfg(target_arch = "x86_64")]
        #[cfg(target_os = "linux")]
        assert_eq!(platform(), "linux-x64");

        #[cfg(target_arch = "aarch64")]
        #[cfg(target_os = "macos")]
        assert_eq!(platform(), "darwin-arm64");

        #[cfg(target_arch = "x86_64")]
        #[cfg(target_os = "windows")]
        assert_eq!(platform(), "win32-x64");
    }

    #[test]
    fn test_current_is_stable() {
        assert_eq!(HostPlatform::current(), HostPlatform::current());
    }
}
