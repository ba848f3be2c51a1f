use std::path::PathBuf;

use commitfmt_utils::system::HostPlatform;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::ResolveError, locator::PackageLocator, platform::PlatformDescriptor,
    targets::is_published, ResolveResult,
};

/// What to do with os/arch pairs that have no published package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchPolicy {
    /// Build the package name anyway and let the lookup decide.
    #[default]
    Lenient,
    /// Refuse unpublished pairs before touching the filesystem.
    Strict,
}

/// Every intermediate value of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub descriptor: PlatformDescriptor,
    pub package: String,
    pub package_dir: PathBuf,
    pub binary_path: PathBuf,
}

/// Computes where the `commitfmt` binary for `host` should live.
///
/// The binary itself is not checked; only the platform package's manifest has to exist.
///
/// # Errors
///
/// * [`ResolveError::Locate`] if the platform package is not installed
pub fn resolve_binary_path<L>(host: &HostPlatform, locator: &L) -> ResolveResult<PathBuf>
where
    L: PackageLocator + ?Sized,
{
    let descriptor = PlatformDescriptor::normalize(host);
    resolve_descriptor(descriptor, locator).map(|resolution| resolution.binary_path)
}

fn resolve_descriptor<L>(descriptor: PlatformDescriptor, locator: &L) -> ResolveResult<Resolution>
where
    L: PackageLocator + ?Sized,
{
    let package = descriptor.package_name();
    let package_dir = locator.locate(&package)?;
    let binary_path = package_dir.join(descriptor.binary_file_name());

    debug!("{} resolved to {}", package, binary_path.display());

    Ok(Resolution {
        descriptor,
        package,
        package_dir,
        binary_path,
    })
}

pub struct BinaryResolver<L> {
    locator: L,
    arch_policy: ArchPolicy,
}

impl<L: PackageLocator> BinaryResolver<L> {
    pub fn new(locator: L) -> Self {
        Self {
            locator,
            arch_policy: ArchPolicy::default(),
        }
    }

    pub fn with_arch_policy(mut self, arch_policy: ArchPolicy) -> Self {
        self.arch_policy = arch_policy;
        self
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    pub fn resolve(&self, host: &HostPlatform) -> ResolveResult<PathBuf> {
        self.resolve_with_descriptor(host)
            .map(|resolution| resolution.binary_path)
    }

    /// Same as [`BinaryResolver::resolve`] but keeps the descriptor, package name and package
    /// directory alongside the binary path.
    pub fn resolve_with_descriptor(&self, host: &HostPlatform) -> ResolveResult<Resolution> {
        let descriptor = PlatformDescriptor::normalize(host);

        if self.arch_policy == ArchPolicy::Strict && !is_published(&descriptor) {
            return Err(ResolveError::UnsupportedPlatform {
                os: descriptor.os_tag,
                arch: descriptor.arch_tag,
            });
        }

        resolve_descriptor(descriptor, &self.locator)
    }
}
