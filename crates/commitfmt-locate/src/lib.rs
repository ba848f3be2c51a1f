//! Locates the platform-specific `commitfmt` executable that npm installs as an optional
//! dependency (`commitfmt-<os>-<arch>`).
//!
//! ```no_run
//! use commitfmt_locate::{locator::NodeModulesLocator, resolve::resolve_binary_path};
//! use commitfmt_utils::system::HostPlatform;
//!
//! let locator = NodeModulesLocator::from_env("/work/project");
//! let binary = resolve_binary_path(&HostPlatform::current(), &locator)?;
//! println!("{}", binary.display());
//! # Ok::<(), commitfmt_locate::error::ResolveError>(())
//! ```

use error::ResolveError;

pub mod config;
pub mod constants;
pub mod error;
pub mod inspect;
pub mod locator;
pub mod platform;
pub mod resolve;
pub mod targets;

#[cfg(test)]
mod test_utils;

pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
