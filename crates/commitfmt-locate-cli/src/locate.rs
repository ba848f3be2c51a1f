use commitfmt_locate::{
    inspect::{inspect_binary, BinaryStatus},
    platform::PlatformDescriptor,
    targets::{find_target, Target},
};
use commitfmt_utils::system::{platform, HostPlatform};
use nu_ansi_term::Color::{Blue, Cyan, Green, Red, Yellow};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::{
    context::LocateContext,
    error::{CliError, CliResult},
    utils::{Colored, Icons},
};

pub fn print_path(ctx: &LocateContext, json: bool) -> CliResult<()> {
    let resolution = ctx.resolve()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        println!("{}", resolution.binary_path.display());
    }

    Ok(())
}

#[derive(Serialize)]
struct PlatformReport<'a> {
    host_os: &'a str,
    host_arch: &'a str,
    descriptor: &'a PlatformDescriptor,
    package: String,
    binary: String,
    target: Option<&'static Target>,
}

pub fn print_platform(ctx: &LocateContext, json: bool) -> CliResult<()> {
    if ctx.host != HostPlatform::current() {
        debug!("host overridden, running on {}", platform());
    }

    let descriptor = PlatformDescriptor::normalize(&ctx.host);
    let report = PlatformReport {
        host_os: &ctx.host.os,
        host_arch: &ctx.host.arch,
        descriptor: &descriptor,
        package: descriptor.package_name(),
        binary: descriptor.binary_file_name(),
        target: find_target(&descriptor),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    info!(
        "{} {} {}",
        Colored(Blue, &ctx.host),
        Icons::ARROW,
        Colored(Cyan, &descriptor)
    );
    info!("Package: {}", Colored(Green, &report.package));
    info!("Binary: {}", Colored(Green, &report.binary));
    match report.target {
        Some(target) => info!("Target: {}", Colored(Cyan, target.triple)),
        None => info!("Target: {}", Colored(Yellow, "not published")),
    }

    Ok(())
}

pub fn check_binary(ctx: &LocateContext, json: bool) -> CliResult<()> {
    let resolution = ctx.resolve()?;
    let status = inspect_binary(&resolution.binary_path)?;

    if json {
        #[derive(Serialize)]
        struct CheckReport<'a> {
            package: &'a str,
            #[serde(flatten)]
            status: &'a BinaryStatus,
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&CheckReport {
                package: &resolution.package,
                status: &status,
            })?
        );
    } else if status.is_usable() {
        info!(
            "{} {} {}",
            Colored(Green, Icons::CHECK),
            Colored(Blue, &resolution.package),
            status.path.display()
        );
    } else {
        error!(
            "{} {} {}",
            Colored(Red, Icons::CROSS),
            Colored(Blue, &resolution.package),
            status.path.display()
        );
    }

    if status.is_usable() {
        Ok(())
    } else {
        Err(CliError::BinaryUnusable { path: status.path })
    }
}
