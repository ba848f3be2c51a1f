use commitfmt_locate::{platform::PlatformDescriptor, targets::TARGETS};
use nu_ansi_term::Color::{Blue, Cyan, Green};
use tabled::{
    builder::Builder,
    settings::{peaker::PriorityMax, themes::BorderCorrection, Panel, Style, Width},
};
use tracing::info;

use crate::{
    context::LocateContext,
    error::CliResult,
    utils::{term_width, Colored, Icons},
};

pub fn list_targets(ctx: &LocateContext, json: bool) -> CliResult<()> {
    let current = PlatformDescriptor::normalize(&ctx.host);

    if json {
        println!("{}", serde_json::to_string_pretty(&TARGETS)?);
        return Ok(());
    }

    let mut builder = Builder::new();
    builder.push_record(["", "Package", "Binary", "Target"].map(String::from));

    for target in &TARGETS {
        let marker = if target.matches(&current) {
            Colored(Green, Icons::CHECK).to_string()
        } else {
            String::new()
        };
        builder.push_record([
            marker,
            Colored(Blue, target.package_name()).to_string(),
            target.binary_file_name(),
            Colored(Cyan, target.triple).to_string(),
        ]);
    }

    let table = builder
        .build()
        .with(Panel::header(format!(
            "{} Published platform packages",
            Icons::PACKAGE
        )))
        .with(Style::rounded())
        .with(BorderCorrection {})
        .with(Width::wrap(term_width()).priority(PriorityMax::default()))
        .to_string();

    info!("\n{table}");

    Ok(())
}
