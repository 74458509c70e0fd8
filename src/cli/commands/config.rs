//! Configuration command implementations

use anyhow::Result;
use clap::{Args, Subcommand};

use super::CommandContext;
use crate::report::ReportFormat;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration
    Show,
    /// Check the merged configuration and report effective worker limits
    Validate,
}

pub fn execute(args: ConfigArgs, ctx: &CommandContext) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Validate => validate(ctx),
    }
}

fn show(ctx: &CommandContext) -> Result<()> {
    let rendered = match ctx.format {
        ReportFormat::Text => toml::to_string_pretty(&ctx.config)?,
        ReportFormat::Json => serde_json::to_string_pretty(&ctx.config)?,
        ReportFormat::Yaml => serde_yml::to_string(&ctx.config)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn validate(ctx: &CommandContext) -> Result<()> {
    // Loading already validated; run again so the check is explicit
    ctx.config.validate()?;

    ctx.output.success("Configuration is valid");
    ctx.output.category("Effective settings");
    ctx.output
        .key_value("max workers:", &ctx.config.max_workers().to_string(), true);
    ctx.output.key_value(
        "parallel from:",
        &format!("{} records", ctx.config.parallel.min_items_for_parallel),
        false,
    );
    ctx.output.key_value(
        "field delay:",
        &format!("{} ms", ctx.config.demo.field_delay_ms),
        false,
    );
    Ok(())
}
