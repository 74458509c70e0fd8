use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::cli::Output;
use crate::config::ReckonConfig;
use crate::report::{ConsoleSink, Report, ReportFormat, ReportSink, TracingSink, render};

pub mod aggregate;
pub mod config;
pub mod demo;
pub mod lines;
pub mod version;

#[derive(Parser)]
#[command(
    name = "reckon",
    version = env!("CARGO_PKG_VERSION"),
    about = "Timed serial and parallel aggregation over record collections",
    long_about = "reckon folds in-memory record collections (sums, minimum and maximum by key) \
                  serially or across worker threads, and reports every result with its \
                  wall-clock duration."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output format (overrides output.format from configuration)
    #[arg(long, value_enum, global = true)]
    pub format: Option<ReportFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in five-person roster through every reduction
    Demo(demo::DemoArgs),
    /// Aggregate records loaded from a JSON, YAML or TOML file
    Aggregate(aggregate::AggregateArgs),
    /// Longest line and matching-line count of a text file
    Lines(lines::LinesArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version,
}

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub config: ReckonConfig,
    pub output: Output,
    pub format: ReportFormat,
}

impl CommandContext {
    /// Sink for harness timing lines; structured formats keep stdout clean
    pub fn sink(&self) -> Box<dyn ReportSink> {
        match self.format {
            ReportFormat::Text => Box::new(ConsoleSink::new(self.output.is_quiet())),
            _ => Box::new(TracingSink),
        }
    }

    /// Print a batch of reports in the selected format
    pub fn emit(&self, reports: &[Report]) -> Result<()> {
        match self.format {
            ReportFormat::Text => {
                for report in reports {
                    self.output
                        .result(&report.label, &report.display_value(), report.elapsed_ms);
                }
            }
            format => println!("{}", render(reports, format)?),
        }
        Ok(())
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        let Some(command) = self.command else {
            Cli::command().print_help()?;
            return Ok(());
        };

        let overrides = config_overrides(self.format, &command);
        let result = ReckonConfig::load(self.config.as_deref(), Some(&overrides))
            .and_then(|loaded| {
                let ctx = CommandContext {
                    format: loaded.output.format,
                    output,
                    config: loaded,
                };
                match command {
                    Commands::Demo(args) => demo::execute(args, &ctx),
                    Commands::Aggregate(args) => aggregate::execute(args, &ctx),
                    Commands::Lines(args) => lines::execute(args, &ctx),
                    Commands::Config(args) => config::execute(args, &ctx),
                    Commands::Version => version::execute(&ctx),
                }
            });

        if let Err(e) = &result {
            tracing::error!("{e:#}");
            output.error(&format!("{e:#}"));
        }
        result
    }
}

/// Flags that shadow configuration keys, merged as the last figment layer
fn config_overrides(format: Option<ReportFormat>, command: &Commands) -> serde_json::Value {
    let mut overrides = serde_json::Map::new();
    if let Some(format) = format {
        overrides.insert("output".to_string(), serde_json::json!({ "format": format }));
    }
    if let Commands::Demo(demo::DemoArgs {
        delay_ms: Some(delay_ms),
    }) = command
    {
        overrides.insert(
            "demo".to_string(),
            serde_json::json!({ "field_delay_ms": delay_ms }),
        );
    }
    serde_json::Value::Object(overrides)
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so structured output on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
