//! Aggregate command implementation
//!
//! Loads a record file and evaluates one or more named reductions over it.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use super::CommandContext;
use crate::aggregate::{Aggregator, PersonPolicy};
use crate::cancel::CancellationToken;
use crate::cli::mode::Mode;
use crate::record::load_people;
use crate::report::Report;
use crate::timing::time_result;

#[derive(Args)]
pub struct AggregateArgs {
    /// Record file (.json, .yaml/.yml or .toml)
    pub file: PathBuf,

    /// Reductions to evaluate (repeatable or comma-separated)
    #[arg(short, long, value_enum, required = true, value_delimiter = ',')]
    pub policy: Vec<PersonPolicy>,

    /// Processing mode
    #[arg(short, long, value_enum, default_value_t = Mode::Auto)]
    pub mode: Mode,

    /// Worker threads for parallel modes (overrides parallel.max_threads)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Artificial delay per field read in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
}

pub fn execute(args: AggregateArgs, ctx: &CommandContext) -> Result<()> {
    if args.workers == Some(0) {
        anyhow::bail!("--workers must be at least 1");
    }

    let people = load_people(&args.file)
        .with_context(|| format!("Failed to load records from {}", args.file.display()))?;
    ctx.output.verbose(&format!(
        "loaded {} records from {}",
        people.len(),
        args.file.display()
    ));

    let strategy = args.mode.resolve(people.len(), args.workers, &ctx.config);
    let token = CancellationToken::new();
    let agg = Aggregator::new(&people)
        .with_strategy(strategy)
        .with_cancellation(token.clone());
    let delay = Duration::from_millis(args.delay_ms);

    let mut reports = Vec::with_capacity(args.policy.len());
    for policy in &args.policy {
        let timed = time_result(|agg| policy.evaluate(agg, delay, &token), &agg)
            .with_context(|| format!("{} failed", policy.label()))?;
        let (outcome, elapsed) = timed.into_parts();
        tracing::info!("{} = {} in {:?} ({})", policy.label(), outcome, elapsed, strategy);
        reports.push(
            Report::new(policy.label(), &outcome, elapsed)
                .with_strategy(strategy.to_string())
                .with_display(outcome.to_string()),
        );
    }

    ctx.emit(&reports)
}
