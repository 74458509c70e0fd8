use anyhow::Result;
use clap::Args;
use std::time::Duration;

use super::CommandContext;
use crate::aggregate::{Aggregator, PersonPolicy};
use crate::cancel::CancellationToken;
use crate::parallel::ExecutionStrategy;
use crate::record::sample_roster;
use crate::report::Report;
use crate::timing::time_reported;

#[derive(Args)]
pub struct DemoArgs {
    /// Artificial delay per field read in milliseconds (overrides demo.field_delay_ms)
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

pub fn execute(_args: DemoArgs, ctx: &CommandContext) -> Result<()> {
    let roster = sample_roster();
    // --delay-ms reaches us through the configuration overrides
    let delay = Duration::from_millis(ctx.config.demo.field_delay_ms);
    let token = CancellationToken::new();
    let sink = ctx.sink();

    ctx.output.header("Roster");
    for person in &roster {
        ctx.output.key_value("•", &person.to_string(), false);
    }
    ctx.output
        .verbose(&format!("field reads sleep {}ms each", delay.as_millis()));

    let workers = ctx.config.max_workers().min(roster.len()).max(1);
    let serial = Aggregator::new(&roster);
    let parallel =
        Aggregator::new(&roster).with_strategy(ExecutionStrategy::Parallel { workers });

    let runs = [
        ("lightest", PersonPolicy::MinWeight, &serial),
        ("highest BMI", PersonPolicy::MaxBmi, &serial),
        ("total weight (serial)", PersonPolicy::SumWeight, &serial),
        ("total weight (parallel)", PersonPolicy::SumWeight, &parallel),
    ];

    let mut reports = Vec::with_capacity(runs.len());
    for (label, policy, agg) in runs {
        let timed = time_reported(
            label,
            sink.as_ref(),
            |agg| policy.evaluate(agg, delay, &token),
            agg,
        );
        let (outcome, elapsed) = timed.into_parts();
        reports.push(
            Report::new(label, outcome?.to_string(), elapsed)
                .with_strategy(agg.strategy().to_string()),
        );
    }

    ctx.output.header("Results");
    ctx.emit(&reports)
}
