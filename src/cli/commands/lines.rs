use anyhow::{Context, Result};
use clap::Args;
use regex::Regex;
use std::path::PathBuf;

use super::CommandContext;
use crate::lines::{LinePredicate, LineSource, count_matching, longest_line};
use crate::report::Report;
use crate::timing::time_result;

#[derive(Args)]
pub struct LinesArgs {
    /// Text file to scan
    pub file: PathBuf,

    /// Count lines longer than this many characters
    #[arg(long, default_value_t = 35, conflicts_with = "matching")]
    pub longer_than: usize,

    /// Count lines matching this regular expression instead
    #[arg(long)]
    pub matching: Option<String>,
}

pub fn execute(args: LinesArgs, ctx: &CommandContext) -> Result<()> {
    let predicate = match &args.matching {
        Some(pattern) => LinePredicate::Matches(
            Regex::new(pattern).with_context(|| format!("Invalid regex: {pattern}"))?,
        ),
        None => LinePredicate::LongerThan(args.longer_than),
    };

    // A line source is one-shot, so each statistic opens the file afresh
    let longest = time_result(longest_line, LineSource::open(&args.file)?)?;
    let count = time_result(
        |lines| count_matching(lines, &predicate),
        LineSource::open(&args.file)?,
    )?;

    let (longest, longest_elapsed) = longest.into_parts();
    let (count, count_elapsed) = count.into_parts();
    ctx.emit(&[
        Report::new("longest line", longest, longest_elapsed),
        Report::new(format!("lines {predicate}"), count, count_elapsed),
    ])
}
