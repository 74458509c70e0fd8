//! Line-oriented text source and line statistics
//!
//! A [`LineSource`] is a lazy, finite, one-shot sequence of lines read from a
//! file. The statistics here consume such a sequence exactly once.

use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::{Fault, Result};

pub struct LineSource {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl LineSource {
    /// Open `path` for reading; a missing or unreadable file is a resource fault
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| Fault::resource(&path, e))?;
        tracing::debug!("streaming lines from {}", path.display());
        Ok(Self {
            lines: BufReader::new(file).lines(),
            path,
        })
    }
}

impl Iterator for LineSource {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = &self.path;
        self.lines
            .next()
            .map(|line| line.map_err(|e| Fault::resource(path, e)))
    }
}

/// Which lines to count
#[derive(Debug, Clone)]
pub enum LinePredicate {
    /// Length in characters strictly greater than the bound
    LongerThan(usize),
    /// Lines containing a match for the pattern
    Matches(Regex),
}

impl LinePredicate {
    pub fn test(&self, line: &str) -> bool {
        match self {
            LinePredicate::LongerThan(bound) => line.chars().count() > *bound,
            LinePredicate::Matches(regex) => regex.is_match(line),
        }
    }
}

impl std::fmt::Display for LinePredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinePredicate::LongerThan(bound) => write!(f, "longer than {bound} chars"),
            LinePredicate::Matches(regex) => write!(f, "matching /{}/", regex.as_str()),
        }
    }
}

/// The longest line; on equal lengths the first one wins
pub fn longest_line<I>(lines: I) -> Result<Option<String>>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut longest: Option<(usize, String)> = None;
    for line in lines {
        let line = line?;
        let len = line.chars().count();
        if longest.as_ref().is_none_or(|(best, _)| len > *best) {
            longest = Some((len, line));
        }
    }
    Ok(longest.map(|(_, line)| line))
}

/// Number of lines satisfying `predicate`
pub fn count_matching<I>(lines: I, predicate: &LinePredicate) -> Result<usize>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut count = 0;
    for line in lines {
        if predicate.test(&line?) {
            count += 1;
        }
    }
    Ok(count)
}
