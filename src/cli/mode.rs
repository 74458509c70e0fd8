//! Mapping from the `--mode` flag to an execution strategy

use crate::config::ReckonConfig;
use crate::parallel::ExecutionStrategy;

/// Processing mode: auto (threshold based), sequential, parallel or work-stealing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    #[default]
    Auto,
    Sequential,
    Parallel,
    WorkStealing,
}

impl Mode {
    /// Pick a strategy for `item_count` records.
    ///
    /// `workers` overrides the configured limit. Workers are never more than
    /// records, and never fewer than one.
    pub fn resolve(
        self,
        item_count: usize,
        workers: Option<usize>,
        config: &ReckonConfig,
    ) -> ExecutionStrategy {
        let max_workers = workers.unwrap_or_else(|| config.max_workers());
        let workers = max_workers.min(item_count).max(1);

        let strategy = match self {
            Mode::Auto => ExecutionStrategy::auto(
                item_count,
                config.parallel.min_items_for_parallel,
                workers,
            ),
            Mode::Sequential => ExecutionStrategy::Sequential,
            Mode::Parallel => ExecutionStrategy::Parallel { workers },
            Mode::WorkStealing => ExecutionStrategy::WorkStealing { workers },
        };
        tracing::debug!("mode {:?} over {} records -> {}", self, item_count, strategy);
        strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ReckonConfig {
        ReckonConfig::load(Some("non_existent.toml"), None::<&()>).unwrap()
    }

    #[test]
    fn test_explicit_modes() {
        let config = config();
        assert_eq!(
            Mode::Sequential.resolve(100, Some(4), &config),
            ExecutionStrategy::Sequential
        );
        assert_eq!(
            Mode::Parallel.resolve(100, Some(4), &config),
            ExecutionStrategy::Parallel { workers: 4 }
        );
        assert_eq!(
            Mode::WorkStealing.resolve(100, Some(3), &config),
            ExecutionStrategy::WorkStealing { workers: 3 }
        );
    }

    #[test]
    fn test_workers_capped_by_records() {
        let config = config();
        assert_eq!(
            Mode::Parallel.resolve(2, Some(16), &config),
            ExecutionStrategy::Parallel { workers: 2 }
        );
        assert_eq!(
            Mode::Parallel.resolve(0, Some(16), &config),
            ExecutionStrategy::Parallel { workers: 1 }
        );
    }

    #[test]
    fn test_auto_below_threshold_is_sequential() {
        let mut config = config();
        config.parallel.min_items_for_parallel = 10;
        assert_eq!(
            Mode::Auto.resolve(5, Some(4), &config),
            ExecutionStrategy::Sequential
        );
        assert_eq!(
            Mode::Auto.resolve(50, Some(4), &config),
            ExecutionStrategy::Parallel { workers: 4 }
        );
    }
}
