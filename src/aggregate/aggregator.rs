use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::parallel::ExecutionStrategy;

use super::policy::{ExtremumBy, Reduction, SumBy, Summable};

/// Reductions over a read-only slice of records.
///
/// The slice is borrowed for the lifetime of the aggregator, so it cannot be
/// mutated while an aggregation runs. Extremum results borrow from it too.
pub struct Aggregator<'a, T> {
    items: &'a [T],
    strategy: ExecutionStrategy,
    cancel: Option<CancellationToken>,
}

impl<'a, T: Sync> Aggregator<'a, T> {
    /// Sequential aggregator with no cancellation
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            strategy: ExecutionStrategy::Sequential,
            cancel: None,
        }
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run any reduction policy under the configured strategy
    pub fn run<R>(&self, reduction: &R) -> Result<R::Acc>
    where
        R: Reduction<T>,
    {
        tracing::debug!(
            "aggregating {} records ({})",
            self.items.len(),
            self.strategy
        );
        self.strategy.fold(
            self.items,
            || reduction.identity(),
            |acc, index, item| reduction.fold(acc, index, item),
            |a, b| reduction.combine(a, b),
            self.cancel.as_ref(),
        )
    }

    /// Sum of `field` over every record; zero for an empty slice
    pub fn sum_by<N, F>(&self, field: F) -> Result<N>
    where
        N: Summable,
        F: Fn(&T) -> Result<N> + Sync,
    {
        self.run(&SumBy::new(field))
    }

    /// Record with the smallest key, first one on ties; `None` when empty
    pub fn min_by_key<K, F>(&self, key: F) -> Result<Option<&'a T>>
    where
        K: Ord + Send,
        F: Fn(&T) -> Result<K> + Sync,
    {
        let best = self.run(&ExtremumBy::min(key))?;
        Ok(best.map(|(_, index)| &self.items[index]))
    }

    /// Record with the largest key, first one on ties; `None` when empty
    pub fn max_by_key<K, F>(&self, key: F) -> Result<Option<&'a T>>
    where
        K: Ord + Send,
        F: Fn(&T) -> Result<K> + Sync,
    {
        let best = self.run(&ExtremumBy::max(key))?;
        Ok(best.map(|(_, index)| &self.items[index]))
    }
}
