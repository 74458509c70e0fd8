use crossbeam::channel::{Receiver, Sender, bounded};
use rayon::prelude::*;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::cancel::CancellationToken;
use crate::error::{Fault, Result};

/// Execution strategy for folding a slice into one accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Single thread, slice order
    Sequential,
    /// One scoped thread per contiguous partition
    Parallel { workers: usize },
    /// Dedicated rayon pool with work stealing
    WorkStealing { workers: usize },
}

impl std::fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStrategy::Sequential => write!(f, "sequential"),
            ExecutionStrategy::Parallel { workers } => write!(f, "parallel x{workers}"),
            ExecutionStrategy::WorkStealing { workers } => write!(f, "work-stealing x{workers}"),
        }
    }
}

/// Shared worker state: abort flag, optional cancellation and a progress count
pub(crate) struct WorkerContext<'a> {
    abort: AtomicBool,
    processed: AtomicUsize,
    cancel: Option<&'a CancellationToken>,
}

impl<'a> WorkerContext<'a> {
    pub(crate) fn new(cancel: Option<&'a CancellationToken>) -> Self {
        Self {
            abort: AtomicBool::new(false),
            processed: AtomicUsize::new(0),
            cancel,
        }
    }

    /// Checked before each item. `Ok(false)` means another worker failed.
    fn proceed(&self) -> Result<bool> {
        if let Some(token) = self.cancel {
            token.check(self.processed.load(Ordering::Relaxed))?;
        }
        Ok(!self.abort.load(Ordering::Relaxed))
    }

    fn record_item(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    fn abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    /// A step only knows it was interrupted; stamp the shared progress on it
    fn stamp(&self, fault: Fault) -> Fault {
        match fault {
            Fault::Interrupted { .. } => Fault::Interrupted {
                processed: self.processed.load(Ordering::Relaxed),
            },
            other => other,
        }
    }
}

impl ExecutionStrategy {
    /// Fold `items` with `step` and merge partial accumulators with `combine`.
    ///
    /// `identity` must be the neutral element of `combine`, and `combine` must
    /// be associative and commutative for the parallel strategies to agree
    /// with the sequential one.
    pub fn fold<T, A, I, S, C>(
        &self,
        items: &[T],
        identity: I,
        step: S,
        combine: C,
        cancel: Option<&CancellationToken>,
    ) -> Result<A>
    where
        T: Sync,
        A: Send,
        I: Fn() -> A + Sync,
        S: Fn(A, usize, &T) -> Result<A> + Sync,
        C: Fn(A, A) -> Result<A> + Sync,
    {
        let ctx = WorkerContext::new(cancel);
        match *self {
            ExecutionStrategy::Sequential => {
                fold_range(items, 0..items.len(), identity(), &step, &ctx)
            }
            ExecutionStrategy::Parallel { workers } => {
                fold_partitioned(items, workers, &identity, &step, &combine, &ctx)
            }
            ExecutionStrategy::WorkStealing { workers } => {
                fold_work_stealing(items, workers, &identity, &step, &combine, &ctx)
            }
        }
    }

    /// Auto strategy selection based on workload size threshold
    ///
    /// ```rust
    /// use reckon::parallel::ExecutionStrategy;
    ///
    /// let strategy = ExecutionStrategy::auto(36, 50, 4);
    /// assert!(matches!(strategy, ExecutionStrategy::Sequential));
    ///
    /// let strategy = ExecutionStrategy::auto(100, 50, 4);
    /// assert!(matches!(strategy, ExecutionStrategy::Parallel { workers: 4 }));
    /// ```
    pub fn auto(
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        if work_items_count >= min_items_for_parallel && optimal_workers > 1 {
            ExecutionStrategy::Parallel {
                workers: optimal_workers,
            }
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Calculate optimal workers based on available system resources and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }
}

/// Split `0..len` into `workers` contiguous ranges whose sizes differ by at most one.
///
/// Never returns more ranges than items; an empty input yields no ranges.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let parts = workers.max(1).min(len);
    if parts == 0 {
        return Vec::new();
    }
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

fn fold_range<T, A, S>(
    items: &[T],
    range: Range<usize>,
    mut acc: A,
    step: &S,
    ctx: &WorkerContext<'_>,
) -> Result<A>
where
    S: Fn(A, usize, &T) -> Result<A> + Sync,
{
    for index in range {
        if !ctx.proceed()? {
            break;
        }
        acc = step(acc, index, &items[index]).map_err(|e| ctx.stamp(e))?;
        ctx.record_item();
    }
    Ok(acc)
}

fn fold_partitioned<T, A, I, S, C>(
    items: &[T],
    workers: usize,
    identity: &I,
    step: &S,
    combine: &C,
    ctx: &WorkerContext<'_>,
) -> Result<A>
where
    T: Sync,
    A: Send,
    I: Fn() -> A + Sync,
    S: Fn(A, usize, &T) -> Result<A> + Sync,
    C: Fn(A, A) -> Result<A>,
{
    let ranges = partition(items.len(), workers);
    if ranges.is_empty() {
        return Ok(identity());
    }
    tracing::debug!(
        "folding {} items over {} partitions",
        items.len(),
        ranges.len()
    );

    let worker_count = ranges.len();
    let (result_tx, result_rx): (Sender<Result<A>>, Receiver<Result<A>>) = bounded(worker_count);

    let partials = crossbeam::thread::scope(|s| {
        for (worker_id, range) in ranges.into_iter().enumerate() {
            let result_tx = result_tx.clone();
            s.spawn(move |_| {
                tracing::trace!("worker-{worker_id} folding {range:?}");
                let partial = fold_range(items, range, identity(), step, ctx);
                if partial.is_err() {
                    ctx.abort();
                }
                // Capacity equals worker count, so this never blocks
                let _ = result_tx.send(partial);
            });
        }
        drop(result_tx);
        collect_partials(result_rx, worker_count)
    })
    .map_err(|_| Fault::WorkerPanic)?;

    // Partials are merged only after every worker joined
    let mut merged = identity();
    for partial in partials? {
        merged = combine(merged, partial)?;
    }
    Ok(merged)
}

fn collect_partials<A>(result_rx: Receiver<Result<A>>, total: usize) -> Result<Vec<A>> {
    let mut partials = Vec::with_capacity(total);
    let mut first_fault = None;

    while let Ok(partial) = result_rx.recv() {
        match partial {
            Ok(acc) => partials.push(acc),
            Err(fault) => {
                // Keep the root cause, not the interruptions it triggered
                if first_fault.is_none() {
                    first_fault = Some(fault);
                }
            }
        }
    }

    match first_fault {
        Some(fault) => {
            tracing::warn!("parallel fold aborted: {fault}");
            Err(fault)
        }
        None => Ok(partials),
    }
}

fn fold_work_stealing<T, A, I, S, C>(
    items: &[T],
    workers: usize,
    identity: &I,
    step: &S,
    combine: &C,
    ctx: &WorkerContext<'_>,
) -> Result<A>
where
    T: Sync,
    A: Send,
    I: Fn() -> A + Sync,
    S: Fn(A, usize, &T) -> Result<A> + Sync,
    C: Fn(A, A) -> Result<A> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("reckon-worker-{i}"))
        .build()
        .map_err(|e| Fault::Pool(e.to_string()))?;

    // rayon re-raises worker panics on the installing thread
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pool.install(|| {
            items
                .par_iter()
                .enumerate()
                .try_fold(identity, |acc, (index, item)| {
                    if !ctx.proceed()? {
                        return Ok(acc);
                    }
                    let acc = step(acc, index, item).map_err(|e| {
                        ctx.abort();
                        ctx.stamp(e)
                    })?;
                    ctx.record_item();
                    Ok(acc)
                })
                .try_reduce(identity, combine)
        })
    }))
    .unwrap_or(Err(Fault::WorkerPanic));

    if let Err(fault) = &result {
        tracing::warn!("work-stealing fold aborted: {fault}");
    }
    result
}
