//! Cooperative cancellation for aggregation workers

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{Fault, Result};

/// Granularity of cancellation checks while sleeping
const SLEEP_SLICE: Duration = Duration::from_millis(5);

/// Shared flag that workers poll between records.
///
/// Cloning is cheap; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Fail with [`Fault::Interrupted`] if cancellation was requested
    pub fn check(&self, processed: usize) -> Result<()> {
        if self.is_cancelled() {
            Err(Fault::Interrupted { processed })
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration`, waking early with [`Fault::Interrupted`] on cancel
    pub fn sleep(&self, duration: Duration) -> Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            self.check(0)?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep(SLEEP_SLICE.min(deadline - now));
        }
    }
}

/// A field accessor that is artificially slow.
///
/// Each read sleeps for `delay` before returning the field, which makes the
/// cost of serial and parallel reductions visible in timings. The sleep is
/// cooperative: cancelling the token aborts the read.
pub struct SlowField<F> {
    accessor: F,
    delay: Duration,
    token: CancellationToken,
}

impl<F> SlowField<F> {
    pub fn new(accessor: F, delay: Duration, token: CancellationToken) -> Self {
        Self {
            accessor,
            delay,
            token,
        }
    }

    pub fn read<T, V>(&self, item: &T) -> Result<V>
    where
        F: Fn(&T) -> V,
    {
        if !self.delay.is_zero() {
            self.token.sleep(self.delay)?;
        }
        Ok((self.accessor)(item))
    }
}
