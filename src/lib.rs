//! # reckon - timed aggregation over record collections
//!
//! reckon folds read-only collections with a small set of reductions (sum of
//! a numeric field, minimum and maximum by key) and runs them sequentially,
//! over crossbeam scoped threads, or on a rayon work-stealing pool. Every
//! strategy returns the same answer; only the wall-clock time differs, and
//! the [`timing`] harness measures exactly that.
//!
//! ```rust
//! use reckon::aggregate::Aggregator;
//! use reckon::parallel::ExecutionStrategy;
//! use reckon::record::sample_roster;
//!
//! let roster = sample_roster();
//! let agg = Aggregator::new(&roster).with_strategy(ExecutionStrategy::Parallel { workers: 2 });
//! let total: u64 = agg.sum_by(|p| Ok(u64::from(p.weight()))).unwrap();
//! assert_eq!(total, 463);
//! ```

pub mod aggregate;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod lines;
pub mod parallel;
pub mod record;
pub mod report;
pub mod timing;

pub use aggregate::{Aggregator, Reduction};
pub use cancel::CancellationToken;
pub use config::ReckonConfig;
pub use error::{Fault, Result};
pub use parallel::ExecutionStrategy;
pub use record::Person;
pub use timing::{Timed, time};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
