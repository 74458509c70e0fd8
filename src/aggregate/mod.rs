//! Aggregation over an in-memory collection
//!
//! One generic component covers every record type and every reduction: an
//! [`Aggregator`] borrows a slice, a [`Reduction`] says how to fold and merge,
//! and an [`ExecutionStrategy`](crate::parallel::ExecutionStrategy) decides
//! whether the fold runs serially or across workers.
//!
//! ```rust
//! use reckon::aggregate::{Aggregator, TotalF64};
//! use reckon::parallel::ExecutionStrategy;
//! use reckon::record::sample_roster;
//!
//! let roster = sample_roster();
//! let agg = Aggregator::new(&roster).with_strategy(ExecutionStrategy::Parallel { workers: 2 });
//!
//! let total: u64 = agg.sum_by(|p| Ok(u64::from(p.weight()))).unwrap();
//! assert_eq!(total, 463);
//!
//! let top = agg.max_by_key(|p| p.bmi().map(TotalF64)).unwrap().unwrap();
//! assert_eq!(top.name(), "Bubba");
//! ```

mod aggregator;
pub mod people;
pub mod policy;

pub use aggregator::Aggregator;
pub use people::{Outcome, PersonPolicy};
pub use policy::{Extreme, ExtremumBy, Reduction, SumBy, Summable, TotalF64};
