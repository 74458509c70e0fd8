//! Generic parallel folding framework
//!
//! This module owns **system resource management** and **execution strategy**
//! for reductions over a read-only slice. It knows nothing about records or
//! reduction policies; callers hand it an identity, a fallible per-item step
//! and an associative combine function.
//!
//! ## What This Module Does:
//! - **Resource Discovery**: Detects available CPU cores using `num_cpus::get()`
//! - **Resource Calculation**: Applies thread percentage and max threads to available cores
//! - **Execution Strategy**: Sequential, partitioned scoped threads, or a rayon work-stealing pool
//! - **Fault Handling**: First fault wins, remaining workers stop early, partials are discarded
//!
//! # Separation of Concerns
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Client        │    │   Parallel       │    │   System        │
//! │  (Aggregator)   │───▶│   Module         │───▶│   Resources     │
//! │                 │    │                  │    │                 │
//! │ • Policies      │    │ • CPU cores      │    │ • Hardware      │
//! │ • Record types  │    │ • Partitioning   │    │ • OS threads    │
//! │ • Tie-breaks    │    │ • Join barrier   │    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use reckon::parallel::ExecutionStrategy;
//!
//! let items: Vec<u64> = (1..=100).collect();
//! let strategy = ExecutionStrategy::Parallel { workers: 4 };
//! let total = strategy
//!     .fold(&items, || 0u64, |acc, _, x| Ok(acc + x), |a, b| Ok(a + b), None)
//!     .unwrap();
//! assert_eq!(total, 5050);
//! ```

pub mod core;

pub use self::core::{ExecutionStrategy, partition};
