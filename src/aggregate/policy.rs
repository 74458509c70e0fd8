//! Reduction policies
//!
//! A [`Reduction`] describes how to fold one record into an accumulator and
//! how to merge two accumulators. `combine` must be associative and
//! commutative, with `identity` as its neutral element, so that any
//! partitioning of the input produces the same answer as a serial scan.

use std::cmp::Ordering;

use crate::error::{Fault, Result};

pub trait Reduction<T>: Sync {
    type Acc: Send;

    fn identity(&self) -> Self::Acc;

    fn fold(&self, acc: Self::Acc, index: usize, item: &T) -> Result<Self::Acc>;

    fn combine(&self, a: Self::Acc, b: Self::Acc) -> Result<Self::Acc>;
}

/// Integer types that can be summed without silent wrap-around
pub trait Summable: Copy + Send + Sync + std::fmt::Display {
    const ZERO: Self;

    fn checked_sum(self, other: Self) -> Option<Self>;
}

macro_rules! impl_summable {
    ($($t:ty),*) => {
        $(
            impl Summable for $t {
                const ZERO: Self = 0;

                fn checked_sum(self, other: Self) -> Option<Self> {
                    self.checked_add(other)
                }
            }
        )*
    };
}

impl_summable!(u8, u16, u32, u64, u128, usize);

fn add<N: Summable>(a: N, b: N) -> Result<N> {
    a.checked_sum(b)
        .ok_or_else(|| Fault::data("<sum>", format!("overflow adding {a} and {b}")))
}

/// Sum of a numeric field
pub struct SumBy<F> {
    field: F,
}

impl<F> SumBy<F> {
    pub fn new(field: F) -> Self {
        Self { field }
    }
}

impl<T, N, F> Reduction<T> for SumBy<F>
where
    N: Summable,
    F: Fn(&T) -> Result<N> + Sync,
{
    type Acc = N;

    fn identity(&self) -> N {
        N::ZERO
    }

    fn fold(&self, acc: N, _index: usize, item: &T) -> Result<N> {
        add(acc, (self.field)(item)?)
    }

    fn combine(&self, a: N, b: N) -> Result<N> {
        add(a, b)
    }
}

/// Which end of the order an [`ExtremumBy`] keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

/// Index of the record with the smallest or largest derived key.
///
/// Ties go to the record seen first in iteration order. The accumulator keeps
/// the index next to the key, so merging partials from any partitioning picks
/// the same record a serial scan would.
pub struct ExtremumBy<F> {
    key: F,
    extreme: Extreme,
}

impl<F> ExtremumBy<F> {
    pub fn min(key: F) -> Self {
        Self {
            key,
            extreme: Extreme::Min,
        }
    }

    pub fn max(key: F) -> Self {
        Self {
            key,
            extreme: Extreme::Max,
        }
    }

    fn pick<K: Ord>(&self, a: Option<(K, usize)>, b: Option<(K, usize)>) -> Option<(K, usize)> {
        match (a, b) {
            (None, other) | (other, None) => other,
            (Some(a), Some(b)) => {
                let ordering = match self.extreme {
                    Extreme::Min => a.0.cmp(&b.0),
                    Extreme::Max => b.0.cmp(&a.0),
                };
                let a_wins = match ordering {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => a.1 <= b.1,
                };
                Some(if a_wins { a } else { b })
            }
        }
    }
}

impl<T, K, F> Reduction<T> for ExtremumBy<F>
where
    K: Ord + Send,
    F: Fn(&T) -> Result<K> + Sync,
{
    type Acc = Option<(K, usize)>;

    fn identity(&self) -> Self::Acc {
        None
    }

    fn fold(&self, acc: Self::Acc, index: usize, item: &T) -> Result<Self::Acc> {
        let key = (self.key)(item)?;
        Ok(self.pick(acc, Some((key, index))))
    }

    fn combine(&self, a: Self::Acc, b: Self::Acc) -> Result<Self::Acc> {
        Ok(self.pick(a, b))
    }
}

/// `f64` under IEEE 754 total ordering, usable as an extremum key
#[derive(Debug, Clone, Copy)]
pub struct TotalF64(pub f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
