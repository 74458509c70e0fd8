//! Named reductions over [`Person`] records

use serde::Serialize;
use std::time::Duration;

use crate::cancel::{CancellationToken, SlowField};
use crate::error::Result;
use crate::record::Person;

use super::{Aggregator, TotalF64};

/// A reduction over people, selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PersonPolicy {
    /// Total weight of all people
    SumWeight,
    /// Lightest person
    MinWeight,
    /// Heaviest person
    MaxWeight,
    /// Person with the lowest body-mass index
    MinBmi,
    /// Person with the highest body-mass index
    MaxBmi,
}

impl PersonPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            PersonPolicy::SumWeight => "total weight",
            PersonPolicy::MinWeight => "lightest",
            PersonPolicy::MaxWeight => "heaviest",
            PersonPolicy::MinBmi => "lowest BMI",
            PersonPolicy::MaxBmi => "highest BMI",
        }
    }

    /// Evaluate against `agg`.
    ///
    /// Every field read sleeps `field_delay` first, cooperatively with `token`,
    /// so the cost of the reduction step shows up in timings.
    pub fn evaluate(
        &self,
        agg: &Aggregator<'_, Person>,
        field_delay: Duration,
        token: &CancellationToken,
    ) -> Result<Outcome> {
        let weight = SlowField::new(|p: &Person| u64::from(p.weight()), field_delay, token.clone());
        let height = SlowField::new(|p: &Person| p.height(), field_delay, token.clone());
        let bmi = |p: &Person| -> Result<TotalF64> {
            height.read(p)?;
            p.bmi().map(TotalF64)
        };

        let outcome = match self {
            PersonPolicy::SumWeight => Outcome::Total(agg.sum_by(|p: &Person| weight.read(p))?),
            PersonPolicy::MinWeight => {
                Outcome::Person(agg.min_by_key(|p: &Person| weight.read(p))?.cloned())
            }
            PersonPolicy::MaxWeight => {
                Outcome::Person(agg.max_by_key(|p: &Person| weight.read(p))?.cloned())
            }
            PersonPolicy::MinBmi => Outcome::Person(agg.min_by_key(bmi)?.cloned()),
            PersonPolicy::MaxBmi => Outcome::Person(agg.max_by_key(bmi)?.cloned()),
        };
        Ok(outcome)
    }
}

/// Result of a [`PersonPolicy`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Total(u64),
    Person(Option<Person>),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Total(total) => write!(f, "{total}"),
            Outcome::Person(Some(person)) => write!(f, "{person}"),
            Outcome::Person(None) => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::ExecutionStrategy;
    use crate::record::sample_roster;

    fn name_of(outcome: Outcome) -> Option<String> {
        match outcome {
            Outcome::Person(p) => p.map(|p| p.name().to_string()),
            Outcome::Total(_) => None,
        }
    }

    #[test]
    fn test_policies_on_roster() {
        let roster = sample_roster();
        let agg = Aggregator::new(&roster).with_strategy(ExecutionStrategy::Parallel { workers: 3 });
        let token = CancellationToken::new();
        let run = |policy: PersonPolicy| policy.evaluate(&agg, Duration::ZERO, &token).unwrap();

        assert_eq!(run(PersonPolicy::SumWeight), Outcome::Total(463));
        assert_eq!(name_of(run(PersonPolicy::MinWeight)).as_deref(), Some("Tweety"));
        assert_eq!(name_of(run(PersonPolicy::MaxWeight)).as_deref(), Some("Bubba"));
        assert_eq!(name_of(run(PersonPolicy::MaxBmi)).as_deref(), Some("Bubba"));
        assert_eq!(name_of(run(PersonPolicy::MinBmi)).as_deref(), Some("Tweety"));
    }

    #[test]
    fn test_slow_fields_make_parallel_faster() {
        let roster = sample_roster();
        let token = CancellationToken::new();
        let delay = Duration::from_millis(40);

        let serial = Aggregator::new(&roster);
        let start = std::time::Instant::now();
        PersonPolicy::SumWeight.evaluate(&serial, delay, &token).unwrap();
        let serial_elapsed = start.elapsed();

        let parallel = Aggregator::new(&roster).with_strategy(ExecutionStrategy::Parallel { workers: 5 });
        let start = std::time::Instant::now();
        PersonPolicy::SumWeight.evaluate(&parallel, delay, &token).unwrap();
        let parallel_elapsed = start.elapsed();

        assert!(serial_elapsed >= delay * 5);
        assert!(parallel_elapsed < serial_elapsed);
    }

    #[test]
    fn test_cancelled_slow_field_interrupts() {
        let roster = sample_roster();
        let token = CancellationToken::new();
        token.cancel();
        let agg = Aggregator::new(&roster);
        let err = PersonPolicy::MaxBmi
            .evaluate(&agg, Duration::from_millis(10), &token)
            .unwrap_err();
        assert!(err.is_interrupted());
    }

    #[test]
    fn test_cancel_during_slow_reads() {
        let roster = sample_roster();
        let token = CancellationToken::new();
        let agg = Aggregator::new(&roster).with_strategy(ExecutionStrategy::Parallel { workers: 2 });

        let canceller = token.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(75));
            canceller.cancel();
        });
        let err = PersonPolicy::SumWeight
            .evaluate(&agg, Duration::from_millis(50), &token)
            .unwrap_err();
        handle.join().unwrap();

        assert!(err.is_interrupted());
        assert!(matches!(err, crate::error::Fault::Interrupted { processed } if processed > 0));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Total(463).to_string(), "463");
        assert_eq!(Outcome::Person(None).to_string(), "none");
        assert_eq!(
            Outcome::Person(Some(Person::new("Tweety", 45, 1.65))).to_string(),
            "Tweety (45kg, 1.65m)"
        );
    }
}
