//! Timed invocation harness
//!
//! Wraps a unary operation with wall-clock timing. The operation runs exactly
//! once; its value (or error) is returned unchanged next to the elapsed time.
//!
//! ```rust
//! use reckon::timing::time;
//!
//! let timed = time(|xs: Vec<u32>| xs.iter().sum::<u32>(), vec![1, 2, 3]);
//! assert_eq!(timed.value, 6);
//! ```

use std::time::{Duration, Instant};

use crate::report::ReportSink;

/// A value paired with the time it took to produce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed<R> {
    pub value: R,
    pub elapsed: Duration,
}

impl<R> Timed<R> {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> Timed<U> {
        Timed {
            value: f(self.value),
            elapsed: self.elapsed,
        }
    }

    pub fn into_parts(self) -> (R, Duration) {
        (self.value, self.elapsed)
    }
}

impl<R, E> Timed<Result<R, E>> {
    /// Move the timing inside the `Ok` branch; the error is forwarded as is
    pub fn transpose(self) -> Result<Timed<R>, E> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

/// Measures elapsed wall-clock time from construction
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Run `f(argument)` once and measure it
pub fn time<T, R, F>(f: F, argument: T) -> Timed<R>
where
    F: FnOnce(T) -> R,
{
    let stopwatch = Stopwatch::start();
    let value = f(argument);
    Timed {
        value,
        elapsed: stopwatch.elapsed(),
    }
}

/// Run a fallible `f(argument)` once and measure it.
///
/// On failure the elapsed time is logged and the error is returned untouched.
pub fn time_result<T, R, E, F>(f: F, argument: T) -> Result<Timed<R>, E>
where
    F: FnOnce(T) -> Result<R, E>,
    E: std::fmt::Display,
{
    let timed = time(f, argument);
    if let Err(e) = &timed.value {
        tracing::debug!("timed operation failed after {}ms: {}", timed.elapsed_ms(), e);
    }
    timed.transpose()
}

/// Like [`time`], and also emits `"<label> took <N>ms"` to `sink`
pub fn time_reported<T, R, F>(label: &str, sink: &dyn ReportSink, f: F, argument: T) -> Timed<R>
where
    F: FnOnce(T) -> R,
{
    let timed = time(f, argument);
    sink.emit(&format!("{label} took {}ms", timed.elapsed_ms()));
    timed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemorySink;

    #[test]
    fn test_time_returns_function_result() {
        let f = |s: &str| s.to_uppercase();
        let timed = time(f, "hello");
        assert_eq!(timed.value, f("hello"));
    }

    #[test]
    fn test_time_measures_elapsed() {
        let timed = time(|ms| std::thread::sleep(Duration::from_millis(ms)), 15);
        assert!(timed.elapsed >= Duration::from_millis(15));
    }

    #[test]
    fn test_time_runs_exactly_once() {
        let mut calls = 0;
        let timed = time(
            |n: u32| {
                calls += 1;
                n + 1
            },
            41,
        );
        assert_eq!(timed.value, 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_time_result_forwards_error() {
        let result: Result<Timed<u32>, String> =
            time_result(|_: ()| Err("boom".to_string()), ());
        assert_eq!(result.unwrap_err(), "boom");

        let ok: Result<Timed<u32>, String> = time_result(|n: u32| Ok(n * 2), 4);
        assert_eq!(ok.unwrap().value, 8);
    }

    #[test]
    fn test_time_reported_emits_line() {
        let sink = MemorySink::new();
        let timed = time_reported("serial", &sink, |v: Vec<u32>| v.len(), vec![1, 2, 3]);
        assert_eq!(timed.value, 3);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("serial took "));
        assert!(lines[0].ends_with("ms"));
    }

    #[test]
    fn test_timed_map_keeps_elapsed() {
        let timed = Timed {
            value: 2,
            elapsed: Duration::from_millis(5),
        };
        let mapped = timed.map(|v| v * 10);
        assert_eq!(mapped.into_parts(), (20, Duration::from_millis(5)));
    }
}
