#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::{SystemTime, UNIX_EPOCH};

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: i64 = 1_288_834_974_657;

/// Epoch used when none is configured.
pub const DEFAULT_EPOCH: i64 = TWITTER_EPOCH;

/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// The generator reads every timestamp through this trait, both for the
/// initial reading and while waiting out an exhausted millisecond, so a mock
/// implementation fully controls time in tests.
///
/// # Example
///
/// ```
/// use snowgen::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since 1970-01-01 UTC.
    fn current_millis(&self) -> i64;
}

/// The system wall clock.
///
/// Subject to external adjustment (NTP corrections, manual changes), which
/// the generator detects and reports as
/// [`GenerationError::ClockMovedBackwards`](crate::GenerationError::ClockMovedBackwards).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            // A clock set before 1970 reads as negative time, which the
            // generator rejects as out of range.
            Err(before) => i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
        }
    }
}

impl<F> TimeSource for F
where
    F: Fn() -> i64,
{
    fn current_millis(&self) -> i64 {
        self()
    }
}
