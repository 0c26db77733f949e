use core::{future::Future, time::Duration};

use super::SleepProvider;
use crate::{GenerationError, Poll, SnowflakeGenerator, TimeSource};

/// Extension trait for generating Snowflake IDs in async code.
///
/// Instead of spinning while the current millisecond is exhausted, the
/// returned future waits with the given [`SleepProvider`] and retries. The
/// generator lock is never held across an `.await`.
pub trait SnowflakeGeneratorAsyncExt {
    /// Returns a future that resolves to the next identifier, sleeping with
    /// `S` whenever the generator reports [`Poll::Pending`].
    ///
    /// # Errors
    ///
    /// Resolves to an error as soon as [`SnowflakeGenerator::try_poll`] fails;
    /// nothing is retried on error.
    fn generate_async_with<S>(&self) -> impl Future<Output = Result<i64, GenerationError>>
    where
        S: SleepProvider;
}

impl<T> SnowflakeGeneratorAsyncExt for SnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn generate_async_with<S>(&self) -> impl Future<Output = Result<i64, GenerationError>>
    where
        S: SleepProvider,
    {
        async move {
            loop {
                let dur = match self.try_poll()? {
                    Poll::Ready { id } => return Ok(id),
                    Poll::Pending { yield_for } => Duration::from_millis(yield_for.unsigned_abs()),
                };
                S::sleep_for(dur).await;
            }
        }
    }
}
