use core::future::Future;

use crate::{
    GenerationError, SnowflakeGenerator, TimeSource,
    futures::{SnowflakeGeneratorAsyncExt, TokioSleep},
};

/// Convenience over [`SnowflakeGeneratorAsyncExt`] that always waits with
/// [`TokioSleep`].
pub trait SnowflakeGeneratorAsyncTokioExt {
    /// Returns a future that resolves to the next identifier.
    ///
    /// # Errors
    ///
    /// Resolves to an error if the underlying generator fails.
    fn generate_async(&self) -> impl Future<Output = Result<i64, GenerationError>>;
}

impl<T> SnowflakeGeneratorAsyncTokioExt for SnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn generate_async(&self) -> impl Future<Output = Result<i64, GenerationError>> {
        self.generate_async_with::<TokioSleep>()
    }
}
