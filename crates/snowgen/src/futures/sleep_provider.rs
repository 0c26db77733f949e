use core::{future::Future, time::Duration};

/// Abstracts over how to wait for a [`Duration`] in async contexts.
///
/// This keeps async generation independent of any particular runtime.
pub trait SleepProvider {
    /// Returns a future that completes once `dur` has elapsed (or, for
    /// yielding providers, once the scheduler has run other work).
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}
