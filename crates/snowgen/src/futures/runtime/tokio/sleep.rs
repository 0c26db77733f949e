use core::{future::Future, time::Duration};

use crate::futures::SleepProvider;

/// A [`SleepProvider`] backed by Tokio's timer.
///
/// This is the default provider for Tokio applications.
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(dur)
    }
}

/// A [`SleepProvider`] that yields to the Tokio scheduler instead of sleeping.
///
/// Retries come sooner than with [`TokioSleep`], at the cost of tighter
/// polling loops and more CPU under load.
pub struct TokioYield;
impl SleepProvider for TokioYield {
    fn sleep_for(_dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}
