/// Outcome of a non-blocking generation attempt.
///
/// Returned by [`SnowflakeGenerator::try_poll`]:
///
/// - [`Poll::Ready`] carries a freshly generated identifier.
/// - [`Poll::Pending`] means the current millisecond's sequence space is used
///   up; retry once `yield_for` milliseconds have passed.
///
/// ```
/// use snowgen::{Poll, SnowflakeGenerator};
///
/// let generator = SnowflakeGenerator::new(0, 0).unwrap();
/// let id = loop {
///     match generator.try_poll().unwrap() {
///         Poll::Ready { id } => break id,
///         Poll::Pending { .. } => std::thread::yield_now(),
///     }
/// };
/// assert!(id > 0);
/// ```
///
/// [`SnowflakeGenerator::try_poll`]: crate::SnowflakeGenerator::try_poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A unique identifier was generated.
    Ready { id: i64 },
    /// The sequence is exhausted for the current millisecond.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: i64,
    },
}
