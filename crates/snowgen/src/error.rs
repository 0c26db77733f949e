/// A result type defaulting to the crate's umbrella [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Reasons a generator cannot be constructed.
///
/// Construction is atomic: when any of these is returned, no generator exists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The three configurable fields leave no room for the sign bit.
    #[error(
        "bit layout too wide: {sequence_bits} sequence + {worker_id_bits} worker + \
         {data_center_bits} data-center bits must total less than 64"
    )]
    LayoutTooWide {
        sequence_bits: u8,
        worker_id_bits: u8,
        data_center_bits: u8,
    },

    /// The worker ID does not fit in `worker_id_bits`.
    #[error("worker id {worker_id} out of range 0..={max}")]
    WorkerIdOutOfRange { worker_id: i64, max: i64 },

    /// The data-center ID does not fit in `data_center_bits`.
    #[error("data center id {data_center_id} out of range 0..={max}")]
    DataCenterIdOutOfRange { data_center_id: i64, max: i64 },
}

/// Reasons a single generation call produced no identifier.
///
/// None of these mutate the generator; it stays usable for later calls.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum GenerationError {
    /// The observed time is earlier than the last recorded timestamp.
    #[error("clock moved backwards: now {now} ms is behind last timestamp {last_timestamp} ms")]
    ClockMovedBackwards { now: i64, last_timestamp: i64 },

    /// The timestamp is before the epoch or too far past it to fit the
    /// timestamp field without touching the sign bit.
    #[error("timestamp {timestamp} ms cannot be encoded relative to epoch {epoch} ms")]
    TimestampOutOfRange { timestamp: i64, epoch: i64 },
}

/// All errors `snowgen` can produce, for callers that construct and generate
/// in the same fallible scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
