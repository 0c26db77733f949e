use core::cmp::Ordering;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ConfigError, GenerationError, Layout, SnowflakeOptions, SnowflakeParts,
    generator::{Mutex, MutexGuard, Poll},
    time::{SystemClock, TimeSource},
};
#[cfg(not(feature = "parking-lot"))]
use crate::generator::PoisonError;

/// Mutable generation state, only ever touched behind the generator lock.
#[derive(Debug)]
pub(crate) struct State {
    /// Milliseconds of the last successful generation, `-1` before the first.
    last_timestamp: i64,
    sequence: i64,
}

impl State {
    const fn new() -> Self {
        Self {
            last_timestamp: -1,
            sequence: 0,
        }
    }
}

/// What the current time allows the next call to claim.
enum Claim {
    /// A free `(timestamp, sequence)` slot.
    Slot(i64, i64),
    /// Every sequence value of the last millisecond has been handed out.
    Exhausted,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The `(last_timestamp, sequence)` pair lives in an [`Arc<Mutex<_>>`], so
/// the generator can be shared by reference across threads, and clones share
/// the same state: a clone never hands out an ID its origin already issued.
///
/// Identifiers are non-negative `i64`s, strictly increasing per generator as
/// long as the clock does not move backwards. Up to `2^sequence_bits` IDs are
/// issued per millisecond; past that, [`generate`] spins until the clock
/// ticks, while [`try_poll`] returns [`Poll::Pending`] instead.
///
/// ## Recommended When
/// - Several threads or tasks need IDs from one node identity
/// - You want the classic worker / data-center Snowflake layout
///
/// ## See Also
/// - [`SnowflakeGeneratorAsyncExt`] for sleeping instead of spinning
///
/// [`generate`]: Self::generate
/// [`try_poll`]: Self::try_poll
/// [`SnowflakeGeneratorAsyncExt`]: crate::SnowflakeGeneratorAsyncExt
#[derive(Clone, Debug)]
pub struct SnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: Arc<crossbeam_utils::CachePadded<Mutex<State>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Arc<Mutex<State>>,
    layout: Layout,
    options: SnowflakeOptions,
    worker_id: i64,
    data_center_id: i64,
    time: T,
}

impl SnowflakeGenerator<SystemClock> {
    /// Creates a generator with the default layout reading the system clock.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either ID is negative or exceeds 31.
    ///
    /// # Example
    /// ```
    /// use snowgen::{ConfigError, SnowflakeGenerator};
    ///
    /// assert!(SnowflakeGenerator::new(1, 1).is_ok());
    /// assert!(matches!(
    ///     SnowflakeGenerator::new(32, 0),
    ///     Err(ConfigError::WorkerIdOutOfRange { .. })
    /// ));
    /// ```
    pub fn new(worker_id: i64, data_center_id: i64) -> Result<Self, ConfigError> {
        Self::with_options(worker_id, data_center_id, SnowflakeOptions::default())
    }

    /// Creates a generator with a custom layout reading the system clock.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the layout is too wide or either ID does
    /// not fit its field.
    pub fn with_options(
        worker_id: i64,
        data_center_id: i64,
        options: SnowflakeOptions,
    ) -> Result<Self, ConfigError> {
        Self::with_time(worker_id, data_center_id, options, SystemClock)
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator reading time from `time`.
    ///
    /// All validation happens here; a generator that exists is always
    /// correctly configured.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::LayoutTooWide`] if the three widths total 64 or more
    /// - [`ConfigError::WorkerIdOutOfRange`] /
    ///   [`ConfigError::DataCenterIdOutOfRange`] if an ID is negative or
    ///   wider than its field
    ///
    /// # Example
    /// ```
    /// use snowgen::{SnowflakeGenerator, SnowflakeOptions};
    ///
    /// let options = SnowflakeOptions::default().with_epoch(0);
    /// let generator = SnowflakeGenerator::with_time(3, 1, options, || 1_000_i64).unwrap();
    ///
    /// let id = generator.generate().unwrap();
    /// assert_eq!(generator.decompose(id).timestamp, 1_000);
    /// ```
    pub fn with_time(
        worker_id: i64,
        data_center_id: i64,
        options: SnowflakeOptions,
        time: T,
    ) -> Result<Self, ConfigError> {
        let layout = Layout::new(&options)?;
        layout.check_ids(worker_id, data_center_id)?;

        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(State::new()))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(State::new())),
            layout,
            options,
            worker_id,
            data_center_id,
            time,
        })
    }

    /// The worker ID stamped into every identifier.
    pub const fn worker_id(&self) -> i64 {
        self.worker_id
    }

    /// The data-center ID stamped into every identifier.
    pub const fn data_center_id(&self) -> i64 {
        self.data_center_id
    }

    /// The options the generator was built with.
    pub const fn options(&self) -> &SnowflakeOptions {
        &self.options
    }

    /// The bit layout derived from [`Self::options`].
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Splits an identifier produced with this generator's layout into its
    /// fields.
    pub fn decompose(&self, id: i64) -> SnowflakeParts {
        SnowflakeParts::decode(id, &self.layout, &self.options)
    }

    /// Generates the next identifier from the generator's clock.
    ///
    /// When the current millisecond's sequence is used up, this busy-waits
    /// (with the lock held) until the clock moves past the last timestamp.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::ClockMovedBackwards`] if the clock reads earlier
    ///   than the last generated timestamp
    /// - [`GenerationError::TimestampOutOfRange`] if the time is before the
    ///   epoch or past the end of the timestamp field
    ///
    /// No error changes the generator's state, and neither does a panic
    /// escaping the time source: the next call proceeds normally.
    ///
    /// # Example
    /// ```
    /// use snowgen::SnowflakeGenerator;
    ///
    /// let generator = SnowflakeGenerator::new(7, 2).unwrap();
    /// let id = generator.generate().unwrap();
    ///
    /// let parts = generator.decompose(id);
    /// assert_eq!((parts.worker_id, parts.data_center_id), (7, 2));
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<i64, GenerationError> {
        let mut state = self.lock();
        let now = self.time.current_millis();

        let (timestamp, sequence) = match self.claim(&state, now)? {
            Claim::Slot(timestamp, sequence) => (timestamp, sequence),
            Claim::Exhausted => (self.wait_past(state.last_timestamp), 0),
        };
        self.commit(&mut state, timestamp, sequence)
    }

    /// Generates the next identifier as if the clock read `now_millis`.
    ///
    /// The clock is never consulted. When the sequence for `now_millis` is
    /// used up, the identifier is issued for the following millisecond
    /// instead, so callers driving time by hand see the timestamp advance just
    /// as it would with a real clock.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    ///
    /// # Example
    /// ```
    /// use snowgen::{SnowflakeGenerator, TWITTER_EPOCH};
    ///
    /// let generator = SnowflakeGenerator::new(1, 1).unwrap();
    /// let t0 = TWITTER_EPOCH + 10_000;
    ///
    /// let a = generator.generate_at(t0).unwrap();
    /// let b = generator.generate_at(t0).unwrap();
    /// assert_eq!(b - a, 1);
    ///
    /// assert!(generator.generate_at(t0 - 1).is_err());
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_at(&self, now_millis: i64) -> Result<i64, GenerationError> {
        let mut state = self.lock();

        let (timestamp, sequence) = match self.claim(&state, now_millis)? {
            Claim::Slot(timestamp, sequence) => (timestamp, sequence),
            Claim::Exhausted => {
                let next = state.last_timestamp.checked_add(1).ok_or(
                    GenerationError::TimestampOutOfRange {
                        timestamp: state.last_timestamp,
                        epoch: self.options.epoch,
                    },
                )?;
                (next, 0)
            }
        };
        self.commit(&mut state, timestamp, sequence)
    }

    /// Attempts to generate the next identifier without blocking.
    ///
    /// # Returns
    /// - `Ok(Poll::Ready { id })`: a new identifier
    /// - `Ok(Poll::Pending { yield_for })`: the millisecond is exhausted; wait
    ///   `yield_for` milliseconds and try again
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    ///
    /// # Example
    /// ```
    /// use snowgen::{Poll, SnowflakeGenerator};
    ///
    /// let generator = SnowflakeGenerator::new(0, 0).unwrap();
    /// let id = loop {
    ///     match generator.try_poll() {
    ///         Ok(Poll::Ready { id }) => break id,
    ///         Ok(Poll::Pending { yield_for }) => {
    ///             std::thread::sleep(std::time::Duration::from_millis(yield_for as u64));
    ///         }
    ///         Err(e) => panic!("generator error: {e}"),
    ///     }
    /// };
    /// assert!(id > 0);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll(&self) -> Result<Poll, GenerationError> {
        let mut state = self.lock();
        let now = self.time.current_millis();

        match self.claim(&state, now)? {
            Claim::Slot(timestamp, sequence) => Ok(Poll::Ready {
                id: self.commit(&mut state, timestamp, sequence)?,
            }),
            Claim::Exhausted => Ok(Poll::Pending { yield_for: 1 }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        #[cfg(feature = "parking-lot")]
        {
            self.state.lock()
        }
        // State is only written once every check has passed, so a guard
        // dropped by a panic never leaves it half-updated.
        #[cfg(not(feature = "parking-lot"))]
        {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    fn claim(&self, state: &State, now: i64) -> Result<Claim, GenerationError> {
        match now.cmp(&state.last_timestamp) {
            Ordering::Greater => Ok(Claim::Slot(now, 0)),
            Ordering::Equal if state.sequence < self.layout.sequence_mask() => {
                Ok(Claim::Slot(now, state.sequence + 1))
            }
            Ordering::Equal => Ok(Claim::Exhausted),
            Ordering::Less => Err(Self::cold_clock_behind(now, state.last_timestamp)),
        }
    }

    /// Spins on the clock until it reads later than `last_timestamp`.
    fn wait_past(&self, last_timestamp: i64) -> i64 {
        loop {
            let now = self.time.current_millis();
            if now > last_timestamp {
                break now;
            }
            core::hint::spin_loop();
        }
    }

    /// Encodes the slot and records it; on error the state is left as is.
    fn commit(
        &self,
        state: &mut State,
        timestamp: i64,
        sequence: i64,
    ) -> Result<i64, GenerationError> {
        let offset = timestamp
            .checked_sub(self.options.epoch)
            .filter(|offset| (0..=self.layout.max_timestamp()).contains(offset))
            .ok_or(GenerationError::TimestampOutOfRange {
                timestamp,
                epoch: self.options.epoch,
            })?;

        state.last_timestamp = timestamp;
        state.sequence = sequence;

        Ok(self
            .layout
            .compose(offset, self.data_center_id, self.worker_id, sequence))
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: i64, last_timestamp: i64) -> GenerationError {
        #[cfg(feature = "tracing")]
        tracing::warn!(now, last_timestamp, "clock moved backwards");
        GenerationError::ClockMovedBackwards {
            now,
            last_timestamp,
        }
    }
}
