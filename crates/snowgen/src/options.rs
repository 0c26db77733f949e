use crate::time::DEFAULT_EPOCH;

/// Default width of the per-millisecond sequence counter.
pub const DEFAULT_SEQUENCE_BITS: u8 = 12;

/// Default width of the worker ID field.
pub const DEFAULT_WORKER_ID_BITS: u8 = 5;

/// Default width of the data-center ID field.
pub const DEFAULT_DATA_CENTER_BITS: u8 = 5;

/// Bit widths and epoch describing a Snowflake layout.
///
/// Every field is independently settable on top of the defaults, either
/// through the `with_*` setters or with [`SnowflakeOptions::apply`]. Values
/// are not checked here; [`Layout::new`](crate::Layout::new) validates them
/// when a generator is built.
///
/// ```
/// use snowgen::SnowflakeOptions;
///
/// let options = SnowflakeOptions::default()
///     .with_sequence_bits(10)
///     .with_epoch(1_420_070_400_000);
/// assert_eq!(options.sequence_bits, 10);
/// assert_eq!(options.worker_id_bits, 5);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SnowflakeOptions {
    /// Width of the sequence counter, in bits.
    pub sequence_bits: u8,
    /// Width of the worker ID field, in bits.
    pub worker_id_bits: u8,
    /// Width of the data-center ID field, in bits.
    pub data_center_bits: u8,
    /// Reference instant, in milliseconds since the Unix epoch.
    pub epoch: i64,
}

impl Default for SnowflakeOptions {
    fn default() -> Self {
        Self {
            sequence_bits: DEFAULT_SEQUENCE_BITS,
            worker_id_bits: DEFAULT_WORKER_ID_BITS,
            data_center_bits: DEFAULT_DATA_CENTER_BITS,
            epoch: DEFAULT_EPOCH,
        }
    }
}

impl SnowflakeOptions {
    /// Sets the width of the per-millisecond sequence field.
    #[must_use]
    pub const fn with_sequence_bits(mut self, bits: u8) -> Self {
        self.sequence_bits = bits;
        self
    }

    /// Sets the width of the worker ID field.
    #[must_use]
    pub const fn with_worker_id_bits(mut self, bits: u8) -> Self {
        self.worker_id_bits = bits;
        self
    }

    /// Sets the width of the data-center ID field.
    #[must_use]
    pub const fn with_data_center_bits(mut self, bits: u8) -> Self {
        self.data_center_bits = bits;
        self
    }

    /// Sets the epoch, in milliseconds since the Unix epoch, that timestamps
    /// are stored relative to.
    #[must_use]
    pub const fn with_epoch(mut self, epoch: i64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Applies an arbitrary modification and returns the result.
    ///
    /// ```
    /// use snowgen::SnowflakeOptions;
    ///
    /// let wide_workers = |o: &mut SnowflakeOptions| {
    ///     o.worker_id_bits = 8;
    ///     o.data_center_bits = 2;
    /// };
    /// let options = SnowflakeOptions::default().apply(wide_workers);
    /// assert_eq!(options.worker_id_bits, 8);
    /// ```
    #[must_use]
    pub fn apply(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TWITTER_EPOCH;

    #[test]
    fn defaults_match_classic_layout() {
        let options = SnowflakeOptions::default();
        assert_eq!(options.sequence_bits, 12);
        assert_eq!(options.worker_id_bits, 5);
        assert_eq!(options.data_center_bits, 5);
        assert_eq!(options.epoch, TWITTER_EPOCH);
    }

    #[test]
    fn setters_only_touch_their_field() {
        let options = SnowflakeOptions::default().with_worker_id_bits(7);
        assert_eq!(
            options,
            SnowflakeOptions {
                worker_id_bits: 7,
                ..SnowflakeOptions::default()
            }
        );
    }

    #[test]
    fn later_overrides_win() {
        let options = SnowflakeOptions::default()
            .with_sequence_bits(8)
            .apply(|o| o.sequence_bits = 9);
        assert_eq!(options.sequence_bits, 9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_document_fills_defaults() {
        let options: SnowflakeOptions =
            serde_json::from_str(r#"{ "sequence_bits": 10, "epoch": 0 }"#).unwrap();
        assert_eq!(options.sequence_bits, 10);
        assert_eq!(options.epoch, 0);
        assert_eq!(options.worker_id_bits, DEFAULT_WORKER_ID_BITS);
        assert_eq!(options.data_center_bits, DEFAULT_DATA_CENTER_BITS);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_field_names() {
        let json = serde_json::to_value(SnowflakeOptions::default()).unwrap();
        assert_eq!(json["sequence_bits"], 12);
        assert_eq!(json["epoch"], TWITTER_EPOCH);
    }
}
