use crate::{ConfigError, SnowflakeOptions};

/// Total bits available below the sign bit.
const PAYLOAD_BITS: u32 = 63;

const fn mask(bits: u32) -> i64 {
    // `bits` is at most 63, so the subtraction never underflows and the
    // result fits a non-negative i64.
    ((1_u64 << bits) - 1) as i64
}

/// Shift amounts and masks derived from a validated [`SnowflakeOptions`].
///
/// ```text
///  Bit Index:  63    62 .. timestamp_shift   .. data_center_shift   .. worker_shift   .. 0
///              +------+-----------------+------------------+---------------+-------------+
///  Field:      | sign | timestamp offset | data-center ID   | worker ID     | sequence    |
///              +------+-----------------+------------------+---------------+-------------+
/// ```
///
/// A `Layout` can only be obtained through [`Layout::new`], so holding one
/// means the configured widths leave the sign bit free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    worker_shift: u32,
    data_center_shift: u32,
    timestamp_shift: u32,
    sequence_mask: i64,
    worker_id_mask: i64,
    data_center_id_mask: i64,
    timestamp_mask: i64,
}

impl Layout {
    /// Validates the bit widths in `options` and derives the layout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LayoutTooWide`] when the sequence, worker and
    /// data-center widths add up to 64 or more.
    pub fn new(options: &SnowflakeOptions) -> Result<Self, ConfigError> {
        let sequence_bits = u32::from(options.sequence_bits);
        let worker_id_bits = u32::from(options.worker_id_bits);
        let data_center_bits = u32::from(options.data_center_bits);

        let total = sequence_bits + worker_id_bits + data_center_bits;
        if total >= 64 {
            return Err(ConfigError::LayoutTooWide {
                sequence_bits: options.sequence_bits,
                worker_id_bits: options.worker_id_bits,
                data_center_bits: options.data_center_bits,
            });
        }

        Ok(Self {
            worker_shift: sequence_bits,
            data_center_shift: sequence_bits + worker_id_bits,
            timestamp_shift: total,
            sequence_mask: mask(sequence_bits),
            worker_id_mask: mask(worker_id_bits),
            data_center_id_mask: mask(data_center_bits),
            timestamp_mask: mask(PAYLOAD_BITS - total),
        })
    }

    /// Checks that both identifiers fit their fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WorkerIdOutOfRange`] or
    /// [`ConfigError::DataCenterIdOutOfRange`] for negative or oversized
    /// values.
    pub fn check_ids(&self, worker_id: i64, data_center_id: i64) -> Result<(), ConfigError> {
        if !(0..=self.max_worker_id()).contains(&worker_id) {
            return Err(ConfigError::WorkerIdOutOfRange {
                worker_id,
                max: self.max_worker_id(),
            });
        }
        if !(0..=self.max_data_center_id()).contains(&data_center_id) {
            return Err(ConfigError::DataCenterIdOutOfRange {
                data_center_id,
                max: self.max_data_center_id(),
            });
        }
        Ok(())
    }

    /// Bit offset of the worker ID field.
    pub const fn worker_shift(&self) -> u32 {
        self.worker_shift
    }

    /// Bit offset of the data-center ID field.
    pub const fn data_center_shift(&self) -> u32 {
        self.data_center_shift
    }

    /// Bit offset of the timestamp field.
    pub const fn timestamp_shift(&self) -> u32 {
        self.timestamp_shift
    }

    /// Mask of the sequence field, which is also the largest sequence value.
    pub const fn sequence_mask(&self) -> i64 {
        self.sequence_mask
    }

    /// The largest worker ID the layout can hold.
    pub const fn max_worker_id(&self) -> i64 {
        self.worker_id_mask
    }

    /// The largest data-center ID the layout can hold.
    pub const fn max_data_center_id(&self) -> i64 {
        self.data_center_id_mask
    }

    /// The largest epoch offset, in milliseconds, that still leaves the sign
    /// bit clear.
    pub const fn max_timestamp(&self) -> i64 {
        self.timestamp_mask
    }

    /// Packs the fields into an identifier.
    ///
    /// Callers are expected to pass values already within range; each field
    /// is masked so an oversized value cannot bleed into its neighbours.
    pub const fn compose(
        &self,
        timestamp_offset: i64,
        data_center_id: i64,
        worker_id: i64,
        sequence: i64,
    ) -> i64 {
        ((timestamp_offset & self.timestamp_mask) << self.timestamp_shift)
            | ((data_center_id & self.data_center_id_mask) << self.data_center_shift)
            | ((worker_id & self.worker_id_mask) << self.worker_shift)
            | (sequence & self.sequence_mask)
    }

    /// Splits an identifier into `(timestamp_offset, data_center_id,
    /// worker_id, sequence)`.
    pub const fn decompose(&self, id: i64) -> (i64, i64, i64, i64) {
        (
            (id >> self.timestamp_shift) & self.timestamp_mask,
            (id >> self.data_center_shift) & self.data_center_id_mask,
            (id >> self.worker_shift) & self.worker_id_mask,
            id & self.sequence_mask,
        )
    }
}
