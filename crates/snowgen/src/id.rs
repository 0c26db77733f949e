use core::fmt;

use crate::{Layout, SnowflakeOptions};

/// The fields of a generated identifier.
///
/// `timestamp` is absolute (milliseconds since the Unix epoch), i.e. the
/// encoded offset with the configured epoch added back.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeParts {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Data-center ID of the issuing generator.
    pub data_center_id: i64,
    /// Worker ID of the issuing generator.
    pub worker_id: i64,
    /// Position within the millisecond, starting at 0.
    pub sequence: i64,
}

impl SnowflakeParts {
    /// Decodes `id` using `layout` and the epoch from `options`.
    ///
    /// ```
    /// use snowgen::{Layout, SnowflakeOptions, SnowflakeParts};
    ///
    /// let options = SnowflakeOptions::default();
    /// let layout = Layout::new(&options).unwrap();
    /// let id = layout.compose(1_000, 2, 3, 4);
    ///
    /// let parts = SnowflakeParts::decode(id, &layout, &options);
    /// assert_eq!(parts.timestamp, options.epoch + 1_000);
    /// assert_eq!((parts.data_center_id, parts.worker_id, parts.sequence), (2, 3, 4));
    /// ```
    pub fn decode(id: i64, layout: &Layout, options: &SnowflakeOptions) -> Self {
        let (offset, data_center_id, worker_id, sequence) = layout.decompose(id);
        Self {
            timestamp: options.epoch.saturating_add(offset),
            data_center_id,
            worker_id,
            sequence,
        }
    }
}

impl fmt::Display for SnowflakeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ts={} dc={} worker={} seq={}",
            self.timestamp, self.data_center_id, self.worker_id, self.sequence
        )
    }
}
