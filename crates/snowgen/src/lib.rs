//! Snowflake-style 64-bit identifiers generated from purely local state.
//!
//! Every identifier is a non-negative `i64` packing, from most to least
//! significant bits:
//!
//! ```text
//!  +--------------+------------------+--------------------+---------------+----------------+
//!  | sign bit (0) | timestamp offset | data-center ID     | worker ID     | sequence       |
//!  +--------------+------------------+--------------------+---------------+----------------+
//!                  ms since epoch     data_center_bits     worker_id_bits  sequence_bits
//! ```
//!
//! The default layout (12 sequence bits, 5 worker bits, 5 data-center bits,
//! Twitter epoch) matches the classic Snowflake scheme.
//!
//! ```
//! use snowgen::SnowflakeGenerator;
//!
//! let generator = SnowflakeGenerator::new(1, 1).unwrap();
//! let a = generator.generate().unwrap();
//! let b = generator.generate().unwrap();
//! assert!(b > a);
//!
//! let parts = generator.decompose(b);
//! assert_eq!(parts.worker_id, 1);
//! assert_eq!(parts.data_center_id, 1);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
#[cfg(feature = "futures")]
mod futures;
mod generator;
mod id;
mod layout;
mod options;
mod time;

pub use crate::error::*;
#[cfg_attr(docsrs, doc(cfg(feature = "futures")))]
#[cfg(feature = "futures")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::layout::*;
pub use crate::options::*;
pub use crate::time::*;
