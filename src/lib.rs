#![doc = include_str!("../README.md")]

mod cursor;
mod error;
mod options;
mod reader;
mod summary;
mod time;

pub mod index;
pub mod ping;
pub mod records;

pub use cursor::ByteCursor;
pub use error::{Error, Result};
pub use options::DecodeOptions;
pub use reader::{open, read_records, RecordReader};
pub use records::{Record, RecordBody, RecordHeader, RecordType};
pub use summary::{Summary, TypeSummary};
pub use time::Timestamp;
