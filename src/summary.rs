use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::{Record, RecordType};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub count: usize,
    /// Total on-disk size of the records, including headers.
    pub bytes: u64,
}

/// Tracks stats on record iteration.
///
/// # Example
/// ```
/// use gsf::{read_records, Summary};
///
/// let mut dat: Vec<u8> = vec![0, 0, 0, 12, 0, 0, 0, 1];
/// dat.extend(b"GSF-v03.09\0\0");
///
/// let mut summary = Summary::default();
/// read_records(&dat)
///     .filter_map(Result::ok)
///     .for_each(|record| summary.add(&record));
/// assert_eq!(summary.count, 1);
/// assert_eq!(summary.bytes, 20);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub bytes: u64,
    pub types: BTreeMap<RecordType, TypeSummary>,
    /// Number of swath bathymetry pings
    pub pings: usize,
    /// Total number of beams over all pings
    pub beams: u64,
    /// Number of ping decode warnings
    pub warnings: usize,
    /// Earliest record time
    pub first: Option<DateTime<Utc>>,
    /// Latest record time
    pub last: Option<DateTime<Utc>>,
}

impl Summary {
    pub fn add(&mut self, record: &Record) {
        let size = record.header.size_total();
        self.count += 1;
        self.bytes += size;

        let typ = self.types.entry(record.record_type()).or_default();
        typ.count += 1;
        typ.bytes += size;

        if let Some(ping) = record.ping() {
            self.pings += 1;
            self.beams += u64::from(ping.number_of_beams);
            self.warnings += ping.warnings.len();
        }

        if let Some(time) = record.timestamp().map(|t| t.datetime()) {
            self.first = Some(self.first.map_or(time, |first| first.min(time)));
            self.last = Some(self.last.map_or(time, |last| last.max(time)));
        }
    }

    /// Number of records of type `typ`.
    #[must_use]
    pub fn count_of(&self, typ: RecordType) -> usize {
        self.types.get(&typ).map_or(0, |t| t.count)
    }
}
