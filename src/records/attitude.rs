use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::time::Timestamp;
use crate::Result;

/// Attitude record (type 12): a run of platform attitude measurements relative to
/// a base time.
///
/// The measurement arrays are parallel, one entry per measurement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Attitude {
    pub time: Timestamp,
    /// Absolute measurement times, i.e., base time plus the stored millisecond offset.
    pub times: Vec<DateTime<Utc>>,
    /// Degrees
    pub pitches: Vec<f64>,
    /// Degrees
    pub rolls: Vec<f64>,
    /// Meters
    pub heaves: Vec<f64>,
    /// Degrees
    pub headings: Vec<f64>,
}

impl Attitude {
    /// Size of a single measurement in bytes.
    pub const MEASUREMENT_LEN: usize = 10;

    /// Decode from an attitude record payload.
    ///
    /// A zero (or negative) measurement count produces empty arrays.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if the payload holds fewer measurements than declared.
    pub fn decode(dat: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(dat);
        let time = Timestamp::read(&mut cursor)?;
        let count = usize::try_from(cursor.read_i16()?).unwrap_or(0);

        let mut attitude = Attitude {
            time,
            times: Vec::with_capacity(count),
            pitches: Vec::with_capacity(count),
            rolls: Vec::with_capacity(count),
            heaves: Vec::with_capacity(count),
            headings: Vec::with_capacity(count),
        };
        for _ in 0..count {
            let offset_ms = cursor.read_i16()?;
            attitude.times.push(time.offset_millis(i64::from(offset_ms)));
            attitude.pitches.push(f64::from(cursor.read_i16()?) / 100.0);
            attitude.rolls.push(f64::from(cursor.read_i16()?) / 100.0);
            attitude.heaves.push(f64::from(cursor.read_i16()?) / 100.0);
            attitude.headings.push(f64::from(cursor.read_u16()?) / 100.0);
        }

        Ok(attitude)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
