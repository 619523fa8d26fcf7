use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::Result;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// POSIX time as stored at the start of every timestamped record.
///
/// `nsec` should be less than 1e9, but that is not enforced. Values past a
/// full second roll over into the seconds when converting to a [DateTime].
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    pub sec: u32,
    pub nsec: u32,
}

impl Timestamp {
    pub const LEN: usize = 8;

    #[must_use]
    pub fn new(sec: u32, nsec: u32) -> Self {
        Timestamp { sec, nsec }
    }

    /// Read a seconds, nanoseconds pair.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if there are fewer than 8 bytes left.
    pub fn read(cursor: &mut ByteCursor) -> Result<Self> {
        Ok(Timestamp {
            sec: cursor.read_u32()?,
            nsec: cursor.read_u32()?,
        })
    }

    /// Seconds since the epoch, including the fractional part.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        f64::from(self.sec) + f64::from(self.nsec) * 1e-9
    }

    #[must_use]
    pub fn datetime(&self) -> DateTime<Utc> {
        let sec = i64::from(self.sec) + i64::from(self.nsec / NANOS_PER_SEC);
        // u32 seconds are always within chrono's range
        DateTime::from_timestamp(sec, self.nsec % NANOS_PER_SEC).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// This time shifted by `millis` milliseconds.
    #[must_use]
    pub fn offset_millis(&self, millis: i64) -> DateTime<Utc> {
        self.datetime() + Duration::milliseconds(millis)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.datetime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_and_datetime() {
        let ts = Timestamp::new(1_436_931_405, 987_654_321);

        assert!((ts.seconds() - 1_436_931_405.987_654_321).abs() < 4e-7);
        let dt = ts.datetime();
        assert_eq!(dt.timestamp(), 1_436_931_405);
        assert_eq!(dt.timestamp_subsec_nanos(), 987_654_321);
    }

    #[test]
    fn nanos_past_a_second_roll_over() {
        let ts = Timestamp::new(10, 2_500_000_000);
        let dt = ts.datetime();
        assert_eq!(dt.timestamp(), 12);
        assert_eq!(dt.timestamp_subsec_nanos(), 500_000_000);
    }

    #[test]
    fn max_values_do_not_panic() {
        let ts = Timestamp::new(u32::MAX, u32::MAX);
        ts.datetime();
        ts.offset_millis(i64::from(i16::MIN));
    }

    #[test]
    fn offset() {
        let ts = Timestamp::new(100, 0);
        assert_eq!(ts.offset_millis(1500).timestamp_millis(), 101_500);
        assert_eq!(ts.offset_millis(-1000).timestamp(), 99);
    }

    #[test]
    fn read() {
        let dat: &[u8] = &[0, 0, 0, 1, 0, 0, 0, 2];
        let mut cursor = ByteCursor::new(dat);
        assert_eq!(Timestamp::read(&mut cursor).unwrap(), Timestamp::new(1, 2));
    }
}
