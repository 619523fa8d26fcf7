use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::time::Timestamp;
use crate::Result;

/// Sound velocity profile record (type 3).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SoundVelocityProfile {
    /// Time the profile was observed
    pub time: Timestamp,
    /// Time the profile was introduced into the sonar
    pub application_time: Timestamp,
    /// Degrees
    pub longitude: f64,
    /// Degrees
    pub latitude: f64,
    /// Meters, one per point
    pub depth: Vec<f64>,
    /// Meters per second, one per point
    pub sound_speed: Vec<f64>,
}

impl SoundVelocityProfile {
    /// Decode from a sound velocity profile record payload.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if the payload holds fewer points than declared.
    pub fn decode(dat: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(dat);
        let time = Timestamp::read(&mut cursor)?;
        let application_time = Timestamp::read(&mut cursor)?;
        let longitude = f64::from(cursor.read_i32()?) / 1.0e7;
        let latitude = f64::from(cursor.read_i32()?) / 1.0e7;
        let num_points = cursor.read_u32()? as usize;

        // Don't trust the count for allocation, each point is 8 bytes
        let capacity = num_points.min(cursor.remaining() / 8);
        let mut depth = Vec::with_capacity(capacity);
        let mut sound_speed = Vec::with_capacity(capacity);
        for _ in 0..num_points {
            depth.push(f64::from(cursor.read_u32()?) / 100.0);
            sound_speed.push(f64::from(cursor.read_u32()?) / 100.0);
        }

        Ok(SoundVelocityProfile {
            time,
            application_time,
            longitude,
            latitude,
            depth,
            sound_speed,
        })
    }
}
