use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::time::Timestamp;
use crate::Result;

/// Navigation error record (type 8).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NavigationError {
    pub time: Timestamp,
    pub record_id: i32,
    /// Meters
    pub longitude_error: f64,
    /// Meters
    pub latitude_error: f64,
}

impl NavigationError {
    /// Decode from a navigation error record payload.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if the payload is too short.
    pub fn decode(dat: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(dat);
        Ok(NavigationError {
            time: Timestamp::read(&mut cursor)?,
            record_id: cursor.read_i32()?,
            longitude_error: f64::from(cursor.read_i32()?) / 10.0,
            latitude_error: f64::from(cursor.read_i32()?) / 10.0,
        })
    }
}

/// Horizontal/vertical navigation error record (type 11).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HvNavigationError {
    pub time: Timestamp,
    pub record_id: i32,
    /// Meters
    pub horizontal_error: f64,
    /// Meters
    pub vertical_error: f64,
    /// Meters
    pub sep_uncertainty: f64,
    pub spare: [u8; 2],
    /// Positioning system type, e.g., `GPS`, `RTK`. Empty if not stored.
    pub position_type: String,
}

impl HvNavigationError {
    /// Decode from an HV navigation error record payload.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if the payload is too short for its fields or
    /// the declared position type length.
    pub fn decode(dat: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(dat);
        let time = Timestamp::read(&mut cursor)?;
        let record_id = cursor.read_i32()?;
        let horizontal_error = f64::from(cursor.read_i32()?) / 1000.0;
        let vertical_error = f64::from(cursor.read_i32()?) / 1000.0;
        let sep_uncertainty = f64::from(cursor.read_u16()?) / 100.0;
        let spare = cursor.read_array()?;
        let len = cursor.read_u16()? as usize;
        let position_type = cursor.read_fixed_string(len)?;

        Ok(HvNavigationError {
            time,
            record_id,
            horizontal_error,
            vertical_error,
            sep_uncertainty,
            spare,
            position_type,
        })
    }
}
