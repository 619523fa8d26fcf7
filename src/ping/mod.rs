//! Swath bathymetry ping decoding.
//!
//! A ping payload is a fixed 56 byte envelope followed by a sequence of subrecords,
//! each introduced by a `u8` id and a `u24` body length. Beam arrays are stored as
//! fixed-point integers described by the ping's scale factor subrecord, which must
//! precede the arrays it applies to.
mod arrays;
mod intensity;
mod scale_factors;
mod sensor;
mod subrecord;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use arrays::BeamArrays;
pub use intensity::{BeamTimeSeries, IntensitySeries};
pub use scale_factors::{ScaleFactor, ScaleFactorTable};
pub use sensor::R2Sonic;
pub use subrecord::{SubrecordId, SubrecordInfo};

use crate::cursor::ByteCursor;
use crate::options::DecodeOptions;
use crate::time::Timestamp;
use crate::Result;

/// Non-fatal condition encountered while decoding a ping.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeWarning {
    /// The array was left empty because its sample width is not supported.
    UnsupportedArrayWidth { subrecord: u8, width: u8 },
}

/// Swath bathymetry ping record (type 2).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SwathBathymetryPing {
    pub time: Timestamp,
    /// Degrees
    pub longitude: f64,
    /// Degrees
    pub latitude: f64,
    /// Number of samples in each beam array
    pub number_of_beams: u16,
    pub center_beam: u16,
    /// Low 7 bits of the ping flags byte
    pub ping_flags: u8,
    /// High bit of the ping flags byte
    pub ping_flag: bool,
    pub tide_corrector: i16,
    pub depth_corrector: u32,
    /// Degrees
    pub heading: f64,
    /// Degrees
    pub pitch: f64,
    /// Degrees
    pub roll: f64,
    /// Meters
    pub heave: f64,
    /// Degrees
    pub course: f64,
    /// Knots
    pub speed: f64,
    pub height: i32,
    pub separation: i32,
    pub gps_tide_corrector: i32,
    /// Every subrecord in payload order, including ids that are not decoded.
    pub subrecords: Vec<SubrecordInfo>,
    pub scale_factors: ScaleFactorTable,
    pub arrays: BeamArrays,
    pub sensor: Option<R2Sonic>,
    pub intensity: Option<IntensitySeries>,
    pub warnings: Vec<DecodeWarning>,
}

impl SwathBathymetryPing {
    /// Size of the fixed envelope preceding the first subrecord.
    pub const ENVELOPE_LEN: usize = 56;

    const PING_FLAG_MASK: u8 = 0x80;

    /// Decode a ping record payload.
    ///
    /// Scale factors only apply to the ping they are stored in; each call starts
    /// with an empty table.
    ///
    /// # Errors
    /// * [crate::Error::OutOfBounds] if the envelope or any subrecord runs past the payload
    /// * [crate::Error::ScaleFactorMissing] if an array precedes, or is absent
    ///   from, the scale factors
    /// * [crate::Error::ZeroScaleMultiplier] for an array with a zero multiplier
    /// * [crate::Error::UnsupportedArrayWidth] in strict mode, see [DecodeOptions]
    pub fn decode(dat: &[u8], options: &DecodeOptions) -> Result<Self> {
        let mut cursor = ByteCursor::new(dat);
        let mut ping = Self::read_envelope(&mut cursor)?;
        let num_beams = usize::from(ping.number_of_beams);

        while !cursor.is_empty() {
            let code = cursor.read_u8()?;
            let length = cursor.read_u24()?;
            let body = cursor.read_bytes(length as usize)?;
            trace!(subrecord = code, length, "ping subrecord");
            ping.subrecords.push(SubrecordInfo { id: code, length });

            let Some(id) = SubrecordId::from_code(code) else {
                debug!(subrecord = code, length, "skipping unknown ping subrecord");
                continue;
            };
            match id {
                SubrecordId::ScaleFactors => ping.scale_factors = ScaleFactorTable::decode(body)?,
                SubrecordId::IntensitySeriesArray => {
                    ping.intensity = Some(IntensitySeries::decode(body)?);
                }
                id if id.is_r2sonic() => ping.sensor = Some(R2Sonic::decode(body)?),
                id if BeamArrays::holds(id) => ping.arrays.decode(
                    id,
                    body,
                    num_beams,
                    &ping.scale_factors,
                    options,
                    &mut ping.warnings,
                )?,
                id => debug!(subrecord = %id, length, "ping subrecord not decoded"),
            }
        }

        Ok(ping)
    }

    fn read_envelope(cursor: &mut ByteCursor) -> Result<Self> {
        let time = Timestamp::read(cursor)?;
        let longitude = f64::from(cursor.read_i32()?) / 1.0e7;
        let latitude = f64::from(cursor.read_i32()?) / 1.0e7;
        let number_of_beams = cursor.read_u16()?;
        let center_beam = cursor.read_u16()?;
        let flags = cursor.read_u8()?;
        cursor.skip(3)?;
        let tide_corrector = cursor.read_i16()?;
        let depth_corrector = cursor.read_u32()?;
        let heading = f64::from(cursor.read_u16()?) / 100.0;
        let pitch = f64::from(cursor.read_i16()?) / 100.0;
        let roll = f64::from(cursor.read_i16()?) / 100.0;
        let heave = f64::from(cursor.read_i16()?) / 100.0;
        let course = f64::from(cursor.read_u16()?) / 100.0;
        let speed = f64::from(cursor.read_u16()?) / 100.0;
        let height = cursor.read_i32()?;
        let separation = cursor.read_i32()?;
        let gps_tide_corrector = cursor.read_i32()?;
        cursor.skip(2)?;

        Ok(SwathBathymetryPing {
            time,
            longitude,
            latitude,
            number_of_beams,
            center_beam,
            ping_flags: flags & !Self::PING_FLAG_MASK,
            ping_flag: flags & Self::PING_FLAG_MASK != 0,
            tide_corrector,
            depth_corrector,
            heading,
            pitch,
            roll,
            heave,
            course,
            speed,
            height,
            separation,
            gps_tide_corrector,
            subrecords: Vec::new(),
            scale_factors: ScaleFactorTable::default(),
            arrays: BeamArrays::default(),
            sensor: None,
            intensity: None,
            warnings: Vec::new(),
        })
    }

    /// Time of the ping in UTC.
    #[must_use]
    pub fn datetime(&self) -> chrono::DateTime<chrono::Utc> {
        self.time.datetime()
    }
}
