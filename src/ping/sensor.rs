use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::time::Timestamp;
use crate::Result;

/// R2Sonic sonar settings, as stored in the sensor specific subrecords
/// (ids 151-153) and at the head of an intensity series.
///
/// Transmit and receive settings are kept as the raw integers stored by the
/// sonar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct R2Sonic {
    pub model_number: String,
    pub serial_number: String,
    pub time: Timestamp,
    pub ping_number: u32,
    pub ping_period: u32,
    /// Meters per second
    pub sound_speed: f64,
    /// Kilohertz
    pub frequency: f64,
    pub tx_power: u32,
    pub tx_pulse_width: u32,
    pub tx_beamwidth_vert: u32,
    pub tx_beamwidth_horiz: u32,
    pub tx_steering_vert: u32,
    pub tx_steering_horiz: u32,
    pub tx_misc_info: u32,
    pub rx_bandwidth: u32,
    pub rx_sample_rate: u32,
    pub rx_range: u32,
    pub rx_gain: u32,
    pub rx_spreading: u32,
    pub rx_absorption: u32,
    pub rx_mount_tilt: u32,
    pub rx_misc_info: u32,
    pub num_beams: u16,
}

impl R2Sonic {
    /// Encoded size, from the model number through the beam count.
    pub const LEN: usize = 112;
    const TEXT_LEN: usize = 12;

    /// Decode from a sensor specific subrecord body. Bytes after the beam count
    /// are not decoded.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if `body` is shorter than [Self::LEN].
    pub fn decode(body: &[u8]) -> Result<Self> {
        Self::read(&mut ByteCursor::new(body))
    }

    pub(crate) fn read(cursor: &mut ByteCursor) -> Result<Self> {
        let model_number = cursor.read_fixed_string(Self::TEXT_LEN)?;
        let serial_number = cursor.read_fixed_string(Self::TEXT_LEN)?;
        let time = Timestamp::read(cursor)?;
        let ping_number = cursor.read_u32()?;
        let ping_period = cursor.read_u32()?;
        let sound_speed = f64::from(cursor.read_u32()?) / 100.0;
        let frequency = f64::from(cursor.read_u32()?) / 1000.0;
        let tx_power = cursor.read_u32()?;
        let tx_pulse_width = cursor.read_u32()?;
        let tx_beamwidth_vert = cursor.read_u32()?;
        let tx_beamwidth_horiz = cursor.read_u32()?;
        let tx_steering_vert = cursor.read_u32()?;
        let tx_steering_horiz = cursor.read_u32()?;
        let tx_misc_info = cursor.read_u32()?;
        let rx_bandwidth = cursor.read_u32()?;
        let rx_sample_rate = cursor.read_u32()?;
        let rx_range = cursor.read_u32()?;
        let rx_gain = cursor.read_u32()?;
        let rx_spreading = cursor.read_u32()?;
        let rx_absorption = cursor.read_u32()?;
        let rx_mount_tilt = cursor.read_u32()?;
        let rx_misc_info = cursor.read_u32()?;
        cursor.skip(2)?;
        let num_beams = cursor.read_u16()?;

        Ok(R2Sonic {
            model_number,
            serial_number,
            time,
            ping_number,
            ping_period,
            sound_speed,
            frequency,
            tx_power,
            tx_pulse_width,
            tx_beamwidth_vert,
            tx_beamwidth_horiz,
            tx_steering_vert,
            tx_steering_horiz,
            tx_misc_info,
            rx_bandwidth,
            rx_sample_rate,
            rx_range,
            rx_gain,
            rx_spreading,
            rx_absorption,
            rx_mount_tilt,
            rx_misc_info,
            num_beams,
        })
    }
}
