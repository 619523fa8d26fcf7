use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sensor::R2Sonic;
use crate::cursor::ByteCursor;
use crate::Result;

/// Backscatter time series recorded for one beam.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BeamTimeSeries {
    /// Index into `samples` of the bottom detection
    pub detect_sample: u16,
    pub samples: Vec<u16>,
}

/// Intensity series subrecord (id 21): an R2Sonic imagery header followed by a
/// variable length sample series for each beam.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IntensitySeries {
    pub bits_per_sample: u8,
    pub applied_corrections: u32,
    pub sensor: R2Sonic,
    pub more_info: [u32; 6],
    pub beams: Vec<BeamTimeSeries>,
}

impl IntensitySeries {
    /// Bytes from the start of the body to the first beam.
    pub const HEADER_LEN: usize = 189;

    /// Decode an intensity series subrecord body.
    ///
    /// The number of beams is the one stored in the imagery header, not the ping's.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if a beam's samples run past the end of `body`.
    pub fn decode(body: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(body);
        let bits_per_sample = cursor.read_u8()?;
        let applied_corrections = cursor.read_u32()?;
        cursor.skip(16)?;
        let sensor = R2Sonic::read(&mut cursor)?;
        let mut more_info = [0u32; 6];
        for info in &mut more_info {
            *info = cursor.read_u32()?;
        }
        cursor.skip(32)?;

        let mut beams = Vec::with_capacity(usize::from(sensor.num_beams).min(cursor.remaining() / 12));
        for _ in 0..sensor.num_beams {
            let sample_count = cursor.read_u16()?;
            let detect_sample = cursor.read_u16()?;
            cursor.skip(8)?;
            let mut samples = Vec::with_capacity(usize::from(sample_count));
            for _ in 0..sample_count {
                samples.push(cursor.read_u16()?);
            }
            beams.push(BeamTimeSeries {
                detect_sample,
                samples,
            });
        }

        if !cursor.is_empty() {
            debug!(
                consumed = cursor.offset(),
                declared = body.len(),
                "intensity series does not fill its subrecord"
            );
        }

        Ok(IntensitySeries {
            bits_per_sample,
            applied_corrections,
            sensor,
            more_info,
            beams,
        })
    }

    #[must_use]
    pub fn num_beams(&self) -> usize {
        self.beams.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ping::sensor::tests::r2sonic_bytes;
    use crate::Error;

    /// Encoded intensity series with one beam per entry of `beams`.
    pub(crate) fn intensity_bytes(beams: &[(u16, &[u16])]) -> Vec<u8> {
        let mut dat = vec![16];
        dat.extend(0x0000_0003u32.to_be_bytes());
        dat.extend([0u8; 16]);
        dat.extend(r2sonic_bytes(beams.len() as u16));
        for info in 1..=6u32 {
            dat.extend((info * 100).to_be_bytes());
        }
        dat.extend([0u8; 32]);
        for (detect, samples) in beams {
            dat.extend((samples.len() as u16).to_be_bytes());
            dat.extend(detect.to_be_bytes());
            dat.extend([0u8; 8]);
            for sample in *samples {
                dat.extend(sample.to_be_bytes());
            }
        }
        dat
    }

    #[test]
    fn decode() {
        let dat = intensity_bytes(&[(1, &[10, 20, 30][..]), (0, &[][..]), (1, &[7, 0xffff][..])]);
        let series = IntensitySeries::decode(&dat).unwrap();

        assert_eq!(series.bits_per_sample, 16);
        assert_eq!(series.applied_corrections, 3);
        assert_eq!(series.sensor.model_number, "2024");
        assert_eq!(series.sensor.num_beams, 3);
        assert_eq!(series.more_info, [100, 200, 300, 400, 500, 600]);
        assert_eq!(series.num_beams(), 3);
        assert_eq!(
            series.beams[0],
            BeamTimeSeries {
                detect_sample: 1,
                samples: vec![10, 20, 30]
            }
        );
        assert!(series.beams[1].samples.is_empty());
        assert_eq!(series.beams[2].samples, vec![7, 0xffff]);
    }

    #[test]
    fn header_len() {
        let dat = intensity_bytes(&[]);
        assert_eq!(dat.len(), IntensitySeries::HEADER_LEN);
        assert!(IntensitySeries::decode(&dat).unwrap().beams.is_empty());
    }

    #[test]
    fn padding_after_beams_is_tolerated() {
        let mut dat = intensity_bytes(&[(0, &[1, 2][..])]);
        dat.extend([0, 0, 0]);
        let series = IntensitySeries::decode(&dat).unwrap();
        assert_eq!(series.beams[0].samples, vec![1, 2]);
    }

    #[test]
    fn truncated_samples() {
        let mut dat = intensity_bytes(&[(0, &[1, 2, 3][..])]);
        dat.truncate(dat.len() - 1);
        let err = IntensitySeries::decode(&dat).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }), "{err:?}");
    }
}
