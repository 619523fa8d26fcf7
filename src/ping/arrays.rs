use serde::{Deserialize, Serialize};
use tracing::warn;

use super::scale_factors::{ScaleFactor, ScaleFactorTable};
use super::subrecord::SubrecordId;
use super::DecodeWarning;
use crate::cursor::ByteCursor;
use crate::options::DecodeOptions;
use crate::{Error, Result};

/// Stored integer type of an array sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sample {
    U8,
    I16,
    U16,
    U32,
}

impl Sample {
    /// The sample type `id` is stored as, and its width in bytes.
    fn native(id: SubrecordId) -> Option<(Self, u8)> {
        use SubrecordId::*;
        Some(match id {
            DepthArray | EchoWidthArray | NominalDepthArray | VerticalErrorArray
            | HorizontalErrorArray => (Sample::U16, 2),
            AcrossTrackArray | AlongTrackArray | BeamAngleArray | BeamAngleForwardArray
            | MeanCalAmplitudeArray | MeanRelAmplitudeArray => (Sample::I16, 2),
            TravelTimeArray => (Sample::U32, 4),
            QualityFactorArray | BeamFlagsArray | SectorNumberArray => (Sample::U8, 1),
            _ => return None,
        })
    }

    /// The sample type used to store `id` at `width` bytes per sample, or `None` if
    /// that combination is not supported. A width of 0 is the default field size.
    fn for_subrecord(id: SubrecordId, width: u8) -> Option<Self> {
        match Self::native(id)? {
            (sample, native) if width == 0 || width == native => Some(sample),
            _ => None,
        }
    }

    fn read(self, cursor: &mut ByteCursor) -> Result<f64> {
        Ok(match self {
            Sample::U8 => f64::from(cursor.read_u8()?),
            Sample::I16 => f64::from(cursor.read_i16()?),
            Sample::U16 => f64::from(cursor.read_u16()?),
            Sample::U32 => f64::from(cursor.read_u32()?),
        })
    }
}

/// Destination of a decoded array.
enum Slot<'a> {
    Real(&'a mut Option<Vec<f64>>),
    Integer(&'a mut Option<Vec<i32>>),
}

/// Per-beam arrays of a swath bathymetry ping.
///
/// Each array is `None` when its subrecord is absent from the ping. An array whose
/// stored width is unsupported decodes to an empty vector.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct BeamArrays {
    /// Meters
    pub depth: Option<Vec<f64>>,
    /// Meters
    pub across_track: Option<Vec<f64>>,
    /// Meters
    pub along_track: Option<Vec<f64>>,
    /// Seconds
    pub travel_time: Option<Vec<f64>>,
    /// Degrees
    pub beam_angle: Option<Vec<f64>>,
    /// Decibels
    pub mean_cal_amplitude: Option<Vec<f64>>,
    /// Decibels
    pub mean_rel_amplitude: Option<Vec<f64>>,
    /// Seconds
    pub echo_width: Option<Vec<f64>>,
    pub quality_factor: Option<Vec<i32>>,
    /// Meters
    pub nominal_depth: Option<Vec<f64>>,
    pub beam_flags: Option<Vec<i32>>,
    /// Degrees
    pub beam_angle_forward: Option<Vec<f64>>,
    /// Meters
    pub vertical_error: Option<Vec<f64>>,
    /// Meters
    pub horizontal_error: Option<Vec<f64>>,
    pub sector_number: Option<Vec<i32>>,
}

impl BeamArrays {
    /// True if `id` is one of the arrays held by [BeamArrays].
    #[must_use]
    pub fn holds(id: SubrecordId) -> bool {
        use SubrecordId::*;
        matches!(
            id,
            DepthArray
                | AcrossTrackArray
                | AlongTrackArray
                | TravelTimeArray
                | BeamAngleArray
                | MeanCalAmplitudeArray
                | MeanRelAmplitudeArray
                | EchoWidthArray
                | QualityFactorArray
                | NominalDepthArray
                | BeamFlagsArray
                | BeamAngleForwardArray
                | VerticalErrorArray
                | HorizontalErrorArray
                | SectorNumberArray
        )
    }

    fn slot(&mut self, id: SubrecordId) -> Option<Slot<'_>> {
        use SubrecordId::*;
        Some(match id {
            DepthArray => Slot::Real(&mut self.depth),
            AcrossTrackArray => Slot::Real(&mut self.across_track),
            AlongTrackArray => Slot::Real(&mut self.along_track),
            TravelTimeArray => Slot::Real(&mut self.travel_time),
            BeamAngleArray => Slot::Real(&mut self.beam_angle),
            MeanCalAmplitudeArray => Slot::Real(&mut self.mean_cal_amplitude),
            MeanRelAmplitudeArray => Slot::Real(&mut self.mean_rel_amplitude),
            EchoWidthArray => Slot::Real(&mut self.echo_width),
            QualityFactorArray => Slot::Integer(&mut self.quality_factor),
            NominalDepthArray => Slot::Real(&mut self.nominal_depth),
            BeamFlagsArray => Slot::Integer(&mut self.beam_flags),
            BeamAngleForwardArray => Slot::Real(&mut self.beam_angle_forward),
            VerticalErrorArray => Slot::Real(&mut self.vertical_error),
            HorizontalErrorArray => Slot::Real(&mut self.horizontal_error),
            SectorNumberArray => Slot::Integer(&mut self.sector_number),
            _ => return None,
        })
    }

    /// Decode one array subrecord body of `num_beams` samples, scaled by the ping's
    /// scale factor for `id`. Ids not held by [BeamArrays] are ignored.
    ///
    /// # Errors
    /// * [Error::ScaleFactorMissing] if `table` has no entry for `id`
    /// * [Error::UnsupportedArrayWidth] if the entry's width is not supported for
    ///   `id` and `options` requests strict widths; otherwise a warning is recorded
    /// * [Error::ZeroScaleMultiplier] if the entry's multiplier is zero
    /// * [Error::OutOfBounds] if `body` is too short for `num_beams` samples
    pub(crate) fn decode(
        &mut self,
        id: SubrecordId,
        body: &[u8],
        num_beams: usize,
        table: &ScaleFactorTable,
        options: &DecodeOptions,
        warnings: &mut Vec<DecodeWarning>,
    ) -> Result<()> {
        let Some(slot) = self.slot(id) else {
            return Ok(());
        };
        let code = id.code();
        let factor = table.get(code).ok_or(Error::ScaleFactorMissing(code))?;

        let Some(sample) = Sample::for_subrecord(id, factor.width) else {
            if options.strict_array_widths {
                return Err(Error::UnsupportedArrayWidth {
                    subrecord: code,
                    width: factor.width,
                });
            }
            warn!(subrecord = %id, width = factor.width, "unsupported array width; array left empty");
            warnings.push(DecodeWarning::UnsupportedArrayWidth {
                subrecord: code,
                width: factor.width,
            });
            match slot {
                Slot::Real(dst) => *dst = Some(Vec::new()),
                Slot::Integer(dst) => *dst = Some(Vec::new()),
            }
            return Ok(());
        };

        if factor.multiplier == 0 {
            return Err(Error::ZeroScaleMultiplier(code));
        }

        let values = read_scaled(body, num_beams, sample, factor)?;
        match slot {
            Slot::Real(dst) => *dst = Some(values),
            // Saturating float to int cast
            Slot::Integer(dst) => *dst = Some(values.into_iter().map(|v| v.trunc() as i32).collect()),
        }
        Ok(())
    }
}

fn read_scaled(body: &[u8], count: usize, sample: Sample, factor: &ScaleFactor) -> Result<Vec<f64>> {
    let mut cursor = ByteCursor::new(body);
    let mut values = Vec::with_capacity(count.min(body.len()));
    for _ in 0..count {
        values.push(factor.apply(sample.read(&mut cursor)?));
    }
    Ok(values)
}
