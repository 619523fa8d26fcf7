use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifiers of the subrecords that may appear in a swath bathymetry ping.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SubrecordId {
    DepthArray = 1,
    AcrossTrackArray = 2,
    AlongTrackArray = 3,
    TravelTimeArray = 4,
    BeamAngleArray = 5,
    MeanCalAmplitudeArray = 6,
    MeanRelAmplitudeArray = 7,
    EchoWidthArray = 8,
    QualityFactorArray = 9,
    ReceiveHeaveArray = 10,
    NominalDepthArray = 14,
    QualityFlagsArray = 15,
    BeamFlagsArray = 16,
    SignalToNoiseArray = 17,
    BeamAngleForwardArray = 18,
    VerticalErrorArray = 19,
    HorizontalErrorArray = 20,
    IntensitySeriesArray = 21,
    SectorNumberArray = 22,
    DetectionInfoArray = 23,
    IncidentBeamAdjArray = 24,
    SystemCleaningArray = 25,
    DopplerCorrectionArray = 26,
    SonarVertUncertaintyArray = 27,
    ScaleFactors = 100,
    R2Sonic2022Specific = 151,
    R2Sonic2024Specific = 152,
    R2Sonic2020Specific = 153,
}

impl SubrecordId {
    pub const ALL: [SubrecordId; 28] = [
        Self::DepthArray,
        Self::AcrossTrackArray,
        Self::AlongTrackArray,
        Self::TravelTimeArray,
        Self::BeamAngleArray,
        Self::MeanCalAmplitudeArray,
        Self::MeanRelAmplitudeArray,
        Self::EchoWidthArray,
        Self::QualityFactorArray,
        Self::ReceiveHeaveArray,
        Self::NominalDepthArray,
        Self::QualityFlagsArray,
        Self::BeamFlagsArray,
        Self::SignalToNoiseArray,
        Self::BeamAngleForwardArray,
        Self::VerticalErrorArray,
        Self::HorizontalErrorArray,
        Self::IntensitySeriesArray,
        Self::SectorNumberArray,
        Self::DetectionInfoArray,
        Self::IncidentBeamAdjArray,
        Self::SystemCleaningArray,
        Self::DopplerCorrectionArray,
        Self::SonarVertUncertaintyArray,
        Self::ScaleFactors,
        Self::R2Sonic2022Specific,
        Self::R2Sonic2024Specific,
        Self::R2Sonic2020Specific,
    ];

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.code() == code)
    }

    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn is_r2sonic(self) -> bool {
        matches!(
            self,
            Self::R2Sonic2022Specific | Self::R2Sonic2024Specific | Self::R2Sonic2020Specific
        )
    }

    /// Upper-case GSF name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DepthArray => "DEPTH_ARRAY",
            Self::AcrossTrackArray => "ACROSS_TRACK_ARRAY",
            Self::AlongTrackArray => "ALONG_TRACK_ARRAY",
            Self::TravelTimeArray => "TRAVEL_TIME_ARRAY",
            Self::BeamAngleArray => "BEAM_ANGLE_ARRAY",
            Self::MeanCalAmplitudeArray => "MEAN_CAL_AMPLITUDE_ARRAY",
            Self::MeanRelAmplitudeArray => "MEAN_REL_AMPLITUDE_ARRAY",
            Self::EchoWidthArray => "ECHO_WIDTH_ARRAY",
            Self::QualityFactorArray => "QUALITY_FACTOR_ARRAY",
            Self::ReceiveHeaveArray => "RECEIVE_HEAVE_ARRAY",
            Self::NominalDepthArray => "NOMINAL_DEPTH_ARRAY",
            Self::QualityFlagsArray => "QUALITY_FLAGS_ARRAY",
            Self::BeamFlagsArray => "BEAM_FLAGS_ARRAY",
            Self::SignalToNoiseArray => "SIGNAL_TO_NOISE_ARRAY",
            Self::BeamAngleForwardArray => "BEAM_ANGLE_FORWARD_ARRAY",
            Self::VerticalErrorArray => "VERTICAL_ERROR_ARRAY",
            Self::HorizontalErrorArray => "HORIZONTAL_ERROR_ARRAY",
            Self::IntensitySeriesArray => "INTENSITY_SERIES_ARRAY",
            Self::SectorNumberArray => "SECTOR_NUMBER_ARRAY",
            Self::DetectionInfoArray => "DETECTION_INFO_ARRAY",
            Self::IncidentBeamAdjArray => "INCIDENT_BEAM_ADJ_ARRAY",
            Self::SystemCleaningArray => "SYSTEM_CLEANING_ARRAY",
            Self::DopplerCorrectionArray => "DOPPLER_CORRECTION_ARRAY",
            Self::SonarVertUncertaintyArray => "SONAR_VERT_UNCERTAINTY_ARRAY",
            Self::ScaleFactors => "SCALE_FACTORS",
            Self::R2Sonic2022Specific => "R2SONIC_2022_SPECIFIC",
            Self::R2Sonic2024Specific => "R2SONIC_2024_SPECIFIC",
            Self::R2Sonic2020Specific => "R2SONIC_2020_SPECIFIC",
        }
    }
}

impl Display for SubrecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SubrecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| format!("unknown subrecord name {s:?}"))
    }
}

/// Id and declared body length of one subrecord, in the order they appear in a ping.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubrecordInfo {
    /// Raw id, which may not be a known [SubrecordId]
    pub id: u8,
    /// Body length, excluding the 4 byte id and length header
    pub length: u32,
}

impl SubrecordInfo {
    /// Size of the id and length header preceding each subrecord body.
    pub const HEADER_LEN: usize = 4;

    #[must_use]
    pub fn subrecord_id(&self) -> Option<SubrecordId> {
        SubrecordId::from_code(self.id)
    }
}
