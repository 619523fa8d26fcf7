//! GSF record framing and payload decoding.
//!
//! Every record starts with a big-endian `u32` payload size and a `u32` record id.
//! The record id packs a checksum-present flag, reserved bits and the record type.
//! When the flag is set a 4 byte checksum follows before the payload.
mod attitude;
mod comment;
mod header;
mod navigation;
mod processing;
mod svp;

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use attitude::Attitude;
pub use comment::{Comment, History};
pub use header::{parse_version, Header};
pub use navigation::{HvNavigationError, NavigationError};
pub use processing::ProcessingParameters;
pub use svp::SoundVelocityProfile;

use crate::options::DecodeOptions;
use crate::ping::SwathBathymetryPing;
use crate::time::Timestamp;
use crate::{Error, Result};

/// Record types defined by GSF.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum RecordType {
    Header = 1,
    SwathBathymetryPing = 2,
    SoundVelocityProfile = 3,
    ProcessingParameters = 4,
    SensorParameters = 5,
    Comment = 6,
    History = 7,
    NavigationError = 8,
    SwathBathySummary = 9,
    SingleBeamPing = 10,
    HvNavigationError = 11,
    Attitude = 12,
}

impl RecordType {
    pub const ALL: [RecordType; 12] = [
        Self::Header,
        Self::SwathBathymetryPing,
        Self::SoundVelocityProfile,
        Self::ProcessingParameters,
        Self::SensorParameters,
        Self::Comment,
        Self::History,
        Self::NavigationError,
        Self::SwathBathySummary,
        Self::SingleBeamPing,
        Self::HvNavigationError,
        Self::Attitude,
    ];

    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Upper-case GSF name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "HEADER",
            Self::SwathBathymetryPing => "SWATH_BATHYMETRY_PING",
            Self::SoundVelocityProfile => "SOUND_VELOCITY_PROFILE",
            Self::ProcessingParameters => "PROCESSING_PARAMETERS",
            Self::SensorParameters => "SENSOR_PARAMETERS",
            Self::Comment => "COMMENT",
            Self::History => "HISTORY",
            Self::NavigationError => "NAVIGATION_ERROR",
            Self::SwathBathySummary => "SWATH_BATHY_SUMMARY",
            Self::SingleBeamPing => "SINGLE_BEAM_PING",
            Self::HvNavigationError => "HV_NAVIGATION_ERROR",
            Self::Attitude => "ATTITUDE",
        }
    }

    /// False for types that are recognized but whose payloads are not decoded.
    #[must_use]
    pub fn is_implemented(self) -> bool {
        !matches!(
            self,
            Self::SensorParameters | Self::SwathBathySummary | Self::SingleBeamPing
        )
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown record type name {s:?}"))
    }
}

/// Record frame header.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Size of the payload, excluding this header and any checksum.
    pub size_data: u32,
    pub record_type: RecordType,
    /// Reserved bits of the record id, masked in place by [RecordHeader::RESERVED_MASK].
    pub reserved: u32,
    /// Stored checksum, if present. It is not verified.
    pub checksum: Option<u32>,
}

impl RecordHeader {
    /// Size of the header without a checksum.
    pub const LEN: usize = 8;
    pub const CHECKSUM_LEN: usize = 4;

    pub const CHECKSUM_MASK: u32 = 0x8000_0000;
    pub const RESERVED_MASK: u32 = 0x7FC0_0000;
    pub const TYPE_MASK: u32 = 0x003F_FFFF;

    /// True if a record id has the checksum-present flag set.
    #[must_use]
    pub fn has_checksum(record_id: u32) -> bool {
        record_id & Self::CHECKSUM_MASK != 0
    }

    /// Decode a header from the start of `dat`. If the record id has the checksum
    /// flag set `dat` must include the 4 checksum bytes.
    ///
    /// # Errors
    /// * [Error::OutOfBounds] if `dat` is too short
    /// * [Error::UnknownRecordType] if the type bits are not a known [RecordType]
    pub fn decode(dat: &[u8]) -> Result<Self> {
        let mut cursor = crate::cursor::ByteCursor::new(dat);
        let size_data = cursor.read_u32()?;
        let record_id = cursor.read_u32()?;

        let type_code = record_id & Self::TYPE_MASK;
        let record_type = RecordType::from_code(type_code).ok_or(Error::UnknownRecordType(type_code))?;
        let checksum = if Self::has_checksum(record_id) {
            Some(cursor.read_u32()?)
        } else {
            None
        };

        Ok(RecordHeader {
            size_data,
            record_type,
            reserved: record_id & Self::RESERVED_MASK,
            checksum,
        })
    }

    /// Encoded header size, including the checksum if present.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.checksum.is_some() {
            Self::LEN + Self::CHECKSUM_LEN
        } else {
            Self::LEN
        }
    }

    /// Total size of the record on disk: header, checksum and payload.
    #[must_use]
    pub fn size_total(&self) -> u64 {
        self.len() as u64 + u64::from(self.size_data)
    }
}

/// Decoded record payload.
///
/// Types that are recognized but not decoded carry no data; their payload is
/// available from [Record::data].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "content")]
pub enum RecordBody {
    Header(Header),
    SwathBathymetryPing(Box<SwathBathymetryPing>),
    SoundVelocityProfile(SoundVelocityProfile),
    ProcessingParameters(ProcessingParameters),
    SensorParameters,
    Comment(Comment),
    History(History),
    NavigationError(NavigationError),
    SwathBathySummary,
    SingleBeamPing,
    HvNavigationError(HvNavigationError),
    Attitude(Attitude),
}

impl RecordBody {
    /// Decode `payload` as a record of type `record_type`.
    ///
    /// # Errors
    /// Any error from the parser for `record_type`.
    pub fn decode(record_type: RecordType, payload: &[u8], options: &DecodeOptions) -> Result<Self> {
        Ok(match record_type {
            RecordType::Header => RecordBody::Header(Header::decode(payload)?),
            RecordType::SwathBathymetryPing => {
                RecordBody::SwathBathymetryPing(Box::new(SwathBathymetryPing::decode(payload, options)?))
            }
            RecordType::SoundVelocityProfile => {
                RecordBody::SoundVelocityProfile(SoundVelocityProfile::decode(payload)?)
            }
            RecordType::ProcessingParameters => {
                RecordBody::ProcessingParameters(ProcessingParameters::decode(payload)?)
            }
            RecordType::Comment => RecordBody::Comment(Comment::decode(payload)?),
            RecordType::History => RecordBody::History(History::decode(payload)?),
            RecordType::NavigationError => RecordBody::NavigationError(NavigationError::decode(payload)?),
            RecordType::HvNavigationError => {
                RecordBody::HvNavigationError(HvNavigationError::decode(payload)?)
            }
            RecordType::Attitude => RecordBody::Attitude(Attitude::decode(payload)?),
            RecordType::SensorParameters => Self::not_decoded(RecordBody::SensorParameters, payload),
            RecordType::SwathBathySummary => Self::not_decoded(RecordBody::SwathBathySummary, payload),
            RecordType::SingleBeamPing => Self::not_decoded(RecordBody::SingleBeamPing, payload),
        })
    }

    fn not_decoded(body: RecordBody, payload: &[u8]) -> Self {
        debug!(record_type = %body.record_type(), size = payload.len(), "record type not decoded");
        body
    }

    #[must_use]
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordBody::Header(_) => RecordType::Header,
            RecordBody::SwathBathymetryPing(_) => RecordType::SwathBathymetryPing,
            RecordBody::SoundVelocityProfile(_) => RecordType::SoundVelocityProfile,
            RecordBody::ProcessingParameters(_) => RecordType::ProcessingParameters,
            RecordBody::SensorParameters => RecordType::SensorParameters,
            RecordBody::Comment(_) => RecordType::Comment,
            RecordBody::History(_) => RecordType::History,
            RecordBody::NavigationError(_) => RecordType::NavigationError,
            RecordBody::SwathBathySummary => RecordType::SwathBathySummary,
            RecordBody::SingleBeamPing => RecordType::SingleBeamPing,
            RecordBody::HvNavigationError(_) => RecordType::HvNavigationError,
            RecordBody::Attitude(_) => RecordType::Attitude,
        }
    }

    /// Primary time of the record, if it has one.
    #[must_use]
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            RecordBody::SwathBathymetryPing(ping) => Some(ping.time),
            RecordBody::SoundVelocityProfile(svp) => Some(svp.time),
            RecordBody::ProcessingParameters(params) => Some(params.time),
            RecordBody::Comment(comment) => Some(comment.time),
            RecordBody::History(history) => Some(history.time),
            RecordBody::NavigationError(nav) => Some(nav.time),
            RecordBody::HvNavigationError(nav) => Some(nav.time),
            RecordBody::Attitude(attitude) => Some(attitude.time),
            RecordBody::Header(_)
            | RecordBody::SensorParameters
            | RecordBody::SwathBathySummary
            | RecordBody::SingleBeamPing => None,
        }
    }
}

/// A framed and decoded record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Record {
    /// Offset of the record header from the start of the stream.
    pub offset: u64,
    pub header: RecordHeader,
    /// Undecoded payload bytes.
    #[serde(skip)]
    pub data: Vec<u8>,
    pub body: RecordBody,
}

impl Record {
    /// Decode a record from an already framed payload.
    ///
    /// # Errors
    /// Any error from decoding the payload, see [RecordBody::decode].
    pub fn decode(offset: u64, header: RecordHeader, data: Vec<u8>, options: &DecodeOptions) -> Result<Self> {
        let body = RecordBody::decode(header.record_type, &data, options)?;
        Ok(Record {
            offset,
            header,
            data,
            body,
        })
    }

    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.header.record_type
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.body.timestamp()
    }

    /// The ping, if this is a swath bathymetry ping record.
    #[must_use]
    pub fn ping(&self) -> Option<&SwathBathymetryPing> {
        match &self.body {
            RecordBody::SwathBathymetryPing(ping) => Some(ping.as_ref()),
            _ => None,
        }
    }
}
