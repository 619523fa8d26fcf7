#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// IO error reading the underlying byte source
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A field read would run past the end of the available bytes.
    #[error("read of {wanted} bytes at offset {offset} exceeds the {available} bytes available")]
    OutOfBounds {
        /// Offset the read started at
        offset: usize,
        /// Number of bytes the read needed
        wanted: usize,
        /// Number of bytes left at `offset`
        available: usize,
    },

    /// Record type code outside of the known set 1-12.
    #[error("unknown record type {0}")]
    UnknownRecordType(u32),

    /// Header record version string is not of the form `GSFvMAJOR.MINOR`.
    #[error("malformed header version {0:?}")]
    MalformedHeaderVersion(String),

    /// An array subrecord has no entry in the ping's scale factor table.
    #[error("no scale factor for subrecord {0}")]
    ScaleFactorMissing(u8),

    /// The scale factor width is not implemented for this array. Only returned
    /// when decoding with strict array widths.
    #[error("unsupported sample width {width} for subrecord {subrecord}")]
    UnsupportedArrayWidth { subrecord: u8, width: u8 },

    /// A scale factor with a zero multiplier was used to decode an array.
    #[error("zero scale multiplier for subrecord {0}")]
    ZeroScaleMultiplier(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
