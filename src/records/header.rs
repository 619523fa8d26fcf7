use serde::{Deserialize, Serialize};

use crate::cursor::trim_nul;
use crate::{Error, Result};

/// File header record (type 1), always the first record in a file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Version text with NUL padding removed, e.g., `GSF-v03.07`
    pub version: String,
    pub version_major: u32,
    pub version_minor: u32,
}

impl Header {
    /// Decode from a header record payload.
    ///
    /// # Errors
    /// [Error::MalformedHeaderVersion] if the text is not `GSF<tag>vMAJOR.MINOR`.
    pub fn decode(dat: &[u8]) -> Result<Self> {
        let version = trim_nul(dat);
        let (version_major, version_minor) = parse_version(&version)?;
        Ok(Header {
            version,
            version_major,
            version_minor,
        })
    }
}

/// Split `GSF-v03.07` style text into its major and minor numbers.
///
/// There must be exactly one `v`; the text in front of it must start with `GSF`.
///
/// # Errors
/// [Error::MalformedHeaderVersion] if `version` does not match.
pub fn parse_version(version: &str) -> Result<(u32, u32)> {
    let malformed = || Error::MalformedHeaderVersion(version.to_string());

    let mut parts = version.split('v');
    let (Some(tag), Some(numbers), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    if !tag.starts_with("GSF") {
        return Err(malformed());
    }
    let (major, minor) = numbers.split_once('.').ok_or_else(malformed)?;

    Ok((
        parse_number(major).ok_or_else(malformed)?,
        parse_number(minor).ok_or_else(malformed)?,
    ))
}

// Zero padded decimal; all zeros is 0.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = s.trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"GSFv03.02\0\0", 3, 2; "padded")]
    #[test_case(b"GSFv00.07", 0, 7; "zero major")]
    #[test_case(b"GSF-v01.10\0\0", 1, 10; "dash tag")]
    #[test_case(b"GSF-v02.09\0\0", 2, 9; "single digit minor")]
    #[test_case(b"GSF-v03.00", 3, 0; "zero minor")]
    fn decode_version(dat: &[u8], major: u32, minor: u32) {
        let header = Header::decode(dat).unwrap();
        assert_eq!(header.version_major, major);
        assert_eq!(header.version_minor, minor);
        assert!(!header.version.ends_with('\0'));
    }

    #[test_case(b"HSF-v02.09\0\0"; "wrong product")]
    #[test_case(b"GSF-v02-09\0\0"; "dash separator")]
    #[test_case(b"GSF-02.09"; "no v")]
    #[test_case(b"GSFvv02.09"; "two v")]
    #[test_case(b"GSF-v.09"; "empty major")]
    #[test_case(b"GSF-v02."; "empty minor")]
    #[test_case(b"GSF-v0x.09"; "not a digit")]
    #[test_case(b""; "empty")]
    fn malformed_version(dat: &[u8]) {
        let err = Header::decode(dat).unwrap_err();
        assert!(matches!(err, Error::MalformedHeaderVersion(_)), "{err:?}");
    }
}
