use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::time::Timestamp;
use crate::Result;

/// Free text comment record (type 6).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub time: Timestamp,
    pub comment: String,
}

impl Comment {
    /// Decode from a comment record payload.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if the declared text length runs past the payload.
    pub fn decode(dat: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(dat);
        let time = Timestamp::read(&mut cursor)?;
        let len = cursor.read_u32()? as usize;
        let comment = cursor.read_fixed_string(len)?;
        Ok(Comment { time, comment })
    }
}

/// Processing history record (type 7).
///
/// Each text field is prefixed by a 2 byte length. A zero length field has no
/// text bytes following it and decodes as an empty string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub time: Timestamp,
    /// Name of the host the processing ran on
    pub name: String,
    pub operator: String,
    pub command: String,
    pub comment: String,
}

impl History {
    /// Decode from a history record payload.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if any text runs past the payload.
    pub fn decode(dat: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(dat);
        let time = Timestamp::read(&mut cursor)?;
        Ok(History {
            time,
            name: read_text(&mut cursor)?,
            operator: read_text(&mut cursor)?,
            command: read_text(&mut cursor)?,
            comment: read_text(&mut cursor)?,
        })
    }
}

fn read_text(cursor: &mut ByteCursor) -> Result<String> {
    let len = cursor.read_u16()? as usize;
    cursor.read_fixed_string(len)
}
