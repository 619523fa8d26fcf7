use serde::{Deserialize, Serialize};

use crate::cursor::{trim_nul, ByteCursor};
use crate::time::Timestamp;
use crate::Result;

/// Processing parameters record (type 4).
///
/// Parameters are stored as a count followed by length-prefixed texts. The stored
/// length includes the text's NUL terminator, so each entry occupies `2 + len`
/// bytes and carries `len - 1` bytes of text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProcessingParameters {
    pub time: Timestamp,
    /// Parameter texts in file order, usually of the form `KEY=VALUE`.
    pub params: Vec<String>,
}

impl ProcessingParameters {
    /// Decode from a processing parameters record payload.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if any parameter runs past the payload.
    pub fn decode(dat: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(dat);
        let time = Timestamp::read(&mut cursor)?;
        let num_params = cursor.read_u16()?;

        let mut params = Vec::with_capacity(num_params as usize);
        for _ in 0..num_params {
            let len = cursor.read_u16()? as usize;
            let text = cursor.read_bytes(len)?;
            params.push(trim_nul(&text[..len.saturating_sub(1)]));
        }

        Ok(ProcessingParameters { time, params })
    }

    /// Value of the first `KEY=VALUE` parameter whose key is `key`.
    ///
    /// # Example
    /// ```
    /// use gsf::records::ProcessingParameters;
    /// use gsf::Timestamp;
    ///
    /// let params = ProcessingParameters {
    ///     time: Timestamp::default(),
    ///     params: vec!["DEPTH_CALCULATION=CORRECTED".to_string()],
    /// };
    /// assert_eq!(params.get("DEPTH_CALCULATION"), Some("CORRECTED"));
    /// assert_eq!(params.get("ROLL_COMPENSATED"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find_map(|param| {
            let (k, v) = param.split_once('=')?;
            (k.trim() == key).then(|| v.trim())
        })
    }
}
