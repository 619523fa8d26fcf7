use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::Result;

/// Fixed-point decoding parameters for one ping array subrecord.
///
/// A stored sample `raw` decodes to `raw / multiplier - offset`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFactor {
    /// Subrecord id this entry applies to
    pub subrecord: u8,
    /// Size in bytes of each stored sample, from the high nibble of the compression flags.
    pub width: u8,
    pub multiplier: u32,
    pub offset: i32,
}

impl ScaleFactor {
    /// Size of an encoded table entry.
    pub const LEN: usize = 12;

    fn read(cursor: &mut ByteCursor) -> Result<Self> {
        let subrecord = cursor.read_u8()?;
        let flags = cursor.read_u8()?;
        cursor.skip(2)?;
        Ok(ScaleFactor {
            subrecord,
            width: (flags & 0xf0) >> 4,
            multiplier: cursor.read_u32()?,
            offset: cursor.read_i32()?,
        })
    }

    /// Reconstruct a real value from a stored sample.
    #[must_use]
    pub fn apply(&self, raw: f64) -> f64 {
        raw / f64::from(self.multiplier) - f64::from(self.offset)
    }
}

/// Scale factors for the arrays of a single ping, keyed by subrecord id.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ScaleFactorTable {
    entries: BTreeMap<u8, ScaleFactor>,
}

impl ScaleFactorTable {
    /// Decode a scale factors subrecord body: a `u32` count followed by that many
    /// 12 byte entries.
    ///
    /// If an id occurs more than once the first entry wins.
    ///
    /// # Errors
    /// [crate::Error::OutOfBounds] if the body holds fewer entries than declared.
    pub fn decode(body: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(body);
        let num_factors = cursor.read_u32()?;

        let mut entries = BTreeMap::new();
        for _ in 0..num_factors {
            let factor = ScaleFactor::read(&mut cursor)?;
            entries.entry(factor.subrecord).or_insert(factor);
        }
        Ok(ScaleFactorTable { entries })
    }

    #[must_use]
    pub fn get(&self, subrecord: u8) -> Option<&ScaleFactor> {
        self.entries.get(&subrecord)
    }

    pub fn insert(&mut self, factor: ScaleFactor) {
        self.entries.insert(factor.subrecord, factor);
    }

    /// Entries in subrecord id order.
    pub fn iter(&self) -> impl Iterator<Item = &ScaleFactor> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn entry(id: u8, flags: u8, multiplier: u32, offset: i32) -> Vec<u8> {
        let mut dat = vec![id, flags, 0, 0];
        dat.extend(multiplier.to_be_bytes());
        dat.extend(offset.to_be_bytes());
        dat
    }

    #[test]
    fn decode_table() {
        let mut body = 2u32.to_be_bytes().to_vec();
        body.extend(entry(1, 0x20, 100, 0));
        body.extend(entry(4, 0x40, 10_000, -5));
        let table = ScaleFactorTable::decode(&body).unwrap();

        assert_eq!(table.len(), 2);
        let depth = table.get(1).unwrap();
        assert_eq!(depth.width, 2);
        assert_eq!(depth.multiplier, 100);
        assert_eq!(depth.offset, 0);
        let travel_time = table.get(4).unwrap();
        assert_eq!(travel_time.width, 4);
        assert_eq!(travel_time.offset, -5);
        assert!(table.get(2).is_none());
    }

    #[test]
    fn low_nibble_is_ignored() {
        let mut body = 1u32.to_be_bytes().to_vec();
        body.extend(entry(9, 0x1f, 1, 0));
        let table = ScaleFactorTable::decode(&body).unwrap();
        assert_eq!(table.get(9).unwrap().width, 1);
    }

    #[test]
    fn first_duplicate_wins() {
        let mut body = 2u32.to_be_bytes().to_vec();
        body.extend(entry(1, 0x20, 100, 0));
        body.extend(entry(1, 0x20, 1000, 0));
        let table = ScaleFactorTable::decode(&body).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(1).unwrap().multiplier, 100);
    }

    #[test]
    fn fewer_entries_than_declared() {
        let mut body = 3u32.to_be_bytes().to_vec();
        body.extend(entry(1, 0x20, 100, 0));
        let err = ScaleFactorTable::decode(&body).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }), "{err:?}");
    }

    #[test]
    fn apply() {
        let factor = ScaleFactor {
            subrecord: 1,
            width: 2,
            multiplier: 100,
            offset: 0,
        };
        assert!((factor.apply(12345.0) - 123.45).abs() < 1e-9);

        let factor = ScaleFactor { offset: 50, ..factor };
        assert!((factor.apply(12345.0) - 73.45).abs() < 1e-9);
    }
}
