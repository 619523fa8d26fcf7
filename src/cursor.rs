use crate::{Error, Result};

/// Bounds-checked big-endian reader over an immutable byte buffer.
///
/// Every read advances the cursor by the width of the field read. A read that
/// needs more bytes than remain fails with [Error::OutOfBounds] and leaves the
/// cursor where it was.
///
/// # Example
/// ```
/// use gsf::ByteCursor;
///
/// let dat: &[u8] = &[0x00, 0x02, b'a', b'b', 0x00];
/// let mut cursor = ByteCursor::new(dat);
/// let len = cursor.read_u16().unwrap();
/// assert_eq!(cursor.read_fixed_string(len as usize + 1).unwrap(), "ab");
/// assert_eq!(cursor.remaining(), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        ByteCursor { buf, offset: 0 }
    }

    /// Current offset from the start of the buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read the next `n` bytes as a view into the underlying buffer.
    ///
    /// # Errors
    /// [Error::OutOfBounds] if fewer than `n` bytes remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::OutOfBounds {
                offset: self.offset,
                wanted: n,
                available: self.remaining(),
            });
        }
        let start = self.offset;
        self.offset += n;
        Ok(&self.buf[start..self.offset])
    }

    /// Read a fixed size array.
    ///
    /// # Errors
    /// [Error::OutOfBounds] if fewer than `N` bytes remain.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Advance past `n` bytes without decoding them.
    ///
    /// # Errors
    /// [Error::OutOfBounds] if fewer than `n` bytes remain.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// Read an `n` byte text field, dropping trailing NUL padding.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; sensor text fields are
    /// frequently padded with garbage.
    ///
    /// # Errors
    /// [Error::OutOfBounds] if fewer than `n` bytes remain.
    pub fn read_fixed_string(&mut self, n: usize) -> Result<String> {
        let bytes = self.read_bytes(n)?;
        Ok(trim_nul(bytes))
    }

    /// Byte at the absolute offset `offset` without moving the cursor.
    ///
    /// # Errors
    /// [Error::OutOfBounds] if `offset` is past the end of the buffer.
    pub fn peek_byte_at(&self, offset: usize) -> Result<u8> {
        self.buf.get(offset).copied().ok_or(Error::OutOfBounds {
            offset,
            wanted: 1,
            available: 0,
        })
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Read a 3 byte unsigned integer, i.e., a `u32` with a zero high byte.
    pub fn read_u24(&mut self) -> Result<u32> {
        let [a, b, c] = self.read_array()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }
}

pub(crate) fn trim_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |idx| idx + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
