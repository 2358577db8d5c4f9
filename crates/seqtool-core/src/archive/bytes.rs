//! Bounds-checked byte reading for archive tables.
//!
//! Every read either returns the requested bytes or a `Decode` error naming
//! the offending offset; a truncated archive never panics.

use encoding_rs::SHIFT_JIS;
use tracing::debug;

use crate::error::{Error, Result};

/// A position-tracking little-endian reader over an archive buffer.
///
/// # Example
///
/// ```
/// use seqtool_core::archive::ByteBuffer;
///
/// let data = [0x03, 0x00, 0x00, 0x00, 0x40, 0x1f];
/// let mut buf = ByteBuffer::new(&data);
///
/// assert_eq!(buf.read_i32().unwrap(), 3);
/// assert_eq!(buf.read_u16().unwrap(), 0x1f40);
/// assert!(buf.read_u8().is_err());
/// ```
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at `offset`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        let mut buf = Self::new(data);
        buf.set_position(offset)?;
        Ok(buf)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Sets the current read position.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is beyond the buffer length.
    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::decode(
                pos,
                format!("position exceeds buffer length {}", self.data.len()),
            ));
        }
        self.pos = pos;
        Ok(())
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        let pos = self
            .pos
            .checked_add(count)
            .ok_or_else(|| Error::decode(self.pos, "position overflow"))?;
        self.set_position(pos)
    }

    /// Returns `len` bytes at `offset` without moving the cursor.
    pub fn slice_at(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| Error::decode(offset, "offset overflow"))?;

        if end > self.data.len() {
            return Err(Error::decode(
                offset,
                format!(
                    "range {}..{} exceeds buffer length {}",
                    offset,
                    end,
                    self.data.len()
                ),
            ));
        }

        Ok(&self.data[offset..end])
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.slice_at(self.pos, count)?;
        self.pos += count;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a null-padded name of `max_len` bytes.
    pub fn read_padded_name(&mut self, max_len: usize) -> Result<String> {
        let bytes = self.read_bytes(max_len)?;
        Ok(decode_padded_name(bytes))
    }
}

/// Decodes a null-padded name field, stopping at the first null byte.
///
/// Names are ASCII in practice; Shift-JIS is a superset for that range and
/// keeps stray high bytes readable in log output.
pub fn decode_padded_name(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let (decoded, _, had_errors) = SHIFT_JIS.decode(&bytes[..len]);
    if had_errors {
        debug!("Name field had undecodable bytes: {:?}", &bytes[..len]);
    }
    decoded.into_owned()
}
