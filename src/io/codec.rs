//! Little-endian primitives shared by the map file format and element payloads

use crate::io::error::{Result, format_error};

/// Append-only little-endian encoder over a byte buffer
#[derive(Debug)]
pub struct ByteWriter<'a> {
    out: &'a mut Vec<u8>,
}

impl<'a> ByteWriter<'a> {
    /// Wrap `out`; writes append to its end
    pub const fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out }
    }

    /// Append a single byte
    pub fn put_u8(&mut self, value: u8) {
        self.out.push(value);
    }

    /// Append a `u16`
    pub fn put_u16(&mut self, value: u16) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a `u32`
    pub fn put_u32(&mut self, value: u32) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a `u64`
    pub fn put_u64(&mut self, value: u64) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    /// Append raw bytes
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Bytes written so far, including anything already in the buffer
    pub const fn len(&self) -> usize {
        self.out.len()
    }

    /// Whether the underlying buffer is empty
    pub const fn is_empty(&self) -> bool {
        self.out.is_empty()
    }
}

/// Bounds-checked little-endian decoder over a byte slice
///
/// Every read that would run past the end fails with a format error naming
/// the field being read.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading at the beginning of `bytes`
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Offset of the next unread byte
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes
    pub const fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    /// Take the next `len` bytes
    ///
    /// # Errors
    ///
    /// Returns a format error if fewer than `len` bytes remain
    pub fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8]> {
        let slice = self
            .position
            .checked_add(len)
            .and_then(|end| self.bytes.get(self.position..end))
            .ok_or_else(|| {
                format_error(&format!(
                    "truncated while reading {field} at byte {} (needed {len}, {} left)",
                    self.position,
                    self.remaining()
                ))
            })?;
        self.position += len;
        Ok(slice)
    }

    /// Read a fixed-size array
    ///
    /// # Errors
    ///
    /// Returns a format error if fewer than `N` bytes remain
    pub fn array<const N: usize>(&mut self, field: &str) -> Result<[u8; N]> {
        let slice = self.take(N, field)?;
        let mut array = [0; N];
        array.copy_from_slice(slice);
        Ok(array)
    }

    /// Read a single byte
    ///
    /// # Errors
    ///
    /// Returns a format error if the data is exhausted
    pub fn u8(&mut self, field: &str) -> Result<u8> {
        Ok(u8::from_le_bytes(self.array(field)?))
    }

    /// Read a `u16`
    ///
    /// # Errors
    ///
    /// Returns a format error if fewer than 2 bytes remain
    pub fn u16(&mut self, field: &str) -> Result<u16> {
        Ok(u16::from_le_bytes(self.array(field)?))
    }

    /// Read a `u32`
    ///
    /// # Errors
    ///
    /// Returns a format error if fewer than 4 bytes remain
    pub fn u32(&mut self, field: &str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array(field)?))
    }

    /// Read a `u64`
    ///
    /// # Errors
    ///
    /// Returns a format error if fewer than 8 bytes remain
    pub fn u64(&mut self, field: &str) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array(field)?))
    }

    /// Fail unless every byte has been consumed
    ///
    /// # Errors
    ///
    /// Returns a format error naming the number of trailing bytes
    pub fn finish(&self, context: &str) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(format_error(&format!(
                "{extra} unexpected trailing bytes after {context}"
            ))),
        }
    }
}
