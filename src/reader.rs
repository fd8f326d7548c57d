use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// Random-access, bounds-checked view over a container buffer.
///
/// Every read is validated against the buffer length so a bad offset or
/// length read from the file turns into `Error::Truncated` instead of a panic.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let truncated = || Error::Truncated {
            offset,
            needed: len,
            available: self.data.len().saturating_sub(offset),
        };
        let end = offset.checked_add(len).ok_or_else(truncated)?;
        self.data.get(offset..end).ok_or_else(truncated)
    }

    /// Fail unless `[offset, offset + len)` lies inside the buffer
    pub fn require(&self, offset: usize, len: usize) -> Result<()> {
        self.slice(offset, len).map(|_| ())
    }

    pub fn u8(&self, offset: usize) -> Result<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn u16(&self, offset: usize) -> Result<u16> {
        Ok(BigEndian::read_u16(self.slice(offset, 2)?))
    }

    pub fn u32(&self, offset: usize) -> Result<u32> {
        Ok(BigEndian::read_u32(self.slice(offset, 4)?))
    }

    pub fn i32(&self, offset: usize) -> Result<i32> {
        Ok(BigEndian::read_i32(self.slice(offset, 4)?))
    }

    /// Read a fixed-size tag such as a 4-byte block name
    pub fn tag<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice(offset, N)?);
        Ok(out)
    }
}

/// Add a file-relative offset to an anchor, reporting overflow as truncation
pub fn offset_from(anchor: usize, relative: u32, available: usize) -> Result<usize> {
    advance(anchor, relative as usize, available)
}

/// `anchor + by`, reporting overflow as truncation
pub fn advance(anchor: usize, by: usize, available: usize) -> Result<usize> {
    anchor.checked_add(by).ok_or(Error::Truncated {
        offset: anchor,
        needed: by,
        available,
    })
}
