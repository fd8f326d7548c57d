//! Fixed-size big-endian records of the resource container.
//!
//! Layout (all offsets in bytes):
//!
//! - Resource header (32): id(6) version(u16) type(4) creator(4)
//!   info_offset(u32) info_size(u32) data_offset(u32) data_size(u32).
//!   Stored twice, at 0 and at `info_offset`.
//! - Info record (20): flag1(i32) flag2(i32) flag3(i32) offset(u32) size(u32).
//!   Used for the block-info-list header and for every block entry.
//! - Block descriptor (12): name(4) count(u32) offset(u32).

use crate::error::Result;
use crate::reader::Reader;

pub const HEADER_SIZE: usize = 32;
pub const INFO_RECORD_SIZE: usize = 20;
pub const DESCRIPTOR_SIZE: usize = 12;
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Container header, validated against its duplicate copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceHeader {
    pub resource_id: [u8; 6],
    pub version: u16,
    pub resource_type: [u8; 4],
    pub resource_creator: [u8; 4],
    pub info_offset: u32,
    pub info_size: u32,
    pub data_offset: u32,
    pub data_size: u32,
}

impl ResourceHeader {
    pub fn read(reader: &Reader, offset: usize) -> Result<Self> {
        reader.require(offset, HEADER_SIZE)?;
        Ok(Self {
            resource_id: reader.tag(offset)?,
            version: reader.u16(offset + 6)?,
            resource_type: reader.tag(offset + 8)?,
            resource_creator: reader.tag(offset + 12)?,
            info_offset: reader.u32(offset + 16)?,
            info_size: reader.u32(offset + 20)?,
            data_offset: reader.u32(offset + 24)?,
            data_size: reader.u32(offset + 28)?,
        })
    }

    pub fn type_str(&self) -> String {
        tag_to_string(&self.resource_type)
    }

    pub fn creator_str(&self) -> String {
        tag_to_string(&self.resource_creator)
    }

    /// `type:LVIN | creator:LBVW | info@1234`
    pub fn summary(&self) -> String {
        format!(
            "type:{} | creator:{} | info@{:<5}",
            self.type_str(),
            self.creator_str(),
            self.info_offset
        )
    }
}

/// Shared shape of the block-info-list header and each block entry info.
/// The flags are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoRecord {
    pub flags: [i32; 3],
    pub offset: u32,
    pub size: u32,
}

impl InfoRecord {
    pub fn read(reader: &Reader, offset: usize) -> Result<Self> {
        reader.require(offset, INFO_RECORD_SIZE)?;
        Ok(Self {
            flags: [
                reader.i32(offset)?,
                reader.i32(offset + 4)?,
                reader.i32(offset + 8)?,
            ],
            offset: reader.u32(offset + 12)?,
            size: reader.u32(offset + 16)?,
        })
    }
}

/// Introduces `count + 1` same-named blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDescriptor {
    pub name: [u8; 4],
    pub count: u32,
    pub offset: u32,
}

impl BlockDescriptor {
    pub fn read(reader: &Reader, offset: usize) -> Result<Self> {
        reader.require(offset, DESCRIPTOR_SIZE)?;
        Ok(Self {
            name: reader.tag(offset)?,
            count: reader.u32(offset + 4)?,
            offset: reader.u32(offset + 8)?,
        })
    }

    /// Number of indexed instances (the stored count is one less)
    pub fn instances(&self) -> u64 {
        u64::from(self.count) + 1
    }
}

/// Render a 4CC-style tag; non-UTF-8 bytes are replaced
pub fn tag_to_string(tag: &[u8]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}
