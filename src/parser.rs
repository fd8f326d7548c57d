use std::collections::HashMap;

use log::{debug, trace};

use crate::block::Block;
use crate::container::Container;
use crate::error::{Error, Result};
use crate::reader::{advance, offset_from, Reader};
use crate::records::{
    tag_to_string, BlockDescriptor, InfoRecord, ResourceHeader, DESCRIPTOR_SIZE, HEADER_SIZE,
    INFO_RECORD_SIZE, LENGTH_PREFIX_SIZE,
};

/// Upper bound on descriptor groups; real files stay well below this
pub const MAX_BLOCK_COUNT: usize = 1000;

/// Knobs for a single decode pass
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Reject containers declaring more descriptor groups than this
    pub max_blocks: usize,
    /// Replace invalid UTF-8 in the filename table instead of failing
    pub lossy_filenames: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_blocks: MAX_BLOCK_COUNT,
            lossy_filenames: false,
        }
    }
}

/// Decode a whole container buffer with default options
pub fn decode(data: &[u8]) -> Result<Container> {
    decode_with(data, &DecodeOptions::default())
}

/// Decode a whole container buffer
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Container> {
    let reader = Reader::new(data);
    let header = read_header(&reader)?;

    let info_offset = header.info_offset as usize;
    let data_offset = header.data_offset as usize;

    let available = reader.len();
    let list = InfoRecord::read(&reader, advance(info_offset, HEADER_SIZE, available)?)?;
    trace!("block info list: {:?}", list);
    let list_anchor = offset_from(info_offset, list.offset, available)?;

    let stored = reader.u32(list_anchor)?;
    let count = u64::from(stored) + 1;
    debug!("block_count={} at offset {}", count, list_anchor);
    if count > options.max_blocks as u64 {
        return Err(Error::BlockCountExceeded {
            count: usize::try_from(count).unwrap_or(usize::MAX),
            limit: options.max_blocks,
        });
    }

    let mut blocks = Vec::new();
    // Same-named groups continue the index of the previous group
    let mut next_index: HashMap<[u8; 4], u64> = HashMap::new();
    // Payload bytes copied so far; never more than the input holds
    let mut copied = 0usize;
    let mut tail = 0usize;
    let mut bid_cursor = advance(list_anchor, LENGTH_PREFIX_SIZE, available)?;

    for i in 0..count {
        let descriptor = BlockDescriptor::read(&reader, bid_cursor)?;
        let name = tag_to_string(&descriptor.name);
        debug!(
            "descriptor {}: '{}' x{} at {}",
            i,
            name,
            descriptor.instances(),
            bid_cursor
        );
        let base = next_index.get(&descriptor.name).copied().unwrap_or(0);

        let mut binfo_cursor = offset_from(list_anchor, descriptor.offset, available)?;
        for bidx in 0..=descriptor.count {
            let entry = InfoRecord::read(&reader, binfo_cursor)?;
            let index = u32::try_from(base + u64::from(bidx)).map_err(|_| Error::Truncated {
                offset: binfo_cursor,
                needed: INFO_RECORD_SIZE,
                available: available.saturating_sub(binfo_cursor),
            })?;
            trace!("  {}.{} info: {:?}", name, index, entry);

            let data_cursor = offset_from(data_offset, entry.offset, available)?;
            let length = reader.u32(data_cursor)? as usize;
            let payload_start = advance(data_cursor, LENGTH_PREFIX_SIZE, available)?;
            let payload = reader.slice(payload_start, length)?;

            copied = copied.saturating_add(length);
            if copied > available {
                return Err(Error::PayloadOverrun {
                    offset: binfo_cursor,
                    copied,
                    available,
                });
            }

            let block = Block {
                name: name.clone(),
                index,
                data: payload.to_vec(),
                id_offset: bid_cursor,
                info_offset: binfo_cursor,
                data_offset: data_cursor,
            };
            debug!("{}", block.summary());
            blocks.push(block);

            let info_end = advance(binfo_cursor, INFO_RECORD_SIZE, available)?;
            let data_end = advance(payload_start, length, available)?;
            tail = tail.max(info_end).max(data_end);
            binfo_cursor = info_end;
            next_index.insert(descriptor.name, u64::from(index) + 1);
        }

        bid_cursor = advance(bid_cursor, DESCRIPTOR_SIZE, available)?;
    }

    let filenames = if tail > 0 {
        read_filenames(&reader, tail, options.lossy_filenames)?
    } else {
        Vec::new()
    };

    Ok(Container::new(header, blocks, filenames, tail))
}

/// Read the header at 0 and its copy at `info_offset`; both must match byte for byte
fn read_header(reader: &Reader) -> Result<ResourceHeader> {
    let header = ResourceHeader::read(reader, 0)?;
    let info_offset = header.info_offset as usize;

    let first = reader.slice(0, HEADER_SIZE)?;
    let second = reader.slice(info_offset, HEADER_SIZE)?;
    if first != second {
        return Err(Error::HeaderMismatch {
            offset: info_offset,
        });
    }
    debug!("header validated: {:?}", header);

    // Both declared regions must be present in full
    reader.require(header.data_offset as usize, header.data_size as usize)?;
    reader.require(info_offset, header.info_size as usize)?;

    Ok(header)
}

/// Parse the length-prefixed filename table from `start` to the end of the buffer
pub fn read_filenames(reader: &Reader, start: usize, lossy: bool) -> Result<Vec<String>> {
    debug!(
        "filenames at {}, {} bytes remaining",
        start,
        reader.len().saturating_sub(start)
    );

    let mut names = Vec::new();
    let mut cursor = start;
    while cursor < reader.len() {
        let length = reader.u8(cursor)? as usize;
        let bytes = reader.slice(advance(cursor, 1, reader.len())?, length)?;
        let name = if lossy {
            String::from_utf8_lossy(bytes).into_owned()
        } else {
            String::from_utf8(bytes.to_vec())
                .map_err(|_| Error::InvalidFilename { offset: cursor })?
        };
        trace!("filename at {}: {:?}", cursor, name);
        names.push(name);
        cursor = advance(cursor, 1 + length, reader.len())?;
    }

    Ok(names)
}
