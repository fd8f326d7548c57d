//! Synthetic container builder shared by the unit tests.

use crate::records::{DESCRIPTOR_SIZE, HEADER_SIZE, INFO_RECORD_SIZE, LENGTH_PREFIX_SIZE};

/// Offsets of an assembled fixture
pub struct Built {
    pub bytes: Vec<u8>,
    pub info_offset: usize,
    pub data_offset: usize,
    pub names_offset: usize,
}

pub struct Fixture {
    id: [u8; 6],
    version: u16,
    resource_type: [u8; 4],
    creator: [u8; 4],
    groups: Vec<([u8; 4], Vec<Vec<u8>>)>,
    filenames: Vec<Vec<u8>>,
    data_last: bool,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            id: *b"RSRC\x00\x00",
            version: 1,
            resource_type: *b"LVIN",
            creator: *b"LBVW",
            groups: Vec::new(),
            filenames: Vec::new(),
            data_last: false,
        }
    }

    pub fn resource_type(mut self, tag: &[u8; 4]) -> Self {
        self.resource_type = *tag;
        self
    }

    pub fn block(mut self, name: &[u8; 4], payloads: &[&[u8]]) -> Self {
        self.groups
            .push((*name, payloads.iter().map(|p| p.to_vec()).collect()));
        self
    }

    pub fn filename(mut self, name: &[u8]) -> Self {
        self.filenames.push(name.to_vec());
        self
    }

    /// Place the data region after the info region instead of before it
    pub fn data_last(mut self) -> Self {
        self.data_last = true;
        self
    }

    fn header(
        &self,
        info_offset: usize,
        info_size: usize,
        data_offset: usize,
        data_size: usize,
    ) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.version.to_be_bytes());
        out.extend_from_slice(&self.resource_type);
        out.extend_from_slice(&self.creator);
        for v in [info_offset, info_size, data_offset, data_size] {
            out.extend_from_slice(&(v as u32).to_be_bytes());
        }
        out
    }

    fn data_region(&self) -> (Vec<u8>, Vec<u32>) {
        let mut data = Vec::new();
        let mut offsets = Vec::new();
        for (_, payloads) in &self.groups {
            for payload in payloads {
                offsets.push(data.len() as u32);
                data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
                data.extend_from_slice(payload);
            }
        }
        (data, offsets)
    }

    /// Block-info list (count, descriptors, entries), excluding the header copy
    fn info_tables(&self, data_offsets: &[u32]) -> Vec<u8> {
        let mut out = Vec::new();
        let list_offset = (HEADER_SIZE + INFO_RECORD_SIZE) as u32;

        // block-info-list header
        for flag in [0i32, 0, 0] {
            out.extend_from_slice(&flag.to_be_bytes());
        }
        out.extend_from_slice(&list_offset.to_be_bytes());
        out.extend_from_slice(&0u32.to_be_bytes());

        out.extend_from_slice(&(self.groups.len() as u32).wrapping_sub(1).to_be_bytes());

        let entries_start = LENGTH_PREFIX_SIZE + DESCRIPTOR_SIZE * self.groups.len();
        let mut entry_index = 0;
        for (name, payloads) in &self.groups {
            out.extend_from_slice(name);
            out.extend_from_slice(&(payloads.len() as u32).wrapping_sub(1).to_be_bytes());
            let rel = entries_start + INFO_RECORD_SIZE * entry_index;
            out.extend_from_slice(&(rel as u32).to_be_bytes());
            entry_index += payloads.len();
        }

        let mut cursor = 0;
        for (_, payloads) in &self.groups {
            for payload in payloads {
                for flag in [-1i32, 0, 0] {
                    out.extend_from_slice(&flag.to_be_bytes());
                }
                out.extend_from_slice(&data_offsets[cursor].to_be_bytes());
                out.extend_from_slice(&((payload.len() + LENGTH_PREFIX_SIZE) as u32).to_be_bytes());
                cursor += 1;
            }
        }
        out
    }

    fn name_table(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for name in &self.filenames {
            out.push(name.len() as u8);
            out.extend_from_slice(name);
        }
        out
    }

    pub fn build(&self) -> Built {
        let (data, data_offsets) = self.data_region();
        let tables = self.info_tables(&data_offsets);
        let names = self.name_table();

        let (info_offset, data_offset, names_offset) = if self.data_last {
            let info_offset = HEADER_SIZE;
            let data_offset = info_offset + HEADER_SIZE + tables.len();
            (info_offset, data_offset, data_offset + data.len())
        } else {
            let data_offset = HEADER_SIZE;
            let info_offset = data_offset + data.len();
            (info_offset, data_offset, info_offset + HEADER_SIZE + tables.len())
        };
        let total = names_offset + names.len();
        let info_size = if self.data_last {
            HEADER_SIZE + tables.len()
        } else {
            total - info_offset
        };
        let header = self.header(info_offset, info_size, data_offset, data.len());

        let mut bytes = header.clone();
        if self.data_last {
            bytes.extend_from_slice(&header);
            bytes.extend_from_slice(&tables);
            bytes.extend_from_slice(&data);
        } else {
            bytes.extend_from_slice(&data);
            bytes.extend_from_slice(&header);
            bytes.extend_from_slice(&tables);
        }
        bytes.extend_from_slice(&names);
        assert_eq!(bytes.len(), total);

        Built {
            bytes,
            info_offset,
            data_offset,
            names_offset,
        }
    }
}

/// The single-block container used throughout the tests:
/// one `PRT ` block holding DEADBEEF and a filename table with "abc".
pub fn sample() -> Built {
    Fixture::new()
        .block(b"PRT ", &[&[0xde, 0xad, 0xbe, 0xef]])
        .filename(b"abc")
        .build()
}
