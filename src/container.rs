use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::block::Block;
use crate::error::{Error, Result};
use crate::parser::{decode_with, DecodeOptions};
use crate::records::ResourceHeader;

/// A decoded resource container (vi, ctl, llb)
#[derive(Debug, Clone)]
pub struct Container {
    path: Option<PathBuf>,
    header: ResourceHeader,
    blocks: Vec<Block>,
    filenames: Vec<String>,
    names_offset: usize,
}

impl Container {
    pub(crate) fn new(
        header: ResourceHeader,
        blocks: Vec<Block>,
        filenames: Vec<String>,
        names_offset: usize,
    ) -> Self {
        Self {
            path: None,
            header,
            blocks,
            filenames,
            names_offset,
        }
    }

    /// Read and decode a container from disk
    pub fn open(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(err),
        })?;
        info!("loaded {} ({} bytes)", path.display(), data.len());

        let mut container = decode_with(&data, options)?;
        container.path = Some(path.to_path_buf());
        Ok(container)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn header(&self) -> &ResourceHeader {
        &self.header
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    /// Absolute offset where the filename table starts
    pub fn names_offset(&self) -> usize {
        self.names_offset
    }

    /// Look up a block by name.
    ///
    /// With `index == None` the first block carrying `name` is returned in
    /// file order, whatever its index. With `Some(i)` only the block whose
    /// index is exactly `i` matches.
    pub fn get_block(&self, name: &str, index: Option<u32>) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.name == name && index.map_or(true, |i| b.index == i))
    }

    pub fn get_block_data(&self, name: &str, index: Option<u32>) -> Option<&[u8]> {
        self.get_block(name, index).map(|b| b.data.as_slice())
    }

    /// All `(name, index)` pairs in file order
    pub fn block_names(&self) -> Vec<(&str, u32)> {
        self.blocks
            .iter()
            .map(|b| (b.name.as_str(), b.index))
            .collect()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        write!(f, "Container('{}' blocks: {})", path, self.blocks.len())
    }
}
