//! Decoder for LabVIEW resource containers (`.vi`, `.ctl`, `.llb`).
//!
//! The container keeps the classic resource-fork layout: a 32-byte header
//! stored twice, a block-info list of named descriptors, one info record per
//! block instance pointing at a length-prefixed payload in the data region,
//! and a trailing table of length-prefixed filenames.
//!
//! ```no_run
//! use lvrsrc::{Container, DecodeOptions};
//!
//! let container = Container::open("Main.vi", &DecodeOptions::default())?;
//! if let Some(icon) = container.get_block("ICON", None) {
//!     println!("{} bytes", icon.data.len());
//! }
//! # Ok::<(), lvrsrc::Error>(())
//! ```

pub mod block;
pub mod container;
pub mod display;
pub mod error;
pub mod kind;
pub mod parser;
pub mod processor;
pub mod reader;
pub mod records;

#[cfg(test)]
mod testutil;

pub use block::Block;
pub use container::Container;
pub use error::{Error, Result};
pub use kind::{detect_kind, ContainerKind};
pub use parser::{decode, decode_with, DecodeOptions, MAX_BLOCK_COUNT};
pub use records::{BlockDescriptor, InfoRecord, ResourceHeader};
