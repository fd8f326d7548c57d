use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;

use crate::block::Block;
use crate::container::Container;
use crate::display::{dump_text, hexdump_preview};
use crate::error::Result;
use crate::kind::{detect_kind_from_tag, is_resource_container, kind_name, ContainerKind};
use crate::parser::DecodeOptions;

/// Name of the filename-list file written next to exported blocks
pub const FILENAMES_FILE: &str = "_filenames.txt";

/// What to do with a decoded container
#[derive(Debug, Clone, Default)]
pub struct ProcessSettings {
    pub decode: DecodeOptions,
    /// Print the listing only, write nothing
    pub list_only: bool,
    /// Also write the `[header]/[blocks]/[filenames]` text dump
    pub dump: bool,
    /// Print a JSON summary instead of the text listing
    pub json: bool,
    /// Hexdump lines shown per block in the listing
    pub preview_lines: usize,
}

/// JSON view of a decoded container
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub path: Option<String>,
    pub kind: ContainerKind,
    pub id: String,
    pub version: u16,
    pub resource_type: String,
    pub creator: String,
    pub info_offset: u32,
    pub data_offset: u32,
    pub blocks: Vec<BlockSummary<'a>>,
    pub filenames: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct BlockSummary<'a> {
    #[serde(flatten)]
    pub block: &'a Block,
    pub size: usize,
}

impl<'a> Summary<'a> {
    pub fn new(container: &'a Container, kind: ContainerKind) -> Self {
        let header = container.header();
        Self {
            path: container.path().map(|p| p.display().to_string()),
            kind,
            id: String::from_utf8_lossy(&header.resource_id).into_owned(),
            version: header.version,
            resource_type: header.type_str(),
            creator: header.creator_str(),
            info_offset: header.info_offset,
            data_offset: header.data_offset,
            blocks: container
                .blocks()
                .iter()
                .map(|block| BlockSummary {
                    block,
                    size: block.size(),
                })
                .collect(),
            filenames: container.filenames(),
        }
    }
}

/// Default export directory: `<parent>/<stem>_<ext>` next to the input
pub fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("container");
    let ext = input.extension().and_then(|s| s.to_str()).unwrap_or("");
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{}_{}", stem, ext))
}

/// Block names are raw tags; keep them from escaping the export directory
fn safe_file_name(block: &Block) -> String {
    block
        .file_name()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}

/// Write every block to `{name}-{index}` and the filename list to `_filenames.txt`
pub fn export_blocks(container: &Container, dest_dir: &Path) -> Result<()> {
    fs::create_dir_all(dest_dir)?;

    for block in container.blocks() {
        let output_path = dest_dir.join(safe_file_name(block));
        let mut out_file = File::create(&output_path)?;
        out_file.write_all(&block.data)?;
    }

    fs::write(
        dest_dir.join(FILENAMES_FILE),
        container.filenames().join("\n"),
    )?;

    info!(
        "exported {} blocks to {}",
        container.blocks().len(),
        dest_dir.display()
    );
    Ok(())
}

/// Write the text dump as `_<dir name>.txt` inside `dest_dir`
pub fn write_dump(container: &Container, dest_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dest_dir)?;
    let dir_name = dest_dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("container");
    let output_path = dest_dir.join(format!("_{}.txt", dir_name));
    fs::write(&output_path, dump_text(container))?;
    Ok(output_path)
}

/// Print the console listing for a decoded container
pub fn print_listing(container: &Container, kind: ContainerKind, preview_lines: usize) {
    let header = container.header();
    println!(
        "[{}] {} ({} blocks, {} filenames)",
        kind_name(&kind),
        container
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string()),
        container.blocks().len(),
        container.filenames().len()
    );
    println!("  {}", header.summary());

    for block in container.blocks() {
        println!("  {}", block.summary());
        if preview_lines > 0 {
            print!("{}", hexdump_preview(&block.data, preview_lines, "  "));
        }
    }

    if !container.filenames().is_empty() {
        println!("  Filenames:");
        for name in container.filenames() {
            println!("    {}", name);
        }
    }
}

/// Decode a container file, list it and export it according to `settings`
pub fn process_file(
    input: &Path,
    output_dir: Option<&Path>,
    settings: &ProcessSettings,
) -> Result<Container> {
    let container = Container::open(input, &settings.decode)?;

    let file_name = input.file_name().and_then(|s| s.to_str());
    let head = container.header();
    if !is_resource_container(&head.resource_id) {
        warn!(
            "{}: unexpected resource id {:02x?}",
            input.display(),
            head.resource_id
        );
    }
    let kind = detect_kind_from_tag(&head.resource_type, file_name);

    if settings.json {
        let summary = Summary::new(&container, kind);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_listing(&container, kind, settings.preview_lines);
    }

    if settings.list_only {
        return Ok(container);
    }

    let dest_dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_dir(input));
    export_blocks(&container, &dest_dir)?;
    if settings.dump {
        let dump_path = write_dump(&container, &dest_dir)?;
        info!("wrote dump {}", dump_path.display());
    }

    Ok(container)
}
