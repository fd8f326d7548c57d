use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use lvrsrc::processor::{process_file, ProcessSettings};
use lvrsrc::DecodeOptions;

/// Extract the blocks and filename table of a LabVIEW resource container
#[derive(Debug, Parser)]
#[command(name = "lvrsrc", version, about)]
struct Args {
    /// Container to decode (.vi, .ctl, .llb)
    input: PathBuf,

    /// Export directory [default: <input dir>/<stem>_<ext>]
    output_dir: Option<PathBuf>,

    /// List the container without exporting anything
    #[arg(short, long)]
    list_only: bool,

    /// Also write a text dump of header, blocks and filenames
    #[arg(short, long)]
    dump: bool,

    /// Print the listing as JSON
    #[arg(long)]
    json: bool,

    /// Replace invalid UTF-8 in filenames instead of failing
    #[arg(long)]
    lossy_names: bool,

    /// Hexdump lines to preview per block
    #[arg(short, long, default_value_t = 0)]
    preview: usize,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn settings(&self) -> ProcessSettings {
        ProcessSettings {
            decode: DecodeOptions {
                lossy_filenames: self.lossy_names,
                ..Default::default()
            },
            list_only: self.list_only,
            dump: self.dump,
            json: self.json,
            preview_lines: self.preview,
        }
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(log_level(args.verbose))
        .parse_default_env()
        .init();

    process_file(&args.input, args.output_dir.as_deref(), &args.settings())
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    Ok(())
}
