//! CLI argument definitions for seqtool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use seqtool_core::{DifficultyFilter, IfsToolsExtractor, PartFilter, VgmstreamConverter};

#[derive(Parser)]
#[command(name = "seqtool")]
#[command(about = "Rhythm game chart and keysound converter", version)]
pub struct Args {
    /// PCM-to-WAV converter executable
    #[arg(long, global = true, env = "SEQTOOL_VGMSTREAM", default_value = VgmstreamConverter::DEFAULT_PROGRAM)]
    pub vgmstream: PathBuf,

    /// IFS container unpacker executable
    #[arg(long, global = true, env = "SEQTOOL_IFSTOOLS", default_value = IfsToolsExtractor::DEFAULT_PROGRAM)]
    pub ifstools: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert charts between formats
    Convert(ConvertArgs),
    /// Extract a keysound archive to WAV files and metadata.json
    Vas(VasArgs),
}

#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Input chart file
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Input format (detected from file content when omitted)
    #[arg(long)]
    pub input_format: Option<String>,

    /// Folder holding extracted keysounds and metadata.json
    #[arg(long)]
    pub sound_folder: Option<PathBuf>,

    /// Event stream file for bonus notes
    #[arg(long)]
    pub event_file: Option<PathBuf>,

    /// Per-chart input as PART:DIFF=PATH (repeatable)
    #[arg(long, value_name = "PART:DIFF=PATH")]
    pub input_split: Vec<String>,

    /// Sequence container (IFS file or extracted directory)
    #[arg(long)]
    pub input_ifs_seq: Option<PathBuf>,

    /// BGM container (IFS file or extracted directory)
    #[arg(long)]
    pub input_ifs_bgm: Option<PathBuf>,

    /// Preferred chart format inside the container (sq3 or sq2)
    #[arg(long)]
    pub ifs_target: Option<String>,

    /// Default keysound table for extracted archives
    #[arg(long)]
    pub sound_defaults: Option<PathBuf>,

    /// Output folder
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Output format ("same" keeps the input format)
    #[arg(long)]
    pub output_format: String,

    /// Parts to convert
    #[arg(long, num_args = 1.., default_value = "all")]
    pub parts: Vec<PartFilter>,

    /// Difficulties to convert (labels, min, max or all)
    #[arg(long, num_args = 1.., default_value = "all")]
    pub difficulty: Vec<DifficultyFilter>,

    /// Skip keysound extraction
    #[arg(long)]
    pub no_sounds: bool,

    /// Run every conversion on the calling thread
    #[arg(long)]
    pub single_threaded: bool,

    /// Music id stamped into the output
    #[arg(long)]
    pub music_id: Option<u32>,
}

#[derive(clap::Args)]
pub struct VasArgs {
    /// Keysound archive
    #[arg(short, long)]
    pub input: PathBuf,

    /// Default keysound table (required for drum archives)
    #[arg(short = 'r', long)]
    pub input_fre: Option<PathBuf>,

    /// Output folder (defaults to the archive name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Archive holds guitar keysounds
    #[arg(short, long)]
    pub guitar: bool,

    /// Write sample ids as hex
    #[arg(short, long)]
    pub force_hex: bool,
}
