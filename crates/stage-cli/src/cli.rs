use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stage_types::{ContentHash, HashAlgorithm};

#[derive(Parser)]
#[command(
    name = "stage",
    about = "Finalize staged web-worker assets and refresh conversion dictionaries",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Hash-rename worker assets and patch the loader and HTML entry
    Finalize(FinalizeArgs),
    /// Download and merge the OpenCC conversion dictionaries
    UpdateDict(UpdateDictArgs),
    /// Print the content hash of files
    Hash(HashArgs),
}

#[derive(Args)]
pub struct FinalizeArgs {
    /// Stage directory (overrides the config file)
    #[arg(long)]
    pub stage_dir: Option<PathBuf>,
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Expected hash of the loader before it is rewritten
    #[arg(long)]
    pub expected_hash: Option<ContentHash>,
}

#[derive(Args)]
pub struct UpdateDictArgs {
    /// Directory the merged dictionaries are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Base URL the source file names are appended to
    #[arg(long)]
    pub base_url: Option<String>,
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct HashArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[arg(short, long, default_value = "blake2b")]
    pub algorithm: HashAlgorithm,
}
