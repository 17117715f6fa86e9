// ABOUTME: Command-line interface definition and argument parsing
// ABOUTME: Handles the fetch, info and config commands and their options

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apod-wallpaper")]
#[command(about = "Save NASA's Astronomy Picture of the Day as a wallpaper image")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download today's picture (default command)
    Fetch(FetchArgs),
    /// Show today's entry without downloading the image
    Info,
    /// Show current configuration
    Config(ConfigArgs),
}

#[derive(Args, Clone, Default)]
pub struct FetchArgs {
    /// Output file for the image; the extension selects the format
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Download the standard-definition image instead of the HD one
    #[arg(long)]
    pub sd: bool,

    /// Fetch the metadata only and show what would be downloaded
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Show configuration file path
    #[arg(long)]
    pub path: bool,
}
