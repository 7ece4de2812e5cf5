use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Geomark - canonical GeoJSON feature tooling
#[derive(Parser, Debug)]
#[command(name = "geomark")]
#[command(about = "Validate, sanitize, and derive data from GeoJSON feature payloads", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a configuration file (defaults to ./geomark.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a raw feature payload and print its canonical form
    Validate(FileArgs),

    /// Derive the representative coordinate of a feature payload
    Centroid(FileArgs),

    /// Convert a feature payload to its schema.org geo projection
    Schema(FileArgs),

    /// Import a file of record drafts into an in-memory store, all-or-nothing
    Import(FileArgs),
}

#[derive(Parser, Debug)]
pub struct FileArgs {
    /// Input file, or '-' for standard input
    pub file: PathBuf,
}
