use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "trufos",
    about = "Trufos collection store - load, migrate and bootstrap collections",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the default collection in a directory
    Init(DirArgs),
    /// Load a collection, migrating it if needed, and print its tree
    Load(DirArgs),
    /// Load a collection and re-save every object at the current version
    Migrate(DirArgs),
}

#[derive(Args)]
pub struct DirArgs {
    /// Collection directory. Falls back to `TRUFOS_COLLECTION_DIR`, then
    /// the settings file.
    pub dir: Option<PathBuf>,
}
