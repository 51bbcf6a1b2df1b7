//! # docsync CLI
//!
//! Binary entry point for the `docsync` command-line tool.
//!
//! Its responsibilities are parsing command-line arguments with `clap`,
//! dispatching to the selected command, and translating top-level errors
//! into user-friendly output. The sync logic itself lives in the library
//! crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
