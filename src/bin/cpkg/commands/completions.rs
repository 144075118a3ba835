//! `completions` command
//!
//! Generates shell completions for various shells.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs};

pub fn execute(args: &CompletionsArgs, bin_name: &str) -> Result<()> {
    let mut cmd = Cli::command();

    generate(args.shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
