//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Compose a crtti-family package graph and hand it to the generator
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Package to compose (defaults to the binary name)
    #[arg(short, long, global = true, env = "CPKG_PACKAGE")]
    pub package: Option<String>,

    /// Configuration file (replaces the global and project config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the generator (the default)
    Generate(GenerateArgs),

    /// Display the package graph
    Tree(TreeArgs),

    /// Print the generation plan as JSON
    Plan(PlanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Default)]
pub struct GenerateArgs {
    /// Operating system to compute artifact names for (defaults to host)
    #[arg(long)]
    pub os: Option<String>,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Expand packages that were already shown
    #[arg(long)]
    pub duplicates: bool,

    /// Show the targets of each package
    #[arg(long)]
    pub targets: bool,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Operating system to compute artifact names for (defaults to host)
    #[arg(long)]
    pub os: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
