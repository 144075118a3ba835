//! Generator entry point for the crtti family.
//!
//! Built twice, as `crtti` and `crttr`; the name each binary was built as
//! picks the package unless `--package` says otherwise.

use anyhow::Result;
use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use crtti_pkg::generator::GraphError;
use crtti_pkg::packages::{self, UnknownPackageError};
use crtti_pkg::util::config::Config;

/// Everything a command needs besides its own arguments.
pub struct RunContext {
    /// Name this binary was built as
    pub bin_name: String,

    /// Package to compose
    pub package: String,

    pub config: Config,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = help(&e) {
            eprintln!("help: {}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::new(format!(
        "crtti_pkg={level},crtti={level},crttr={level}"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Fixed at build time, so renamed copies and symlinks keep their package.
    let bin_name = env!("CARGO_BIN_NAME").to_string();

    if let Some(Commands::Completions(args)) = &cli.command {
        return commands::completions::execute(args, &bin_name);
    }

    let package = select_package(cli.package.as_deref(), &bin_name)?;
    let cwd = std::env::current_dir()?;
    let config = Config::discover(&cwd, cli.config.as_deref())?;

    let ctx = RunContext {
        bin_name,
        package,
        config,
    };

    match cli.command {
        None => commands::generate::execute(Default::default(), &ctx),
        Some(Commands::Generate(args)) => commands::generate::execute(args, &ctx),
        Some(Commands::Tree(args)) => commands::tree::execute(args, &ctx),
        Some(Commands::Plan(args)) => commands::plan::execute(args, &ctx),
        Some(Commands::Completions(_)) => Ok(()),
    }
}

fn select_package(explicit: Option<&str>, bin_name: &str) -> Result<String> {
    let name = explicit.unwrap_or(bin_name);
    packages::composer(name)?;
    Ok(name.to_string())
}

/// Help text of the first diagnostic in the error chain.
fn help(err: &anyhow::Error) -> Option<String> {
    err.chain().find_map(|cause| {
        let diagnostic: &dyn Diagnostic = if let Some(e) = cause.downcast_ref::<UnknownPackageError>() {
            e
        } else if let Some(e) = cause.downcast_ref::<GraphError>() {
            e
        } else {
            return None;
        };
        diagnostic.help().map(|help| help.to_string())
    })
}
