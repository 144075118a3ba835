//! `generate` command

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::GenerateArgs;
use crate::RunContext;
use crtti_pkg::generator::{self, DryRunGenerator};
use crtti_pkg::packages;

pub fn execute(args: GenerateArgs, ctx: &RunContext) -> Result<()> {
    let compose = packages::composer(&ctx.package)?;

    let mut backend = match args.os {
        Some(os) => DryRunGenerator::new(os),
        None => DryRunGenerator::for_host(),
    };

    debug!("{} generating `{}`", ctx.bin_name, ctx.package);
    let ran = generator::run(&mut backend, &ctx.config.generate, || compose(&ctx.config.naming))
        .with_context(|| format!("failed to generate `{}`", ctx.package))?;
    if !ran {
        return Ok(());
    }

    for step in backend.steps() {
        println!("{:>14} {}", "step", step);
    }

    if let Some(plan) = backend.plan() {
        for pkg in &plan.packages {
            let outputs: Vec<&str> = pkg.targets.iter().map(|t| t.output.as_str()).collect();
            println!("{:>14} {} [{}]", pkg.name, pkg.root, outputs.join(", "));
        }
        println!(
            "{:>14} {} ({} packages, fingerprint {})",
            "done",
            plan.root,
            plan.packages.len(),
            &plan.fingerprint[..16]
        );
    }

    Ok(())
}
