//! `plan` command

use anyhow::Result;

use crate::cli::PlanArgs;
use crate::RunContext;
use crtti_pkg::generator::{GenerationPlan, PackageGraph};
use crtti_pkg::packages;

pub fn execute(args: PlanArgs, ctx: &RunContext) -> Result<()> {
    let package = packages::get_package(&ctx.package, &ctx.config.naming)?;
    let graph = PackageGraph::flatten(&package)?;

    let os = args.os.as_deref().unwrap_or(std::env::consts::OS);
    let plan = GenerationPlan::new(&package, &graph, os);

    println!("{}", plan.to_json()?);
    Ok(())
}
