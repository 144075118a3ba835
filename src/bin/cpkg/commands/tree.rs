//! `tree` command

use std::collections::HashSet;

use anyhow::Result;

use crate::cli::TreeArgs;
use crate::RunContext;
use crtti_pkg::core::{Name, Package};
use crtti_pkg::packages;

pub fn execute(args: TreeArgs, ctx: &RunContext) -> Result<()> {
    let package = packages::get_package(&ctx.package, &ctx.config.naming)?;

    let options = TreeOptions {
        max_depth: args.depth.unwrap_or(usize::MAX),
        show_duplicates: args.duplicates,
        show_targets: args.targets,
    };

    let mut seen = HashSet::new();
    print_tree(&package, 0, &options, &mut seen);

    Ok(())
}

struct TreeOptions {
    max_depth: usize,
    show_duplicates: bool,
    show_targets: bool,
}

fn print_tree(package: &Package, depth: usize, options: &TreeOptions, seen: &mut HashSet<Name>) {
    if depth > options.max_depth {
        return;
    }

    let is_duplicate = !seen.insert(package.name());

    let prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };

    let dup_marker = if is_duplicate && !options.show_duplicates {
        " (*)"
    } else {
        ""
    };

    println!("{}{} ({}){}", prefix, package.name(), package.root(), dup_marker);

    // Don't recurse into duplicates unless explicitly requested
    if is_duplicate && !options.show_duplicates {
        return;
    }

    if options.show_targets {
        let indent = "│   ".repeat(depth);
        for target in package.targets() {
            let deps: Vec<&str> = target.dependencies().iter().map(|d| d.name().as_str()).collect();
            println!("{}  [{}] {} -> {}", indent, target.kind(), target.name(), deps.join(", "));
        }
    }

    for sub in package.packages() {
        print_tree(sub, depth + 1, options, seen);
    }
}
