use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs;
use std::path::Path;

use tsnew::config::Config;
use tsnew::manager;
use tsnew::{manifest, process, templates};
use tsnew::{InvocationContext, PackageManager};

/// Runtime dependencies installed into new packages.
pub const DEPENDENCIES: &[&str] = &[];

/// Development toolchain installed into new packages.
pub const DEV_DEPENDENCIES: &[&str] = &["typescript", "tslint"];

#[derive(Debug, Serialize)]
struct ScaffoldSummary {
    manager: String,
    directory: String,
    dependencies: Vec<String>,
    dev_dependencies: Vec<String>,
}

pub fn execute(dir: &Path, extra_args: &[String], json: bool) -> Result<()> {
    let ctx = InvocationContext::capture();
    let kind = manager::resolve(&ctx)?;
    let pm = manager::get_manager(kind);

    if !json {
        println!("📦 Scaffolding a TypeScript package in {}", dir.display());
        println!("  {} Using {}", "✓".green().bold(), pm.bin());
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create target directory {}", dir.display()))?;

    init_package(pm.as_ref(), dir, extra_args)?;
    if !json {
        println!("  {} Initialized package manifest", "✓".green().bold());
    }

    install_dependencies(pm.as_ref(), DEPENDENCIES, dir, false)?;
    install_dependencies(pm.as_ref(), DEV_DEPENDENCIES, dir, true)?;
    if !json {
        println!(
            "  {} Installed dev dependencies: {}",
            "✓".green().bold(),
            DEV_DEPENDENCIES.join(", ")
        );
    }

    write_package_fields(dir)?;

    let config = Config::load()?;
    templates::populate(&config.tool_root, dir)?;
    if !json {
        println!("  {} Copied template files", "✓".green().bold());
    }

    let summary = ScaffoldSummary {
        manager: pm.bin().to_string(),
        directory: dir.display().to_string(),
        dependencies: DEPENDENCIES.iter().map(|d| d.to_string()).collect(),
        dev_dependencies: DEV_DEPENDENCIES.iter().map(|d| d.to_string()).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n✨ TypeScript package ready in {}", dir.display());
        println!("\nNext steps:");
        println!("  1. {} run build", pm.bin());
        println!("  2. {} run lint", pm.bin());
    }

    Ok(())
}

/// Run the manager's init with the operator's terminal attached, so
/// its prompts are answerable. Only flag-style arguments forward.
fn init_package(pm: &dyn PackageManager, dir: &Path, extra_args: &[String]) -> Result<()> {
    let mut args = vec!["init".to_string()];
    args.extend(extra_args.iter().filter(|a| a.starts_with('-')).cloned());

    process::run_interactive(pm.bin(), &args, dir)
}

/// Install one dependency group. An empty group never spawns a
/// process.
fn install_dependencies(
    pm: &dyn PackageManager,
    deps: &[&str],
    dir: &Path,
    dev: bool,
) -> Result<()> {
    if deps.is_empty() {
        return Ok(());
    }

    let deps: Vec<String> = deps.iter().map(|d| d.to_string()).collect();
    process::run_captured(pm.bin(), &pm.add_args(&deps, dev), dir)
}

fn write_package_fields(dir: &Path) -> Result<()> {
    let pkg = manifest::read(dir)?;
    manifest::write(dir, &manifest::finalize(pkg))
}
