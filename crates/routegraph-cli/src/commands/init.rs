use anyhow::{Context, Result};
use colored::Colorize;
use routegraph::{Config, DEFAULT_CONFIG_FILE};
use std::fs;
use std::path::Path;

pub fn execute(force: bool) -> Result<()> {
    write_default(Path::new(DEFAULT_CONFIG_FILE), force)?;

    println!("  {} {}", "✓".green(), DEFAULT_CONFIG_FILE);
    println!();
    println!("Next steps:");
    println!("  edit [roots] to point at your routing and source roots");
    println!("  routegraph check");
    println!();

    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let content = Config::default().to_toml_string()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
