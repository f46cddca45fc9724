//! Init-config command CLI handler.

use anyhow::Context;
use shop_seed::config::SeedConfig;
use std::fs;
use std::path::PathBuf;

pub fn run(output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let yaml = SeedConfig::default().to_yaml()?;

    match output {
        Some(path) => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            fs::write(&path, yaml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Default config written to {}", path.display());
        }
        None => print!("{}", yaml),
    }

    Ok(())
}
