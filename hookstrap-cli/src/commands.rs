// CLI command handlers
use anyhow::{Context, Result};
use hookstrap_core::hookgen::{cache, Freshness, HookGenerator};
use hookstrap_runtime::config::LoaderConfig;
use hookstrap_runtime::mods::intercept::CallRouter;
use hookstrap_runtime::mods::scanner::ModScanner;
use hookstrap_runtime::mods::ModState;
use hookstrap_runtime::startup::Startup;
use std::fs;
use std::path::Path;

pub fn run_startup(config_path: &Path) -> Result<()> {
    let config = LoaderConfig::load(config_path)?;
    log::debug!("Loader config: {config:?}");
    println!("Source module: {}", config.source_path().display());
    println!("Mod directory: {}", config.mod_dir.display());

    let mut router = CallRouter::new();
    let mut startup = Startup::new(config);
    let registry = startup
        .run(&mut router)
        .context("startup sequence failed")?;

    println!("\nStartup complete: {} mod(s) in registry", registry.len());
    for unit in registry.iter() {
        let state = match unit.state {
            ModState::Enabled => "enabled",
            ModState::Loaded => "loaded",
            ModState::Registered => "registered",
            ModState::Failed(stage) => {
                println!("  {} [failed at {:?}]", unit.identity(), stage);
                continue;
            }
            _ => "pending",
        };
        println!(
            "  {} [{}] ({})",
            unit.identity(),
            state,
            unit.binary().display()
        );
    }

    Ok(())
}

pub fn generate_hooks(config_path: &Path, force: bool) -> Result<()> {
    let config = LoaderConfig::load(config_path)?;
    let source = config.source_path();
    let artifact = config.artifact_path();

    if force && artifact.exists() {
        fs::remove_file(&artifact)
            .with_context(|| format!("failed to remove {}", artifact.display()))?;
    }

    if cache::check(&source, &artifact)? == Freshness::Fresh {
        println!("Hook module {} is up to date", artifact.display());
        return Ok(());
    }

    let generator = HookGenerator::new(config.search_dirs(), config.expose_private);
    generator.generate(&source, &artifact)?;
    println!("Hook module written to {}", artifact.display());

    Ok(())
}

pub fn scan_mods(config_path: &Path) -> Result<()> {
    let config = LoaderConfig::load(config_path)?;

    if !config.mod_dir.exists() {
        println!("Mod directory {} does not exist", config.mod_dir.display());
        return Ok(());
    }

    let mut scanner = ModScanner::new();
    let candidates = scanner.scan(&config.mod_dir)?;

    println!("Found {} candidate mod type(s)", candidates.len());
    for candidate in &candidates {
        println!("  {} ({})", candidate.name, candidate.binary.display());
    }

    Ok(())
}
