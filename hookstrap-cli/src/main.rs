// CLI harness: host glue around the loader's startup sequence
use clap::Parser;
use std::path::PathBuf;

mod commands;

use commands::{generate_hooks, run_startup, scan_mods};

#[derive(Parser)]
#[command(name = "hookstrap")]
#[command(about = "Bootstrap loader: hook module derivation and mod lifecycle")]
#[command(version)]
struct Cli {
    /// Path to a loader config file (TOML); defaults apply when absent
    #[arg(short, long, default_value = "hookstrap.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the full startup sequence: derive hooks, bootstrap, load mods
    Run,
    /// Derive the hook module only
    Generate {
        /// Regenerate even if the existing artifact is fresh
        #[arg(long)]
        force: bool,
    },
    /// Scan the mod directory and report candidate types without loading
    Scan,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run => run_startup(&cli.config),
        Commands::Generate { force } => generate_hooks(&cli.config, force),
        Commands::Scan => scan_mods(&cli.config),
    }
}
