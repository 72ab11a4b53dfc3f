use clap::Args;
use std::path::PathBuf;

use nudger_core::config::DEFAULT_CONFIG_FILE;
use nudger_core::error::Result;

const EXAMPLE_CONFIG: &str = include_str!("../../assets/config.example.json");

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the example configuration
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Write the example configuration.
pub fn run(args: InitArgs) -> std::result::Result<(), Box<dyn std::error::Error>> {
    if args.config.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            args.config.display()
        )
        .into());
    }
    write_example(&args.config)?;
    println!("wrote example configuration to {}", args.config.display());
    Ok(())
}

fn write_example(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, EXAMPLE_CONFIG)?;
    Ok(())
}
