use clap::Args;
use std::path::{Path, PathBuf};

use nudger_core::error::Result;
use nudger_core::ReminderConfig;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file to validate
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// Validate the configuration and print a JSON summary.
pub fn run(args: CheckArgs) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let path = super::resolve_config_path(args.config);
    let summary = summarize(&path)?;
    eprintln!("{} is valid", path.display());
    println!("{summary}");
    Ok(())
}

fn summarize(path: &Path) -> Result<String> {
    let config = ReminderConfig::load(path)?;
    Ok(serde_json::to_string_pretty(&config.summary())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudger_core::{ConfigError, CoreError};
    use tempfile::TempDir;

    #[test]
    fn summary_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, include_str!("../../assets/config.example.json")).unwrap();

        let summary = summarize(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&summary).unwrap();
        assert_eq!(value["questions"], 4);
        assert!(summary.contains('\n'));
    }

    #[test]
    fn load_failure_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let err = summarize(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::NotFound { .. })));
    }
}
