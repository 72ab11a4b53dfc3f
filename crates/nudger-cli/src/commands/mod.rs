pub mod check;
pub mod init;
pub mod run;

use std::path::PathBuf;

use nudger_core::config::DEFAULT_CONFIG_FILE;

/// Returns the config file to use when `--config` is not given.
///
/// `./config.json` wins if it exists, then `<config dir>/nudger/config.json`.
/// If neither exists the local path is returned so the error names it.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    match user_config_path() {
        Some(path) if path.exists() => path,
        _ => local,
    }
}

/// `<config dir>/nudger/config.json`, e.g. `~/.config/nudger/config.json`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nudger").join(DEFAULT_CONFIG_FILE))
}
