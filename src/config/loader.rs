// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (duplicate names, etc.). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks binary names: non-empty, no path separators, no repeats.
///
/// Note that a disabled or empty `[binaries]` section still loads fine; that
/// case is only rejected when a `Supervisor` is constructed from it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default config filename, resolved against the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("binherd.toml")
}

/// Resolve which config file to actually read.
///
/// Priority:
/// 1. `BINHERD_CONFIG` environment variable (explicit path, used as-is)
/// 2. the path given on the command line, if it exists
/// 3. for the *default* filename only: `<user-config>/binherd/binherd.toml`,
///    if it exists
/// 4. fall back to the command-line path (the load will then report a
///    readable "file not found" error for it)
pub fn discover_config_path(cli_path: &Path) -> PathBuf {
    discover_with_env(std::env::var("BINHERD_CONFIG").ok(), cli_path)
}

fn discover_with_env(env_override: Option<String>, cli_path: &Path) -> PathBuf {
    if let Some(path) = env_override {
        debug!(path = %path, "using config path from BINHERD_CONFIG");
        return PathBuf::from(path);
    }

    if cli_path.exists() {
        return cli_path.to_path_buf();
    }

    // An explicitly chosen --config path that doesn't exist must surface as
    // a load error for that path; only the missing default name falls back
    // to the user config directory.
    if cli_path == default_config_path() {
        if let Some(config_root) = dirs::config_dir() {
            let fallback = config_root.join("binherd").join("binherd.toml");
            if fallback.exists() {
                debug!(path = %fallback.display(), "using config from user config directory");
                return fallback;
            }
        }
    }

    cli_path.to_path_buf()
}
