// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{
    BinariesConfig, ConfigFile, RawBinariesSection, RawConfigFile, default_bin_path,
};
use crate::errors::{BinherdError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::BinherdError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let binaries = BinariesConfig::try_from(raw.binaries)?;
        Ok(ConfigFile { binaries })
    }
}

impl TryFrom<RawBinariesSection> for BinariesConfig {
    type Error = crate::errors::BinherdError;

    fn try_from(raw: RawBinariesSection) -> std::result::Result<Self, Self::Error> {
        validate_startup_order(&raw.startup_order)?;

        // An explicitly empty path means "use the default", matching the
        // behaviour when the field is omitted entirely.
        let bin_path = if raw.bin_path.is_empty() {
            default_bin_path()
        } else {
            raw.bin_path
        };

        Ok(BinariesConfig {
            enabled: raw.enabled,
            use_embedded: raw.use_embedded,
            bin_path,
            startup_order: raw.startup_order,
        })
    }
}

/// Checks run when a `Supervisor` is constructed.
///
/// A disabled or empty configuration is a valid *file* (it simply means the
/// feature is off), so these checks live here rather than in the `TryFrom`
/// conversion above.
pub fn validate_binaries(cfg: &BinariesConfig) -> Result<()> {
    if !cfg.enabled {
        return Err(BinherdError::Config(
            "helper binaries are disabled in configuration".to_string(),
        ));
    }
    if cfg.startup_order.is_empty() {
        return Err(BinherdError::Config(
            "[binaries].startup_order is empty; nothing to launch".to_string(),
        ));
    }
    validate_startup_order(&cfg.startup_order)
}

/// Sanity checks on the launch order itself.
///
/// Names double as on-disk filenames under the cache directory, so a repeated
/// name would extract over itself; path separators would escape the cache
/// directory.
pub fn validate_startup_order(order: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in order {
        if name.trim().is_empty() {
            return Err(BinherdError::Config(
                "[binaries].startup_order contains an empty binary name".to_string(),
            ));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(BinherdError::Config(format!(
                "binary name '{}' must not contain path separators",
                name
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(BinherdError::Config(format!(
                "binary '{}' appears more than once in startup_order",
                name
            )));
        }
    }
    Ok(())
}
