// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// Direct mapping of the on-disk format:
///
/// ```toml
/// [binaries]
/// enabled = true
/// use_embedded = false
/// bin_path = "./bin"
/// startup_order = ["broker", "indexer"]
/// ```
///
/// All fields are optional and default to a disabled, local-mode setup.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Helper binary settings from `[binaries]`.
    #[serde(default)]
    pub binaries: RawBinariesSection,
}

/// `[binaries]` section, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBinariesSection {
    /// Master switch. When false the supervisor refuses to construct and the
    /// host treats helper binaries as unavailable.
    #[serde(default)]
    pub enabled: bool,

    /// `true`: extract binaries from the embedded payload into the user cache
    /// directory. `false`: run them straight out of `bin_path`.
    #[serde(default)]
    pub use_embedded: bool,

    /// Local-mode source directory. Only consulted when `use_embedded` is
    /// false.
    #[serde(default = "default_bin_path")]
    pub bin_path: String,

    /// Launch order. Insertion order is significant and is preserved verbatim
    /// all the way to the spawn loop.
    #[serde(default)]
    pub startup_order: Vec<String>,
}

pub(crate) fn default_bin_path() -> String {
    "./bin".to_string()
}

impl Default for RawBinariesSection {
    fn default() -> Self {
        Self {
            enabled: false,
            use_embedded: false,
            bin_path: default_bin_path(),
            startup_order: Vec::new(),
        }
    }
}

/// Validated configuration.
///
/// Produced from [`RawConfigFile`] via `TryFrom` (see `validate.rs`); once
/// this exists, binary names are known to be non-empty, free of path
/// separators, and unique.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub binaries: BinariesConfig,
}

/// Validated `[binaries]` settings consumed by the supervisor.
#[derive(Debug, Clone)]
pub struct BinariesConfig {
    pub enabled: bool,
    pub use_embedded: bool,
    pub bin_path: String,
    pub startup_order: Vec<String>,
}
