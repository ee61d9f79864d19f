#![allow(dead_code)]

use binherd::config::BinariesConfig;

/// Builder for `BinariesConfig` to simplify test setup.
///
/// Defaults to an enabled, local-mode config with an empty startup order;
/// tests add names with [`with_binary`](BinariesConfigBuilder::with_binary).
pub struct BinariesConfigBuilder {
    config: BinariesConfig,
}

impl BinariesConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: BinariesConfig {
                enabled: true,
                use_embedded: false,
                bin_path: "./bin".to_string(),
                startup_order: Vec::new(),
            },
        }
    }

    pub fn enabled(mut self, val: bool) -> Self {
        self.config.enabled = val;
        self
    }

    pub fn embedded(mut self) -> Self {
        self.config.use_embedded = true;
        self
    }

    pub fn bin_path(mut self, path: impl Into<String>) -> Self {
        self.config.bin_path = path.into();
        self
    }

    pub fn with_binary(mut self, name: &str) -> Self {
        self.config.startup_order.push(name.to_string());
        self
    }

    pub fn build(self) -> BinariesConfig {
        self.config
    }
}

impl Default for BinariesConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
