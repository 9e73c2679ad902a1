use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from a raw TOML string
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.space.address.trim().is_empty() {
            anyhow::bail!("space.address must not be empty");
        }

        if self.space.call_timeout_seconds == 0 {
            anyhow::bail!("space.call_timeout_seconds must be greater than 0");
        }

        let defaults = &self.defaults;
        if !(0.1..=1.0).contains(&defaults.temperature) {
            anyhow::bail!("defaults.temperature must be between 0.1 and 1.0");
        }
        if !(0.1..=1.0).contains(&defaults.top_p) {
            anyhow::bail!("defaults.top_p must be between 0.1 and 1.0");
        }
        if !(1..=100).contains(&defaults.top_k) {
            anyhow::bail!("defaults.top_k must be between 1 and 100");
        }

        Ok(())
    }
}
