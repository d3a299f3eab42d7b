//! Movement configuration loader.

use std::path::Path;

use crate::config::MovementConfig;
use crate::loaders::{LoadResult, read_file};

/// Loader for [`MovementConfig`] from TOML files.
///
/// Missing keys fall back to their defaults, so a file only needs the
/// values it overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<MovementConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MovementConfig> {
        let config: MovementConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse movement config TOML: {}", e))?;
        if config.quantum == 0 {
            anyhow::bail!("movement config: quantum must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("crowd_threshold = 4\ntie_break_base = 3\n")
            .expect("valid config");
        assert_eq!(config.crowd_threshold, 4);
        assert_eq!(config.tie_break_base, 3);
        assert_eq!(config.quantum, MovementConfig::DEFAULT_QUANTUM);
    }

    #[test]
    fn zero_quantum_is_rejected() {
        assert!(ConfigLoader::parse("quantum = 0").is_err());
    }
}
