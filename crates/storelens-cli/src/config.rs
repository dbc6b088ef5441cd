use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storelens_extract::ExtractOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Pipeline configuration persisted as TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub extract: ExtractOptions,
}

/// Load the config, writing the defaults on first run.
pub fn load_or_create(path: &Path) -> Result<PipelineConfig, ConfigError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&content)?;
        return Ok(config);
    }

    let config = PipelineConfig::default();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(&config)?)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("storelens.toml");

        let config = load_or_create(&path).expect("create defaults");
        assert!(path.exists());
        assert_eq!(config.extract.file_prefix, "olist");
        assert_eq!(config.extract.retry.attempts, 3);

        let reloaded = load_or_create(&path).expect("reload");
        assert_eq!(reloaded.extract.generate.seed, config.extract.generate.seed);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("storelens.toml");
        std::fs::write(
            &path,
            "[extract]\nfile_prefix = \"shop\"\n\n[extract.generate]\nseed = 7\n",
        )
        .expect("write partial config");

        let config = load_or_create(&path).expect("load partial");
        assert_eq!(config.extract.file_prefix, "shop");
        assert_eq!(config.extract.generate.seed, 7);
        assert_eq!(config.extract.validate.min_rows, 10);
    }
}
