use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::types::StitcherConfig;

const SUPPORTED_VERSION: u32 = 1;

/// A parsed config file plus the directory its relative paths hang off
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: StitcherConfig,
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: StitcherConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if config.version != SUPPORTED_VERSION {
            bail!(
                "unsupported config version {} in {} (expected {})",
                config.version,
                path.display(),
                SUPPORTED_VERSION
            );
        }
        if config.atlas_size == 0 {
            bail!("atlas_size must be greater than zero in {}", path.display());
        }

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Input paths relative to the config directory, with glob patterns expanded
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut results = Vec::new();

        for input in &self.config.input {
            let joined = self.config_dir.join(input);
            if !is_glob_pattern(input) {
                results.push(joined);
                continue;
            }

            let matches = glob::glob(&joined.to_string_lossy())
                .with_context(|| format!("invalid glob pattern: {}", input))?;
            for entry in matches {
                results.push(entry.with_context(|| format!("failed to read glob entry: {}", input))?);
            }
        }

        Ok(results)
    }

    pub fn resolve_output_dir(&self) -> PathBuf {
        self.config_dir.join(&self.config.output_dir)
    }
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
