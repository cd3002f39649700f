use serde::{Deserialize, Serialize};

use crate::atlas::DEFAULT_ATLAS_SIZE;
use crate::cli::CompressionLevel;

/// PNG compression level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

impl CompressConfig {
    pub fn to_level(&self) -> Option<CompressionLevel> {
        match self {
            CompressConfig::Level(n) if *n <= 6 => Some(CompressionLevel::Level(*n)),
            CompressConfig::Max(s) if s.eq_ignore_ascii_case("max") => Some(CompressionLevel::Max),
            _ => None,
        }
    }
}

/// Stitcher configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StitcherConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Input directories, files, or glob patterns
    pub input: Vec<String>,
    /// Output directory for atlas files
    pub output_dir: String,
    /// Base name for output files (atlas_0.png, atlas.json, etc.)
    pub name: String,
    /// Side length of each square atlas in pixels
    pub atlas_size: u32,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for StitcherConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: Vec::new(),
            output_dir: ".".to_string(),
            name: "atlas".to_string(),
            atlas_size: DEFAULT_ATLAS_SIZE,
            compress: None,
        }
    }
}
