use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "thinkmap-stitcher")]
#[command(version, about = "Texture atlas stitcher", long_about = None)]
pub struct CliArgs {
    /// Input texture directories or PNG files
    #[arg(required_unless_present = "config")]
    pub input: Vec<PathBuf>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for atlas files [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base name for output files (atlas_0.png, atlas.json, etc.) [default: atlas]
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Side length of each square atlas in pixels [default: 1024]
    #[arg(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub atlas_size: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
