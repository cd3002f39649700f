use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use thinkmap_stitcher::atlas::{DEFAULT_ATLAS_SIZE, TextureStitcher};
use thinkmap_stitcher::cli::{CliArgs, CompressionLevel};
use thinkmap_stitcher::config::LoadedConfig;
use thinkmap_stitcher::output::{atlas_png_filename, save_atlas_image, write_json};
use thinkmap_stitcher::texture::{DirectoryProvider, ImageFactory};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Logger may not be initialized yet (config loading runs first)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();
    let merged = merge_config_with_args(&args)?;

    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("thinkmap-stitcher v{}", env!("CARGO_PKG_VERSION"));

    if !merged.output.exists() {
        fs::create_dir_all(&merged.output).with_context(|| {
            format!("failed to create output dir: {}", merged.output.display())
        })?;
    }

    let provider = DirectoryProvider::load(&merged.input)?;

    let result = TextureStitcher::new(&provider, &ImageFactory)
        .atlas_size(merged.atlas_size)
        .stitch()?;

    for (index, atlas) in result.atlases.iter().enumerate() {
        let path = merged.output.join(atlas_png_filename(&merged.name, index));
        save_atlas_image(atlas, &path, merged.compress)?;
        info!("Saved {}", path.display());
    }

    write_json(&result, &merged.output, &merged.name)?;
    info!("Generated {}.json", merged.name);

    if !result.is_complete() {
        warn!(
            "{} texture(s) did not fit: {}",
            result.failed.len(),
            result.failed.join(", ")
        );
    }

    info!("Done!");

    Ok(())
}

/// Settings after applying CLI > config file > defaults
struct MergedConfig {
    input: Vec<PathBuf>,
    output: PathBuf,
    name: String,
    atlas_size: u32,
    verbose: bool,
    compress: Option<CompressionLevel>,
}

fn merge_config_with_args(args: &CliArgs) -> Result<MergedConfig> {
    let loaded = args
        .config
        .as_ref()
        .map(|path| {
            LoadedConfig::load(path)
                .with_context(|| format!("failed to load config: {}", path.display()))
        })
        .transpose()?;

    let input = if !args.input.is_empty() {
        args.input.clone()
    } else if let Some(lc) = &loaded {
        lc.resolve_inputs()
            .context("failed to resolve input files from config")?
    } else {
        Vec::new()
    };

    let output = args.output.clone().unwrap_or_else(|| {
        loaded
            .as_ref()
            .map(LoadedConfig::resolve_output_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let name = args.name.clone().unwrap_or_else(|| {
        loaded
            .as_ref()
            .map(|lc| lc.config.name.clone())
            .unwrap_or_else(|| "atlas".to_string())
    });

    let atlas_size = args.atlas_size.unwrap_or_else(|| {
        loaded
            .as_ref()
            .map(|lc| lc.config.atlas_size)
            .unwrap_or(DEFAULT_ATLAS_SIZE)
    });

    let compress = match (args.compress, &loaded) {
        (Some(level), _) => Some(level),
        (None, Some(lc)) => match &lc.config.compress {
            Some(c) => Some(c.to_level().ok_or_else(|| {
                anyhow::anyhow!(
                    "invalid compress value {:?} in config file. Valid values: 0-6, \"max\"",
                    c
                )
            })?),
            None => None,
        },
        (None, None) => None,
    };

    Ok(MergedConfig {
        input,
        output,
        name,
        atlas_size,
        verbose: args.verbose,
        compress,
    })
}
