use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::atlas::{StitchResult, TextureDetails};
use crate::error::StitchError;
use crate::output::atlas_png_filename;

#[derive(Serialize)]
struct JsonOutput<'a> {
    meta: Meta,
    atlases: Vec<String>,
    textures: &'a BTreeMap<String, TextureDetails>,
    failed: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Meta {
    app: &'static str,
    version: &'static str,
    format: &'static str,
    atlas_size: u32,
}

fn to_json<C>(result: &StitchResult<C>, base_name: &str) -> serde_json::Result<String> {
    let output = JsonOutput {
        meta: Meta {
            app: "thinkmap-stitcher",
            version: env!("CARGO_PKG_VERSION"),
            format: "rgba8888",
            atlas_size: result.atlas_size,
        },
        atlases: (0..result.atlases.len())
            .map(|index| atlas_png_filename(base_name, index))
            .collect(),
        textures: &result.details,
        failed: &result.failed,
    };

    serde_json::to_string_pretty(&output)
}

/// Write the texture placement file `<base_name>.json`
pub fn write_json<C>(result: &StitchResult<C>, output_dir: &Path, base_name: &str) -> Result<()> {
    let json_path = output_dir.join(format!("{}.json", base_name));
    let content = to_json(result, base_name)?;

    fs::write(&json_path, content).map_err(|e| StitchError::OutputWrite {
        path: json_path,
        source: e,
    })?;

    Ok(())
}
