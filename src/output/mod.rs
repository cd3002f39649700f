mod format;
mod json;

pub use format::save_atlas_image;
pub use json::write_json;

/// File name of atlas `index`, e.g. `atlas_0.png`
pub fn atlas_png_filename(base_name: &str, index: usize) -> String {
    format!("{}_{}.png", base_name, index)
}
