mod result;
mod stitcher;
mod types;

pub use result::{StitchResult, TextureDetails};
pub use stitcher::{DEFAULT_ATLAS_SIZE, TextureStitcher};
pub use types::{AtlasSet, StitchedAtlas};
