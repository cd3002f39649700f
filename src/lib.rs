pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod packing;
pub mod texture;

pub use atlas::{DEFAULT_ATLAS_SIZE, StitchResult, TextureDetails, TextureStitcher};
pub use cli::{CliArgs, CompressionLevel};
pub use error::StitchError;
pub use packing::{Position, Rect};
pub use texture::{
    Canvas, DirectoryProvider, ImageFactory, MemoryProvider, Texture, TextureFactory,
    TextureMetadata, TextureProvider,
};
