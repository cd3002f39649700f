use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StitchError {
    #[error("Texture '{name}' ({width}x{height}) exceeds atlas size ({max}x{max})")]
    TextureTooLarge {
        name: String,
        width: u32,
        height: u32,
        max: u32,
    },

    #[error("Requested region {width}x{height} exceeds atlas size ({max}x{max})")]
    RegionTooLarge { width: u32, height: u32, max: u32 },

    #[error("Provider listed texture '{0}' but could not supply it")]
    MissingTexture(String),

    #[error("Texture '{0}' has no pixels")]
    EmptyTexture(String),

    #[error("Texture '{0}' has a frame time of zero")]
    InvalidFrameTime(String),

    #[error("Texture '{name}' references frame {frame} but only {available} frames exist")]
    FrameOutOfRange {
        name: String,
        frame: u32,
        available: u32,
    },

    #[error("Atlas size must be greater than zero")]
    ZeroAtlasSize,

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to parse metadata '{path}': {source}")]
    MetadataParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No textures found in input")]
    NoTextures,

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),
}

impl StitchError {
    /// True for errors caused by the textures being stitched rather than by I/O
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            StitchError::TextureTooLarge { .. }
                | StitchError::RegionTooLarge { .. }
                | StitchError::MissingTexture(_)
                | StitchError::EmptyTexture(_)
                | StitchError::InvalidFrameTime(_)
                | StitchError::FrameOutOfRange { .. }
                | StitchError::ZeroAtlasSize
        )
    }
}
