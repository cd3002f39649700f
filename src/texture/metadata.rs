use serde::{Deserialize, Serialize};

/// Animation metadata attached to a texture
///
/// Animated textures are vertical strips of square tiles, one tile per
/// frame, each as tall as the texture is wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureMetadata {
    /// Tile indices in playback order, or `None` to play every tile in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<u32>>,
    /// Number of cells each frame occupies
    #[serde(rename = "frametime", default = "default_frame_time")]
    pub frame_time: u32,
}

fn default_frame_time() -> u32 {
    1
}

/// Top level of a `.mcmeta` sidecar file
#[derive(Deserialize)]
struct McMeta {
    animation: Option<TextureMetadata>,
}

impl TextureMetadata {
    pub fn new(frame_time: u32) -> Self {
        Self {
            frames: None,
            frame_time,
        }
    }

    pub fn with_frames(frames: Vec<u32>, frame_time: u32) -> Self {
        Self {
            frames: Some(frames),
            frame_time,
        }
    }

    /// Frame list for a texture of the given size.
    ///
    /// Without explicit frames this is `0..height / width`.
    pub fn frame_list(&self, width: u32, height: u32) -> Vec<u32> {
        match &self.frames {
            Some(frames) => frames.clone(),
            None if width == 0 => Vec::new(),
            None => (0..height / width).collect(),
        }
    }

    /// Parse the `animation` section of a `.mcmeta` file.
    ///
    /// Returns `Ok(None)` for files without an `animation` section.
    pub fn from_mcmeta(content: &str) -> serde_json::Result<Option<Self>> {
        let meta: McMeta = serde_json::from_str(content)?;
        Ok(meta.animation)
    }
}
