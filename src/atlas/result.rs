use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::packing::Rect;

/// Placement of one stitched texture
///
/// `x` and `y` are global: atlases are stacked vertically, so the texture
/// lives in atlas `y / atlas_size` at local row `y % atlas_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureDetails {
    pub name: String,
    pub x: u32,
    pub y: u32,
    /// Side of one square frame tile (the texture width)
    pub size: u32,
    /// Allocated width: `size * columns` for animations, the texture width otherwise
    pub width: u32,
    /// Allocated height
    pub height: u32,
    /// Number of cells, each frame repeated by its frame time. 1 for static textures.
    pub frames: u32,
}

impl TextureDetails {
    pub fn atlas_index(&self, atlas_size: u32) -> usize {
        (self.y / atlas_size) as usize
    }

    /// Cells per row of the animation layout
    pub fn columns(&self) -> u32 {
        if self.size == 0 {
            return 1;
        }
        (self.width / self.size).max(1)
    }

    /// Atlas index and local rectangle of cell `frame`
    pub fn frame_rect(&self, frame: u32, atlas_size: u32) -> (usize, Rect) {
        let local_y = self.y % atlas_size;
        if self.frames <= 1 {
            return (
                self.atlas_index(atlas_size),
                Rect::new(self.x, local_y, self.width, self.height),
            );
        }

        let columns = self.columns();
        (
            self.atlas_index(atlas_size),
            Rect::new(
                self.x + (frame % columns) * self.size,
                local_y + (frame / columns) * self.size,
                self.size,
                self.size,
            ),
        )
    }
}

/// Output of a stitch run
#[derive(Debug)]
pub struct StitchResult<C> {
    pub atlas_size: u32,
    /// Successfully placed textures by name
    pub details: BTreeMap<String, TextureDetails>,
    /// Atlas canvases; index `k` holds global rows `k * atlas_size..(k + 1) * atlas_size`
    pub atlases: Vec<C>,
    /// Textures skipped because no free space was found, in attempt order
    pub failed: Vec<String>,
}

impl<C> StitchResult<C> {
    pub fn get(&self, name: &str) -> Option<&TextureDetails> {
        self.details.get(name)
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
