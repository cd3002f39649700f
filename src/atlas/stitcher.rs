use std::collections::BTreeMap;

use log::{debug, info, warn};

use super::{AtlasSet, StitchResult, TextureDetails};
use crate::error::StitchError;
use crate::packing::Position;
use crate::texture::{Texture, TextureFactory, TextureMetadata, TextureProvider};

/// Default side length of each square atlas
pub const DEFAULT_ATLAS_SIZE: u32 = 1024;

/// Packs every texture of a provider into square atlases
///
/// Animated textures are placed first, each laid out as the flattest grid of
/// frame cells that fits. Static textures fill the remaining space first-fit.
pub struct TextureStitcher<'a, P, F> {
    provider: &'a P,
    factory: &'a F,
    pub atlas_size: u32,
}

/// Rectangle reserved for an animation and its grid layout
struct AnimationSlot {
    position: Position,
    columns: u32,
    width: u32,
    height: u32,
}

impl<'a, P: TextureProvider, F: TextureFactory> TextureStitcher<'a, P, F> {
    pub fn new(provider: &'a P, factory: &'a F) -> Self {
        Self {
            provider,
            factory,
            atlas_size: DEFAULT_ATLAS_SIZE,
        }
    }

    pub fn atlas_size(mut self, atlas_size: u32) -> Self {
        self.atlas_size = atlas_size;
        self
    }

    /// Stitch all textures.
    ///
    /// Invalid input aborts the run with an error. Textures that are valid
    /// but find no free space are skipped and listed in
    /// [`StitchResult::failed`].
    pub fn stitch(&self) -> Result<StitchResult<F::Canvas>, StitchError> {
        if self.atlas_size == 0 {
            return Err(StitchError::ZeroAtlasSize);
        }

        let mut atlases = AtlasSet::new(self.factory, self.atlas_size);
        let mut details = BTreeMap::new();
        let mut failed = Vec::new();

        for name in self.ordered_names() {
            let texture = self
                .provider
                .texture(&name)
                .ok_or_else(|| StitchError::MissingTexture(name.clone()))?;

            let placed = match self.provider.metadata(&name) {
                Some(metadata) => self.place_animated(&mut atlases, &name, texture, metadata)?,
                None => self.place_static(&mut atlases, &name, texture)?,
            };

            match placed {
                Some(placed) => {
                    debug!(
                        "Placed '{}' at ({},{}) {}x{} ({} frames)",
                        name, placed.x, placed.y, placed.width, placed.height, placed.frames
                    );
                    details.insert(name, placed);
                }
                None => {
                    warn!("Failed to place texture: {}", name);
                    failed.push(name);
                }
            }
        }

        for (index, atlas) in atlases.atlases().iter().enumerate() {
            info!(
                "Atlas {}: {}x{} ({:.1}% used)",
                index,
                self.atlas_size,
                self.atlas_size,
                atlas.occupancy() * 100.0
            );
        }
        info!(
            "Stitched {} textures into {} atlas(es), {} failed",
            details.len(),
            atlases.len(),
            failed.len()
        );

        Ok(StitchResult {
            atlas_size: self.atlas_size,
            details,
            atlases: atlases.into_canvases(),
            failed,
        })
    }

    /// Provider names with animated textures first; stable within each group
    fn ordered_names(&self) -> Vec<String> {
        let mut names = self.provider.texture_names();
        names.sort_by_key(|name| self.provider.metadata(name).is_none());
        names
    }

    fn check_fits(&self, name: &str, width: u32, height: u32) -> Result<(), StitchError> {
        if width == 0 || height == 0 {
            return Err(StitchError::EmptyTexture(name.to_string()));
        }
        if width > self.atlas_size || height > self.atlas_size {
            return Err(StitchError::TextureTooLarge {
                name: name.to_string(),
                width,
                height,
                max: self.atlas_size,
            });
        }
        Ok(())
    }

    fn place_static(
        &self,
        atlases: &mut AtlasSet<'_, F>,
        name: &str,
        texture: &P::Texture,
    ) -> Result<Option<TextureDetails>, StitchError> {
        let (width, height) = (texture.width(), texture.height());
        self.check_fits(name, width, height)?;

        let Some(position) = atlases.get_free(width, height, true)? else {
            return Ok(None);
        };
        atlases.put_texture(position, &texture.pixels(0, 0, width, height), width, height);

        Ok(Some(TextureDetails {
            name: name.to_string(),
            x: position.x,
            y: position.y,
            size: width,
            width,
            height,
            frames: 1,
        }))
    }

    fn place_animated(
        &self,
        atlases: &mut AtlasSet<'_, F>,
        name: &str,
        texture: &P::Texture,
        metadata: &TextureMetadata,
    ) -> Result<Option<TextureDetails>, StitchError> {
        let size = texture.width();
        if texture.height() == 0 {
            return Err(StitchError::EmptyTexture(name.to_string()));
        }
        self.check_fits(name, size, size)?;
        if metadata.frame_time == 0 {
            return Err(StitchError::InvalidFrameTime(name.to_string()));
        }

        let frames = metadata.frame_list(size, texture.height());
        let available = texture.height() / size;
        if let Some(&frame) = frames.iter().find(|&&frame| frame >= available) {
            return Err(StitchError::FrameOutOfRange {
                name: name.to_string(),
                frame,
                available,
            });
        }

        let cells = u32::try_from(frames.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(metadata.frame_time);
        let Some(slot) = self.find_animation_slot(atlases, cells, size)? else {
            return Ok(None);
        };

        let mut cell = 0u32;
        for &frame in &frames {
            let data = texture.pixels(0, frame * size, size, size);
            for _ in 0..metadata.frame_time {
                let position = Position::new(
                    slot.position.x + (cell % slot.columns) * size,
                    slot.position.y + (cell / slot.columns) * size,
                );
                atlases.put_texture(position, &data, size, size);
                cell += 1;
            }
        }

        Ok(Some(TextureDetails {
            name: name.to_string(),
            x: slot.position.x,
            y: slot.position.y,
            size,
            width: slot.width,
            height: slot.height,
            frames: cells,
        }))
    }

    /// Find the flattest grid of `cells` tiles that fits.
    ///
    /// Existing atlases are tried first for every column count, widest first;
    /// only then may a new atlas be created, again widest first.
    fn find_animation_slot(
        &self,
        atlases: &mut AtlasSet<'_, F>,
        cells: u32,
        size: u32,
    ) -> Result<Option<AnimationSlot>, StitchError> {
        // Wider layouts than this cannot fit the atlas width
        let max_columns = cells.min(self.atlas_size / size);

        for create_new in [false, true] {
            for columns in (1..=max_columns).rev() {
                let width = columns * size;
                let height = match cells.div_ceil(columns).checked_mul(size) {
                    Some(height) if height <= self.atlas_size => height,
                    // Fewer columns only make the layout taller
                    _ => break,
                };

                if let Some(position) = atlases.get_free(width, height, create_new)? {
                    return Ok(Some(AnimationSlot {
                        position,
                        columns,
                        width,
                        height,
                    }));
                }
            }
        }

        Ok(None)
    }
}
