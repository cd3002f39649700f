use log::debug;

use crate::error::StitchError;
use crate::packing::{OccupancyMask, Position, Rect};
use crate::texture::{Canvas, TextureFactory};

/// One fixed-size atlas canvas plus its occupancy mask
pub struct StitchedAtlas<C> {
    canvas: C,
    mask: OccupancyMask,
}

impl<C: Canvas> StitchedAtlas<C> {
    pub fn new(canvas: C, size: u32) -> Self {
        Self {
            canvas,
            mask: OccupancyMask::new(size),
        }
    }

    /// First-fit origin for a `width`x`height` rectangle, in local coordinates
    pub fn get_free(&self, width: u32, height: u32) -> Option<Position> {
        self.mask.find_free(width, height)
    }

    /// Copy `data` into the canvas at `position` and mark the area used.
    ///
    /// # Panics
    ///
    /// Panics if any covered pixel was already used. That only happens when a
    /// caller writes somewhere `get_free` did not hand out.
    #[expect(clippy::panic, reason = "double writes are an internal defect")]
    pub fn put_texture(&mut self, position: Position, data: &[u32], width: u32, height: u32) {
        if let Err(used) = self.mask.mark(Rect::at(position, width, height)) {
            panic!("Double used location {}", used);
        }
        self.canvas
            .set_pixels(data, position.x, position.y, width, height);
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn occupancy(&self) -> f64 {
        self.mask.occupancy()
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }
}

/// The atlases produced by one stitch run
///
/// Atlases are stacked vertically into a single virtual space: local (x, y)
/// in atlas `k` is global (x, y + k * size). The list only ever grows.
pub struct AtlasSet<'f, F: TextureFactory> {
    factory: &'f F,
    size: u32,
    atlases: Vec<StitchedAtlas<F::Canvas>>,
}

impl<'f, F: TextureFactory> AtlasSet<'f, F> {
    pub fn new(factory: &'f F, size: u32) -> Self {
        Self {
            factory,
            size,
            atlases: Vec::new(),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }

    pub fn atlases(&self) -> &[StitchedAtlas<F::Canvas>] {
        &self.atlases
    }

    /// Find a free `width`x`height` rectangle in global coordinates.
    ///
    /// Existing atlases are searched in order. When none has room and
    /// `create_new` is set, a fresh atlas is appended and used.
    pub fn get_free(
        &mut self,
        width: u32,
        height: u32,
        create_new: bool,
    ) -> Result<Option<Position>, StitchError> {
        if width > self.size || height > self.size {
            return Err(StitchError::RegionTooLarge {
                width,
                height,
                max: self.size,
            });
        }

        let mut offset = 0u32;
        for atlas in &self.atlases {
            if let Some(pos) = atlas.get_free(width, height) {
                return Ok(Some(Position::new(pos.x, pos.y + offset)));
            }
            offset += self.size;
        }

        if !create_new {
            return Ok(None);
        }

        let atlas = StitchedAtlas::new(self.factory.create(self.size, self.size), self.size);
        let position = atlas
            .get_free(width, height)
            .map(|pos| Position::new(pos.x, pos.y + offset));
        self.atlases.push(atlas);
        debug!("Created atlas {}", self.atlases.len() - 1);

        Ok(position)
    }

    /// Write a block at a global position returned by [`AtlasSet::get_free`]
    pub fn put_texture(&mut self, position: Position, data: &[u32], width: u32, height: u32) {
        let index = (position.y / self.size) as usize;
        let local = Position::new(position.x, position.y % self.size);
        self.atlases[index].put_texture(local, data, width, height);
    }

    pub fn into_canvases(self) -> Vec<F::Canvas> {
        self.atlases
            .into_iter()
            .map(StitchedAtlas::into_canvas)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{ImageFactory, Texture};

    #[test]
    fn test_put_texture_copies_pixels() {
        let mut atlas = StitchedAtlas::new(ImageFactory.create(4, 4), 4);
        atlas.put_texture(Position::new(1, 1), &[7, 8, 9, 10], 2, 2);

        assert_eq!(Texture::pixels(atlas.canvas(), 1, 1, 2, 2), vec![7, 8, 9, 10]);
        // The centre block leaves no 2x2 gap
        assert_eq!(atlas.get_free(2, 2), None);
        assert_eq!(atlas.get_free(1, 1), Some(Position::new(0, 0)));
    }

    #[test]
    #[should_panic(expected = "Double used location (1,1)")]
    fn test_double_write_panics() {
        let mut atlas = StitchedAtlas::new(ImageFactory.create(4, 4), 4);
        atlas.put_texture(Position::new(0, 0), &[0; 4], 2, 2);
        atlas.put_texture(Position::new(1, 1), &[0; 4], 2, 2);
    }

    #[test]
    fn test_no_atlas_without_create() {
        let factory = ImageFactory;
        let mut set = AtlasSet::new(&factory, 4);

        assert_eq!(set.get_free(2, 2, false).unwrap(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_overflow_into_second_atlas() {
        let factory = ImageFactory;
        let mut set = AtlasSet::new(&factory, 4);

        let full = set.get_free(4, 4, true).unwrap().unwrap();
        set.put_texture(full, &[1; 16], 4, 4);
        assert_eq!(full, Position::new(0, 0));

        assert_eq!(set.get_free(2, 2, false).unwrap(), None);
        let next = set.get_free(2, 2, true).unwrap().unwrap();
        assert_eq!(next, Position::new(0, 4));
        set.put_texture(next, &[2; 4], 2, 2);

        assert_eq!(set.len(), 2);
        let canvases = set.into_canvases();
        assert_eq!(Texture::pixels(&canvases[1], 0, 0, 2, 2), vec![2; 4]);
        assert_eq!(Texture::pixels(&canvases[0], 0, 0, 1, 1), vec![1]);
    }

    #[test]
    fn test_earlier_atlas_preferred() {
        let factory = ImageFactory;
        let mut set = AtlasSet::new(&factory, 4);

        let a = set.get_free(4, 2, true).unwrap().unwrap();
        set.put_texture(a, &[0; 8], 4, 2);
        let b = set.get_free(4, 4, true).unwrap().unwrap();
        set.put_texture(b, &[0; 16], 4, 4);
        assert_eq!(b, Position::new(0, 4));

        // The bottom half of atlas 0 is still free
        assert_eq!(set.get_free(2, 2, true).unwrap(), Some(Position::new(0, 2)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_region_too_large() {
        let factory = ImageFactory;
        let mut set = AtlasSet::new(&factory, 4);

        let err = set.get_free(5, 1, true).unwrap_err();
        assert!(matches!(
            err,
            StitchError::RegionTooLarge {
                width: 5,
                height: 1,
                max: 4
            }
        ));
        assert!(set.is_empty());
    }
}
