use super::{Position, Rect};

/// Per-pixel occupancy of one square atlas
///
/// Placement is first-fit: origins are scanned row by row (y outer, x inner)
/// and the first origin whose whole rectangle is in bounds and unused wins.
pub struct OccupancyMask {
    size: u32,
    used: Vec<bool>,
}

impl OccupancyMask {
    pub fn new(size: u32) -> Self {
        let side = size as usize;
        Self {
            size,
            used: vec![false; side * side],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_used(&self, x: u32, y: u32) -> bool {
        self.used[self.index(x, y)]
    }

    /// Find the first free origin for a `width`x`height` rectangle
    pub fn find_free(&self, width: u32, height: u32) -> Option<Position> {
        if width == 0 || height == 0 || width > self.size || height > self.size {
            return None;
        }

        for y in 0..=(self.size - height) {
            let mut x = 0;
            while x + width <= self.size {
                match self.blocking_column(x, y, width, height) {
                    None => return Some(Position::new(x, y)),
                    // Every origin up to the blocker would cover that used pixel
                    Some(blocked) => x = blocked + 1,
                }
            }
        }

        None
    }

    /// Rightmost column holding a used pixel inside the rectangle, if any
    fn blocking_column(&self, x: u32, y: u32, width: u32, height: u32) -> Option<u32> {
        (x..x + width)
            .rev()
            .find(|&cx| (y..y + height).any(|cy| self.is_used(cx, cy)))
    }

    /// Mark every pixel of `rect` as used.
    ///
    /// Leaves the mask untouched and returns the first already-used pixel
    /// if the rectangle overlaps an earlier placement.
    pub fn mark(&mut self, rect: Rect) -> Result<(), Position> {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                if self.is_used(x, y) {
                    return Err(Position::new(x, y));
                }
            }
        }

        for y in rect.y..rect.y + rect.height {
            let start = self.index(rect.x, y);
            self.used[start..start + rect.width as usize].fill(true);
        }

        Ok(())
    }

    pub fn used_pixels(&self) -> u64 {
        self.used.iter().filter(|&&used| used).count() as u64
    }

    /// Fraction of pixels in use (0.0 to 1.0)
    pub fn occupancy(&self) -> f64 {
        let total = u64::from(self.size) * u64::from(self.size);
        if total == 0 {
            return 0.0;
        }
        self.used_pixels() as f64 / total as f64
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size as usize + x as usize
    }
}
