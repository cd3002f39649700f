use image::{Rgba, RgbaImage};

/// A read-only pixel source
///
/// Pixels are exchanged as packed ARGB8888 values in row-major order.
pub trait Texture {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Copy out the `width`x`height` block whose top-left corner is (`x`, `y`)
    fn pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u32>;
}

/// A writable texture that atlases are rendered into
pub trait Canvas: Texture {
    fn set_pixels(&mut self, data: &[u32], x: u32, y: u32, width: u32, height: u32);
}

/// Allocates blank canvases for new atlases
pub trait TextureFactory {
    type Canvas: Canvas;

    fn create(&self, width: u32, height: u32) -> Self::Canvas;
}

/// Creates transparent [`RgbaImage`] canvases
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFactory;

impl TextureFactory for ImageFactory {
    type Canvas = RgbaImage;

    fn create(&self, width: u32, height: u32) -> RgbaImage {
        RgbaImage::new(width, height)
    }
}

pub fn pack_argb(pixel: Rgba<u8>) -> u32 {
    let [r, g, b, a] = pixel.0;
    u32::from_be_bytes([a, r, g, b])
}

pub fn unpack_argb(value: u32) -> Rgba<u8> {
    let [a, r, g, b] = value.to_be_bytes();
    Rgba([r, g, b, a])
}

impl Texture for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u32> {
        (y..y + height)
            .flat_map(|py| (x..x + width).map(move |px| pack_argb(*self.get_pixel(px, py))))
            .collect()
    }
}

impl Canvas for RgbaImage {
    fn set_pixels(&mut self, data: &[u32], x: u32, y: u32, width: u32, height: u32) {
        if width == 0 {
            return;
        }
        for (row, line) in (y..y + height).zip(data.chunks(width as usize)) {
            for (col, &value) in (x..x + width).zip(line) {
                self.put_pixel(col, row, unpack_argb(value));
            }
        }
    }
}
