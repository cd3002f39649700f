#![allow(dead_code)]

use image::RgbaImage;
use thinkmap_stitcher::Canvas;

/// Texture whose every pixel encodes its owner and coordinates
pub fn tagged(tag: u32, width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    let data: Vec<u32> = (0..height)
        .flat_map(|y| (0..width).map(move |x| pixel_tag(tag, x, y)))
        .collect();
    img.set_pixels(&data, 0, 0, width, height);
    img
}

pub fn pixel_tag(tag: u32, x: u32, y: u32) -> u32 {
    0xFF00_0000 | ((tag & 0xFF) << 16) | ((y & 0xFF) << 8) | (x & 0xFF)
}

pub fn solid(width: u32, height: u32, value: u32) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    img.set_pixels(&vec![value; (width * height) as usize], 0, 0, width, height);
    img
}
