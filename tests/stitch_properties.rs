//! Property tests over random texture sets

mod common;

use common::{pixel_tag, tagged};
use proptest::prelude::*;
use thinkmap_stitcher::{
    ImageFactory, MemoryProvider, Rect, Texture, TextureMetadata, TextureStitcher,
};

const ATLAS_SIZE: u32 = 8;

#[derive(Debug, Clone)]
enum TextureShape {
    Static {
        width: u32,
        height: u32,
    },
    Animated {
        size: u32,
        tiles: u32,
        frame_time: u32,
        reversed: bool,
    },
}

fn texture_shape() -> impl Strategy<Value = TextureShape> {
    prop_oneof![
        (1..=ATLAS_SIZE, 1..=ATLAS_SIZE)
            .prop_map(|(width, height)| TextureShape::Static { width, height }),
        (1u32..=4, 1u32..=4, 1u32..=3, any::<bool>()).prop_map(
            |(size, tiles, frame_time, reversed)| TextureShape::Animated {
                size,
                tiles,
                frame_time,
                reversed,
            }
        ),
    ]
}

/// Provider plus, per texture, the source tile shown in each cell
fn build(shapes: &[TextureShape]) -> (MemoryProvider<image::RgbaImage>, Vec<Vec<u32>>) {
    let mut provider = MemoryProvider::new();
    let mut cell_tiles = Vec::new();

    for (i, shape) in shapes.iter().enumerate() {
        let name = format!("t{i}");
        let tag = u32::try_from(i).unwrap();
        match *shape {
            TextureShape::Static { width, height } => {
                provider.insert(name, tagged(tag, width, height));
                cell_tiles.push(vec![0]);
            }
            TextureShape::Animated {
                size,
                tiles,
                frame_time,
                reversed,
            } => {
                let frames: Vec<u32> = if reversed {
                    (0..tiles).rev().collect()
                } else {
                    (0..tiles).collect()
                };
                let metadata = if reversed {
                    TextureMetadata::with_frames(frames.clone(), frame_time)
                } else {
                    TextureMetadata::new(frame_time)
                };
                provider.insert_animated(name, tagged(tag, size, size * tiles), metadata);
                cell_tiles.push(
                    frames
                        .iter()
                        .flat_map(|&f| std::iter::repeat_n(f, frame_time as usize))
                        .collect(),
                );
            }
        }
    }

    (provider, cell_tiles)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn placements_never_overlap_and_round_trip(shapes in prop::collection::vec(texture_shape(), 1..16)) {
        let (provider, cell_tiles) = build(&shapes);
        let result = TextureStitcher::new(&provider, &ImageFactory)
            .atlas_size(ATLAS_SIZE)
            .stitch()
            .unwrap();

        let mut placed: Vec<(usize, Rect)> = Vec::new();

        for (i, shape) in shapes.iter().enumerate() {
            let name = format!("t{i}");
            let Some(details) = result.get(&name) else {
                prop_assert!(result.failed.contains(&name));
                // Static textures always fit a fresh atlas
                prop_assert!(matches!(shape, TextureShape::Animated { .. }), "expected TextureShape::Animated");
                continue;
            };
            let tag = u32::try_from(i).unwrap();

            for (cell, &tile) in (0u32..).zip(&cell_tiles[i]) {
                let (atlas, rect) = details.frame_rect(cell, ATLAS_SIZE);
                prop_assert!(rect.x + rect.width <= ATLAS_SIZE);
                prop_assert!(rect.y + rect.height <= ATLAS_SIZE);

                let expected: Vec<u32> = (0..rect.height)
                    .flat_map(|y| {
                        (0..rect.width).map(move |x| pixel_tag(tag, x, y + tile * rect.height))
                    })
                    .collect();
                let actual = Texture::pixels(
                    &result.atlases[atlas],
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                );
                prop_assert_eq!(actual, expected, "texture {} cell {}", name, cell);

                placed.push((atlas, rect));
            }
        }

        for (a, (atlas_a, rect_a)) in placed.iter().enumerate() {
            for (atlas_b, rect_b) in &placed[a + 1..] {
                prop_assert!(
                    atlas_a != atlas_b || !rect_a.intersects(rect_b),
                    "{:?} overlaps {:?} in atlas {}",
                    rect_a,
                    rect_b,
                    atlas_a
                );
            }
        }
    }

    #[test]
    fn empty_atlas_gets_flattest_layout(
        tiles in 1u32..=8,
        frame_time in 1u32..=4,
        size in 1u32..=64,
    ) {
        let mut provider = MemoryProvider::new();
        provider.insert_animated("anim", tagged(0, size, size * tiles), TextureMetadata::new(frame_time));

        let result = TextureStitcher::new(&provider, &ImageFactory)
            .stitch()
            .unwrap();

        let cells = tiles * frame_time;
        let atlas_size = result.atlas_size;
        let expected = (1..=cells)
            .rev()
            .find(|&c| c * size <= atlas_size && cells.div_ceil(c) * size <= atlas_size);

        match (expected, result.get("anim")) {
            (Some(columns), Some(details)) => {
                prop_assert_eq!(details.columns(), columns);
                prop_assert_eq!((details.x, details.y), (0, 0));
                prop_assert_eq!(details.width, columns * size);
                prop_assert_eq!(details.height, cells.div_ceil(columns) * size);
                prop_assert_eq!(details.frames, cells);
            }
            (None, None) => {
                prop_assert_eq!(result.failed.clone(), vec!["anim".to_string()]);
            }
            (expected, actual) => {
                prop_assert!(false, "expected {:?}, got {:?}", expected, actual);
            }
        }
    }
}
