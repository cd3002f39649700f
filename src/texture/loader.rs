use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageReader, RgbaImage};
use log::{debug, info};
use rayon::prelude::*;

use super::{TextureMetadata, TextureProvider};
use crate::error::StitchError;

const SUPPORTED_EXTENSIONS: &[&str] = &["png"];
const METADATA_SUFFIX: &str = ".mcmeta";

/// Image path with its base directory for computing texture names
struct ImagePath {
    path: PathBuf,
    base: Option<PathBuf>,
}

/// A texture decoded from disk
#[derive(Debug)]
pub struct LoadedTexture {
    pub path: PathBuf,
    pub image: RgbaImage,
    pub metadata: Option<TextureMetadata>,
}

/// Provider backed by PNG files and their `.png.mcmeta` sidecars
///
/// Textures are named by their path relative to the input directory, without
/// extension and with `/` separators (`blocks/water_still`). Individual file
/// inputs are named by their file stem.
#[derive(Debug, Default)]
pub struct DirectoryProvider {
    textures: BTreeMap<String, LoadedTexture>,
}

impl DirectoryProvider {
    /// Load every texture found under the given files or directories
    pub fn load(inputs: &[impl AsRef<Path>]) -> Result<Self> {
        let image_paths = collect_image_paths(inputs)?;

        if image_paths.is_empty() {
            return Err(StitchError::NoTextures.into());
        }

        info!("Loading {} textures...", image_paths.len());

        let loaded: Result<Vec<_>> = image_paths.par_iter().map(load_single_texture).collect();

        let mut textures = BTreeMap::new();
        for (name, texture) in loaded? {
            if let Some(previous) = textures.insert(name.clone(), texture) {
                debug!(
                    "Texture '{}' from {} shadowed by a later input",
                    name,
                    previous.path.display()
                );
            }
        }

        let animated = textures.values().filter(|t| t.metadata.is_some()).count();
        info!(
            "Loaded {} textures ({} animated)",
            textures.len(),
            animated
        );

        Ok(Self { textures })
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&LoadedTexture> {
        self.textures.get(name)
    }
}

impl TextureProvider for DirectoryProvider {
    type Texture = RgbaImage;

    fn texture_names(&self) -> Vec<String> {
        self.textures.keys().cloned().collect()
    }

    fn texture(&self, name: &str) -> Option<&RgbaImage> {
        self.textures.get(name).map(|t| &t.image)
    }

    fn metadata(&self, name: &str) -> Option<&TextureMetadata> {
        self.textures.get(name).and_then(|t| t.metadata.as_ref())
    }
}

fn collect_image_paths(inputs: &[impl AsRef<Path>]) -> Result<Vec<ImagePath>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        if !path.exists() {
            return Err(StitchError::InputNotFound(path.to_path_buf()).into());
        }

        if path.is_file() {
            if is_supported_image(path) {
                paths.push(ImagePath {
                    path: path.to_path_buf(),
                    base: None,
                });
            }
        } else if path.is_dir() {
            collect_from_directory(path, path, &mut paths)?;
        }
    }

    Ok(paths)
}

fn collect_from_directory(base: &Path, dir: &Path, paths: &mut Vec<ImagePath>) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    // read_dir order is platform dependent
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_file() && is_supported_image(&path) {
            paths.push(ImagePath {
                path,
                base: Some(base.to_path_buf()),
            });
        } else if path.is_dir() {
            collect_from_directory(base, &path, paths)?;
        }
    }

    Ok(())
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Name a texture by its path relative to `base`, without extension
fn texture_name(path: &Path, base: Option<&Path>) -> String {
    match base {
        Some(base_dir) => {
            let relative = path.strip_prefix(base_dir).unwrap_or(path).with_extension("");
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        }
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string(),
    }
}

fn metadata_path(path: &Path) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_owned();
    os.push(METADATA_SUFFIX);
    PathBuf::from(os)
}

fn load_metadata(path: &Path) -> Result<Option<TextureMetadata>> {
    let meta_path = metadata_path(path);
    if !meta_path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&meta_path).map_err(|e| StitchError::InputRead {
        path: meta_path.clone(),
        source: e,
    })?;

    let metadata = TextureMetadata::from_mcmeta(&content).map_err(|e| {
        StitchError::MetadataParse {
            path: meta_path,
            source: e,
        }
    })?;

    Ok(metadata)
}

fn load_single_texture(img_path: &ImagePath) -> Result<(String, LoadedTexture)> {
    let path = &img_path.path;
    let image = ImageReader::open(path)
        .map_err(|e| StitchError::ImageLoad {
            path: path.clone(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| StitchError::ImageLoad {
            path: path.clone(),
            source: e,
        })?
        .into_rgba8();

    let metadata = load_metadata(path)?;
    let name = texture_name(path, img_path.base.as_deref());

    Ok((
        name,
        LoadedTexture {
            path: path.clone(),
            image,
            metadata,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_name_relative() {
        let base = PathBuf::from("/assets/textures");
        let path = base.join("blocks").join("water_still.png");
        assert_eq!(texture_name(&path, Some(&base)), "blocks/water_still");
    }

    #[test]
    fn test_texture_name_single_file() {
        let path = PathBuf::from("/assets/textures/blocks/stone.png");
        assert_eq!(texture_name(&path, None), "stone");
    }

    #[test]
    fn test_metadata_path() {
        let path = PathBuf::from("blocks/lava_flow.png");
        assert_eq!(
            metadata_path(&path),
            PathBuf::from("blocks/lava_flow.png.mcmeta")
        );
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("a.PNG")));
        assert!(!is_supported_image(Path::new("a.png.mcmeta")));
        assert!(!is_supported_image(Path::new("a.txt")));
    }

    #[test]
    fn test_missing_input() {
        let err = DirectoryProvider::load(&["/definitely/not/here"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StitchError>(),
            Some(StitchError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_load_directory_with_sidecar() {
        let dir = std::env::temp_dir().join(format!("thinkmap-loader-{}", std::process::id()));
        let blocks = dir.join("blocks");
        std::fs::create_dir_all(&blocks).unwrap();

        RgbaImage::new(4, 4).save(blocks.join("stone.png")).unwrap();
        RgbaImage::new(4, 8).save(blocks.join("water.png")).unwrap();
        std::fs::write(
            blocks.join("water.png.mcmeta"),
            r#"{ "animation": { "frametime": 2 } }"#,
        )
        .unwrap();

        let provider = DirectoryProvider::load(&[&dir]).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(
            provider.texture_names(),
            vec!["blocks/stone", "blocks/water"]
        );
        assert!(provider.metadata("blocks/stone").is_none());
        assert_eq!(
            provider.metadata("blocks/water"),
            Some(&TextureMetadata::new(2))
        );
    }
}
