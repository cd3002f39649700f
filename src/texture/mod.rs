mod loader;
mod metadata;
mod provider;
mod texture;

pub use loader::{DirectoryProvider, LoadedTexture};
pub use metadata::TextureMetadata;
pub use provider::{MemoryProvider, TextureProvider};
pub use texture::{Canvas, ImageFactory, Texture, TextureFactory, pack_argb, unpack_argb};
