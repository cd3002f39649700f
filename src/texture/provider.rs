use std::collections::HashMap;

use super::{Texture, TextureMetadata};

/// Source of the textures to stitch
pub trait TextureProvider {
    type Texture: Texture;

    /// Names of every texture, in the provider's order
    fn texture_names(&self) -> Vec<String>;

    fn texture(&self, name: &str) -> Option<&Self::Texture>;

    /// Animation metadata, present only for animated textures
    fn metadata(&self, name: &str) -> Option<&TextureMetadata>;
}

struct MemoryEntry<T> {
    name: String,
    texture: T,
    metadata: Option<TextureMetadata>,
}

/// In-memory provider that keeps textures in insertion order
pub struct MemoryProvider<T> {
    entries: Vec<MemoryEntry<T>>,
    index: HashMap<String, usize>,
}

impl<T: Texture> MemoryProvider<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a static texture. Re-inserting a name replaces the earlier entry in place.
    pub fn insert(&mut self, name: impl Into<String>, texture: T) -> &mut Self {
        self.insert_entry(name.into(), texture, None)
    }

    pub fn insert_animated(
        &mut self,
        name: impl Into<String>,
        texture: T,
        metadata: TextureMetadata,
    ) -> &mut Self {
        self.insert_entry(name.into(), texture, Some(metadata))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_entry(
        &mut self,
        name: String,
        texture: T,
        metadata: Option<TextureMetadata>,
    ) -> &mut Self {
        let entry = MemoryEntry {
            name: name.clone(),
            texture,
            metadata,
        };
        match self.index.get(&name) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(name, self.entries.len());
                self.entries.push(entry);
            }
        }
        self
    }

    fn entry(&self, name: &str) -> Option<&MemoryEntry<T>> {
        self.index.get(name).map(|&i| &self.entries[i])
    }
}

impl<T: Texture> Default for MemoryProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Texture> TextureProvider for MemoryProvider<T> {
    type Texture = T;

    fn texture_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    fn texture(&self, name: &str) -> Option<&T> {
        self.entry(name).map(|e| &e.texture)
    }

    fn metadata(&self, name: &str) -> Option<&TextureMetadata> {
        self.entry(name).and_then(|e| e.metadata.as_ref())
    }
}
