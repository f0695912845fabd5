use std::collections::{HashMap, HashSet};

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::element::{ElementId, ImageSource};
use crate::error::ImageLoadError;
use crate::util::data_uri;

/// Cache key: element id plus the hash of the image source it was decoded from
type CacheKey = (ElementId, u64);

/// Decode an image element's source into pixels.
///
/// Only embedded `data:` URIs are decoded; remote URLs are reported as such.
pub fn decode_image_source(source: &ImageSource) -> Result<ColorImage, ImageLoadError> {
    if !source.is_embedded() {
        return Err(ImageLoadError::Remote(source.image_url.clone()));
    }
    let bytes = data_uri::decode(&source.image_url)?;
    let image = image::load_from_memory(&bytes)?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice()))
}

/// Manages GPU textures for image elements, providing caching and invalidation
pub struct TextureManager {
    /// Cache of textures by (element_id, source hash)
    texture_cache: HashMap<CacheKey, TextureHandle>,
    /// Tracks when each texture was last used
    last_used: HashMap<CacheKey, u64>,
    /// Sources that failed to decode, so they are not retried every frame
    failed: HashSet<CacheKey>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    /// Maximum number of textures to cache
    max_cache_size: usize,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new(64)
    }
}

impl TextureManager {
    /// Creates a new texture manager with the specified cache size
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            failed: HashSet::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets or creates a texture for the given element.
    ///
    /// Returns `None` when `generator` fails; the failure is remembered for this
    /// `(element_id, version)` pair and logged once.
    pub fn get_or_create_texture<F>(
        &mut self,
        element_id: &str,
        version: u64,
        generator: F,
        ctx: &Context,
    ) -> Option<TextureId>
    where
        F: FnOnce() -> Result<ColorImage, ImageLoadError>,
    {
        let cache_key = (element_id.to_owned(), version);

        if let Some(handle) = self.texture_cache.get(&cache_key) {
            self.last_used.insert(cache_key, self.current_frame);
            return Some(handle.id());
        }
        if self.failed.contains(&cache_key) {
            return None;
        }

        let image = match generator() {
            Ok(image) => image,
            Err(err) => {
                log::warn!("Failed to load image for element {element_id}: {err}");
                self.failed.insert(cache_key);
                return None;
            }
        };

        self.make_room();

        let name = format!("element_{element_id}_v{version}");
        let handle = ctx.load_texture(name, image, TextureOptions::LINEAR);
        let id = handle.id();

        self.texture_cache.insert(cache_key.clone(), handle);
        self.last_used.insert(cache_key, self.current_frame);

        Some(id)
    }

    /// Texture for an image element, decoding its source on first use
    pub fn image_texture(&mut self, element_id: &str, source: &ImageSource, ctx: &Context) -> Option<TextureId> {
        if source.is_empty() {
            return None;
        }
        self.get_or_create_texture(element_id, source.source_hash(), || decode_image_source(source), ctx)
    }

    /// Invalidates all textures for a specific element
    pub fn invalidate_element(&mut self, element_id: &str) {
        self.texture_cache.retain(|(id, _), _| id != element_id);
        self.last_used.retain(|(id, _), _| id != element_id);
        self.failed.retain(|(id, _)| id != element_id);
    }

    /// Evicts least recently used textures so one more fits under the maximum size
    fn make_room(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(CacheKey, u64)> = self.last_used.iter().map(|(k, v)| (k.clone(), *v)).collect();

        // Sort by last-used frame (oldest first)
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() + 1 - self.max_cache_size;
        for (key, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    /// Clears all textures from the cache
    pub fn clear_cache(&mut self) {
        self.texture_cache.clear();
        self.last_used.clear();
        self.failed.clear();
    }

    /// Returns the number of textures currently in the cache
    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn get_texture(&self, element_id: &str, version: u64) -> Option<&TextureHandle> {
        self.texture_cache.get(&(element_id.to_owned(), version))
    }
}
