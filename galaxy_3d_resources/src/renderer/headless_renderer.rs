/// Headless renderer - a working backend without a GPU
///
/// Hands out recycled internal ids for textures and materials, validates
/// pixel payloads and keeps track of which ids are live. Useful for tools,
/// servers and tests that need the resource systems without a device.

use rustc_hash::FxHashSet;
use crate::error::Result;
use crate::renderer::{Renderer, RendererBackendType};
use crate::resource::{CachedResource, Material, Texture, INVALID_ID};
use crate::utils::SlotAllocator;
use crate::{engine_bail, engine_trace, engine_warn};

const SOURCE: &str = "galaxy3d::HeadlessRenderer";

/// Renderer backend that only tracks resource lifetimes
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    texture_ids: SlotAllocator,
    material_ids: SlotAllocator,
    live_textures: FxHashSet<u32>,
    live_materials: FxHashSet<u32>,
    uploaded_bytes: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Textures created and not yet destroyed
    pub fn live_texture_count(&self) -> usize {
        self.live_textures.len()
    }

    /// Materials created and not yet destroyed
    pub fn live_material_count(&self) -> usize {
        self.live_materials.len()
    }

    /// Total pixel bytes received through `create_texture`
    pub fn uploaded_bytes(&self) -> u64 {
        self.uploaded_bytes
    }
}

impl Renderer for HeadlessRenderer {
    fn backend_type(&self) -> RendererBackendType {
        RendererBackendType::Headless
    }

    fn create_texture(&mut self, texture: &mut Texture, pixels: Option<&[u8]>) -> Result<()> {
        if let Some(pixels) = pixels {
            if pixels.len() != texture.pixel_byte_len() {
                engine_bail!(SOURCE, InvalidArgument =>
                    "Texture '{}' expects {}B of pixels ({}x{}x{}), got {}B",
                    texture.name(), texture.pixel_byte_len(),
                    texture.width(), texture.height(), texture.channel_count(), pixels.len());
            }
        }

        let Some(id) = self.texture_ids.alloc() else {
            engine_bail!(SOURCE, CapacityExhausted => "No texture ids left for '{}'", texture.name());
        };
        self.live_textures.insert(id);
        texture.set_internal_id(id);

        let uploaded = pixels.map_or(0, <[u8]>::len);
        self.uploaded_bytes += uploaded as u64;
        engine_trace!(SOURCE, "Created texture '{}' (id {}, {}B uploaded)", texture.name(), id, uploaded);
        Ok(())
    }

    fn destroy_texture(&mut self, texture: &mut Texture) {
        let id = texture.internal_id();
        if !self.live_textures.remove(&id) {
            engine_warn!(SOURCE, "Texture '{}' (id {}) is not live; destroy ignored", texture.name(), id);
            return;
        }
        self.texture_ids.free(id);
        texture.set_internal_id(INVALID_ID);
        engine_trace!(SOURCE, "Destroyed texture '{}' (id {})", texture.name(), id);
    }

    fn create_material(&mut self, material: &mut Material) -> Result<()> {
        let Some(id) = self.material_ids.alloc() else {
            engine_bail!(SOURCE, CapacityExhausted => "No material ids left for '{}'", material.name());
        };
        self.live_materials.insert(id);
        material.set_internal_id(id);
        engine_trace!(SOURCE, "Created material '{}' (id {})", material.name(), id);
        Ok(())
    }

    fn destroy_material(&mut self, material: &mut Material) {
        let id = material.internal_id();
        if !self.live_materials.remove(&id) {
            engine_warn!(SOURCE, "Material '{}' (id {}) is not live; destroy ignored", material.name(), id);
            return;
        }
        self.material_ids.free(id);
        material.set_internal_id(INVALID_ID);
        engine_trace!(SOURCE, "Destroyed material '{}' (id {})", material.name(), id);
    }
}

#[cfg(test)]
#[path = "headless_renderer_tests.rs"]
mod tests;
