/// Cached materials.
///
/// A material is a diffuse colour plus an optional diffuse texture map.
/// Textures are resolved by name through a `TextureProvider` when the
/// material loads and released again when it unloads; a texture that
/// cannot be loaded falls back to the provider's default texture.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use crate::error::Result;
use crate::memory::MemoryTag;
use crate::renderer::Renderer;
use crate::resource::{
    CachedResource, ResourceCache, ResourceConfig, ResourceHandle, ResourceHeader,
    ResourceLoader, ResourceName, TextureProvider, TextureRef,
};
use crate::{engine_trace, engine_warn};

const SOURCE: &str = "galaxy3d::MaterialCache";

/// Reserved name of the default material
pub const DEFAULT_MATERIAL_NAME: &str = "default";

// ===== TEXTURE MAP =====

/// What a texture bound to a material is used for
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUse {
    Unknown = 0,
    MapDiffuse = 1,
}

/// Texture binding of a material
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TextureMap {
    usage: u32,
    texture: ResourceHandle,
    texture_name: ResourceName,
}

impl TextureMap {
    /// No texture bound
    pub const NONE: TextureMap = TextureMap {
        usage: TextureUse::Unknown as u32,
        texture: ResourceHandle::INVALID,
        texture_name: ResourceName::EMPTY,
    };

    pub fn bound(usage: TextureUse, texture: TextureRef) -> Self {
        Self {
            usage: usage as u32,
            texture: texture.handle,
            texture_name: texture.name,
        }
    }

    pub fn usage(&self) -> TextureUse {
        match self.usage {
            1 => TextureUse::MapDiffuse,
            _ => TextureUse::Unknown,
        }
    }

    /// Handle of the bound texture (`INVALID` for none or the default texture)
    pub fn texture(&self) -> ResourceHandle {
        self.texture
    }

    /// Name of the bound texture, empty when none is bound
    pub fn texture_name(&self) -> &ResourceName {
        &self.texture_name
    }

    pub fn is_bound(&self) -> bool {
        self.usage() != TextureUse::Unknown && !self.texture_name.is_empty()
    }
}

// ===== MATERIAL =====

/// Material record stored in the material cache
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Material {
    header: ResourceHeader,
    diffuse_colour: [f32; 4],
    diffuse_map: TextureMap,
}

impl Material {
    pub fn diffuse_colour(&self) -> Vec4 {
        Vec4::from_array(self.diffuse_colour)
    }

    pub fn diffuse_map(&self) -> &TextureMap {
        &self.diffuse_map
    }

    /// Backend identifier
    pub fn internal_id(&self) -> u32 {
        self.header.internal_id
    }

    /// Set by the renderer when the backend material is created
    pub fn set_internal_id(&mut self, internal_id: u32) {
        self.header.internal_id = internal_id;
    }
}

impl CachedResource for Material {
    const KIND: &'static str = "material";
    const SOURCE: &'static str = SOURCE;
    const DEFAULT_NAME: &'static str = DEFAULT_MATERIAL_NAME;
    const MEMORY_TAG: MemoryTag = MemoryTag::Material;

    fn header(&self) -> &ResourceHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ResourceHeader {
        &mut self.header
    }
}

/// Material cache
pub type MaterialCache = ResourceCache<Material>;

// ===== CONFIG =====

/// Material definition, usually parsed from a material file
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialConfig {
    pub name: String,
    pub auto_release: bool,
    pub diffuse_colour: Vec4,
    /// Empty for an untextured material
    pub diffuse_map_name: String,
}

impl MaterialConfig {
    /// Untextured, opaque white material
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            auto_release: true,
            diffuse_colour: Vec4::ONE,
            diffuse_map_name: String::new(),
        }
    }
}

impl ResourceConfig for MaterialConfig {
    fn auto_release(&self) -> bool {
        self.auto_release
    }
}

// ===== LOADER =====

/// Creates materials, resolving their textures through `T`
pub struct MaterialLoader<'a, Rd: Renderer, T: TextureProvider> {
    renderer: &'a mut Rd,
    textures: &'a mut T,
}

impl<'a, Rd: Renderer, T: TextureProvider> MaterialLoader<'a, Rd, T> {
    pub fn new(renderer: &'a mut Rd, textures: &'a mut T) -> Self {
        Self { renderer, textures }
    }

    fn release_map(&mut self, map: &TextureMap) {
        if map.is_bound() {
            self.textures.release_texture(self.renderer, map.texture_name().as_str());
        }
    }
}

impl<Rd: Renderer, T: TextureProvider> ResourceLoader<Material> for MaterialLoader<'_, Rd, T> {
    type Config = MaterialConfig;

    fn load(&mut self, config: &MaterialConfig, resource: &mut Material) -> Result<()> {
        resource.diffuse_colour = config.diffuse_colour.to_array();

        resource.diffuse_map = if config.diffuse_map_name.is_empty() {
            TextureMap::NONE
        } else {
            let texture = self
                .textures
                .acquire_texture(self.renderer, &config.diffuse_map_name, true)
                .unwrap_or_else(|| {
                    engine_warn!(SOURCE, "Unable to load texture '{}' for material '{}', using default",
                        config.diffuse_map_name, resource.header.name);
                    self.textures.default_texture()
                });
            TextureMap::bound(TextureUse::MapDiffuse, texture)
        };

        if let Err(error) = self.renderer.create_material(resource) {
            let map = resource.diffuse_map;
            self.release_map(&map);
            resource.diffuse_map = TextureMap::NONE;
            return Err(error);
        }
        Ok(())
    }

    fn unload(&mut self, resource: &mut Material) {
        let map = resource.diffuse_map;
        self.release_map(&map);
        self.renderer.destroy_material(resource);
    }

    fn create_default(&mut self) -> Result<Material> {
        engine_trace!(SOURCE, "Creating default material");

        let mut material = Material::zeroed();
        material.header = ResourceHeader {
            name: ResourceName::new(DEFAULT_MATERIAL_NAME)?,
            ..ResourceHeader::INVALID
        };
        material.diffuse_colour = Vec4::ONE.to_array();
        material.diffuse_map = TextureMap::bound(TextureUse::MapDiffuse, self.textures.default_texture());

        self.renderer.create_material(&mut material)?;
        Ok(material)
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
