/// Cached textures.
///
/// `Texture` is the plain-old-data record stored in the texture cache's
/// resource array. The pixels themselves live on the backend side; the
/// record only carries the metadata and the backend's internal id.
///
/// Materials consume textures through the `TextureProvider` capability, so
/// they never need to know how the texture cache is laid out.

use bytemuck::{Pod, Zeroable};
use crate::error::Result;
use crate::memory::MemoryTag;
use crate::renderer::Renderer;
use crate::resource::{
    CachedResource, ResourceCache, ResourceConfig, ResourceHandle, ResourceHeader,
    ResourceLoader, ResourceName,
};
use crate::{engine_bail, engine_trace};

const SOURCE: &str = "galaxy3d::TextureCache";

/// Reserved name of the default texture
pub const DEFAULT_TEXTURE_NAME: &str = "default";

/// Edge length of the default checkerboard texture
pub const DEFAULT_TEXTURE_DIMENSION: u32 = 256;

const DEFAULT_TEXTURE_CHANNELS: u32 = 4;

// ===== TEXTURE =====

/// Texture record stored in the texture cache
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Texture {
    header: ResourceHeader,
    width: u32,
    height: u32,
    channel_count: u32,
    has_transparency: u32,
}

impl Texture {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channel_count(&self) -> u32 {
        self.channel_count
    }

    pub fn has_transparency(&self) -> bool {
        self.has_transparency != 0
    }

    /// Number of pixel bytes a full upload carries
    pub fn pixel_byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channel_count as usize
    }

    /// Backend identifier
    pub fn internal_id(&self) -> u32 {
        self.header.internal_id
    }

    /// Set by the renderer when the backend texture is created
    pub fn set_internal_id(&mut self, internal_id: u32) {
        self.header.internal_id = internal_id;
    }
}

impl CachedResource for Texture {
    const KIND: &'static str = "texture";
    const SOURCE: &'static str = SOURCE;
    const DEFAULT_NAME: &'static str = DEFAULT_TEXTURE_NAME;
    const MEMORY_TAG: MemoryTag = MemoryTag::Texture;

    fn header(&self) -> &ResourceHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ResourceHeader {
        &mut self.header
    }
}

/// Texture cache
pub type TextureCache = ResourceCache<Texture>;

// ===== CONFIG =====

/// Texture acquisition parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TextureConfig {
    pub name: String,
    pub auto_release: bool,
    pub width: u32,
    pub height: u32,
    pub channel_count: u32,
    pub has_transparency: bool,
}

impl TextureConfig {
    /// 1x1 RGBA texture registered under `name`
    pub fn named(name: &str, auto_release: bool) -> Self {
        Self {
            name: name.to_string(),
            auto_release,
            width: 1,
            height: 1,
            channel_count: 4,
            has_transparency: false,
        }
    }
}

impl ResourceConfig for TextureConfig {
    fn auto_release(&self) -> bool {
        self.auto_release
    }
}

// ===== LOADER =====

/// Creates texture records and their backend counterparts
pub struct TextureLoader<'a, Rd: Renderer> {
    renderer: &'a mut Rd,
    pixels: Option<&'a [u8]>,
}

impl<'a, Rd: Renderer> TextureLoader<'a, Rd> {
    /// Loader creating textures without initial pixel data
    pub fn new(renderer: &'a mut Rd) -> Self {
        Self { renderer, pixels: None }
    }

    /// Loader uploading `pixels` to the texture it creates
    pub fn with_pixels(renderer: &'a mut Rd, pixels: &'a [u8]) -> Self {
        Self { renderer, pixels: Some(pixels) }
    }
}

impl<Rd: Renderer> ResourceLoader<Texture> for TextureLoader<'_, Rd> {
    type Config = TextureConfig;

    fn load(&mut self, config: &TextureConfig, resource: &mut Texture) -> Result<()> {
        if config.width == 0 || config.height == 0 || config.channel_count == 0 {
            engine_bail!(SOURCE, InvalidArgument =>
                "Texture '{}' has degenerate dimensions {}x{}x{}",
                config.name, config.width, config.height, config.channel_count);
        }

        resource.width = config.width;
        resource.height = config.height;
        resource.channel_count = config.channel_count;
        let translucent = config.has_transparency
            || self.pixels.is_some_and(|pixels| has_translucent_pixel(pixels, config.channel_count));
        resource.has_transparency = u32::from(translucent);

        self.renderer.create_texture(resource, self.pixels)
    }

    fn unload(&mut self, resource: &mut Texture) {
        self.renderer.destroy_texture(resource);
    }

    fn create_default(&mut self) -> Result<Texture> {
        engine_trace!(SOURCE, "Creating default texture ({0}x{0} checkerboard)", DEFAULT_TEXTURE_DIMENSION);

        let mut texture = Texture::zeroed();
        texture.header = ResourceHeader {
            name: ResourceName::new(DEFAULT_TEXTURE_NAME)?,
            ..ResourceHeader::INVALID
        };
        texture.width = DEFAULT_TEXTURE_DIMENSION;
        texture.height = DEFAULT_TEXTURE_DIMENSION;
        texture.channel_count = DEFAULT_TEXTURE_CHANNELS;

        let pixels = checkerboard_pixels(DEFAULT_TEXTURE_DIMENSION, DEFAULT_TEXTURE_CHANNELS);
        self.renderer.create_texture(&mut texture, Some(&pixels))?;
        Ok(texture)
    }
}

/// White/blue checkerboard, blue where row and column parity match
pub fn checkerboard_pixels(dimension: u32, channel_count: u32) -> Vec<u8> {
    let channels = channel_count as usize;
    let dimension = dimension as usize;
    let mut pixels = vec![255u8; dimension * dimension * channels];
    for row in 0..dimension {
        for col in 0..dimension {
            if row % 2 == col % 2 {
                let index = (row * dimension + col) * channels;
                // Drop red and green
                pixels[index..index + channels.min(2)].fill(0);
            }
        }
    }
    pixels
}

fn has_translucent_pixel(pixels: &[u8], channel_count: u32) -> bool {
    channel_count == 4 && pixels.chunks_exact(4).any(|pixel| pixel[3] < 255)
}

// ===== PROVIDER =====

/// Lightweight reference to a texture held by a material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRef {
    /// Slot handle, `ResourceHandle::INVALID` for the default texture
    pub handle: ResourceHandle,
    pub name: ResourceName,
}

/// Nested-cache capability materials use to resolve their textures
pub trait TextureProvider {
    /// Acquire `name`, `None` when it cannot be loaded
    fn acquire_texture<Rd: Renderer>(&mut self, renderer: &mut Rd, name: &str, auto_release: bool) -> Option<TextureRef>;

    /// Drop one reference to `name`
    fn release_texture<Rd: Renderer>(&mut self, renderer: &mut Rd, name: &str);

    /// The never-released default texture
    fn default_texture(&self) -> TextureRef;
}

impl TextureProvider for TextureCache {
    fn acquire_texture<Rd: Renderer>(&mut self, renderer: &mut Rd, name: &str, auto_release: bool) -> Option<TextureRef> {
        let mut loader = TextureLoader::new(renderer);
        self.acquire(name, &TextureConfig::named(name, auto_release), &mut loader)
            .map(|texture| TextureRef { handle: texture.handle(), name: *texture.name() })
    }

    fn release_texture<Rd: Renderer>(&mut self, renderer: &mut Rd, name: &str) {
        let mut loader = TextureLoader::new(renderer);
        self.release(name, &mut loader);
    }

    fn default_texture(&self) -> TextureRef {
        let texture = self.get_default();
        TextureRef { handle: texture.handle(), name: *texture.name() }
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
