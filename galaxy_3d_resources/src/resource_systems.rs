/// Galaxy3D resource systems - explicit context owning every cache
///
/// `ResourceSystems` is created once at startup and passed to whoever needs
/// resources. It owns the tagged allocator, the renderer backend and the
/// texture and material caches, and brackets their lifetime with
/// `initialise` and `shutdown`.

use std::path::PathBuf;
use crate::error::Result;
use crate::memory::TaggedAllocator;
use crate::renderer::Renderer;
use crate::resource::{
    CachedResource, Material, MaterialCache, MaterialConfig, MaterialLoader, ResourceCacheConfig,
    ResourceHandle, ResourceReference, Texture, TextureCache, TextureConfig, TextureLoader,
    DEFAULT_MATERIAL_NAME, load_material_config, material_file_path,
};
use crate::{engine_error, engine_info, engine_warn};

const SOURCE: &str = "galaxy3d::ResourceSystems";

// ===== CONFIG =====

/// Startup configuration of the resource systems
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSystemsConfig {
    /// Texture slots (and texture index buckets)
    pub max_texture_count: u32,
    /// Material slots (and material index buckets)
    pub max_material_count: u32,
    /// Directory holding material files
    pub material_directory: PathBuf,
    /// Extension of material files, without the dot
    pub material_extension: String,
}

impl Default for ResourceSystemsConfig {
    fn default() -> Self {
        Self {
            max_texture_count: 65536,
            max_material_count: 4096,
            material_directory: PathBuf::from("assets/materials"),
            material_extension: "mmt".to_string(),
        }
    }
}

// ===== RESOURCE SYSTEMS =====

/// Owner of the allocator, the renderer and the resource caches
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_resources::galaxy3d::{ResourceSystems, ResourceSystemsConfig};
/// use galaxy_3d_resources::galaxy3d::render::HeadlessRenderer;
///
/// let mut systems = ResourceSystems::initialise(ResourceSystemsConfig::default(), HeadlessRenderer::new())?;
///
/// if let Some(material) = systems.acquire_material("brick") {
///     println!("brick colour: {}", material.diffuse_colour());
/// }
/// systems.release_material("brick");
///
/// let _renderer = systems.shutdown();
/// # Ok::<(), galaxy_3d_resources::galaxy3d::Error>(())
/// ```
pub struct ResourceSystems<R: Renderer> {
    config: ResourceSystemsConfig,
    allocator: TaggedAllocator,
    renderer: R,
    textures: TextureCache,
    materials: MaterialCache,
}

impl<R: Renderer> ResourceSystems<R> {
    /// Size, allocate and build the texture cache, then the material cache.
    ///
    /// # Errors
    ///
    /// Fails when a configured count is zero or a default resource cannot be
    /// created by the renderer. Anything already built is torn down first.
    pub fn initialise(config: ResourceSystemsConfig, mut renderer: R) -> Result<Self> {
        engine_info!(SOURCE, "Initialising resource systems ({} backend, {} textures, {} materials)",
            renderer.backend_type(), config.max_texture_count, config.max_material_count);

        let mut allocator = TaggedAllocator::new();
        let mut textures = create_texture_cache(&config, &mut renderer, &mut allocator)?;

        let materials = match create_material_cache(&config, &mut renderer, &mut textures, &mut allocator) {
            Ok(materials) => materials,
            Err(error) => {
                let mut loader = TextureLoader::new(&mut renderer);
                if let Some(block) = textures.shutdown(&mut loader, &mut allocator) {
                    allocator.free(block, Texture::MEMORY_TAG);
                }
                return Err(error);
            }
        };

        engine_info!(SOURCE, "Resource systems ready ({}B tracked)", allocator.total_allocated());
        Ok(Self { config, allocator, renderer, textures, materials })
    }

    // ===== MATERIALS =====

    /// Acquire a material defined by `<material_directory>/<name>.<extension>`.
    ///
    /// The default material name never touches the file system, and names
    /// containing path separators are refused. A file that declares a
    /// different `name` is loaded under the requested one.
    pub fn acquire_material(&mut self, name: &str) -> Option<&Material> {
        if name.eq_ignore_ascii_case(DEFAULT_MATERIAL_NAME) {
            return Some(self.materials.get_default());
        }

        let path = material_file_path(&self.config.material_directory, name, &self.config.material_extension).ok()?;
        let mut config = match load_material_config(&path) {
            Ok(config) => config,
            Err(error) => {
                engine_error!(SOURCE, "Failed to load material file '{}', no material returned: {}",
                    path.display(), error);
                return None;
            }
        };

        if config.name.is_empty() {
            config.name = name.to_string();
        } else if config.name != name {
            engine_warn!(SOURCE, "Material file '{}' declares name '{}', using requested name '{}'",
                path.display(), config.name, name);
            config.name = name.to_string();
        }

        self.acquire_material_from_config(&config)
    }

    /// Acquire the material `config.name`, loading it from `config` on first use
    pub fn acquire_material_from_config(&mut self, config: &MaterialConfig) -> Option<&Material> {
        let mut loader = MaterialLoader::new(&mut self.renderer, &mut self.textures);
        self.materials.acquire(&config.name, config, &mut loader)
    }

    pub fn release_material(&mut self, name: &str) {
        let mut loader = MaterialLoader::new(&mut self.renderer, &mut self.textures);
        self.materials.release(name, &mut loader);
    }

    pub fn default_material(&self) -> &Material {
        self.materials.get_default()
    }

    /// Resolve a material handle while its slot still holds the same material
    pub fn material(&self, handle: ResourceHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    /// Current reference record of a material name
    pub fn material_reference(&mut self, name: &str) -> Option<ResourceReference> {
        self.materials.reference(name)
    }

    // ===== TEXTURES =====

    /// Acquire a texture by name without initial pixel data
    pub fn acquire_texture(&mut self, name: &str, auto_release: bool) -> Option<&Texture> {
        let mut loader = TextureLoader::new(&mut self.renderer);
        self.textures.acquire(name, &TextureConfig::named(name, auto_release), &mut loader)
    }

    /// Acquire `config.name`, uploading `pixels` if it has to be created
    pub fn acquire_texture_with_pixels(&mut self, config: &TextureConfig, pixels: &[u8]) -> Option<&Texture> {
        let mut loader = TextureLoader::with_pixels(&mut self.renderer, pixels);
        self.textures.acquire(&config.name, config, &mut loader)
    }

    pub fn release_texture(&mut self, name: &str) {
        let mut loader = TextureLoader::new(&mut self.renderer);
        self.textures.release(name, &mut loader);
    }

    pub fn default_texture(&self) -> &Texture {
        self.textures.get_default()
    }

    /// Resolve a texture handle while its slot still holds the same texture
    pub fn texture(&self, handle: ResourceHandle) -> Option<&Texture> {
        self.textures.get(handle)
    }

    /// Current reference record of a texture name
    pub fn texture_reference(&mut self, name: &str) -> Option<ResourceReference> {
        self.textures.reference(name)
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &ResourceSystemsConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn allocator(&self) -> &TaggedAllocator {
        &self.allocator
    }

    /// Loaded (non-default) materials
    pub fn loaded_material_count(&self) -> usize {
        self.materials.loaded_count()
    }

    /// Loaded (non-default) textures
    pub fn loaded_texture_count(&self) -> usize {
        self.textures.loaded_count()
    }

    /// Per-tag memory usage of everything the systems allocated
    pub fn memory_usage_report(&self) -> String {
        self.allocator.usage_report()
    }

    // ===== SHUTDOWN =====

    /// Unload every material, then every texture, free the cache blocks and
    /// hand the renderer back.
    pub fn shutdown(self) -> R {
        let Self { mut allocator, mut renderer, mut textures, materials, .. } = self;

        let mut loader = MaterialLoader::new(&mut renderer, &mut textures);
        if let Some(block) = materials.shutdown(&mut loader, &mut allocator) {
            allocator.free(block, Material::MEMORY_TAG);
        }

        let mut loader = TextureLoader::new(&mut renderer);
        if let Some(block) = textures.shutdown(&mut loader, &mut allocator) {
            allocator.free(block, Texture::MEMORY_TAG);
        }

        engine_info!(SOURCE, "Resource systems shut down. {}", allocator.usage_report());
        allocator.shutdown();
        renderer
    }
}

fn create_texture_cache<R: Renderer>(
    config: &ResourceSystemsConfig,
    renderer: &mut R,
    allocator: &mut TaggedAllocator,
) -> Result<TextureCache> {
    let mut loader = TextureLoader::new(renderer);
    TextureCache::create(ResourceCacheConfig::new(config.max_texture_count), &mut loader, allocator)
}

fn create_material_cache<R: Renderer>(
    config: &ResourceSystemsConfig,
    renderer: &mut R,
    textures: &mut TextureCache,
    allocator: &mut TaggedAllocator,
) -> Result<MaterialCache> {
    let mut loader = MaterialLoader::new(renderer, textures);
    MaterialCache::create(ResourceCacheConfig::new(config.max_material_count), &mut loader, allocator)
}

#[cfg(test)]
#[path = "resource_systems_tests.rs"]
mod tests;
