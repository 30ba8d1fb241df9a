//! Named, reference-counted resources
//!
//! `ResourceCache` implements acquire/release once for any `CachedResource`;
//! `MaterialCache` and `TextureCache` are its instantiations.

mod resource_name;
mod resource_reference;
mod resource_cache;
pub mod texture;
pub mod material;
pub mod material_config;

pub use resource_name::{ResourceName, RESOURCE_NAME_MAX_LENGTH};
pub use resource_reference::{ResourceReference, INVALID_ID};
pub use resource_cache::{
    ResourceCache, ResourceCacheConfig, ResourceHeader, ResourceHandle,
    CachedResource, ResourceConfig, ResourceLoader,
};
pub use texture::{
    Texture, TextureCache, TextureConfig, TextureLoader, TextureProvider, TextureRef,
    DEFAULT_TEXTURE_NAME, DEFAULT_TEXTURE_DIMENSION,
};
pub use material::{
    Material, MaterialCache, MaterialConfig, MaterialLoader, TextureMap, TextureUse,
    DEFAULT_MATERIAL_NAME,
};
pub use material_config::{load_material_config, parse_material_config, material_file_path};
