/// Renderer trait - backend capability consumed by the resource caches

use std::fmt;
use crate::error::Result;
use crate::resource::{Material, Texture};

// ============================================================================
// Backend selection
// ============================================================================

/// Rendering backend, chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererBackendType {
    Vulkan,
    OpenGl,
    DirectX,
    /// No GPU: resources are tracked but never uploaded
    Headless,
}

impl fmt::Display for RendererBackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RendererBackendType::Vulkan => "Vulkan",
            RendererBackendType::OpenGl => "OpenGL",
            RendererBackendType::DirectX => "DirectX",
            RendererBackendType::Headless => "Headless",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Renderer trait
// ============================================================================

/// Backend capability used by the resource caches
///
/// The caches never duplicate backend lifetime bookkeeping: a successful
/// `create_*` call is what allows a slot to be committed, and `destroy_*`
/// is called exactly once per successful create.
pub trait Renderer {
    /// Backend this renderer drives
    fn backend_type(&self) -> RendererBackendType;

    /// Create the backend side of a texture
    ///
    /// # Arguments
    ///
    /// * `texture` - Texture being loaded; the backend may set its internal id
    /// * `pixels` - Optional initial pixel data (`width * height * channel_count` bytes)
    fn create_texture(&mut self, texture: &mut Texture, pixels: Option<&[u8]>) -> Result<()>;

    /// Destroy the backend side of a texture
    fn destroy_texture(&mut self, texture: &mut Texture);

    /// Create the backend side of a material
    ///
    /// # Arguments
    ///
    /// * `material` - Material being loaded; the backend may set its internal id
    fn create_material(&mut self, material: &mut Material) -> Result<()>;

    /// Destroy the backend side of a material
    fn destroy_material(&mut self, material: &mut Material);
}
