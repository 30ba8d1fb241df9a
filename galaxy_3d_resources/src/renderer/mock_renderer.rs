/// Mock Renderer for unit tests
///
/// Records every create/destroy call by resource name and can be told to
/// refuse texture or material creation, so cache rollback paths can be
/// exercised without a backend.

#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::renderer::{Renderer, RendererBackendType};
#[cfg(test)]
use crate::resource::{CachedResource, Material, Texture};
#[cfg(test)]
use crate::engine_bail;

#[cfg(test)]
const SOURCE: &str = "galaxy3d::MockRenderer";

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockRenderer {
    pub fail_textures: bool,
    pub fail_materials: bool,
    pub created_textures: Vec<String>,
    pub destroyed_textures: Vec<String>,
    pub created_materials: Vec<String>,
    pub destroyed_materials: Vec<String>,
    pub next_id: u32,
}

#[cfg(test)]
impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Textures created and not yet destroyed
    pub fn live_textures(&self) -> usize {
        self.created_textures.len() - self.destroyed_textures.len()
    }

    /// Materials created and not yet destroyed
    pub fn live_materials(&self) -> usize {
        self.created_materials.len() - self.destroyed_materials.len()
    }
}

#[cfg(test)]
impl Renderer for MockRenderer {
    fn backend_type(&self) -> RendererBackendType {
        RendererBackendType::Headless
    }

    fn create_texture(&mut self, texture: &mut Texture, _pixels: Option<&[u8]>) -> Result<()> {
        if self.fail_textures {
            engine_bail!(SOURCE, "Mock refused texture '{}'", texture.name());
        }
        self.created_textures.push(texture.name().to_string());
        texture.set_internal_id(self.next_id);
        self.next_id += 1;
        Ok(())
    }

    fn destroy_texture(&mut self, texture: &mut Texture) {
        self.destroyed_textures.push(texture.name().to_string());
    }

    fn create_material(&mut self, material: &mut Material) -> Result<()> {
        if self.fail_materials {
            engine_bail!(SOURCE, "Mock refused material '{}'", material.name());
        }
        self.created_materials.push(material.name().to_string());
        material.set_internal_id(self.next_id);
        self.next_id += 1;
        Ok(())
    }

    fn destroy_material(&mut self, material: &mut Material) {
        self.destroyed_materials.push(material.name().to_string());
    }
}
