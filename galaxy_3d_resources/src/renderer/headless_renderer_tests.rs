use super::*;
use bytemuck::Zeroable;
use crate::error::Error;
use crate::resource::{ResourceLoader, TextureConfig, TextureLoader, DEFAULT_TEXTURE_DIMENSION};

#[test]
fn test_backend_type() {
    assert_eq!(HeadlessRenderer::new().backend_type(), RendererBackendType::Headless);
}

#[test]
fn test_default_texture_upload_is_tracked() {
    let mut renderer = HeadlessRenderer::new();
    let mut texture = TextureLoader::new(&mut renderer).create_default().unwrap();

    let expected = (DEFAULT_TEXTURE_DIMENSION * DEFAULT_TEXTURE_DIMENSION * 4) as u64;
    assert_eq!(renderer.uploaded_bytes(), expected);
    assert_eq!(renderer.live_texture_count(), 1);
    assert_eq!(texture.internal_id(), 0);

    renderer.destroy_texture(&mut texture);
    assert_eq!(renderer.live_texture_count(), 0);
    assert_eq!(texture.internal_id(), INVALID_ID);
}

#[test]
fn test_double_destroy_is_ignored() {
    let mut renderer = HeadlessRenderer::new();
    let mut first = Material::zeroed();
    let mut second = Material::zeroed();
    renderer.create_material(&mut first).unwrap();
    renderer.create_material(&mut second).unwrap();

    let mut stale = first;
    renderer.destroy_material(&mut first);
    renderer.destroy_material(&mut stale);

    assert_eq!(renderer.live_material_count(), 1);
}

#[test]
fn test_wrong_pixel_length_is_rejected() {
    let mut renderer = HeadlessRenderer::new();
    let pixels = [0u8; 3];
    let mut texture = Texture::zeroed();

    let result = TextureLoader::with_pixels(&mut renderer, &pixels)
        .load(&TextureConfig::named("tiny", true), &mut texture);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert_eq!(renderer.live_texture_count(), 0);
    assert_eq!(renderer.uploaded_bytes(), 0);
}

#[test]
fn test_material_ids_are_recycled() {
    let mut renderer = HeadlessRenderer::new();
    let mut a = Material::zeroed();
    let mut b = Material::zeroed();
    let mut c = Material::zeroed();

    renderer.create_material(&mut a).unwrap();
    renderer.create_material(&mut b).unwrap();
    renderer.destroy_material(&mut a);
    renderer.create_material(&mut c).unwrap();

    assert_eq!(b.internal_id(), 1);
    assert_eq!(c.internal_id(), 0);
    assert_eq!(renderer.live_material_count(), 2);
}
