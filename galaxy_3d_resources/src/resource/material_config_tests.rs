use super::*;
use crate::error::Error;

#[test]
fn test_parse_full_file() {
    let source = "\
# Brick wall
version = 1
name = brick
diffuse_colour = 1.0 0.5 0.25 1.0
diffuse_map_name = brick_albedo
";
    let config = parse_material_config(source, "brick.mmt");

    assert_eq!(config.name, "brick");
    assert_eq!(config.diffuse_map_name, "brick_albedo");
    assert_eq!(config.diffuse_colour, Vec4::new(1.0, 0.5, 0.25, 1.0));
    assert!(config.auto_release);
}

#[test]
fn test_blank_comment_and_malformed_lines_are_skipped() {
    let source = "\n   \n  # indented comment\nthis line has no equals\nname=stone\n";
    let config = parse_material_config(source, "stone.mmt");

    assert_eq!(config.name, "stone");
    assert_eq!(config.diffuse_colour, Vec4::ONE);
    assert!(config.diffuse_map_name.is_empty());
}

#[test]
fn test_first_equals_splits_and_sides_are_trimmed() {
    let config = parse_material_config("  name  =  a=b  ", "test");
    assert_eq!(config.name, "a=b");
}

#[test]
fn test_keys_are_case_insensitive() {
    let config = parse_material_config("NAME=wood\nDiffuse_Map_Name=oak", "test");
    assert_eq!(config.name, "wood");
    assert_eq!(config.diffuse_map_name, "oak");
}

#[test]
fn test_malformed_colour_falls_back_to_white() {
    for value in ["red", "1.0 0.5", "1 2 3 4 5", "0.1 0.2 zero 0.4", ""] {
        let source = format!("diffuse_colour = {}", value);
        let config = parse_material_config(&source, "test");
        assert_eq!(config.diffuse_colour, Vec4::ONE, "value {:?}", value);
    }
}

#[test]
fn test_unknown_keys_and_bad_version_are_tolerated() {
    let config = parse_material_config("version = one\nshininess = 32\nname = metal", "test");
    assert_eq!(config.name, "metal");
}

#[test]
fn test_parse_colour() {
    assert_eq!(parse_colour("0 0.5 1 0.75"), Some(Vec4::new(0.0, 0.5, 1.0, 0.75)));
    assert_eq!(parse_colour("  1\t1  1 1 "), Some(Vec4::ONE));
    assert_eq!(parse_colour("1 1 1"), None);
}

#[test]
fn test_material_file_path() {
    let path = material_file_path(Path::new("assets/materials"), "brick", "mmt").unwrap();
    assert_eq!(path, Path::new("assets/materials").join("brick.mmt"));
}

#[test]
fn test_material_file_path_stays_in_directory() {
    for name in ["../brick", "walls/brick", "..\\brick", "/etc/brick", ""] {
        let result = material_file_path(Path::new("assets/materials"), name, "mmt");
        assert!(matches!(result, Err(Error::InvalidArgument(_))), "name {:?}", name);
    }
}

#[test]
fn test_missing_file_is_config_error() {
    let path = std::env::temp_dir().join("galaxy3d_material_config_tests_missing.mmt");
    let result = load_material_config(&path);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_load_from_disk() {
    let dir = std::env::temp_dir().join(format!("galaxy3d_material_config_tests_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("glass.mmt");
    std::fs::write(&path, "name=glass\ndiffuse_colour=0.9 0.9 1.0 0.5\n").unwrap();

    let config = load_material_config(&path).unwrap();

    assert_eq!(config.name, "glass");
    assert_eq!(config.diffuse_colour, Vec4::new(0.9, 0.9, 1.0, 0.5));
    std::fs::remove_dir_all(&dir).unwrap();
}
