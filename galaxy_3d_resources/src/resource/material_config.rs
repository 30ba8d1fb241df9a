/// Material definition files.
///
/// A material file is UTF-8 text with one `key=value` pair per line:
///
/// ```text
/// # Brick wall
/// version = 1
/// name = brick
/// diffuse_colour = 1.0 0.9 0.8 1.0
/// diffuse_map_name = brick_albedo
/// ```
///
/// Blank lines and lines starting with `#` are skipped. The first `=`
/// splits key from value and both sides are trimmed. Keys are matched
/// case-insensitively. Malformed lines never abort the parse: they are
/// skipped or replaced by a default with a warning.

use std::path::{Path, PathBuf};
use glam::Vec4;
use crate::error::Result;
use crate::resource::MaterialConfig;
use crate::{engine_debug, engine_err, engine_warn};

const SOURCE: &str = "galaxy3d::MaterialConfig";

/// Path of the material file for `name`.
///
/// # Errors
///
/// `InvalidArgument` when `name` is empty or contains a path separator:
/// material files never live outside `directory`.
pub fn material_file_path(directory: &Path, name: &str, extension: &str) -> Result<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(engine_err!(SOURCE, InvalidArgument =>
            "Material name '{}' cannot be mapped to a file in '{}'", name, directory.display()));
    }
    Ok(directory.join(format!("{}.{}", name, extension)))
}

/// Read and parse a material file.
///
/// # Errors
///
/// `ConfigError` when the file cannot be read. Content problems are
/// recovered line by line and never fail the load.
pub fn load_material_config(path: &Path) -> Result<MaterialConfig> {
    let source = std::fs::read_to_string(path).map_err(|error| {
        engine_err!(SOURCE, ConfigError => "Unable to read material file '{}': {}", path.display(), error)
    })?;
    Ok(parse_material_config(&source, &path.display().to_string()))
}

/// Parse material file text; `origin` names the source in diagnostics
pub fn parse_material_config(source: &str, origin: &str) -> MaterialConfig {
    let mut config = MaterialConfig::default();

    for (number, line) in source.lines().enumerate() {
        let line_number = number + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((raw_key, raw_value)) = trimmed.split_once('=') else {
            engine_warn!(SOURCE,
                "Potential formatting issue in '{}': '=' not found, skipping line {}", origin, line_number);
            continue;
        };
        let key = raw_key.trim();
        let value = raw_value.trim();

        if key.eq_ignore_ascii_case("version") {
            if value.parse::<u32>().is_err() {
                engine_warn!(SOURCE, "Invalid version '{}' in '{}' line {}", value, origin, line_number);
            }
        } else if key.eq_ignore_ascii_case("name") {
            config.name = value.to_string();
        } else if key.eq_ignore_ascii_case("diffuse_map_name") {
            config.diffuse_map_name = value.to_string();
        } else if key.eq_ignore_ascii_case("diffuse_colour") {
            config.diffuse_colour = parse_colour(value).unwrap_or_else(|| {
                engine_warn!(SOURCE,
                    "Error parsing diffuse colour in '{}' line {}, using white instead", origin, line_number);
                Vec4::ONE
            });
        } else {
            engine_debug!(SOURCE, "Ignoring unknown key '{}' in '{}' line {}", key, origin, line_number);
        }
    }

    config
}

/// Four whitespace-separated numbers
pub fn parse_colour(value: &str) -> Option<Vec4> {
    let mut components = [0.0f32; 4];
    let mut parts = value.split_whitespace();
    for component in components.iter_mut() {
        *component = parts.next()?.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Vec4::from_array(components))
}

#[cfg(test)]
#[path = "material_config_tests.rs"]
mod tests;
