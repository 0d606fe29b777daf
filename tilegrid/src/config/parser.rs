//! INI parsing logic for converting `Ini` → `TilingConfig`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;

use super::file::ConfigError;
use super::TilingConfig;
use crate::geometry::{parse_size, Size};

/// Section holding every tiling key.
pub const SECTION: &str = "tiling";

/// Parse an `Ini` object into a `TilingConfig`.
///
/// Starts from `TilingConfig::default()` and overlays any values found in the
/// `[tiling]` section. Unknown keys and sections are ignored.
pub(super) fn parse_ini(ini: &Ini) -> Result<TilingConfig, ConfigError> {
    let mut config = TilingConfig::default();

    let Some(section) = ini.section(Some(SECTION)) else {
        return Ok(config);
    };

    if let Some(v) = section.get("max_texture_size") {
        let size = parse_size_value("max_texture_size", v)?;
        if size.is_empty() {
            return Err(invalid("max_texture_size", v, "must be at least 1x1"));
        }
        config.max_texture_size = size;
    }

    if let Some(v) = section.get("total_size") {
        config.total_size = parse_size_value("total_size", v)?;
    }

    match (section.get("border_texels"), section.get("has_border_texels")) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::Conflict {
                section: SECTION.to_string(),
                first: "border_texels".to_string(),
                second: "has_border_texels".to_string(),
            });
        }
        (Some(v), None) => {
            config.border_texels = match v.trim().parse::<i32>() {
                Ok(n) if n >= 0 => n,
                _ => {
                    return Err(invalid(
                        "border_texels",
                        v,
                        "must be a non-negative integer",
                    ))
                }
            };
        }
        (None, Some(v)) => {
            config.border_texels = match v.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => 1,
                "false" | "no" | "off" | "0" => 0,
                _ => return Err(invalid("has_border_texels", v, "must be true or false")),
            };
        }
        (None, None) => {}
    }

    Ok(config)
}

fn parse_size_value(key: &str, value: &str) -> Result<Size, ConfigError> {
    parse_size(value).map_err(|e| invalid(key, value, &e.to_string()))
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: SECTION.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<TilingConfig, ConfigError> {
        let ini = Ini::load_from_str(text).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        assert_eq!(parse("").unwrap(), TilingConfig::default());
    }

    #[test]
    fn test_other_sections_are_ignored() {
        let config = parse("[display]\ntotal_size = 10x10\n").unwrap();
        assert_eq!(config, TilingConfig::default());
    }

    #[test]
    fn test_full_section() {
        let config = parse(
            "[tiling]\nmax_texture_size = 256x128\ntotal_size = 1000x800\nborder_texels = 2\n",
        )
        .unwrap();
        assert_eq!(config.max_texture_size, Size::new(256, 128));
        assert_eq!(config.total_size, Size::new(1000, 800));
        assert_eq!(config.border_texels, 2);
    }

    #[test]
    fn test_has_border_texels_maps_to_one() {
        let config = parse("[tiling]\nhas_border_texels = TRUE\n").unwrap();
        assert_eq!(config.border_texels, 1);

        let config = parse("[tiling]\nhas_border_texels = off\n").unwrap();
        assert_eq!(config.border_texels, 0);
    }

    #[test]
    fn test_border_keys_conflict() {
        let result = parse("[tiling]\nborder_texels = 1\nhas_border_texels = true\n");
        assert!(matches!(result, Err(ConfigError::Conflict { .. })));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            parse("[tiling]\nborder_texels = -1\n"),
            Err(ConfigError::InvalidValue { key, .. }) if key == "border_texels"
        ));
        assert!(matches!(
            parse("[tiling]\nhas_border_texels = maybe\n"),
            Err(ConfigError::InvalidValue { key, .. }) if key == "has_border_texels"
        ));
        assert!(matches!(
            parse("[tiling]\ntotal_size = big\n"),
            Err(ConfigError::InvalidValue { key, .. }) if key == "total_size"
        ));
        assert!(matches!(
            parse("[tiling]\nmax_texture_size = 0x512\n"),
            Err(ConfigError::InvalidValue { key, .. }) if key == "max_texture_size"
        ));
    }
}
