//! Tiling configuration
//!
//! Settings are read from the `[tiling]` section of an INI file:
//!
//! ```ini
//! [tiling]
//! max_texture_size = 512x512
//! total_size = 1000x1000
//! border_texels = 1
//! ```
//!
//! `has_border_texels = true|false` may be used instead of `border_texels`
//! as a shorthand for one or zero border texels.

mod file;
mod parser;

pub use file::{config_directory, config_file_path, ConfigError};
pub use parser::SECTION;

use crate::geometry::Size;
use crate::tiling::TilingData;

/// Default maximum tile extent, in texels, on each axis.
pub const DEFAULT_MAX_TEXTURE_SIZE: i32 = 512;

/// Tiling parameters before a grid is derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilingConfig {
    /// Largest tile, border included.
    pub max_texture_size: Size,
    /// Surface being tiled.
    pub total_size: Size,
    /// Overlap between adjacent tiles.
    pub border_texels: i32,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            max_texture_size: Size::new(DEFAULT_MAX_TEXTURE_SIZE, DEFAULT_MAX_TEXTURE_SIZE),
            total_size: Size::default(),
            border_texels: 0,
        }
    }
}

impl TilingConfig {
    /// Set the surface size.
    pub fn with_total_size(mut self, total_size: Size) -> Self {
        self.total_size = total_size;
        self
    }

    /// Set the maximum tile size.
    pub fn with_max_texture_size(mut self, max_texture_size: Size) -> Self {
        self.max_texture_size = max_texture_size;
        self
    }

    /// Set the border texel count.
    pub fn with_border_texels(mut self, border_texels: i32) -> Self {
        self.border_texels = border_texels;
        self
    }

    /// Build the tile grid described by this configuration.
    pub fn to_tiling_data(&self) -> TilingData {
        TilingData::with_border_texels(self.max_texture_size, self.total_size, self.border_texels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TilingConfig::default();
        assert_eq!(config.max_texture_size, Size::new(512, 512));
        assert!(config.total_size.is_empty());
        assert_eq!(config.border_texels, 0);
        assert!(config.to_tiling_data().has_empty_bounds());
    }

    #[test]
    fn test_builders_override_fields() {
        let config = TilingConfig::default()
            .with_total_size(Size::new(1000, 1000))
            .with_max_texture_size(Size::new(256, 256))
            .with_border_texels(1);

        let tiling = config.to_tiling_data();
        assert_eq!(tiling.total_size(), Size::new(1000, 1000));
        assert_eq!(tiling.max_texture_size(), Size::new(256, 256));
        assert_eq!(tiling.border_texels(), 1);
        // Inner size 254: 1 + (1000 - 1 - 2) / 254 = 4
        assert_eq!(tiling.num_tiles_x(), 4);
    }

    #[test]
    fn test_from_ini_str() {
        let config =
            TilingConfig::from_ini_str("[tiling]\ntotal_size = 40x25\nmax_texture_size = 10x10\n")
                .unwrap();
        let tiling = config.to_tiling_data();
        assert_eq!(tiling.num_tiles_x(), 4);
        assert_eq!(tiling.num_tiles_y(), 3);
    }
}
