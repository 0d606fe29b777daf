//! Integration tests for loading tiling configuration from disk.
//!
//! Run with: `cargo test --test config_loading`

use std::fs;

use tempfile::TempDir;

use tilegrid::config::{ConfigError, TilingConfig};
use tilegrid::geometry::{Rect, Size};

/// Write `contents` to `config.ini` inside a fresh temp directory.
fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.ini");
    fs::write(&path, contents).expect("Failed to write config");
    (dir, path)
}

#[test]
fn test_load_config_and_build_grid() {
    let (_dir, path) = write_config(
        "; layer backing store\n\
         [tiling]\n\
         max_texture_size = 512x512\n\
         total_size = 1000x1000\n\
         has_border_texels = true\n",
    );

    let config = TilingConfig::load_from(&path).unwrap();
    assert_eq!(config.border_texels, 1);

    let tiling = config.to_tiling_data();
    assert_eq!(tiling.num_tiles_x(), 2);
    assert_eq!(tiling.num_tiles_y(), 2);
    assert_eq!(tiling.tile_bounds(1, 1), Rect::new(511, 511, 489, 489));
}

#[test]
fn test_load_config_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = TilingConfig::load_from(&dir.path().join("absent.ini")).unwrap();
    assert_eq!(config, TilingConfig::default());
}

#[test]
fn test_load_config_rejects_invalid_size() {
    let (_dir, path) = write_config("[tiling]\ntotal_size = 100 by 100\n");
    let err = TilingConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "total_size"));
    assert!(err.to_string().contains("tiling.total_size"));
}

#[test]
fn test_cli_style_overrides_apply_after_load() {
    let (_dir, path) = write_config("[tiling]\nmax_texture_size = 64x64\ntotal_size = 100x100\n");

    let tiling = TilingConfig::load_from(&path)
        .unwrap()
        .with_total_size(Size::new(200, 50))
        .with_border_texels(2)
        .to_tiling_data();

    assert_eq!(tiling.max_texture_size(), Size::new(64, 64));
    assert_eq!(tiling.total_size(), Size::new(200, 50));
    // Inner size 60: 1 + (200 - 1 - 4) / 60 = 4, 1 + (50 - 1 - 4) / 60 = 1
    assert_eq!(tiling.num_tiles_x(), 4);
    assert_eq!(tiling.num_tiles_y(), 1);
}
