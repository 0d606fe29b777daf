//! tilegrid CLI - Command-line interface
//!
//! Inspects the tile grid derived from a tiling configuration: overall
//! layout, single tile geometry, the tiles covering a rectangle, and the
//! tiles covering one rectangle but not another.

mod error;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tilegrid::config::TilingConfig;
use tilegrid::geometry::{ParseGeometryError, Rect, Size, TileIndex, Vector2d};
use tilegrid::logging::{default_log_file, init_logging, LoggingGuard};
use tilegrid::tiling::TilingData;
use tracing::{debug, info};

use error::CliError;

#[derive(Parser)]
#[command(name = "tilegrid")]
#[command(version = tilegrid::VERSION)]
#[command(about = "Inspect tile grids for large bordered surfaces", long_about = None)]
struct Args {
    /// Config file to load instead of ~/.tilegrid/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Surface size as WxH
    #[arg(long, global = true, value_name = "WxH")]
    total: Option<Size>,

    /// Maximum tile size, border included, as WxH
    #[arg(long, global = true, value_name = "WxH", value_parser = parse_max_texture)]
    max_texture: Option<Size>,

    /// Border texels shared by adjacent tiles
    #[arg(
        long,
        global = true,
        value_name = "N",
        value_parser = clap::value_parser!(i32).range(0..),
        conflicts_with = "has_border"
    )]
    border: Option<i32>,

    /// Use a one texel border
    #[arg(long, global = true)]
    has_border: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write logs to this directory (logging is off otherwise)
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show grid dimensions and the position and size of every column and row
    Layout,

    /// Show the geometry of a single tile
    Tile {
        /// Column index
        #[arg(allow_hyphen_values = true)]
        x: i32,
        /// Row index
        #[arg(allow_hyphen_values = true)]
        y: i32,
    },

    /// List the tiles whose bordered bounds touch a rectangle
    Cover {
        /// Rectangle as X,Y,WxH
        #[arg(allow_hyphen_values = true)]
        rect: Rect,
    },

    /// List the tiles touching one rectangle but not another
    Diff {
        /// Rectangle to enumerate, as X,Y,WxH
        #[arg(allow_hyphen_values = true)]
        consider: Rect,
        /// Rectangle whose tiles are skipped, as X,Y,WxH
        #[arg(allow_hyphen_values = true)]
        ignore: Rect,
    },
}

/// Extent of one column or row.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct Span {
    index: i32,
    position: i32,
    size: i32,
}

#[derive(Debug, Serialize)]
struct LayoutReport {
    total_size: Size,
    max_texture_size: Size,
    border_texels: i32,
    num_tiles_x: i32,
    num_tiles_y: i32,
    largest_tile_size: Size,
    columns: Vec<Span>,
    rows: Vec<Span>,
}

#[derive(Debug, Serialize)]
struct TileReport {
    index: TileIndex,
    bounds: Rect,
    bounds_with_border: Rect,
    texture_offset: Vector2d,
}

#[derive(Debug, Serialize)]
struct CoverReport {
    rect: Rect,
    expanded_bounds: Rect,
    expanded_bounds_with_borders: Rect,
    tiles: Vec<TileIndex>,
}

#[derive(Debug, Serialize)]
struct DiffReport {
    consider: Rect,
    ignore: Rect,
    tiles: Vec<TileIndex>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let _logging_guard = start_logging(args.log_dir.as_deref())?;

    let config = build_config(&args)?;
    info!(
        total = %config.total_size,
        max_texture = %config.max_texture_size,
        border = config.border_texels,
        "Tiling configuration"
    );
    let tiling = config.to_tiling_data();

    match args.command {
        Command::Layout => {
            let report = layout_report(&tiling);
            if args.json {
                print_json(&report)?;
            } else {
                print_layout(&report);
            }
        }
        Command::Tile { x, y } => {
            let report = tile_report(&tiling, x, y)?;
            if args.json {
                print_json(&report)?;
            } else {
                println!("Tile {}", report.index);
                println!("  Bounds:             {}", report.bounds);
                println!("  Bounds with border: {}", report.bounds_with_border);
                println!("  Texture offset:     {}", report.texture_offset);
            }
        }
        Command::Cover { rect } => {
            let report = cover_report(&tiling, rect);
            if args.json {
                print_json(&report)?;
            } else {
                println!("Rect {} touches {} tile(s)", report.rect, report.tiles.len());
                println!("  Expanded bounds:              {}", report.expanded_bounds);
                println!(
                    "  Expanded bounds with borders: {}",
                    report.expanded_bounds_with_borders
                );
                print_tiles(&report.tiles);
            }
        }
        Command::Diff { consider, ignore } => {
            let report = diff_report(&tiling, consider, ignore);
            if args.json {
                print_json(&report)?;
            } else {
                println!(
                    "{} tile(s) touch {} but not {}",
                    report.tiles.len(),
                    report.consider,
                    report.ignore
                );
                print_tiles(&report.tiles);
            }
        }
    }

    Ok(())
}

/// Same rule as `max_texture_size` in the config file.
fn parse_max_texture(value: &str) -> Result<Size, String> {
    let size: Size = value.parse().map_err(|e: ParseGeometryError| e.to_string())?;
    if size.is_empty() {
        return Err("must be at least 1x1".to_string());
    }
    Ok(size)
}

fn start_logging(log_dir: Option<&str>) -> Result<Option<LoggingGuard>, CliError> {
    match log_dir {
        Some(dir) => init_logging(dir, default_log_file())
            .map(Some)
            .map_err(CliError::LoggingInit),
        None => Ok(None),
    }
}

/// Load the config file, then apply command-line overrides.
fn build_config(args: &Args) -> Result<TilingConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => TilingConfig::load_from(path)?,
        None => TilingConfig::load()?,
    };

    if let Some(total) = args.total {
        config = config.with_total_size(total);
    }
    if let Some(max_texture) = args.max_texture {
        config = config.with_max_texture_size(max_texture);
    }
    if let Some(border) = args.border {
        config = config.with_border_texels(border);
    } else if args.has_border {
        config = config.with_border_texels(1);
    }

    debug!(?config, "Effective configuration");
    Ok(config)
}

fn layout_report(tiling: &TilingData) -> LayoutReport {
    let columns = (0..tiling.num_tiles_x())
        .map(|i| Span {
            index: i,
            position: tiling.tile_position_x(i),
            size: tiling.tile_size_x(i),
        })
        .collect();
    let rows = (0..tiling.num_tiles_y())
        .map(|j| Span {
            index: j,
            position: tiling.tile_position_y(j),
            size: tiling.tile_size_y(j),
        })
        .collect();

    LayoutReport {
        total_size: tiling.total_size(),
        max_texture_size: tiling.max_texture_size(),
        border_texels: tiling.border_texels(),
        num_tiles_x: tiling.num_tiles_x(),
        num_tiles_y: tiling.num_tiles_y(),
        largest_tile_size: tiling.largest_tile_size(),
        columns,
        rows,
    }
}

fn tile_report(tiling: &TilingData, x: i32, y: i32) -> Result<TileReport, CliError> {
    let in_range = (0..tiling.num_tiles_x()).contains(&x) && (0..tiling.num_tiles_y()).contains(&y);
    if !in_range {
        return Err(CliError::TileOutOfRange {
            x,
            y,
            num_tiles_x: tiling.num_tiles_x(),
            num_tiles_y: tiling.num_tiles_y(),
        });
    }

    Ok(TileReport {
        index: TileIndex::new(x, y),
        bounds: tiling.tile_bounds(x, y),
        bounds_with_border: tiling.tile_bounds_with_border(x, y),
        texture_offset: tiling.texture_offset(x, y),
    })
}

fn cover_report(tiling: &TilingData, rect: Rect) -> CoverReport {
    CoverReport {
        rect,
        expanded_bounds: tiling.expand_rect_to_tile_bounds(rect),
        expanded_bounds_with_borders: tiling.expand_rect_to_tile_bounds_with_borders(rect),
        tiles: tiling.iter(rect).collect(),
    }
}

fn diff_report(tiling: &TilingData, consider: Rect, ignore: Rect) -> DiffReport {
    DiffReport {
        consider,
        ignore,
        tiles: tiling.difference_iter(consider, ignore).collect(),
    }
}

fn print_layout(report: &LayoutReport) {
    println!("Surface:       {}", report.total_size);
    println!("Max texture:   {}", report.max_texture_size);
    println!("Border texels: {}", report.border_texels);
    println!(
        "Grid:          {}x{} tiles",
        report.num_tiles_x, report.num_tiles_y
    );
    println!("Largest tile:  {}", report.largest_tile_size);

    println!();
    println!("Columns:");
    for span in &report.columns {
        println!("  {:>4}  x={:<8} width={}", span.index, span.position, span.size);
    }
    println!("Rows:");
    for span in &report.rows {
        println!("  {:>4}  y={:<8} height={}", span.index, span.position, span.size);
    }
}

fn print_tiles(tiles: &[TileIndex]) {
    for tile in tiles {
        println!("  {}", tile);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
