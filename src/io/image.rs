//! Compositing a tiled grid into a raster and PNG export

use crate::io::error::{AlgorithmError, Result};
use crate::io::tileset::TileSet;
use crate::spatial::GridState;
use image::{RgbaImage, imageops};
use std::path::Path;

/// Paint every cell's tile at its grid position
///
/// # Errors
///
/// Returns `InvalidTileIndex` if the grid references a tile the set lacks,
/// or `InvalidDimensions` if the raster would not fit in `u32` pixels
pub fn compose_grid(grid: &GridState<'_>, tiles: &TileSet) -> Result<RgbaImage> {
    let (tile_width, tile_height) = tiles.tile_size();
    let too_large = || AlgorithmError::InvalidDimensions {
        width: grid.width(),
        height: grid.height(),
    };
    let width = u32::try_from(grid.width())
        .ok()
        .and_then(|w| w.checked_mul(tile_width))
        .ok_or_else(too_large)?;
    let height = u32::try_from(grid.height())
        .ok()
        .and_then(|h| h.checked_mul(tile_height))
        .ok_or_else(too_large)?;

    let mut canvas = RgbaImage::new(width, height);
    for ((y, x), &tile) in grid.tiles().indexed_iter() {
        let image = tiles
            .get(tile)
            .ok_or(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: tiles.len(),
            })?;
        imageops::replace(
            &mut canvas,
            &image.image,
            x as i64 * i64::from(tile_width),
            y as i64 * i64::from(tile_height),
        );
    }
    Ok(canvas)
}

/// Render the grid and save it as a PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - Compositing fails (see `compose_grid`)
/// - The parent directory cannot be created
/// - The image cannot be saved to `output_path`
pub fn export_grid_as_png(grid: &GridState<'_>, tiles: &TileSet, output_path: &Path) -> Result<()> {
    let canvas = compose_grid(grid, tiles)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
