//! Tile directory loading and adjacency construction
//!
//! Two ways to decide which tiles may touch:
//! - Pixel edges: the facing border rows/columns of two tiles must be close
//!   in RGBA space (mean per-pixel Euclidean distance below a threshold).
//! - Connector codes: file names start with four digits `NESW` and facing
//!   digits must be equal (`0101_road.png` connects east and west).

use crate::io::configuration::CONNECTOR_CODE_LENGTH;
use crate::io::error::{AlgorithmError, Result, invalid_parameter, invalid_source};
use crate::spatial::{AdjacencyIndex, Direction, TileSource};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Border pixels of a tile, each edge read left-to-right or top-to-bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSignature {
    /// Top row
    pub north: Vec<[u8; 4]>,
    /// Right column
    pub east: Vec<[u8; 4]>,
    /// Bottom row
    pub south: Vec<[u8; 4]>,
    /// Left column
    pub west: Vec<[u8; 4]>,
}

impl EdgeSignature {
    /// Read the four borders of `image`
    pub fn from_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let pixel = |x: u32, y: u32| image.get_pixel_checked(x, y).map_or([0; 4], |p| p.0);
        let last_x = width.saturating_sub(1);
        let last_y = height.saturating_sub(1);

        Self {
            north: (0..width).map(|x| pixel(x, 0)).collect(),
            east: (0..height).map(|y| pixel(last_x, y)).collect(),
            south: (0..width).map(|x| pixel(x, last_y)).collect(),
            west: (0..height).map(|y| pixel(0, y)).collect(),
        }
    }

    /// The border facing `direction`
    pub fn edge(&self, direction: Direction) -> &[[u8; 4]] {
        match direction {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
        }
    }
}

/// Euclidean distance between two RGBA pixels
pub fn pixel_distance(a: [u8; 4], b: [u8; 4]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&p, &q)| {
            let d = f64::from(p) - f64::from(q);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Mean pixel distance between two edges of equal length
///
/// Empty edges are identical by definition.
pub fn edge_distance(a: &[[u8; 4]], b: &[[u8; 4]]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let total: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&p, &q)| pixel_distance(p, q))
        .sum();
    total / a.len() as f64
}

/// Parse the leading `NESW` connector digits of a tile name
pub fn parse_connector_code(name: &str) -> Option<[u8; CONNECTOR_CODE_LENGTH]> {
    let mut code = [0; CONNECTOR_CODE_LENGTH];
    let mut digits = name.bytes();
    for slot in &mut code {
        let byte = digits.next()?;
        if !byte.is_ascii_digit() {
            return None;
        }
        *slot = byte - b'0';
    }
    Some(code)
}

/// A decoded tile image
#[derive(Debug, Clone)]
pub struct TileImage {
    /// File name (or caller-supplied label)
    pub name: String,
    /// RGBA pixels
    pub image: RgbaImage,
    /// Cached border pixels
    pub edges: EdgeSignature,
}

/// Equally sized tiles indexed `0..len()`
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<TileImage>,
    tile_width: u32,
    tile_height: u32,
}

impl TileSet {
    /// Load every `.png` in `directory`, in file name order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be read
    /// - A PNG fails to decode
    /// - The directory holds no PNG files
    /// - The tiles differ in size
    pub fn load_dir(directory: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(directory).map_err(|e| AlgorithmError::FileSystem {
            path: directory.to_path_buf(),
            operation: "read tile directory",
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| AlgorithmError::FileSystem {
                    path: directory.to_path_buf(),
                    operation: "read tile directory entry",
                    source: e,
                })?
                .path();
            if is_png(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut named = Vec::with_capacity(paths.len());
        for path in paths {
            let image = image::open(&path)
                .map_err(|e| AlgorithmError::ImageLoad {
                    path: path.clone(),
                    source: e,
                })?
                .to_rgba8();
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            named.push((name, image));
        }

        Self::from_images(named)
    }

    /// Build a tile set from already decoded images
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` for no images and `InvalidSourceData` when
    /// sizes differ
    pub fn from_images(images: Vec<(String, RgbaImage)>) -> Result<Self> {
        let Some((_, first)) = images.first() else {
            return Err(AlgorithmError::EmptyTileSet);
        };
        let (tile_width, tile_height) = first.dimensions();

        let mut tiles = Vec::with_capacity(images.len());
        for (name, image) in images {
            if image.dimensions() != (tile_width, tile_height) {
                let (width, height) = image.dimensions();
                return Err(invalid_source(&format!(
                    "tile '{name}' is {width}x{height}, expected {tile_width}x{tile_height}"
                )));
            }
            let edges = EdgeSignature::from_image(&image);
            tiles.push(TileImage { name, image, edges });
        }

        Ok(Self {
            tiles,
            tile_width,
            tile_height,
        })
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set has no tiles (never true for a constructed set)
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Pixel size `(width, height)` shared by all tiles
    pub const fn tile_size(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    /// Tile by index
    pub fn get(&self, index: usize) -> Option<&TileImage> {
        self.tiles.get(index)
    }

    /// All tiles in index order
    pub fn tiles(&self) -> &[TileImage] {
        &self.tiles
    }

    /// Uniform source over this set
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if the set is empty
    pub fn source(&self) -> Result<TileSource> {
        TileSource::uniform(self.len())
    }

    /// Adjacency from border pixel similarity
    ///
    /// `b` may sit in direction `d` of `a` when the edge of `a` facing `d`
    /// and the edge of `b` facing back are closer than `threshold`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a negative or non-finite threshold
    pub fn edge_adjacency(&self, threshold: f64) -> Result<AdjacencyIndex> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(invalid_parameter(
                "threshold",
                &threshold,
                &"must be a non-negative finite number",
            ));
        }
        AdjacencyIndex::from_predicate(self.len(), |a, direction, b| {
            match (self.tiles.get(a), self.tiles.get(b)) {
                (Some(from), Some(to)) => {
                    edge_distance(
                        from.edges.edge(direction),
                        to.edges.edge(direction.opposite()),
                    ) < threshold
                }
                _ => false,
            }
        })
    }

    /// Adjacency from `NESW` connector digits at the start of each tile name
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if a tile name has no connector code
    pub fn connector_adjacency(&self) -> Result<AdjacencyIndex> {
        let mut codes = Vec::with_capacity(self.len());
        for tile in &self.tiles {
            let code = parse_connector_code(&tile.name).ok_or_else(|| {
                invalid_source(&format!(
                    "tile '{}' does not start with {CONNECTOR_CODE_LENGTH} connector digits",
                    tile.name
                ))
            })?;
            codes.push(code);
        }

        AdjacencyIndex::from_predicate(self.len(), |a, direction, b| {
            match (codes.get(a), codes.get(b)) {
                (Some(from), Some(to)) => {
                    from.get(direction.index()) == to.get(direction.opposite().index())
                }
                _ => false,
            }
        })
    }
}

fn is_png(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Default output path next to the tile directory
pub fn default_output_path(directory: &Path, file_name: &str) -> PathBuf {
    directory
        .parent()
        .map_or_else(|| PathBuf::from(file_name), |parent| parent.join(file_name))
}
