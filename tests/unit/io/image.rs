//! Tests for grid compositing and PNG export

#[cfg(test)]
mod tests {
    use annealtile::AlgorithmError;
    use annealtile::io::image::{compose_grid, export_grid_as_png};
    use crate::solid_tile;
    use annealtile::io::tileset::TileSet;
    use annealtile::spatial::{AdjacencyIndex, GridState, TileSource};
    use ndarray::Array2;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn two_tiles() -> TileSet {
        TileSet::from_images(vec![
            ("red".to_string(), solid_tile(2, RED)),
            ("blue".to_string(), solid_tile(2, BLUE)),
        ])
        .expect("valid tiles")
    }

    // Each cell's tile is painted at its grid offset
    #[test]
    fn test_compose_grid_places_tiles() {
        let index = AdjacencyIndex::from_predicate(2, |_, _, _| true).expect("two tiles");
        let tiles = Array2::from_shape_vec((1, 2), vec![0, 1]).expect("shape");
        let grid = GridState::from_tiles(&index, TileSource::uniform(2).expect("tiles"), tiles)
            .expect("valid grid");

        let canvas = compose_grid(&grid, &two_tiles()).expect("composes");
        assert_eq!(canvas.dimensions(), (4, 2));
        assert_eq!(canvas.get_pixel(1, 1).0, RED);
        assert_eq!(canvas.get_pixel(2, 0).0, BLUE);
    }

    // Grids referencing tiles the set lacks are reported
    #[test]
    fn test_compose_grid_missing_tile() {
        let index = AdjacencyIndex::new(3).expect("three tiles");
        let tiles = Array2::from_shape_vec((1, 1), vec![2]).expect("shape");
        let grid = GridState::from_tiles(&index, TileSource::uniform(3).expect("tiles"), tiles)
            .expect("valid grid");

        assert!(matches!(
            compose_grid(&grid, &two_tiles()),
            Err(AlgorithmError::InvalidTileIndex { index: 2, .. })
        ));
    }

    // Export creates missing parent directories
    #[test]
    fn test_export_creates_parents() {
        let index = AdjacencyIndex::from_predicate(2, |_, _, _| true).expect("two tiles");
        let tiles = Array2::from_shape_vec((2, 2), vec![0, 1, 1, 0]).expect("shape");
        let grid = GridState::from_tiles(&index, TileSource::uniform(2).expect("tiles"), tiles)
            .expect("valid grid");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("grid.png");

        export_grid_as_png(&grid, &two_tiles(), &path).expect("exports");

        let written = image::open(&path).expect("readable png").to_rgba8();
        assert_eq!(written.dimensions(), (4, 4));
        assert_eq!(written.get_pixel(3, 3).0, RED);
    }
}
