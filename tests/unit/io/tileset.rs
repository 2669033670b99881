//! Tests for tile loading, edge signatures and adjacency construction

#[cfg(test)]
mod tests {
    use crate::solid_tile;
    use annealtile::AlgorithmError;
    use annealtile::io::tileset::{
        EdgeSignature, TileSet, default_output_path, edge_distance, parse_connector_code,
        pixel_distance,
    };
    use annealtile::spatial::Direction;
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    // Left half red, right half blue
    fn split_tile() -> RgbaImage {
        RgbaImage::from_fn(4, 4, |x, _| if x < 2 { Rgba(RED) } else { Rgba(BLUE) })
    }

    // Distance is Euclidean over all four channels
    #[test]
    fn test_pixel_distance() {
        assert!(pixel_distance(RED, RED).abs() < f64::EPSILON);
        assert!((pixel_distance([0, 0, 0, 0], [3, 4, 0, 0]) - 5.0).abs() < 1e-12);
    }

    // Edge distance averages pixel distances
    #[test]
    fn test_edge_distance() {
        let a = [[0, 0, 0, 0], [0, 0, 0, 0]];
        let b = [[3, 4, 0, 0], [0, 0, 0, 0]];
        assert!((edge_distance(&a, &b) - 2.5).abs() < 1e-12);
        assert!(edge_distance(&[], &[]).abs() < f64::EPSILON);
    }

    // Borders are read from the correct rows and columns
    #[test]
    fn test_edge_signature() {
        let edges = EdgeSignature::from_image(&split_tile());
        assert!(edges.west.iter().all(|&p| p == RED));
        assert!(edges.east.iter().all(|&p| p == BLUE));
        assert_eq!(edges.north, vec![RED, RED, BLUE, BLUE]);
        assert_eq!(edges.edge(Direction::South), edges.south.as_slice());
    }

    // Connector codes need four leading digits
    #[test]
    fn test_parse_connector_code() {
        assert_eq!(parse_connector_code("0101_road.png"), Some([0, 1, 0, 1]));
        assert_eq!(parse_connector_code("12a4.png"), None);
        assert_eq!(parse_connector_code("12"), None);
    }

    // Mismatched tile sizes are rejected
    #[test]
    fn test_from_images_rejects_mixed_sizes() {
        let result = TileSet::from_images(vec![
            ("a".to_string(), solid_tile(2, RED)),
            ("b".to_string(), solid_tile(3, RED)),
        ]);
        assert!(matches!(result, Err(AlgorithmError::InvalidSourceData { .. })));
        assert!(matches!(
            TileSet::from_images(Vec::new()),
            Err(AlgorithmError::EmptyTileSet)
        ));
    }

    // Matching borders become adjacency, mismatched ones do not
    #[test]
    fn test_edge_adjacency() {
        let set = TileSet::from_images(vec![
            ("red".to_string(), solid_tile(4, RED)),
            ("blue".to_string(), solid_tile(4, BLUE)),
            ("split".to_string(), split_tile()),
        ])
        .expect("valid tiles");
        let index = set.edge_adjacency(8.0).expect("valid threshold");

        assert!(index.permits(0, Direction::North, 0));
        assert!(!index.permits(0, Direction::East, 1));
        // Split tile: red on its west side, blue on its east side
        assert!(index.permits(0, Direction::East, 2));
        assert!(index.permits(2, Direction::East, 1));
        assert!(!index.permits(2, Direction::West, 1));
        // Split tile's top edge is half red, half blue
        assert!(!index.permits(2, Direction::North, 0));
    }

    // Zero threshold permits nothing because the comparison is strict
    #[test]
    fn test_edge_adjacency_threshold() {
        let set = TileSet::from_images(vec![("red".to_string(), solid_tile(2, RED))])
            .expect("valid tiles");
        let index = set.edge_adjacency(0.0).expect("valid threshold");
        assert!(!index.permits(0, Direction::East, 0));
        assert!(matches!(
            set.edge_adjacency(-1.0),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
    }

    // Facing connector digits must match
    #[test]
    fn test_connector_adjacency() {
        let set = TileSet::from_images(vec![
            ("0101_road.png".to_string(), solid_tile(2, RED)),
            ("0000_grass.png".to_string(), solid_tile(2, BLUE)),
        ])
        .expect("valid tiles");
        let index = set.connector_adjacency().expect("coded names");

        assert!(index.permits(0, Direction::East, 0));
        assert!(index.permits(0, Direction::North, 1));
        assert!(!index.permits(0, Direction::East, 1));
        assert!(index.permits(1, Direction::South, 1));
    }

    // Uncoded names are reported in connector mode
    #[test]
    fn test_connector_adjacency_requires_codes() {
        let set = TileSet::from_images(vec![("grass.png".to_string(), solid_tile(2, RED))])
            .expect("valid tiles");
        assert!(matches!(
            set.connector_adjacency(),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    // Only PNG files are loaded, in name order
    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        solid_tile(3, BLUE)
            .save(dir.path().join("b.png"))
            .expect("write tile");
        solid_tile(3, RED)
            .save(dir.path().join("a.PNG"))
            .expect("write tile");
        std::fs::write(dir.path().join("notes.txt"), "not a tile").expect("write text");

        let set = TileSet::load_dir(dir.path()).expect("tiles load");
        assert_eq!(set.len(), 2);
        assert_eq!(set.tile_size(), (3, 3));
        assert_eq!(set.get(0).map(|t| t.name.as_str()), Some("a.PNG"));
        assert_eq!(set.get(0).map(|t| t.image.get_pixel(0, 0).0), Some(RED));
        assert_eq!(set.source().expect("tiles").tile_count(), 2);
    }

    // A directory without PNGs is an empty tile set
    #[test]
    fn test_load_dir_without_tiles() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(matches!(
            TileSet::load_dir(dir.path()),
            Err(AlgorithmError::EmptyTileSet)
        ));
        assert!(matches!(
            TileSet::load_dir(&dir.path().join("missing")),
            Err(AlgorithmError::FileSystem { .. })
        ));
    }

    // Output lands beside the tile directory
    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("assets/tiles"), "output.png"),
            PathBuf::from("assets/output.png")
        );
    }
}
