//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use annealtile::AlgorithmError;
    use annealtile::io::error::{invalid_parameter, invalid_source};
    use std::error::Error;

    // Tests error source chaining works correctly
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = AlgorithmError::FileSystem {
            path: "/tmp/tiles".into(),
            operation: "read tile directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(AlgorithmError::EmptyTileSet.source().is_none());
    }

    // Dimensions appear in the message as WxH
    #[test]
    fn test_invalid_dimensions_message() {
        let error = AlgorithmError::InvalidDimensions {
            width: 0,
            height: 7,
        };
        assert_eq!(error.to_string(), "Invalid grid dimensions 0x7");
    }

    // Helper formats parameter, value and reason
    #[test]
    fn test_invalid_parameter_helper() {
        let error = invalid_parameter("steps", &-1, &"must be positive");
        assert!(matches!(
            &error,
            AlgorithmError::InvalidParameter { parameter: "steps", value, .. } if value == "-1"
        ));
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'steps' = '-1': must be positive"
        );
    }

    // Tile index errors name the index and set size
    #[test]
    fn test_invalid_tile_index_message() {
        let error = AlgorithmError::InvalidTileIndex {
            index: 9,
            max_tiles: 4,
        };
        let message = error.to_string();
        assert!(message.contains('9'));
        assert!(message.contains('4'));
    }

    // Source data helper keeps the reason
    #[test]
    fn test_invalid_source_helper() {
        let error = invalid_source(&"tile 'x' is 2x3");
        assert_eq!(error.to_string(), "Invalid source data: tile 'x' is 2x3");
    }
}
