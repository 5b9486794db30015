//! Tests for loading, saving and merging persisted session settings

#[cfg(test)]
mod tests {
    use stampgrid::StampError;
    use stampgrid::io::settings::Settings;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample() -> Settings {
        Settings {
            source: Some(PathBuf::from("photos/portrait.png")),
            stamp: Some(PathBuf::from("stamps/vector.png")),
            width: Some(1280),
            height: Some(960),
        }
    }

    // Tests a missing file yields empty settings
    // Verified by propagating the not-found error
    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(&temp_dir.path().join("absent.json")).unwrap();

        assert_eq!(settings, Settings::default());
    }

    // Tests saved settings load back identically
    // Verified by skipping the stamp field during serialization
    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stampgrid.json");

        sample().save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), sample());
    }

    // Tests partial files fill missing fields with None
    // Verified by removing the serde default attribute
    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.json");
        fs::write(&path, r#"{ "width": 800 }"#).unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.width, Some(800));
        assert_eq!(settings.source, None);
        assert_eq!(settings.height, None);
    }

    // Tests malformed files are reported rather than silently reset
    // Verified by falling back to defaults on parse errors
    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ width: ").unwrap();

        let result = Settings::load(&path);

        assert!(matches!(result, Err(StampError::Settings { .. })));
    }

    // Tests saving into a missing directory is a file system error
    // Verified by creating parent directories implicitly
    #[test]
    fn test_save_into_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing/stampgrid.json");

        let result = sample().save(&path);

        assert!(matches!(result, Err(StampError::FileSystem { .. })));
    }

    // Tests overrides win field by field
    // Verified by preferring saved values over overrides
    #[test]
    fn test_merged_with_prefers_overrides() {
        let overrides = Settings {
            source: Some(PathBuf::from("other.png")),
            height: Some(100),
            ..Settings::default()
        };

        let merged = sample().merged_with(&overrides);

        assert_eq!(merged.source, Some(PathBuf::from("other.png")));
        assert_eq!(merged.stamp, Some(PathBuf::from("stamps/vector.png")));
        assert_eq!(merged.width, Some(1280));
        assert_eq!(merged.height, Some(100));
    }
}
