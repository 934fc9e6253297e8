use hexmap_generator::config::list_saved_configs;
use hexmap_generator::{Direction, Hemisphere, MapConfig, MapError};

#[test]
fn test_save_load_list() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = MapConfig::with_size(60, 45).with_seed(1234);
    config.wind_direction = Direction::SE;
    config.hemisphere = Hemisphere::South;
    config.set_erosion_percentage(70);

    let path = config.save(dir.path(), "archipelago").unwrap();
    assert!(path.ends_with("archipelago.json"));
    MapConfig::default().save(dir.path(), "default").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a config").unwrap();

    assert_eq!(MapConfig::load(dir.path(), "archipelago").unwrap(), config);
    assert_eq!(list_saved_configs(dir.path()).unwrap(), vec!["archipelago", "default"]);
}

#[test]
fn test_missing_config_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(MapConfig::load(dir.path(), "nope"), Err(MapError::Io(_))));
    assert!(list_saved_configs(dir.path().join("absent")).unwrap().is_empty());
}

#[test]
fn test_loaded_values_are_clamped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("wild.json"),
        r#"{ "regionCount": 9, "seepageFactor": -1.0, "windDirection": "W" }"#,
    )
    .unwrap();

    let config = MapConfig::load(dir.path(), "wild").unwrap();
    assert_eq!(config.region_count(), 4);
    assert_eq!(config.seepage_factor(), 0.0);
    assert_eq!(config.wind_direction, Direction::W);
}
