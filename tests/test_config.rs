use std::path::PathBuf;
use std::time::Duration;

use castle_defense::config::Settings;

#[test]
fn empty_file_gives_defaults() {
    let s = Settings::from_toml_str("").unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.frame_interval(), Duration::from_millis(16));
    assert_eq!(s.spawn_intervals().enemy, Duration::from_millis(3000));
    assert_eq!(s.spawn_intervals().power_up, Duration::from_millis(10_000));
    assert_eq!(s.castle_image, PathBuf::from("castle.jpg"));
    assert_eq!(s.knight_image, PathBuf::from("knight.png"));
}

#[test]
fn partial_file_overrides_only_named_keys() {
    let s = Settings::from_toml_str(
        r#"
        enemy_spawn_ms = 1500
        knight_image = "assets/knight.png"
        cell_height = 16.0
        "#,
    )
    .unwrap();
    assert_eq!(s.spawn_intervals().enemy, Duration::from_millis(1500));
    assert_eq!(s.knight_image, PathBuf::from("assets/knight.png"));
    assert_eq!(s.cell_height, 16.0);
    assert_eq!(s.power_up_spawn_ms, 10_000);
    assert_eq!(s.cell_width, 10.0);
}

#[test]
fn zero_frame_period_rejected() {
    assert!(Settings::from_toml_str("frame_ms = 0").is_err());
}

#[test]
fn zero_spawn_interval_rejected() {
    assert!(Settings::from_toml_str("power_up_spawn_ms = 0").is_err());
}

#[test]
fn non_positive_cell_rejected() {
    assert!(Settings::from_toml_str("cell_width = 0.0").is_err());
}

#[test]
fn malformed_toml_rejected() {
    assert!(Settings::from_toml_str("frame_ms = \"fast\"").is_err());
}
