use engine_host::core::config::{HostConfig, Orientation, CONFIG_FILE};
use engine_host::core::error::HostError;
use std::fs;
use tempfile::tempdir;

fn write_config_file(content: &str, base_dir: &std::path::Path) -> std::path::PathBuf {
    let file_path = base_dir.join(CONFIG_FILE);
    fs::write(&file_path, content).unwrap();
    file_path
}

#[test]
fn should_read_a_pushed_config_file() {
    let dir = tempdir().unwrap();
    let path = write_config_file(
        r#"
        [window]
        orientation = "portrait"

        [surface]
        stencil = 8
        buffer_size = 16

        [input]
        virtual_width = 640
        virtual_height = 480
        flip_y = true
    "#,
        dir.path(),
    );

    let config = HostConfig::from_file(&path).unwrap().unwrap();
    assert_eq!(config.window.orientation, Orientation::Portrait);
    assert_eq!(config.surface.stencil, 8);
    assert_eq!(config.surface.buffer_size, 16);
    assert_eq!(config.input.virtual_width, 640);
    assert!(config.input.flip_y);
}

#[test]
fn should_treat_a_missing_file_as_no_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    assert!(HostConfig::from_file(&path).unwrap().is_none());
}

#[test]
fn should_fall_back_to_the_bundled_config_when_the_pushed_one_is_malformed() {
    let dir = tempdir().unwrap();
    let path = write_config_file("[surface\nred = 8", dir.path());
    let bundled = HostConfig::from_toml("[log]\nlevel = \"debug\"");

    let (config, errors) = HostConfig::resolve([HostConfig::from_file(&path), bundled.map(Some)]);
    assert_eq!(config.log.level, "debug");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], HostError::Config(_)));
}
