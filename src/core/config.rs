use super::error::HostError;
use super::pixel_format::PixelFormat;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Looked up in the APK assets, then in the app's internal data directory.
/// The data directory copy replaces the bundled one entirely, so a developer can push
/// a tweaked file with `adb` without rebuilding the APK.
pub const CONFIG_FILE: &str = "engine_host.toml";

pub const LOG_TAG: &str = "engine-host";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct HostConfig {
    /// Every group carries `#[serde(default)]`: a missing group must not reset the groups next to it.
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Landscape,
    Portrait,
    SensorLandscape,
    Unspecified,
}

impl Orientation {
    /// Value of the matching `ActivityInfo.SCREEN_ORIENTATION_*` constant.
    pub fn android_value(self) -> i32 {
        match self {
            Orientation::Landscape => 0,
            Orientation::Portrait => 1,
            Orientation::SensorLandscape => 6,
            Orientation::Unspecified => -1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub fullscreen: bool,
    pub keep_screen_on: bool,
    /// Also hide the navigation bar; `fullscreen` alone only hides the status bar.
    pub immersive: bool,
    pub orientation: Orientation,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            fullscreen: true,
            keep_screen_on: true,
            immersive: true,
            orientation: Orientation::Landscape,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
    pub alpha: i32,
    pub depth: i32,
    pub stencil: i32,
    /// 0 leaves the total buffer size up to the driver.
    pub buffer_size: i32,
    pub gles_version: i32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        let format = PixelFormat::RGBA4444_D8;
        Self {
            red: format.red,
            green: format.green,
            blue: format.blue,
            alpha: format.alpha,
            depth: format.depth,
            stencil: format.stencil,
            buffer_size: 0,
            gles_version: 2,
        }
    }
}

impl SurfaceConfig {
    pub fn pixel_format(&self) -> PixelFormat {
        PixelFormat {
            red: self.red,
            green: self.green,
            blue: self.blue,
            alpha: self.alpha,
            depth: self.depth,
            stencil: self.stencil,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Resolution the engine expects pointer coordinates in. 0x0 passes surface pixels through.
    pub virtual_width: i32,
    pub virtual_height: i32,
    pub flip_y: bool,
    /// Scale of the per-move axis deltas, relative to the larger virtual dimension.
    pub axis_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            virtual_width: 0,
            virtual_height: 0,
            flip_y: false,
            axis_sensitivity: 100.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `log` level name. Empty picks the build default.
    pub level: String,
    /// Crash reporting is off unless a DSN is set.
    pub sentry_dsn: String,
}

impl HostConfig {
    pub fn from_toml(content: &str) -> Result<Self, HostError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file. `Ok(None)` when there is no file at `path`.
    pub fn from_file(path: &Path) -> Result<Option<Self>, HostError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Pick the first config source that parses, in priority order.
    /// Malformed sources are skipped and returned so they can be reported once logging is up.
    pub fn resolve<I>(sources: I) -> (Self, Vec<HostError>)
    where
        I: IntoIterator<Item = Result<Option<Self>, HostError>>,
    {
        let mut errors = vec![];
        for source in sources {
            match source {
                Ok(Some(config)) => return (config, errors),
                Ok(None) => {}
                Err(err) => errors.push(err),
            }
        }
        (Self::default(), errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_defaults_for_an_empty_file() {
        let config = HostConfig::from_toml("").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.surface.pixel_format(), PixelFormat::RGBA4444_D8);
        assert_eq!(config.window.orientation, Orientation::Landscape);
    }

    #[test]
    fn should_keep_other_groups_when_one_is_partial() {
        let config = HostConfig::from_toml(
            r#"
                [surface]
                alpha = 0
                depth = 16

                [log]
                level = "warn"
            "#,
        )
        .unwrap();
        assert_eq!(config.surface.alpha, 0);
        assert_eq!(config.surface.depth, 16);
        assert_eq!(config.surface.red, 4);
        assert_eq!(config.surface.gles_version, 2);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.input, InputConfig::default());
    }

    #[test]
    fn should_parse_orientation_names() {
        let config = HostConfig::from_toml(
            r#"
                [window]
                orientation = "sensor_landscape"
                keep_screen_on = false
            "#,
        )
        .unwrap();
        assert_eq!(config.window.orientation, Orientation::SensorLandscape);
        assert_eq!(config.window.orientation.android_value(), 6);
        assert!(!config.window.keep_screen_on);
        assert!(config.window.fullscreen);
    }

    #[test]
    fn should_reject_malformed_files() {
        let result = HostConfig::from_toml("[surface]\nred = \"lots\"");
        assert!(matches!(result, Err(HostError::Config(_))));
    }

    #[test]
    fn should_prefer_the_first_parsable_source() {
        let bundled = HostConfig::default();
        let mut pushed = HostConfig::default();
        pushed.input.flip_y = true;

        let (config, errors) = HostConfig::resolve([Ok(Some(pushed.clone())), Ok(Some(bundled))]);
        assert_eq!(config, pushed);
        assert!(errors.is_empty());
    }

    #[test]
    fn should_skip_malformed_sources_and_report_them() {
        let mut bundled = HostConfig::default();
        bundled.surface.stencil = 8;

        let (config, errors) = HostConfig::resolve([
            Ok(None),
            HostConfig::from_toml("not = [valid").map(Some),
            Ok(Some(bundled.clone())),
        ]);
        assert_eq!(config, bundled);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn should_fall_back_to_defaults_without_sources() {
        let (config, errors) = HostConfig::resolve(std::iter::empty());
        assert_eq!(config, HostConfig::default());
        assert!(errors.is_empty());
    }
}
