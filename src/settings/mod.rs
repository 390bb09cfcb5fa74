use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, path::PathBuf};
use thiserror::Error;

use crate::constants::base_path;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazePreset {
    pub title: String,
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot access settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
    #[serde(default)]
    pub mazes: Option<Vec<MazePreset>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn set_mazes(mut self, value: Vec<MazePreset>) -> Self {
        self.mazes = Some(value);
        self
    }

    /// Configured presets, or the bundled ones if there are none.
    pub fn get_mazes(&self) -> Vec<MazePreset> {
        match &self.mazes {
            Some(mazes) if !mazes.is_empty() => mazes.clone(),
            _ => Self::bundled().mazes.unwrap_or_default(),
        }
    }

    /// First preset marked as default, otherwise the first one.
    pub fn default_preset(&self) -> Option<MazePreset> {
        let mazes = self.get_mazes();
        let default = mazes.iter().position(|maze| maze.default).unwrap_or(0);
        mazes.into_iter().nth(default)
    }

    pub fn preset(&self, title: &str) -> Option<MazePreset> {
        self.get_mazes()
            .into_iter()
            .find(|maze| maze.title.eq_ignore_ascii_case(title))
    }

    pub fn default_path() -> PathBuf {
        base_path().join("settings.ron")
    }

    /// Loads the settings, writing the bundled defaults first if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let settings_string = match fs::read_to_string(path) {
            Ok(string) => string,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Settings file {:?} not found, creating default one", path);
                Self::reset_config(path)?;
                DEFAULT_SETTINGS.to_string()
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_owned(),
                    source,
                })
            }
        };

        Self::parse(&settings_string).map_err(|source| SettingsError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_owned(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_SETTINGS).map_err(io_err)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_owned(),
            source,
        };

        let string = Self::options().to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, string).map_err(io_err)
    }

    fn parse(string: &str) -> Result<Self, ron::error::SpannedError> {
        Self::options().from_str(string)
    }

    fn bundled() -> Self {
        Self::parse(DEFAULT_SETTINGS).unwrap_or_else(|err| {
            log::warn!("Bundled settings are invalid: {}", err);
            Self::default()
        })
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("setmaze-test-{}-{}", std::process::id(), name))
            .join("settings.ron")
    }

    #[test]
    fn bundled_settings_parse() {
        let settings = Settings::parse(DEFAULT_SETTINGS).unwrap();

        assert_eq!(settings.get_seed(), None);
        assert_eq!(settings.get_log_level(), LogLevel::Warn);

        let preset = settings.default_preset().unwrap();
        assert_eq!(preset.title, "30x10");
        assert_eq!((preset.rows, preset.cols), (10, 30));
    }

    #[test]
    fn implicit_some() {
        let settings =
            Settings::parse("(seed: 7, mazes: [(title: \"a\", rows: 2, cols: 3)])").unwrap();

        assert_eq!(settings.get_seed(), Some(7));
        assert_eq!(settings.get_log_level(), LogLevel::Warn);
        assert_eq!(settings.default_preset().unwrap().title, "a");
        assert_eq!(settings.preset("A").unwrap().cols, 3);
        assert_eq!(settings.preset("b"), None);
    }

    #[test]
    fn empty_settings_fall_back_to_bundled_presets() {
        let settings = Settings::parse("()").unwrap();
        assert!(!settings.get_mazes().is_empty());
        assert_eq!(settings.default_preset().unwrap().title, "30x10");
    }

    #[test]
    fn load_creates_default_file() {
        let path = temp_path("create");
        let _ = fs::remove_dir_all(path.parent().unwrap());

        let settings = Settings::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(settings, Settings::parse(DEFAULT_SETTINGS).unwrap());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn save_and_load() {
        let path = temp_path("save");

        let settings = Settings::new()
            .set_seed(3)
            .set_log_level(LogLevel::Debug)
            .set_mazes(vec![MazePreset {
                title: "tiny".into(),
                rows: 2,
                cols: 2,
                default: true,
            }]);
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn save_creates_missing_directories() {
        let root = temp_path("nested");
        let root = root.parent().unwrap();
        let path = root.join("a").join("b").join("settings.ron");
        let _ = fs::remove_dir_all(root);

        let settings = Settings::new().set_seed(9);
        settings.save(&path).unwrap();

        assert!(path.is_file());
        assert_eq!(Settings::load(&path).unwrap().get_seed(), Some(9));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn default_log_level_is_warn() {
        assert_eq!(LogLevel::default(), LogLevel::Warn);
        assert_eq!(Settings::new().get_log_level(), LogLevel::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::default()), log::LevelFilter::Warn);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(seed: \"nope\")").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::Parse { .. })
        ));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
