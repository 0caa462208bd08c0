//! Application configuration: the scene settings plus how the headless session runs.

use std::env;
use std::path::{Path, PathBuf};

use pyro_core::config::SceneConfig;
use pyro_core::error::ConfigError;
use pyro_core::FireworkKind;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const CONFIG_ENV: &str = "PYRO_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "pyro.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub width: f32,
    pub height: f32,
    pub fps: u32,
    /// Frames to run before exiting.
    pub frames: u64,
    /// Delay between autopilot taps. Never shorter than the drag throttle.
    pub tap_interval_ms: u64,
    /// Firework ids the autopilot picks from; empty means every public kind.
    pub picks: Vec<String>,
    /// Write a JSON snapshot every this many frames.
    pub dump_every: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            fps: 60,
            frames: 600,
            tap_interval_ms: 400,
            picks: Vec::new(),
            dump_every: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scene: SceneConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// `$PYRO_CONFIG`, else `pyro.toml` in the working directory, else defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        match Self::locate(env::var_os(CONFIG_ENV).map(PathBuf::from)) {
            Some(path) => {
                info!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => {
                info!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            fallback.is_file().then_some(fallback)
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = match self.scene.validate() {
            Ok(()) => Vec::new(),
            Err(ConfigError::Validation(errors)) => errors,
            Err(other) => return Err(other),
        };
        let s = &self.session;
        if !(s.width > 0.0 && s.height > 0.0) {
            errors.push(format!(
                "session size must be positive, got {}x{}",
                s.width, s.height
            ));
        }
        if s.fps == 0 {
            errors.push("session.fps must be at least 1".into());
        }
        if s.dump_every == Some(0) {
            errors.push("session.dump_every must be at least 1".into());
        }
        for id in &s.picks {
            if let Err(err) = id.parse::<FireworkKind>() {
                errors.push(format!("session.picks: {err}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.session.fps, 60);
        assert_eq!(config.scene.finale.moon_hits, 3);
        assert!(config.session.dump_every.is_none());
    }

    #[test]
    fn sections_override_independently() {
        let config = AppConfig::from_toml_str(
            r#"
            [session]
            width = 1280.0
            picks = ["rocket", "chakri"]
            dump_every = 30

            [scene.finale]
            duration = 120
            "#,
        )
        .unwrap();
        assert_eq!(config.session.width, 1280.0);
        assert_eq!(config.session.height, 600.0);
        assert_eq!(config.session.picks, vec!["rocket", "chakri"]);
        assert_eq!(config.scene.finale.duration, 120);
        assert_eq!(config.scene.finale.cadence, 15);
    }

    #[test]
    fn validation_collects_scene_and_session_errors() {
        let err = AppConfig::from_toml_str(
            r#"
            [session]
            fps = 0
            picks = ["roman_candle"]

            [scene.finale]
            cadence = 0
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 3, "{errors:?}");
                assert!(errors.iter().any(|e| e.contains("roman_candle")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nframes = 42").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.session.frames, 42);
    }

    #[test]
    fn explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(AppConfig::locate(Some(path.clone())), Some(path));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
