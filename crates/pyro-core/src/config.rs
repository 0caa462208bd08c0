//! Scene tuning, loadable from TOML. Every field has a default.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::Bounds;

/// Ground-level rectangle in front of the shelter, `depth` units tall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub min_x: f32,
    pub max_x: f32,
    pub depth: f32,
}

impl Footprint {
    pub fn contains(&self, pos: Vec2, bounds: Bounds) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.y >= bounds.height - self.depth
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            min_x: 20.0,
            max_x: 110.0,
            depth: 120.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    pub start_x: f32,
    pub shelter_x: f32,
    /// A ground firework this close sends the watcher home.
    pub danger_radius: f32,
    /// A loud firework about to go off this close makes the watcher cower.
    pub noise_radius: f32,
    /// Rising shells this close may catch the watcher's eye.
    pub beauty_radius: f32,
    pub watch_chance: f32,
    /// No self-lighting once this many fireworks are live.
    pub lighting_cap: usize,
    /// Fireworks closer than this to the shelter keep the watcher inside.
    pub shelter_clearance: f32,
    pub stroll_speed: f32,
    pub hurry_speed: f32,
    pub panic_speed: f32,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            start_x: 100.0,
            shelter_x: 65.0,
            danger_radius: 100.0,
            noise_radius: 150.0,
            beauty_radius: 200.0,
            watch_chance: 0.05,
            lighting_cap: 6,
            shelter_clearance: 100.0,
            stroll_speed: 1.0,
            hurry_speed: 2.0,
            panic_speed: 3.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisturbanceConfig {
    pub duration: u32,
    pub footprint: Footprint,
    /// Chance that a single mini explosion inside the footprint sets it off.
    pub mini_chance: f32,
    pub messages: Vec<String>,
}

impl Default for DisturbanceConfig {
    fn default() -> Self {
        Self {
            duration: 200,
            footprint: Footprint::default(),
            mini_chance: 0.1,
            messages: [">:O", ">:|", "(>_<)", "#@&%!", "!!!", "STOP!"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinaleConfig {
    pub duration: u32,
    /// Frames between automatic launches while the finale runs.
    pub cadence: u32,
    pub moon_hits: u32,
    pub moon_radius: f32,
    /// Moon center as fractions of the scene size.
    pub moon_x: f32,
    pub moon_y: f32,
}

impl Default for FinaleConfig {
    fn default() -> Self {
        Self {
            duration: 300,
            cadence: 15,
            moon_hits: 3,
            moon_radius: 50.0,
            moon_x: 0.85,
            moon_y: 0.15,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub watcher: WatcherConfig,
    pub disturbance: DisturbanceConfig,
    pub finale: FinaleConfig,
    pub shake_cap: Option<u32>,
}

impl SceneConfig {
    pub const DEFAULT_SHAKE_CAP: u32 = 10;

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn shake_cap(&self) -> u32 {
        self.shake_cap.unwrap_or(Self::DEFAULT_SHAKE_CAP)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let w = &self.watcher;
        for (name, value) in [
            ("watcher.danger_radius", w.danger_radius),
            ("watcher.noise_radius", w.noise_radius),
            ("watcher.beauty_radius", w.beauty_radius),
            ("watcher.stroll_speed", w.stroll_speed),
            ("watcher.hurry_speed", w.hurry_speed),
            ("watcher.panic_speed", w.panic_speed),
            ("finale.moon_radius", self.finale.moon_radius),
        ] {
            if !(value > 0.0) {
                errors.push(format!("{name} must be positive, got {value}"));
            }
        }
        for (name, value) in [
            ("watcher.watch_chance", w.watch_chance),
            ("disturbance.mini_chance", self.disturbance.mini_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{name} must be within [0, 1], got {value}"));
            }
        }
        if self.finale.cadence == 0 {
            errors.push("finale.cadence must be at least 1".into());
        }
        if self.finale.moon_hits == 0 {
            errors.push("finale.moon_hits must be at least 1".into());
        }
        if self.disturbance.messages.is_empty() {
            errors.push("disturbance.messages must not be empty".into());
        }
        let fp = self.disturbance.footprint;
        if fp.min_x > fp.max_x {
            errors.push(format!(
                "disturbance.footprint min_x {} exceeds max_x {}",
                fp.min_x, fp.max_x
            ));
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
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.shake_cap(), 10);
        assert_eq!(config.finale.moon_hits, 3);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
            shake_cap = 4

            [watcher]
            danger_radius = 80.0

            [finale]
            cadence = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.watcher.danger_radius, 80.0);
        assert_eq!(config.watcher.shelter_x, 65.0);
        assert_eq!(config.finale.cadence, 10);
        assert_eq!(config.finale.duration, 300);
        assert_eq!(config.shake_cap(), 4);
    }

    #[test]
    fn validation_collects_every_problem() {
        let err = SceneConfig::from_toml_str(
            r#"
            [watcher]
            watch_chance = 1.5
            noise_radius = 0.0

            [finale]
            cadence = 0
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3, "{errors:?}"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = SceneConfig::from_toml_str("[watcher\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[disturbance]\nduration = 50").unwrap();
        let config = SceneConfig::load(file.path()).unwrap();
        assert_eq!(config.disturbance.duration, 50);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn footprint_is_ground_level_only() {
        let bounds = Bounds {
            width: 800.0,
            height: 600.0,
        };
        let fp = Footprint::default();
        assert!(fp.contains(Vec2::new(60.0, 590.0), bounds));
        assert!(!fp.contains(Vec2::new(60.0, 300.0), bounds));
        assert!(!fp.contains(Vec2::new(200.0, 590.0), bounds));
    }
}
