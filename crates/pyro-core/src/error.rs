use thiserror::Error;

/// Failure to load or validate a [`crate::config::SceneConfig`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config validation failed:\n{}", bullets(.0))]
    Validation(Vec<String>),
}

fn bullets(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A firework id outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown firework type '{0}'")]
pub struct UnknownKind(pub String);
