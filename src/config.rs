//! Configuration loader and validator for the assignment roster.
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub api: Api,
    pub placeholders: Placeholders,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Api {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_ms: u64,
    #[serde(default)]
    pub token: Option<String>,
}

/// Placeholder synthesis policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placeholders {
    pub roster: CountRange,
    pub course: CountRange,
    pub max_age_ms: i64,
}

/// Inclusive bounds on how many rows to synthesize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountRange {
    pub min: i64,
    pub max: i64,
}

impl CountRange {
    pub const ROSTER: CountRange = CountRange { min: 10, max: 19 };
    pub const COURSE: CountRange = CountRange { min: 3, max: 5 };
}

/// ~115 days, the widest backdating applied to a placeholder's `created_at`.
pub const DEFAULT_MAX_AGE_MS: i64 = 10_000_000_000;
/// Upper bound accepted for `max_age_ms` (ten years).
pub const MAX_AGE_MS_CEILING: i64 = 10 * 365 * 24 * 60 * 60 * 1000;
/// Upper bound accepted for either end of a placeholder count range.
pub const MAX_PLACEHOLDER_COUNT: i64 = 100;

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            roster: CountRange::ROSTER,
            course: CountRange::COURSE,
            max_age_ms: DEFAULT_MAX_AGE_MS,
        }
    }
}

impl Config {
    /// Apply `ROSTER_BASE_URL` / `ROSTER_API_TOKEN` from the environment.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("ROSTER_BASE_URL") {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        if let Ok(token) = std::env::var("ROSTER_API_TOKEN") {
            if !token.trim().is_empty() {
                self.api.token = Some(token);
            }
        }
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api.base_url).map_err(|_| ConfigError::Invalid("api.base_url must be a valid URL"))
    }
}

/// Load configuration from a YAML file, apply environment overrides and
/// validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let mut cfg: Config = serde_yaml::from_str(&content)?;
    cfg.apply_env();
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.api.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("api.base_url must be non-empty"));
    }
    cfg.base_url()?;
    // Url::join drops the last segment otherwise.
    if !cfg.api.base_url.ends_with('/') {
        return Err(ConfigError::Invalid("api.base_url must end with '/'"));
    }
    if cfg.api.user_agent.trim().is_empty() {
        return Err(ConfigError::Invalid("api.user_agent must be non-empty"));
    }
    if cfg.api.timeout_ms == 0 {
        return Err(ConfigError::Invalid("api.timeout_ms must be > 0"));
    }

    let p = &cfg.placeholders;
    if p.roster.min > p.roster.max {
        return Err(ConfigError::Invalid("placeholders.roster.min must be <= max"));
    }
    if p.course.min > p.course.max {
        return Err(ConfigError::Invalid("placeholders.course.min must be <= max"));
    }
    if p.roster.max > MAX_PLACEHOLDER_COUNT {
        return Err(ConfigError::Invalid("placeholders.roster.max must be <= 100"));
    }
    if p.course.max > MAX_PLACEHOLDER_COUNT {
        return Err(ConfigError::Invalid("placeholders.course.max must be <= 100"));
    }
    if p.max_age_ms <= 0 {
        return Err(ConfigError::Invalid("placeholders.max_age_ms must be > 0"));
    }
    if p.max_age_ms > MAX_AGE_MS_CEILING {
        return Err(ConfigError::Invalid("placeholders.max_age_ms must be at most ten years"));
    }

    Ok(())
}

/// Returns the reference YAML configuration.
pub fn example() -> &'static str {
    r#"api:
  base_url: "http://localhost:3002/api/v1/"
  user_agent: "assignment-roster/0.1"
  timeout_ms: 10000

placeholders:
  roster:
    min: 10
    max: 19
  course:
    min: 3
    max: 5
  max_age_ms: 10000000000
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_example_ok() {
        let cfg: Config = serde_yaml::from_str(example()).unwrap();
        validate(&cfg).unwrap();
        assert_eq!(cfg.placeholders, Placeholders::default());
        assert!(cfg.api.token.is_none());
    }

    #[test]
    fn invalid_base_url() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.api.base_url = "".into();
        let err = validate(&cfg).unwrap_err();
        match err { ConfigError::Invalid(msg) => assert!(msg.contains("api.base_url")), _ => panic!("wrong error") }

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.api.base_url = "not a url/".into();
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.api.base_url = "http://localhost:3002/api/v1".into();
        let err = validate(&cfg).unwrap_err();
        match err { ConfigError::Invalid(msg) => assert!(msg.contains("end with")), _ => panic!("wrong error") }
    }

    #[test]
    fn invalid_timeout() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.api.timeout_ms = 0;
        let err = validate(&cfg).unwrap_err();
        match err { ConfigError::Invalid(msg) => assert!(msg.contains("timeout_ms")), _ => panic!("wrong error") }
    }

    #[test]
    fn invalid_placeholder_ranges() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.placeholders.roster = CountRange { min: 20, max: 19 };
        let err = validate(&cfg).unwrap_err();
        match err { ConfigError::Invalid(msg) => assert!(msg.contains("roster")), _ => panic!("wrong error") }

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.placeholders.course = CountRange { min: 6, max: 5 };
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.placeholders.max_age_ms = 0;
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn oversized_placeholder_counts_rejected() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.placeholders.roster = CountRange { min: 10, max: 1_000_000_000 };
        let err = validate(&cfg).unwrap_err();
        match err { ConfigError::Invalid(msg) => assert!(msg.contains("roster.max")), _ => panic!("wrong error") }

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.placeholders.course = CountRange { min: 3, max: MAX_PLACEHOLDER_COUNT + 1 };
        let err = validate(&cfg).unwrap_err();
        match err { ConfigError::Invalid(msg) => assert!(msg.contains("course.max")), _ => panic!("wrong error") }

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.placeholders.course = CountRange { min: 3, max: MAX_PLACEHOLDER_COUNT };
        validate(&cfg).unwrap();
    }

    #[test]
    fn oversized_max_age_rejected() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.placeholders.max_age_ms = 9_000_000_000_000_000_000;
        let err = validate(&cfg).unwrap_err();
        match err { ConfigError::Invalid(msg) => assert!(msg.contains("max_age_ms")), _ => panic!("wrong error") }

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.placeholders.max_age_ms = MAX_AGE_MS_CEILING;
        validate(&cfg).unwrap();
    }

    #[test]
    fn load_from_file_ok() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.yaml");
        fs::write(&p, example()).unwrap();
        let cfg = load(Some(&p)).unwrap();
        assert_eq!(cfg.api.timeout_ms, 10000);
        assert_eq!(cfg.placeholders.course, CountRange::COURSE);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let td = tempdir().unwrap();
        let err = load(Some(&td.path().join("missing.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
