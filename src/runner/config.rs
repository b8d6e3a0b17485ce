//! Resolver configuration.
//!
//! Expected TOML format:
//! ```toml
//! [resolver]
//! mode = "strict"        # or "permissive"
//! max_call_depth = 256
//! ```
//!
//! Every key is optional. The mode defaults to strict.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable consulted by [`ResolverConfig::from_env`].
pub const MODE_ENV_VAR: &str = "JUST_BIND_MODE";

pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

lazy_static! {
    static ref ENV_MODE: Option<String> = std::env::var(MODE_ENV_VAR).ok();
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// What a plain call binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingMode {
    /// Plain calls get no context; touching a field on it is an error.
    Strict,
    /// Plain calls get the realm's shared global object.
    #[serde(alias = "sloppy")]
    Permissive,
}
impl Default for BindingMode {
    fn default() -> Self {
        BindingMode::Strict
    }
}
impl fmt::Display for BindingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingMode::Strict => write!(f, "strict"),
            BindingMode::Permissive => write!(f, "permissive"),
        }
    }
}
impl FromStr for BindingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(BindingMode::Strict),
            "permissive" | "sloppy" => Ok(BindingMode::Permissive),
            _ => Err(ConfigError::InvalidValue {
                key: "mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub mode: BindingMode,
    /// Nested invocations deeper than this fail with a range error.
    pub max_call_depth: usize,
}
impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            mode: BindingMode::Strict,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    resolver: ResolverConfig,
}

impl ResolverConfig {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn permissive() -> Self {
        ResolverConfig {
            mode: BindingMode::Permissive,
            ..Self::default()
        }
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.resolver.validate()
    }

    /// Configuration derived from `JUST_BIND_MODE`, read once per process.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_mode_var(ENV_MODE.as_deref())
    }

    /// Defaults, with the mode taken from a raw `JUST_BIND_MODE` value if set.
    fn from_mode_var(raw: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = raw {
            config.mode = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: MODE_ENV_VAR.to_string(),
                value: raw.to_string(),
            })?;
        }
        Ok(config)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_call_depth == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_call_depth".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_is_strict() {
        let config = ResolverConfig::parse("").unwrap();
        assert_eq!(config, ResolverConfig::strict());
    }

    #[test]
    fn parses_permissive_mode() {
        let config = ResolverConfig::parse(
            r#"
            [resolver]
            mode = "permissive"
            max_call_depth = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, BindingMode::Permissive);
        assert_eq!(config.max_call_depth, 8);
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = ResolverConfig::parse("[resolver]\nmode = \"lenient\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_zero_depth() {
        let err = ResolverConfig::parse("[resolver]\nmax_call_depth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn toml_accepts_sloppy_alias() {
        let config = ResolverConfig::parse("[resolver]\nmode = \"sloppy\"\n").unwrap();
        assert_eq!(config.mode, BindingMode::Permissive);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[resolver]\nmode = \"permissive\"\nmax_call_depth = 16").unwrap();
        let config = ResolverConfig::load(file.path()).unwrap();
        assert_eq!(config, ResolverConfig::permissive().with_max_call_depth(16));
    }

    #[test]
    fn load_of_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResolverConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn unset_mode_var_is_strict() {
        assert_eq!(ResolverConfig::from_mode_var(None).unwrap(), ResolverConfig::strict());
        assert_eq!(
            ResolverConfig::from_mode_var(Some("PERMISSIVE")).unwrap().mode,
            BindingMode::Permissive
        );
    }

    #[test]
    fn bad_mode_var_reports_the_raw_value() {
        let err = ResolverConfig::from_mode_var(Some("lenient")).unwrap_err();
        match &err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, MODE_ENV_VAR);
                assert_eq!(value, "lenient");
            }
            other => panic!("expected invalid value, got {}", other),
        }
        assert_eq!(err.to_string(), "Invalid value for JUST_BIND_MODE: lenient");
    }

    #[test]
    fn from_env_agrees_with_the_variable() {
        let expected = ResolverConfig::from_mode_var(std::env::var(MODE_ENV_VAR).ok().as_deref());
        match (ResolverConfig::from_env(), expected) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            (a, b) => panic!("from_env gave {:?}, variable gives {:?}", a, b),
        }
    }

    #[test]
    fn mode_from_str_accepts_sloppy_alias() {
        assert_eq!("Sloppy".parse::<BindingMode>().unwrap(), BindingMode::Permissive);
        assert!("other".parse::<BindingMode>().is_err());
    }
}
