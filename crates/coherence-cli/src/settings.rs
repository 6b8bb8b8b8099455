use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_RUN_DIR: &str = "runs";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Optional TOML configuration file. Every key can be overridden on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub named_graph: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub token: Option<String>,
    pub run_dir: Option<PathBuf>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub named_graph: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub token: Option<String>,
    pub run_dir: Option<PathBuf>,
    pub no_run_dir: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub named_graph: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout: Duration,
    pub token: Option<String>,
    /// `None` disables run artifacts.
    pub run_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> SettingsResult<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Layer defaults, then the config file, then command-line overrides.
pub fn resolve(overrides: Overrides, file: FileConfig) -> SettingsResult<Settings> {
    let endpoint = overrides
        .endpoint
        .or(file.endpoint)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| SettingsError::Invalid("endpoint URL is required".to_string()))?;

    let timeout_secs = overrides
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(SettingsError::Invalid(
            "timeout must be at least one second".to_string(),
        ));
    }

    let run_dir = if overrides.no_run_dir {
        None
    } else {
        Some(
            overrides
                .run_dir
                .or(file.run_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RUN_DIR)),
        )
    };

    Ok(Settings {
        endpoint,
        named_graph: overrides.named_graph.or(file.named_graph),
        output: overrides.output.or(file.output),
        timeout: Duration::from_secs(timeout_secs),
        token: overrides.token.or(file.token),
        run_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_wins_over_file() {
        let file: FileConfig = toml::from_str(
            r#"
            endpoint = "http://file.example/sparql"
            named_graph = "http://file.example/graph"
            timeout_secs = 15
            output = "from-file.tsv"
            "#,
        )
        .expect("parse config");

        let settings = resolve(
            Overrides {
                endpoint: Some("http://cli.example/sparql".to_string()),
                output: Some(PathBuf::from("from-cli.tsv")),
                ..Overrides::default()
            },
            file,
        )
        .expect("resolve");

        assert_eq!(settings.endpoint, "http://cli.example/sparql");
        assert_eq!(settings.named_graph.as_deref(), Some("http://file.example/graph"));
        assert_eq!(settings.output, Some(PathBuf::from("from-cli.tsv")));
        assert_eq!(settings.timeout, Duration::from_secs(15));
        assert_eq!(settings.run_dir, Some(PathBuf::from(DEFAULT_RUN_DIR)));
    }

    #[test]
    fn endpoint_is_required() {
        let err = resolve(Overrides::default(), FileConfig::default()).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn run_dir_can_be_disabled_and_zero_timeout_is_rejected() {
        let base = Overrides {
            endpoint: Some("http://localhost/sparql".to_string()),
            ..Overrides::default()
        };
        let settings = resolve(
            Overrides {
                no_run_dir: true,
                ..base.clone()
            },
            FileConfig::default(),
        )
        .expect("resolve");
        assert_eq!(settings.run_dir, None);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let err = resolve(
            Overrides {
                timeout_secs: Some(0),
                ..base
            },
            FileConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("endpiont = \"typo\"").is_err());
    }
}
