use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Settings;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub logging: Option<LoggingConfig>,
    pub limits: Option<LimitsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"warn"` or `"pdftext_core=debug"`.
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest decoded PDF accepted, in megabytes.
    pub max_input_mb: Option<u64>,
    /// Reject documents with more pages than this.
    pub max_pages: Option<usize>,
}

/// Platform config directory path: `<config_dir>/pdftext/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdftext").join("config.toml"))
}

/// Load config by cascading CWD `.pdftext.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdftext.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        logging: Some(LoggingConfig {
            level: overlay
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .or_else(|| base.logging.as_ref().and_then(|l| l.level.clone())),
        }),
        limits: Some(LimitsConfig {
            max_input_mb: overlay
                .limits
                .as_ref()
                .and_then(|l| l.max_input_mb)
                .or_else(|| base.limits.as_ref().and_then(|l| l.max_input_mb)),
            max_pages: overlay
                .limits
                .as_ref()
                .and_then(|l| l.max_pages)
                .or_else(|| base.limits.as_ref().and_then(|l| l.max_pages)),
        }),
    }
}

/// Resolve settings: env vars > config file > defaults.
///
/// `env` looks up a variable by name, so callers pass `|k| std::env::var(k).ok()`
/// and tests pass a fixed map.
pub fn resolve_settings<F>(config: &ConfigFile, env: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Settings::default();
    let logging = config.logging.as_ref();
    let limits = config.limits.as_ref();

    let log_level = env("PDFTEXT_LOG")
        .or_else(|| logging.and_then(|l| l.level.clone()))
        .unwrap_or(defaults.log_level);
    let max_input_mb = env("PDFTEXT_MAX_INPUT_MB")
        .and_then(|v| v.parse::<u64>().ok())
        .or_else(|| limits.and_then(|l| l.max_input_mb));
    let max_pages = env("PDFTEXT_MAX_PAGES")
        .and_then(|v| v.parse::<usize>().ok())
        .or_else(|| limits.and_then(|l| l.max_pages));

    Settings {
        log_level,
        max_input_bytes: max_input_mb
            .filter(|mb| *mb > 0)
            .map(|mb| usize::try_from(mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)),
        max_pages: max_pages.filter(|n| *n > 0),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn limits_round_trip_toml() {
        let config = ConfigFile {
            limits: Some(LimitsConfig {
                max_input_mb: Some(25),
                ..Default::default()
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.limits.unwrap().max_input_mb, Some(25));
    }

    #[test]
    fn absent_sections_deserialize_as_none() {
        let parsed: ConfigFile = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert!(parsed.limits.is_none());
        assert_eq!(parsed.logging.unwrap().level.as_deref(), Some("debug"));
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            logging: Some(LoggingConfig {
                level: Some("info".into()),
            }),
            limits: Some(LimitsConfig {
                max_input_mb: Some(10),
                max_pages: Some(50),
            }),
        };
        let overlay = ConfigFile {
            limits: Some(LimitsConfig {
                max_pages: Some(5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        assert_eq!(merged.logging.unwrap().level.as_deref(), Some("info"));
        let limits = merged.limits.unwrap();
        assert_eq!(limits.max_input_mb, Some(10));
        assert_eq!(limits.max_pages, Some(5));
    }

    #[test]
    fn load_from_path_reads_file_and_skips_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[limits]\nmax_pages = 3\n").unwrap();
        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[limits\nmax_pages = ").unwrap();

        let loaded = load_from_path(&good).unwrap();
        assert_eq!(loaded.limits.unwrap().max_pages, Some(3));
        assert!(load_from_path(&bad).is_none());
        assert!(load_from_path(&dir.path().join("missing.toml")).is_none());
    }

    #[test]
    fn defaults_without_config_or_env() {
        let settings = resolve_settings(&ConfigFile::default(), env_from(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.max_input_bytes, None);
    }

    #[test]
    fn env_overrides_config() {
        let config = ConfigFile {
            logging: Some(LoggingConfig {
                level: Some("info".into()),
            }),
            limits: Some(LimitsConfig {
                max_input_mb: Some(10),
                max_pages: Some(50),
            }),
        };
        let settings = resolve_settings(
            &config,
            env_from(&[("PDFTEXT_LOG", "debug"), ("PDFTEXT_MAX_INPUT_MB", "2")]),
        );
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.max_input_bytes, Some(2 * 1024 * 1024));
        assert_eq!(settings.max_pages, Some(50));
    }

    #[test]
    fn zero_and_unparseable_limits_disable_the_limit() {
        let settings = resolve_settings(
            &ConfigFile::default(),
            env_from(&[("PDFTEXT_MAX_INPUT_MB", "0"), ("PDFTEXT_MAX_PAGES", "lots")]),
        );
        assert_eq!(settings.max_input_bytes, None);
        assert_eq!(settings.max_pages, None);
    }
}
