//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`SYSGLANCE_HOST_COMMAND`, `SYSGLANCE_STORAGE_PATH`,
//!    `SYSGLANCE_NO_COLOR`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./sysglance.toml in the current directory
//! 4. $XDG_CONFIG_HOME/sysglance/sysglance.toml (or ~/.config/sysglance/sysglance.toml)
//! 5. Built-in defaults

use crate::error::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};

mod defaults;
mod env;
mod types;

pub use defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_HOST_COMMAND};
pub use env::{ENV_HOST_COMMAND, ENV_NO_COLOR, ENV_STORAGE_PATH};
pub use types::{Config, DisplayConfig, HostConfig, StorageConfig};

use defaults::{APP_DIR_NAME, CONFIG_FILE_NAME};
use types::FileConfig;

/// Where the loaded config text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    Global(PathBuf),
    BuiltInDefaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::Global(path) => {
                write!(f, "{}", path.display())
            }
            Self::BuiltInDefaults => f.write_str("built-in defaults"),
        }
    }
}

/// Resolved config plus the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text(path_override, &read_file, &config_root)?;
    let parsed: FileConfig = toml::from_str(&text)?;
    let mut config = resolve_file_config(parsed)?;
    env::apply_env_overrides(&mut config, &env_lookup)?;
    tracing::debug!(%source, "configuration loaded");
    Ok(LoadedConfig { config, source })
}

fn read_config_text<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if let Ok(text) = read_file(&local) {
        return Ok((text, ConfigSource::Local(local)));
    }
    if let Some(dir) = config_root() {
        let global = dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

fn resolve_file_config(parsed: FileConfig) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    if let Some(command) = parsed.host.command {
        let command = command.trim();
        if command.is_empty() {
            return Err(ConfigError::Invalid(
                "host.command must not be empty".to_string(),
            ));
        }
        config.host.command = command.to_string();
    }
    if let Some(args) = parsed.host.args {
        config.host.args = args;
    }
    if let Some(path) = parsed.storage.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.path must not be empty".to_string(),
            ));
        }
        config.storage.path = path;
    }
    if let Some(color) = parsed.display.color {
        config.display.color = color;
    }
    Ok(config)
}

/// Global config root: `$XDG_CONFIG_HOME`, else `~/.config`, else the
/// platform config directory.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn files(entries: &[(&str, &str)]) -> HashMap<PathBuf, String> {
        entries
            .iter()
            .map(|(path, text)| (PathBuf::from(path), text.to_string()))
            .collect()
    }

    fn load_with(
        path_override: Option<&str>,
        files: HashMap<PathBuf, String>,
        env: &[(&str, &str)],
    ) -> Result<LoadedConfig, ConfigError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_config_from_sources(
            path_override,
            |path| {
                files.get(path).cloned().ok_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::NotFound, "missing")
                })
            },
            |name| env.get(name).cloned(),
            || Some(PathBuf::from("/cfg")),
        )
    }

    #[test]
    fn defaults_without_any_file() {
        let loaded = load_with(None, HashMap::new(), &[]).unwrap();
        assert_eq!(loaded.source, ConfigSource::BuiltInDefaults);
        assert_eq!(loaded.config.host.command, DEFAULT_HOST_COMMAND);
        assert!(loaded.config.host.args.is_empty());
        assert!(loaded.config.display.color);
        assert!(loaded
            .config
            .storage
            .path
            .to_string_lossy()
            .ends_with("storage.json"));
    }

    #[test]
    fn local_file_wins_over_global() {
        let loaded = load_with(
            None,
            files(&[
                ("sysglance.toml", "[host]\ncommand = \"./host-local\"\n"),
                ("/cfg/sysglance/sysglance.toml", "[host]\ncommand = \"host-global\"\n"),
            ]),
            &[],
        )
        .unwrap();
        assert_eq!(loaded.config.host.command, "./host-local");
        assert_eq!(loaded.source, ConfigSource::Local(PathBuf::from("sysglance.toml")));
    }

    #[test]
    fn global_file_is_used_when_no_local_file() {
        let loaded = load_with(
            None,
            files(&[(
                "/cfg/sysglance/sysglance.toml",
                "[host]\ncommand = \"python3\"\nargs = [\"host.py\"]\n[display]\ncolor = false\n",
            )]),
            &[],
        )
        .unwrap();
        assert_eq!(loaded.config.host.command, "python3");
        assert_eq!(loaded.config.host.args, vec!["host.py".to_string()]);
        assert!(!loaded.config.display.color);
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_with(Some("/nope.toml"), HashMap::new(), &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "got {err:?}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_with(
            Some("x.toml"),
            files(&[("x.toml", "[host]\nbinary = \"h\"\n")]),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "got {err:?}");
    }

    #[test]
    fn empty_host_command_is_invalid() {
        let err = load_with(
            Some("x.toml"),
            files(&[("x.toml", "[host]\ncommand = \"  \"\n")]),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn env_overrides_file_values() {
        let loaded = load_with(
            Some("x.toml"),
            files(&[(
                "x.toml",
                "[host]\ncommand = \"from-file\"\n[storage]\npath = \"/tmp/a.json\"\n",
            )]),
            &[
                (ENV_HOST_COMMAND, "from-env"),
                (ENV_STORAGE_PATH, "/tmp/b.json"),
                (ENV_NO_COLOR, "1"),
            ],
        )
        .unwrap();
        assert_eq!(loaded.config.host.command, "from-env");
        assert_eq!(loaded.config.storage.path, PathBuf::from("/tmp/b.json"));
        assert!(!loaded.config.display.color);
    }

    #[test]
    fn invalid_no_color_value_is_reported() {
        let err = load_with(None, HashMap::new(), &[(ENV_NO_COLOR, "maybe")]).unwrap_err();
        assert!(err.to_string().contains(ENV_NO_COLOR), "got {err}");
    }

    #[test]
    fn template_parses_to_defaults() {
        let loaded = load_with(
            Some("t.toml"),
            files(&[("t.toml", DEFAULT_CONFIG_TEMPLATE)]),
            &[],
        )
        .unwrap();
        assert_eq!(loaded.config.host, HostConfig::default());
        assert!(loaded.config.display.color);
    }
}
