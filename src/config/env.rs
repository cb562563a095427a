//! Environment overrides applied after the config file.

use crate::error::ConfigError;
use std::path::PathBuf;

use super::Config;

pub const ENV_HOST_COMMAND: &str = "SYSGLANCE_HOST_COMMAND";
pub const ENV_STORAGE_PATH: &str = "SYSGLANCE_STORAGE_PATH";
pub const ENV_NO_COLOR: &str = "SYSGLANCE_NO_COLOR";

pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(command) = non_empty_env(env_lookup, ENV_HOST_COMMAND) {
        config.host.command = command;
    }
    if let Some(path) = non_empty_env(env_lookup, ENV_STORAGE_PATH) {
        config.storage.path = PathBuf::from(path);
    }
    if let Some(raw) = non_empty_env(env_lookup, ENV_NO_COLOR) {
        let no_color = parse_bool(&raw).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "invalid {ENV_NO_COLOR} value `{raw}`: expected true/false, 1/0 or yes/no"
            ))
        })?;
        if no_color {
            config.display.color = false;
        }
    }
    Ok(())
}

fn non_empty_env<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
