//! Built-in defaults and the starter config template.

use std::path::PathBuf;

/// Host executable looked up on `PATH` when none is configured.
pub const DEFAULT_HOST_COMMAND: &str = "local_sysinfo_host";
/// Local config file name, also used under the global config directory.
pub const CONFIG_FILE_NAME: &str = "sysglance.toml";
/// Directory name under the platform config and data roots.
pub const APP_DIR_NAME: &str = "sysglance";
/// Storage file name under the data directory.
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Default storage location: `<data dir>/sysglance/storage.json`, or a file
/// in the working directory when no data directory is known.
pub fn default_storage_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(APP_DIR_NAME).join(STORAGE_FILE_NAME),
        None => PathBuf::from(format!("{APP_DIR_NAME}-{STORAGE_FILE_NAME}")),
    }
}

/// Documented starter config, printed by `sysglance config`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# sysglance configuration
#
# Lookup order: --config PATH, ./sysglance.toml,
# $XDG_CONFIG_HOME/sysglance/sysglance.toml (or ~/.config/sysglance/sysglance.toml).
# Environment overrides: SYSGLANCE_HOST_COMMAND, SYSGLANCE_STORAGE_PATH, SYSGLANCE_NO_COLOR.

[host]
# Native-messaging host executable spawned once per query.
command = "local_sysinfo_host"
args = []

[storage]
# JSON file holding persisted settings such as the task list.
# path = "/home/me/.local/share/sysglance/storage.json"

[display]
color = true
"#;
