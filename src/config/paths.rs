//! Config file location
//!
//! `PODMINATOR_CONFIG_DIR` wins; otherwise `$XDG_CONFIG_HOME/podminator` or
//! `~/.config/podminator` on Unix, and the roaming AppData folder on Windows.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the config directory
pub const CONFIG_DIR_ENV: &str = "PODMINATOR_CONFIG_DIR";

const APP_NAME: &str = "podminator";

pub fn config_dir() -> PathBuf {
    resolve_config_dir(|key| std::env::var_os(key))
}

/// Path of `config.yaml` inside [`config_dir`]
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

fn resolve_config_dir(lookup: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    if let Some(dir) = lookup(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }

    if cfg!(windows) {
        if let Some(dirs) = directories::ProjectDirs::from("", "", APP_NAME) {
            return dirs.config_dir().to_path_buf();
        }
    }

    lookup("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(APP_NAME)
}
