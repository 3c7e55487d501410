//! Global config module
//!
//! Per-user defaults read from `lwbuild_global.toml` in the platform
//! config directory, e.g. `~/.config/lwbuild/` on Linux.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Per-user defaults that apply to every project driven by lwbuild
#[derive(Debug, Deserialize, Default)]
pub struct GlobalConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Default)]
pub struct Defaults {
    /// Overrides the parallelism passed to the native build tool
    pub jobs: Option<usize>,
    /// Fallback log level when LWBUILD_LOG_LEVEL is unset
    pub log_level: Option<String>,
}

lazy_static! {
    static ref GLOBAL_CFG: GlobalConfig = load();
}

/// Returns the global config, loading it on first use
pub fn get() -> &'static GlobalConfig {
    &GLOBAL_CFG
}

/// Returns the path of the global config file, if a config directory
/// can be determined on this system
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "lwtools", "lwbuild")
        .map(|dirs| dirs.config_dir().join("lwbuild_global.toml"))
}

// Loading must not log: the logger's default level comes from here.
fn load() -> GlobalConfig {
    let path = match config_path() {
        Some(path) => path,
        None => return GlobalConfig::default(),
    };
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(_) => return GlobalConfig::default(),
    };
    toml::from_str(&contents).unwrap_or_default()
}
