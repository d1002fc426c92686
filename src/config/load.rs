use std::collections::HashSet;
use std::{env, path::Path, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load_from` reads an optional config file, then environment
/// variables (prefix `CARTRIDGE__`) on top, and falls back to struct defaults.
impl Settings {
    /// Load settings from an explicit (optional) config file and the environment.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CARTRIDGE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.transcoder.program.trim().is_empty() {
            return Err("transcoder.program must not be empty".to_string());
        }

        let mut seen = HashSet::new();
        for album in &self.albums {
            let id = album.cartridge_id.as_str();
            if id.trim().is_empty() {
                return Err("albums[].cartridge_id must not be empty".to_string());
            }
            if id.trim() != id {
                return Err(format!(
                    "cartridge id '{id}' has leading or trailing whitespace"
                ));
            }
            if id.contains('/') || id.contains('\\') || id.contains("..") || id == "." {
                return Err(format!("cartridge id '{id}' is not a plain directory name"));
            }
            if !seen.insert(id) {
                return Err(format!("cartridge id '{id}' is configured twice"));
            }
        }
        Ok(())
    }
}

/// Resolve the config path from `CARTRIDGE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CARTRIDGE_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cartridge/config.toml`
/// or `~/.config/cartridge/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("cartridge").join("config.toml"))
}
