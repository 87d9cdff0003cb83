use std::{fs, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "menu_order.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub storage_key: String,
    pub storage_path: PathBuf,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: "cc_cart".into(),
            storage_path: PathBuf::from("./data/storage.json"),
            currency_symbol: "$".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    storage_key: Option<String>,
    storage_path: Option<PathBuf>,
    currency_symbol: Option<String>,
}

/// Defaults, then `menu_order.toml` if present, then `MENU_ORDER__*` env vars
pub fn load_settings() -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(DEFAULT_CONFIG_FILE) {
        Ok(raw) => Some(raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {DEFAULT_CONFIG_FILE}"));
        }
    };

    resolve_settings(raw.as_deref(), |name| std::env::var(name).ok())
}

/// Layer an optional TOML document and an environment lookup over the defaults
pub fn resolve_settings(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings =
            toml::from_str(raw).context("failed to parse menu_order.toml")?;

        if let Some(v) = file_cfg.storage_key {
            settings.storage_key = v;
        }
        if let Some(v) = file_cfg.storage_path {
            settings.storage_path = v;
        }
        if let Some(v) = file_cfg.currency_symbol {
            settings.currency_symbol = v;
        }
    }

    if let Some(v) = env("MENU_ORDER__STORAGE_KEY") {
        settings.storage_key = v;
    }
    if let Some(v) = env("MENU_ORDER__STORAGE_PATH") {
        settings.storage_path = PathBuf::from(v);
    }
    if let Some(v) = env("MENU_ORDER__CURRENCY_SYMBOL") {
        settings.currency_symbol = v;
    }

    if settings.storage_key.trim().is_empty() {
        anyhow::bail!("storage key must not be empty");
    }

    Ok(settings)
}
