use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "redo.json";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the task list is stored
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// IANA timezone used for "today" and end-of-day due dates
    #[serde(default)]
    pub timezone: Option<String>,
    /// List assigned to new tasks when `--list` is not given
    #[serde(default)]
    pub default_list: Option<String>,
    /// Number of dates shown by `redo preview`
    #[serde(default = "default_preview_count")]
    pub preview_count: usize,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_preview_count() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            timezone: None,
            default_list: None,
            preview_count: default_preview_count(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file("redo.toml"))
            .merge(Env::prefixed("REDO_"))
    }
}
