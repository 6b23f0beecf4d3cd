use cadence_core::recurrence::EngineConfig;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    /// Overrides "today", same syntax as `--now`
    pub today: Option<String>,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct PreviewConfig {
    /// Number of dates `preview` lists when `--count` is not given
    pub count: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { count: 5 }
    }
}

impl Config {
    /// Reads `path` (or `cadence.toml`) and `CADENCE_*` environment
    /// variables, the latter taking precedence. Nested keys use `__`, e.g.
    /// `CADENCE_ENGINE__HORIZON_YEARS`. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::figment(file).extract()
    }

    fn figment(file: &Path) -> Figment {
        Figment::new()
            .merge(Toml::file(file))
            .merge(Env::prefixed("CADENCE_").split("__"))
    }
}
