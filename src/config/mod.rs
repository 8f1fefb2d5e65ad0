mod basic;

pub use basic::BasicConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "BOOKSHELF_";

impl Config {
    /// Builds a Figment that merges defaults, a config TOML file and `BOOKSHELF_*` env vars.
    ///
    /// Nested keys use `__` in env var names, e.g. `BOOKSHELF_BASIC__LISTEN_PORT=9000`.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from every layer of [`Config::figment`].
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_library_file() {
        let cfg = Config::default();
        assert_eq!(cfg.basic.listen_port, 5000);
        assert_eq!(cfg.basic.database_url, "sqlite://data/library.sqlite");
        assert_eq!(cfg.basic.loglevel, "info");
        assert!(!cfg.basic.secure_cookie);
    }

    #[test]
    fn toml_overrides_only_the_keys_it_names() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [basic]
                listen_port = 8080
                database_url = "sqlite://catalog.db"
                "#,
            ))
            .extract()
            .expect("extract config");

        assert_eq!(cfg.basic.listen_port, 8080);
        assert_eq!(cfg.basic.database_url, "sqlite://catalog.db");
        assert_eq!(cfg.basic.loglevel, "info");
    }

    #[test]
    fn malformed_values_are_rejected() {
        let res: Result<Config, _> = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string("[basic]\nlisten_port = \"not-a-port\"\n"))
            .extract();
        assert!(res.is_err());
    }
}
