//! Runtime settings, read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present, so
//! the variables below can live there instead of in the shell.
//!
//! | variable | default |
//! |---|---|
//! | `COMMANDES_DATABASE` | `commandes.sqlite` |
//! | `COMMANDES_FONTS_DIR` | `./fonts` |
//!
//! Log verbosity follows `RUST_LOG` (see `main`).

use std::env;
use std::path::PathBuf;

const DATABASE_VAR: &str = "COMMANDES_DATABASE";
const FONTS_DIR_VAR: &str = "COMMANDES_FONTS_DIR";

const DEFAULT_DATABASE: &str = "commandes.sqlite";
const DEFAULT_FONTS_DIR: &str = "./fonts";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
    #[error("{0} is set but empty")]
    Empty(&'static str),
    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file holding clients and orders. Created on first start.
    pub database_path: PathBuf,
    /// Directory holding the TTF files used by PDF reports.
    pub fonts_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::from_lookup(|name| env::var(name))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, env::VarError>,
    {
        let read = |name: &'static str, default: &str| -> Result<PathBuf, ConfigError> {
            match lookup(name) {
                Ok(value) if value.trim().is_empty() => Err(ConfigError::Empty(name)),
                Ok(value) => Ok(PathBuf::from(value.trim())),
                Err(env::VarError::NotPresent) => Ok(PathBuf::from(default)),
                Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(name)),
            }
        };
        Ok(Self {
            database_path: read(DATABASE_VAR, DEFAULT_DATABASE)?,
            fonts_dir: read(FONTS_DIR_VAR, DEFAULT_FONTS_DIR)?,
        })
    }
}
