use std::{env, net::SocketAddr, path::PathBuf};

use crate::{
    error::{AppErr, Result},
    provider::{FALLBACK_MODEL_PATH, FsSource, PRIMARY_MODEL_PATH},
};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8501;

/// Process settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub fallback_model_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PRIMARY_MODEL_PATH.into(),
            fallback_model_path: FALLBACK_MODEL_PATH.into(),
        }
    }
}

impl AppConfig {
    /// Reads `HOST`, `PORT` and `MODEL_PATH` from the environment, defaulting what is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| AppErr::Config(format!("PORT={port:?}: {e}")))?;
        }
        if let Some(path) = lookup("MODEL_PATH") {
            config.model_path = path.into();
        }

        Ok(config)
    }

    /// The address to listen on.
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppErr::Config(format!("HOST={:?}: {e}", self.host)))
    }

    pub fn model_source(&self) -> FsSource {
        FsSource::new(&self.model_path, &self.fallback_model_path)
    }
}
