use crate::chat::DEFAULT_MODEL;
use crate::error::ConfigError;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "data.json";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// everything the server needs to start
#[derive(Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub model: String,
    pub api_key: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_file", &self.data_file)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

pub struct ConfigBuilder {
    data_file: PathBuf,
    host: String,
    port: u16,
    model: String,
    api_key: Option<String>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
        }
    }

    pub fn with_data_file<P: Into<PathBuf>>(mut self, p: P) -> Self {
        self.data_file = p.into();
        self
    }

    pub fn with_host<T: Into<String>>(mut self, host: T) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_model<T: Into<String>>(mut self, model: T) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key<T: Into<String>>(mut self, key: Option<T>) -> Self {
        self.api_key = key.map(Into::into);
        self
    }

    /// fails if no usable api key was supplied
    pub fn build(self) -> Result<Config, ConfigError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataFile);
        }

        Ok(Config {
            data_file: self.data_file,
            host: self.host,
            port: self.port,
            model: self.model,
            api_key,
        })
    }
}
