use crate::error::Error;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

pub const DEFAULT_PORT: u16 = 3333;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    pub jwt_secret: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            api_timeout: Duration::from_secs(30),
            jwt_secret: "secret".to_string(),
        }
    }
}

impl Config {
    /// Load a [`Config`] from the JSON file at the given path. Missing keys take their
    /// [default][Config::default] values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened, [`Error::InvalidJSON`] if the content
    /// isn't a valid config, and [`Error::EmptySecret`] if `jwt_secret` is empty.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.validate()?;
        Ok(conf)
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.api_bind_addr.set_port(port);
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::EmptySecret`] if `jwt_secret` is empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.jwt_secret.is_empty() {
            return Err(Error::EmptySecret);
        }
        Ok(())
    }
}
