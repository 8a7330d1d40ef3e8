use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path, time::Duration};
use thiserror::Error;

use crate::network::face::DEFAULT_FACE;
use crate::resolver::{LocalStore, NAME_SEPARATOR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdncConfig {
    /// Forwarder address, `unix:///path` or `tcp://host:port`.
    #[serde(default = "default_face")]
    pub face: String,

    #[serde(default = "default_interest_lifetime", with = "duration_ms")]
    pub interest_lifetime: Duration,

    #[serde(default = "default_connect_timeout", with = "duration_ms")]
    pub connect_timeout: Duration,

    /// Seed data for the local store, keyed by exact query name.
    #[serde(default = "default_local_store")]
    pub local_store: BTreeMap<String, String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to open config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("local store key `{0}` must end with `/`")]
    InvalidStoreKey(String),
    #[error("interest_lifetime must be greater than zero")]
    ZeroInterestLifetime,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl Default for NdncConfig {
    fn default() -> Self {
        Self {
            face: default_face(),
            interest_lifetime: default_interest_lifetime(),
            connect_timeout: default_connect_timeout(),
            local_store: default_local_store(),
        }
    }
}

impl NdncConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(key) = self
            .local_store
            .keys()
            .find(|key| !key.ends_with(NAME_SEPARATOR))
        {
            return Err(ConfigError::InvalidStoreKey(key.clone()));
        }
        if self.interest_lifetime.is_zero() {
            return Err(ConfigError::ZeroInterestLifetime);
        }
        Ok(())
    }

    pub fn local_store(&self) -> LocalStore {
        LocalStore::new(self.local_store.clone())
    }
}

fn default_face() -> String {
    DEFAULT_FACE.to_string()
}

fn default_interest_lifetime() -> Duration {
    Duration::from_millis(6000)
}

fn default_connect_timeout() -> Duration {
    Duration::from_millis(1000)
}

fn default_local_store() -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("/data/ryu-local/".to_string(), "success".to_string());
    map
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
