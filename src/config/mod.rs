use anyhow::{anyhow, Result};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "chowkashi.toml";

const ENV_NAME_BACKEND_URL: &str = "CHOWKASHI_BACKEND_URL";
const ENV_NAME_BACKEND_KEY: &str = "CHOWKASHI_BACKEND_KEY";
const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";

pub struct Config {
    pub backend: Backend,
    pub geocoding: Geocoding,
    pub cache: Cache,
    pub local_state: LocalState,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.apply_env_overrides(|name| env::var(name).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_NAME_BACKEND_URL) {
            self.backend.url = url;
        }
        if let Some(api_key) = var(ENV_NAME_BACKEND_KEY) {
            self.backend.api_key = api_key;
        }
        if let Some(api_key) = var(ENV_NAME_OPENCAGE_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.geocoding.gateway = Some(GeocodingGateway::OpenCage { api_key });
        }
    }

    fn validate(&self) -> Result<()> {
        let url = self.backend.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!("Invalid backend URL '{url}'"));
        }
        if self.cache.moved_threshold_km.is_nan() || self.cache.moved_threshold_km <= 0.0 {
            return Err(anyhow!("The moved threshold of the cache must be positive"));
        }
        Ok(())
    }
}

pub struct Backend {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    pub timeout: Duration,
}

pub enum GeocodingGateway {
    OpenCage { api_key: String },
}

pub struct Cache {
    pub ttl: Duration,
    pub moved_threshold_km: f64,
}

pub struct LocalState {
    /// File system directory for the locally stored values.
    pub dir: PathBuf,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            backend,
            geocoding,
            gateway,
            cache,
            local_state,
        } = from;

        let raw::Backend {
            url,
            api_key,
            timeout,
        } = backend.unwrap_or_default();
        let backend = Backend {
            url,
            api_key,
            timeout,
        };

        let raw::Geocoding {
            gateway: gw_name,
            timeout,
        } = geocoding.unwrap_or_default();
        let gateway = match gw_name {
            Some(gw_name) => {
                let toml_name = gw_name.as_str();
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::GeocodingGateway::Opencage => {
                        let raw::OpenCage { api_key } = gateway.opencage.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        GeocodingGateway::OpenCage { api_key }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding { gateway, timeout };

        let raw::Cache {
            ttl,
            moved_threshold_km,
        } = cache.unwrap_or_default();
        let cache = Cache {
            ttl,
            moved_threshold_km,
        };

        let raw::LocalState { dir } = local_state.unwrap_or_default();
        let local_state = LocalState { dir };

        Ok(Self {
            backend,
            geocoding,
            cache,
            local_state,
        })
    }
}
