use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Mock,
    Remote,
}

impl std::str::FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(DataSource::Mock),
            "remote" => Ok(DataSource::Remote),
            other => Err(format!("expected `mock` or `remote`, got `{}`", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub data_source: DataSource,
    pub talent_api_base_url: Option<String>,
    pub talent_api_timeout_secs: u64,
    pub mock_seed_count: usize,
    pub mock_seed: u64,
    pub enforce_transitions: bool,
    pub default_page_size: i64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let data_source = get_env_or("TALENT_DATA_SOURCE", DataSource::Mock)?;
        let talent_api_base_url = env::var("TALENT_API_BASE_URL").ok();
        if data_source == DataSource::Remote && talent_api_base_url.is_none() {
            return Err(Error::Config(
                "TALENT_API_BASE_URL is required when TALENT_DATA_SOURCE=remote".to_string(),
            ));
        }

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            data_source,
            talent_api_base_url,
            talent_api_timeout_secs: get_env_or("TALENT_API_TIMEOUT_SECS", 30)?,
            mock_seed_count: get_env_or("MOCK_SEED_COUNT", 50)?,
            mock_seed: get_env_or("MOCK_SEED", 42)?,
            enforce_transitions: get_env_or("TALENT_ENFORCE_TRANSITIONS", false)?,
            default_page_size: get_env_or("DEFAULT_PAGE_SIZE", 10)?,
        })
    }

    /// In-memory setup used by tests and local development.
    pub fn mock(seed_count: usize) -> Self {
        Self {
            server_address: "127.0.0.1:0".to_string(),
            data_source: DataSource::Mock,
            talent_api_base_url: None,
            talent_api_timeout_secs: 30,
            mock_seed_count: seed_count,
            mock_seed: 42,
            enforce_transitions: false,
            default_page_size: 10,
        }
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
