pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::talent_service::TalentService;

#[derive(Clone)]
pub struct AppState {
    pub talent_service: TalentService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_service(TalentService::from_config(config)?))
    }

    pub fn with_service(talent_service: TalentService) -> Self {
        Self { talent_service }
    }
}
