//! Per-provider construction of the rating pipeline.
//!
//! Each `build_*_components` method returns a [`RatingService`] slot:
//!
//! - provider disabled: the slot carries only the label;
//! - provider enabled: transport, client, filter, search and platform service
//!   are built in that order and the slot carries the platform service;
//! - any construction step fails: the error is returned and no slot is built.

use std::sync::Arc;

use ratingforge_common::{Error, Result};
use tracing::{debug, error, info};

use super::filter::QueryFilterService;
use super::platform::AudienceRatingService;
use super::provider::RatingService;
use super::providers::{
    TmdbClient, TmdbSearchService, IMDB_LABEL, ROTTEN_TOMATOES_LABEL, TMDB_LABEL,
};
use crate::config::Config;
use crate::http::{setup_logging, HttpTransport};

/// Builds [`RatingService`]s from a fully materialized [`Config`].
#[derive(Debug, Clone)]
pub struct RatingFactory {
    config: Config,
    tmdb_base_url: Option<String>,
}

impl RatingFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tmdb_base_url: None,
        }
    }

    /// Send TMDB traffic to `base_url` instead of the public API.
    pub fn with_tmdb_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.tmdb_base_url = Some(base_url.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the TMDB slot.
    pub fn build_tmdb_components(&self) -> Result<RatingService> {
        if !self.config.tmdb.enabled {
            info!("TMDB rating service disabled");
            return Ok(RatingService::unavailable(TMDB_LABEL));
        }

        self.try_build_tmdb().map_err(|e| {
            error!(provider = TMDB_LABEL, "Failed to build rating service: {e}");
            e
        })
    }

    fn try_build_tmdb(&self) -> Result<RatingService> {
        if self.config.tmdb.api_key.trim().is_empty() {
            return Err(Error::config("TMDB is enabled but has no API key"));
        }

        let transport = self.build_transport()?;

        let mut client = TmdbClient::new(&self.config.tmdb, transport)?;
        if let Some(base_url) = &self.tmdb_base_url {
            client = client.with_base_url(base_url)?;
        }
        let filters = Arc::new(QueryFilterService::new());
        let search = Arc::new(TmdbSearchService::new(Arc::new(client), filters));
        let platform = Arc::new(AudienceRatingService::new(TMDB_LABEL, search));

        info!(
            language = %self.config.tmdb.language,
            region = %self.config.tmdb.region,
            "TMDB rating service initialized"
        );
        Ok(RatingService::ready(TMDB_LABEL, platform))
    }

    /// Build the Rotten Tomatoes slot. Not implemented: never carries a
    /// platform service.
    pub fn build_rotten_tomatoes_components(&self) -> Result<RatingService> {
        Ok(self.stub_service(ROTTEN_TOMATOES_LABEL, self.config.rotten_tomatoes.enabled))
    }

    /// Build the IMDB slot. Not implemented: never carries a platform service.
    pub fn build_imdb_components(&self) -> Result<RatingService> {
        Ok(self.stub_service(IMDB_LABEL, self.config.imdb.enabled))
    }

    /// Build every provider slot, in TMDB, Rotten Tomatoes, IMDB order.
    pub fn build_all(&self) -> Result<Vec<RatingService>> {
        Ok(vec![
            self.build_tmdb_components()?,
            self.build_rotten_tomatoes_components()?,
            self.build_imdb_components()?,
        ])
    }

    fn stub_service(&self, label: &str, enabled: bool) -> RatingService {
        if enabled {
            info!("{label} rating service initialized");
            debug!(provider = label, "No implementation available; slot left empty");
        } else {
            info!("{label} rating service disabled");
        }
        RatingService::unavailable(label)
    }

    fn build_transport(&self) -> Result<HttpTransport> {
        let mut transport = HttpTransport::from_config(&self.config.http)?;
        setup_logging(&mut transport, &self.config.logger.log_file_path)?;
        Ok(transport)
    }
}
