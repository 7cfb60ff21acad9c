//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which starts a [`MockServer`] standing in for the
//! TMDB API and a temporary directory for the HTTP trace log. The factory it
//! hands out points TMDB traffic at the mock server.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use ratingforge::config::{Config, HttpConfig, LoggerConfig, TmdbConfig};
use ratingforge::rating::{RatingFactory, RatingPlatformService};
use ratingforge::{Item, ItemType};
use tempfile::TempDir;
use wiremock::MockServer;

/// Mock TMDB server plus a config wired to it.
pub struct TestHarness {
    pub server: MockServer,
    pub dir: TempDir,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("http-trace.log")
    }

    /// TMDB enabled with key `K`, language `en`, region `US`, fast retries.
    pub fn config(&self) -> Config {
        Config {
            tmdb: TmdbConfig {
                enabled: true,
                api_key: "K".into(),
                language: "en".into(),
                region: "US".into(),
            },
            http: HttpConfig {
                timeout_secs: 1,
                max_retries: 2,
                backoff_base_ms: 1,
                backoff_max_ms: 5,
            },
            logger: LoggerConfig {
                log_file_path: self.log_path(),
            },
            ..Config::default()
        }
    }

    pub fn factory_with(&self, config: Config) -> RatingFactory {
        RatingFactory::new(config).with_tmdb_base_url(self.server.uri())
    }

    pub fn factory(&self) -> RatingFactory {
        self.factory_with(self.config())
    }

    /// The TMDB platform service built against the mock server.
    pub fn tmdb(&self) -> Arc<dyn RatingPlatformService> {
        self.factory()
            .build_tmdb_components()
            .expect("failed to build TMDB components")
            .platform_service
            .expect("TMDB should be available")
    }

    pub fn trace_lines(&self) -> Vec<serde_json::Value> {
        std::fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(|l| serde_json::from_str(l).expect("trace line is JSON"))
            .collect()
    }
}

pub fn inception() -> Item {
    Item::new("x", "Inception", 2010, ItemType::Movie)
}

pub fn search_body(entries: &[(i64, &str, f64)]) -> serde_json::Value {
    let results: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, title, vote)| {
            serde_json::json!({
                "id": id,
                "adult": false,
                "title": title,
                "original_title": title,
                "vote_average": vote,
            })
        })
        .collect();

    serde_json::json!({ "page": 1, "results": results })
}
