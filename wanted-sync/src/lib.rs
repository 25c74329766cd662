//! Wanted Sync Backend
//!
//! Layered architecture:
//! - domain: Records, store snapshots and the staleness rule
//! - repository: Data access abstractions and HTTP implementations
//! - sync: Check-then-sync from the FBI list into the local store
//! - commands: User actions (browse, edit, delete)

pub mod commands;
pub mod config;
pub mod domain;
pub mod http;
pub mod repository;
pub mod sync;
pub mod text;

use config::AppConfig;
use http::FetchError;
use repository::{HttpRemoteSource, HttpWantedRepository};
use sync::{SyncPolicy, SyncService};

/// Application state shared across commands
pub struct AppState {
    pub config: AppConfig,
    pub sync: SyncService<HttpWantedRepository, HttpRemoteSource>,
}

impl AppState {
    /// Wire the HTTP client, repositories and sync service from `config`
    pub fn connect(config: AppConfig) -> Result<Self, FetchError> {
        let client = http::build_client(config.request_timeout())?;
        let repo = HttpWantedRepository::new(client.clone(), config.api_url.clone());
        let remote = HttpRemoteSource::new(client, config.fbi_api.clone());
        let sync = SyncService::new(repo, remote, SyncPolicy::from(&config));

        Ok(Self { config, sync })
    }

    /// The local store repository
    pub fn repo(&self) -> &HttpWantedRepository {
        self.sync.store()
    }
}
