use std::sync::Arc;

use crate::action_executor;
use crate::config::{self, Config};
use crate::index_store::IndexStore;
use crate::model::SearchRecord;
use crate::remote::{BookmarkSource, ReadeckClient, RemoteError};
use crate::scheduler::{RefreshScheduler, ScheduleState};

const DEFAULT_RESULT_LIMIT: usize = 20;

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Remote(RemoteError),
    ItemNotFound(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Remote(error) => write!(f, "remote error: {error}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<RemoteError> for ServiceError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

/// Wires config, remote source, index store, and refresh scheduler together
/// and exposes the operations the host launcher calls.
pub struct CoreService {
    config: Config,
    source: Arc<dyn BookmarkSource>,
    store: Arc<IndexStore>,
    scheduler: RefreshScheduler,
}

impl CoreService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        config::validate(&config).map_err(ServiceError::Config)?;
        let client = ReadeckClient::new(&config.instance_url, &config.api_key)?;
        Ok(Self::assemble(config, Arc::new(client)))
    }

    /// Test constructor: any `BookmarkSource` in place of the HTTP client.
    pub fn with_source(
        config: Config,
        source: Arc<dyn BookmarkSource>,
    ) -> Result<Self, ServiceError> {
        config::validate(&config).map_err(ServiceError::Config)?;
        Ok(Self::assemble(config, source))
    }

    fn assemble(config: Config, source: Arc<dyn BookmarkSource>) -> Self {
        let store = Arc::new(IndexStore::new());
        let scheduler = RefreshScheduler::new(
            Arc::clone(&source),
            Arc::clone(&store),
            config.refresh_interval(),
            config.page_limit,
        );
        Self {
            config,
            source,
            store,
            scheduler,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<IndexStore> {
        &self.store
    }

    pub fn schedule_state(&self) -> ScheduleState {
        self.scheduler.state()
    }

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchRecord> {
        let snapshot = self.store.snapshot();
        let effective_limit = if limit == 0 {
            DEFAULT_RESULT_LIMIT
        } else {
            limit
        };
        crate::search::search(&snapshot, query, effective_limit)
    }

    /// Manual trigger: one cycle on the caller's thread, returning the new
    /// generation's record count.
    pub fn refresh_now(&self) -> usize {
        self.scheduler.refresh_now()
    }

    pub fn archive(&self, id: &str) -> Result<(), ServiceError> {
        self.require_known(id)?;
        action_executor::archive_bookmark(self.source.as_ref(), &self.scheduler, id)
            .map_err(ServiceError::from)
    }

    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.require_known(id)?;
        action_executor::delete_bookmark(self.source.as_ref(), &self.scheduler, id)
            .map_err(ServiceError::from)
    }

    /// Stop-then-restart reconfiguration: the old timer loop is joined
    /// before its replacement starts, so the store never has two schedulers
    /// racing on it. The existing generation stays queryable throughout.
    pub fn reconfigure(&mut self, new_config: Config) -> Result<(), ServiceError> {
        let mut new_config = new_config;
        new_config.cache_length_minutes = new_config.cache_length_minutes.max(1);
        config::validate(&new_config).map_err(ServiceError::Config)?;

        self.scheduler.stop();

        let credentials_changed = new_config.instance_url != self.config.instance_url
            || new_config.api_key != self.config.api_key;
        if credentials_changed {
            let client = ReadeckClient::new(&new_config.instance_url, &new_config.api_key)?;
            self.source = Arc::new(client);
        }

        self.config = new_config;
        self.scheduler = RefreshScheduler::new(
            Arc::clone(&self.source),
            Arc::clone(&self.store),
            self.config.refresh_interval(),
            self.config.page_limit,
        );
        self.scheduler.start();
        Ok(())
    }

    fn require_known(&self, id: &str) -> Result<(), ServiceError> {
        let known = self.store.snapshot().iter().any(|record| record.id == id);
        if known {
            Ok(())
        } else {
            Err(ServiceError::ItemNotFound(id.to_string()))
        }
    }
}
