use tracing::debug;

use crate::{
    config::{ConfigDraft, ConfigStore, SimulationConfig},
    error::{Error, Result},
    gateway::Gateway,
};

/// Turns an operator action into exactly one [`Gateway`] call and reports the
/// outcome once.
///
/// Every operation is a plain `async fn` returning the engine's response;
/// callers own the concurrency policy (two commands issued back-to-back both
/// proceed, nothing here serializes them). No operation retries.
#[derive(Clone)]
pub struct Dispatcher<G: Gateway> {
    gateway: G,
    store: ConfigStore,
}

impl<G: Gateway> Dispatcher<G> {
    pub fn new(gateway: G, store: ConfigStore) -> Self {
        Self { gateway, store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Submit a configuration form to the engine.
    ///
    /// Presence-validated locally first: any unfilled field fails with
    /// [`Error::MissingFields`] before a single byte goes out. Zero counts as
    /// filled.
    pub async fn submit(&self, draft: &ConfigDraft) -> Result<String> {
        let config = draft.complete().map_err(Error::MissingFields)?;

        debug!("submitting configuration {config:?}");

        self.gateway.submit(&config).await
    }

    pub async fn start(&self) -> Result<String> {
        self.gateway.start().await
    }

    pub async fn stop(&self) -> Result<String> {
        self.gateway.stop().await
    }

    /// Reset the engine; on success the shared configuration goes back to its
    /// all-zero default as well.
    pub async fn reset(&self) -> Result<String> {
        let message = self.gateway.reset().await?;

        self.store.reset();

        Ok(message)
    }

    /// Persist the store's current snapshot on the engine side.
    pub async fn save_config(&self) -> Result<String> {
        self.gateway.save_config(&self.store.get()).await
    }

    /// Fetch the engine's saved configuration and replace the shared record
    /// wholesale. The loaded record is complete, so no merging takes place.
    pub async fn load_config(&self) -> Result<SimulationConfig> {
        let config = self.gateway.load_config().await?;

        self.store.replace(config.clone());

        Ok(config)
    }
}
