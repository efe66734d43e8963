//! Config load-and-watch over an abstract source.
//!
//! A [`Source`] is anything that can produce a raw JSON payload now and block
//! until the next revision. [`ConfigStore::load_and_watch`] performs one
//! initial load (failure surfaces to the caller) and then keeps the cached
//! value fresh from a background loop launched through the crash-isolated
//! [`crate::fanout::spawn`], so a misbehaving source can never take the
//! process down.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;
use tracing::error;

use crate::errors::{Result, StrandError};
use crate::fanout;

/// Pause before re-polling a source that just failed, so a persistently
/// broken source cannot hot-spin the watch loop.
pub const WATCH_ERROR_PAUSE: Duration = Duration::from_secs(1);

/// A watchable provider of one raw config payload.
#[async_trait]
pub trait Source: Send + 'static {
    /// Fetch the current payload.
    async fn load(&mut self) -> Result<String>;

    /// Block until the payload changes, then return the new revision.
    async fn changed(&mut self) -> Result<String>;
}

/// Shared cache of decoded config payloads, keyed by config name.
///
/// Values are stored as decoded JSON and deserialized into the caller's type
/// on every [`get`](Self::get), which keeps the store type-erased.
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    entries: Arc<DashMap<String, Value>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserialize the latest cached revision of `name`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| StrandError::config_missing(name))?;
        serde_json::from_value(entry.value().clone()).map_err(StrandError::from)
    }

    /// Load `name` once from `source`, then watch it forever in the
    /// background.
    ///
    /// The initial load and decode failures are returned to the caller; after
    /// that the watch loop logs failures and keeps going.
    pub async fn load_and_watch<S: Source>(&self, name: &str, mut source: S) -> Result<()> {
        let initial = source.load().await?;
        store_raw(&self.entries, name, &initial)?;

        let entries = self.entries.clone();
        let name = name.to_string();
        fanout::spawn(async move {
            loop {
                match source.changed().await {
                    Ok(raw) => {
                        if let Err(failure) = store_raw(&entries, &name, &raw) {
                            error!(config = %name, error = %failure, "failed to store updated config");
                        }
                    }
                    Err(failure) => {
                        error!(config = %name, error = %failure, "config watch failed");
                        sleep(WATCH_ERROR_PAUSE).await;
                    }
                }
            }
        });
        Ok(())
    }
}

fn store_raw(entries: &DashMap<String, Value>, name: &str, raw: &str) -> Result<()> {
    let value: Value = serde_json::from_str(raw)?;
    entries.insert(name.to_string(), value);
    Ok(())
}
