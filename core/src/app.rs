use crate::chat::{ChatRelay, GeminiRelay};
use crate::config::Config;
use crate::entry_list::EntryList;
use crate::error::StoreError;
use crate::store::RecordStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task;

/// Representation of the application state. This struct can be shared around to share
/// the record store and the chat relay between request handlers.
pub struct App {
    pub store: RecordStore,
    pub relay: Arc<dyn ChatRelay>,

    /// Serializes load-mutate-save cycles within this process. Writers in other processes
    /// sharing the file are not covered.
    write_lock: Mutex<()>,
}

impl App {
    pub fn new(store: RecordStore, relay: Arc<dyn ChatRelay>) -> Self {
        Self {
            store,
            relay,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let relay = GeminiRelay::new(config.api_key.clone()).with_model(config.model.clone());
        Self::new(RecordStore::new(config.data_file.clone()), Arc::new(relay))
    }

    /// reads the current entries on the blocking pool
    pub async fn entries(&self) -> Result<EntryList, StoreError> {
        let store = self.store.clone();
        Ok(task::spawn_blocking(move || store.load_list()).await?)
    }

    /// loads the list, applies `f` and writes the result back. The file work runs on the
    /// blocking pool while the write lock is held.
    pub async fn modify<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut EntryList) -> R + Send + 'static,
        R: Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let store = self.store.clone();
        task::spawn_blocking(move || {
            let mut list = store.load_list();
            let ret = f(&mut list);
            store.save_list(&list)?;
            Ok(ret)
        })
        .await?
    }
}
