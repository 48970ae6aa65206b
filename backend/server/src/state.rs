use std::sync::Arc;

use tokio::sync::RwLock;

use super::{config::Config, error::StoreError, store::Store};

/// Shared server state.
///
/// List and export take the read lock. Create and delete hold the write lock for the
/// whole load, mutate and save sequence so concurrent writers never drop each other's entries.
pub struct State {
    pub config: Config,
    pub store: RwLock<Store>,
}

impl State {
    pub async fn new(config: Config) -> Result<Arc<Self>, StoreError> {
        let store = Store::open(&config.data_file).await?;

        Ok(Arc::new(Self {
            config,
            store: RwLock::new(store),
        }))
    }
}
