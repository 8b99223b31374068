//! Shared application state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lead_auth::AdminAuth;
use lead_config::LeadConfig;
use lead_schema::{SchemaError, SchemaRegistry};
use lead_store::{StoreError, Stores};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: LeadConfig,
    pub stores: Stores,
    pub schemas: SchemaRegistry,
    pub auth: AdminAuth,
    request_seq: AtomicU64,
    id_seq: AtomicU64,
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl AppState {
    /// Wrap already-opened stores.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the request schemas cannot be generated.
    pub fn new(config: LeadConfig, stores: Stores) -> Result<SharedState, SchemaError> {
        let schemas = SchemaRegistry::new()?;
        let auth = AdminAuth::new(config.admin.clone());
        Ok(Arc::new(Self {
            config,
            stores,
            schemas,
            auth,
            request_seq: AtomicU64::new(1),
            id_seq: AtomicU64::new(0),
        }))
    }

    /// Open the configured stores and build the state.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the stores cannot be opened or the schemas
    /// cannot be generated.
    pub async fn open(config: LeadConfig) -> Result<SharedState, StateError> {
        let stores = Stores::open(&config.store).await?;
        Ok(Self::new(config, stores)?)
    }

    /// Next request id for requests that did not bring one.
    pub(crate) fn next_request_id(&self) -> String {
        let id = self.request_seq.fetch_add(1, Ordering::Relaxed);
        format!("req-{id:016x}")
    }

    /// Two bytes that differ between ids generated in the same millisecond.
    pub(crate) fn id_entropy(&self) -> [u8; 2] {
        let n = self.id_seq.fetch_add(1, Ordering::Relaxed);
        let [.., hi, lo] = n.to_be_bytes();
        [hi, lo]
    }
}
