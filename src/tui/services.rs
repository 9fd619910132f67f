use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::catalog::{CatalogApi, CatalogClient, CatalogError};

use super::events::{Action, AppEvent, Notification, NotificationLevel};

/// Centralized handle to the backend.
///
/// Created once at startup, then passed by reference to views that need
/// catalog access or want to raise actions on the event channel.
pub struct Services {
    pub catalog: Arc<dyn CatalogApi>,
    pub config: AppConfig,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Build the HTTP catalog client from config.
    ///
    /// An invalid base URL is fatal: nothing works without the catalog.
    pub fn init(
        config: AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, CatalogError> {
        let client = CatalogClient::from_config(&config.api)?;
        log::info!("Catalog client ready for {}", client.base_url());
        Ok(Self::with_catalog(Arc::new(client), config, event_tx))
    }

    pub fn with_catalog(
        catalog: Arc<dyn CatalogApi>,
        config: AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            catalog,
            config,
            event_tx,
        }
    }

    pub fn dispatch(&self, action: Action) {
        let _ = self.event_tx.send(AppEvent::Action(action));
    }

    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self
            .event_tx
            .send(AppEvent::Notification(Notification::new(message, level)));
    }
}
