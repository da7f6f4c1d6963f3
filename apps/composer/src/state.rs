//! Application state - every service the composer runtime owns.

use std::sync::Arc;

use crosspost_core::ports::{CaptionService, KeyValueStore};
use crosspost_core::snapshot::PostSnapshots;
use crosspost_engine::{AccountService, PostStore, SessionBus};
use crosspost_infra::{ChannelNotifier, FileStore, InMemoryStore, SimulatedCaptionService};

#[cfg(feature = "http-captions")]
use crosspost_infra::HttpCaptionService;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostStore>,
    pub accounts: Arc<AccountService>,
    pub session: SessionBus,
    pub notifier: Arc<ChannelNotifier>,
    pub captions: Arc<dyn CaptionService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let kv: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "Using file-backed store");
                Arc::new(FileStore::new(dir.clone()))
            }
            None => {
                tracing::warn!("DATA_DIR not set. Posts will not survive a restart (in-memory mode).");
                Arc::new(InMemoryStore::new())
            }
        };

        let notifier = Arc::new(ChannelNotifier::default());
        let session = SessionBus::default();

        let store = Arc::new(
            PostStore::open(PostSnapshots::new(kv.clone(), "posts"), notifier.clone()).await,
        );
        let accounts =
            Arc::new(AccountService::open(kv, notifier.clone(), session.clone()).await);

        let captions = Self::caption_service(config);

        tracing::info!("Application state initialized");

        Self {
            store,
            accounts,
            session,
            notifier,
            captions,
        }
    }

    #[cfg(feature = "http-captions")]
    fn caption_service(config: &AppConfig) -> Arc<dyn CaptionService> {
        match &config.captions_endpoint {
            Some(endpoint) => Arc::new(HttpCaptionService::new(endpoint.clone())),
            None => {
                tracing::info!("CAPTIONS_ENDPOINT not set - using simulated captions");
                Arc::new(SimulatedCaptionService::new())
            }
        }
    }

    #[cfg(not(feature = "http-captions"))]
    fn caption_service(_config: &AppConfig) -> Arc<dyn CaptionService> {
        Arc::new(SimulatedCaptionService::new())
    }
}
