//! Application state shared by every handler.
//!
//! Backends are chosen at compile time (see `storage` and `notify`) and
//! injected into the service as trait objects, so handlers never name a
//! concrete implementation.

use std::sync::Arc;

use feedback_core::access::AccessGate;
use feedback_core::notify::Notifier;
use feedback_core::storage::MessageRepository;

use crate::cache::ListCache;
use crate::config::Config;
use crate::gate::TokenGate;
use crate::service::FeedbackService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: FeedbackService,
    pub gate: Arc<dyn AccessGate>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(service: FeedbackService, gate: Arc<dyn AccessGate>, config: Config) -> Self {
        Self {
            service,
            gate,
            config: Arc::new(config),
        }
    }

    /// Builds the state with the compiled-in storage and notifier backends.
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        #[cfg(feature = "aws")]
        let sdk_config = crate::aws::load_sdk_config(&config).await;

        #[cfg(feature = "inmemory")]
        let repository: Arc<dyn MessageRepository> = {
            use crate::storage::InMemoryRepository;

            match &config.seed_path {
                Some(path) => Arc::new(InMemoryRepository::from_seed_file(path).await?),
                None => {
                    tracing::info!("Using an empty in-memory feedback store");
                    Arc::new(InMemoryRepository::new())
                }
            }
        };

        #[cfg(feature = "dynamodb")]
        let repository: Arc<dyn MessageRepository> = {
            use crate::storage::DynamoDbRepository;

            let client = aws_sdk_dynamodb::Client::new(&sdk_config);
            let repository = DynamoDbRepository::new(client, &config.table_name);
            tracing::info!(table = %repository.table_name(), "Using DynamoDB feedback store");
            Arc::new(repository)
        };

        #[cfg(feature = "outbox")]
        let notifier: Arc<dyn Notifier> = {
            tracing::info!("Replies are kept in the local outbox, nothing is delivered");
            Arc::new(crate::notify::OutboxNotifier::new(&config.ses_identity))
        };

        #[cfg(feature = "ses")]
        let notifier: Arc<dyn Notifier> = {
            let client = aws_sdk_sesv2::Client::new(&sdk_config);
            tracing::info!(identity = %config.ses_identity, "Sending replies through SES");
            Arc::new(crate::notify::SesNotifier::new(client, &config.ses_identity))
        };

        let cache = ListCache::new(config.list_cache_ttl());
        let service = FeedbackService::new(repository, notifier, cache);
        let gate: Arc<dyn AccessGate> = Arc::new(TokenGate::from_config(&config));

        Ok(Self::new(service, gate, config))
    }
}
