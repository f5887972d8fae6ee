//! Application state wiring the gateway together.
//!
//! `AppState` pins the generic `ChatGateway` to the concrete infra
//! implementations and owns it for the lifetime of the process: every
//! backend is constructed once at startup and injected, never reached
//! through a global handle.

use std::sync::Arc;
use std::time::Duration;

use chatgate_core::gateway::ChatGateway;
use chatgate_core::limiter::FixedWindowLimiter;
use chatgate_infra::cache::MemoryResponseCache;
use chatgate_infra::llm::OpenAiCompatClient;
use chatgate_infra::sqlite::conversation::SqliteConversationStore;
use chatgate_infra::sqlite::pool::DatabasePool;
use chatgate_types::config::GatewayConfig;

/// Concrete type alias for the gateway generics pinned to infra
/// implementations.
pub type ConcreteChatGateway =
    ChatGateway<SqliteConversationStore, MemoryResponseCache, OpenAiCompatClient>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ConcreteChatGateway>,
}

impl AppState {
    /// Initialize the application state: connect to the database, wire the
    /// store, cache, provider client, and limiter into the gateway.
    pub async fn init(config: &GatewayConfig) -> anyhow::Result<Self> {
        let pool = DatabasePool::new(&config.database_url).await?;
        let store = SqliteConversationStore::new(pool);
        let cache = MemoryResponseCache::new();
        let model = OpenAiCompatClient::new(&config.model);
        let limiter = FixedWindowLimiter::new(
            config.rate_limit_max,
            Duration::from_secs(config.rate_limit_window_secs),
        );

        let gateway = ChatGateway::new(
            store,
            cache,
            model,
            limiter,
            Duration::from_secs(config.cache_ttl_secs),
        );

        Ok(Self {
            gateway: Arc::new(gateway),
        })
    }
}
