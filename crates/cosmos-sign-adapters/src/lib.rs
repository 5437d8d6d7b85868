pub mod config;
pub mod context;
pub mod lcd;
pub mod queries;
pub mod queue;
pub mod registry;

pub use config::SignAdapterConfig;
pub use context::StaticInteractionContext;
pub use lcd::LcdQueriesAdapter;
pub use queries::{IcnsKey, InMemoryQueriesAdapter};
pub use queue::{InteractionQueueAdapter, STALE_INTERACTION};
pub use registry::ChainRegistryAdapter;
