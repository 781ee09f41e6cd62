mod builder;
mod cache;
mod policy;
mod stats;

pub use builder::{CacheBuilder, DEFAULT_CAPACITY};
pub use cache::Cache;
pub use policy::PolicyKind;
pub use stats::{Metrics, StatsCounter, StatsSink, TickEvent};
