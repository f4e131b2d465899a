pub mod cache;
pub mod claude;
pub mod engine;

pub use cache::{CacheStore, MemoryCacheStore};
pub use claude::{AiAnalyzer, ClaudeAnalyzer};
pub use engine::{AuditEngine, AuditOptions};
