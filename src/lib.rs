//! Heuristic page audit engine: SEO, marketing and UX detectors over a
//! captured page snapshot, pillar scoring and recommendation synthesis, with
//! an optional AI collaborator layered on top.

pub mod analyzer;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod recommend;
pub mod score;
pub mod service;

pub use domain::{AuditResult, PageSnapshot};
pub use error::{AuditError, Result};
pub use extractor::{PageExtractor, PageFetcher};
pub use service::{AuditEngine, AuditOptions, MemoryCacheStore};
