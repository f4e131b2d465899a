//! Audit result aggregate, recommendations and cache entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::findings::{
    CacheFinding, CmsFinding, CoreWebVitalsFinding, MarketingFindings, SeoFindings,
    TechnologiesFinding, UxFindings,
};

/// Recommendation lists are truncated to this many entries; the overflow is
/// discarded, not errored.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Cache entries older than this are treated as misses and overwritten by the
/// next fresh audit.
pub const CACHE_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMethod {
    #[serde(rename = "AI")]
    Ai,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pillar {
    Seo,
    Marketing,
    Ux,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    Important,
    Medium,
}

impl Priority {
    /// Sort rank: Critical=0, Important=1, Medium=2.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::Important => 1,
            Priority::Medium => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub action: String,
    pub tips: Vec<String>,
    pub best_practices: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

/// One pillar's findings plus its derived 0..=100 score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarReport<F> {
    pub findings: F,
    pub score: u8,
}

/// Technology fingerprint of the page; informational, not scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalInfo {
    pub cms: CmsFinding,
    pub cache: CacheFinding,
    pub technologies: TechnologiesFinding,
    pub core_web_vitals: CoreWebVitalsFinding,
}

/// Per-pillar narrative from the AI collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PillarNarrative {
    pub analysis: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
}

/// Narrative fields merged into the result when the AI path succeeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiNarrative {
    pub global_analysis: String,
    pub seo: PillarNarrative,
    pub marketing: PillarNarrative,
    pub ux: PillarNarrative,
}

/// Root aggregate of one audit run. Constructed fresh on every analysis
/// request, persisted verbatim into the cache and returned unchanged on a
/// cache hit; never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub analysis_method: AnalysisMethod,
    pub seo: PillarReport<SeoFindings>,
    pub marketing: PillarReport<MarketingFindings>,
    pub ux: PillarReport<UxFindings>,
    pub global_score: u8,
    pub recommendations: Vec<Recommendation>,
    pub technical_info: TechnicalInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<AiNarrative>,
}

/// A cached audit keyed by the exact page URL string. TTL enforcement is the
/// orchestrator's responsibility, not the store's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: AuditResult,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(value: AuditResult) -> Self {
        let timestamp = value.timestamp;
        Self { value, timestamp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ranks_are_ordered() {
        assert_eq!(Priority::Critical.rank(), 0);
        assert_eq!(Priority::Important.rank(), 1);
        assert_eq!(Priority::Medium.rank(), 2);
        assert!(Priority::Critical < Priority::Medium);
    }

    #[test]
    fn analysis_method_serializes_to_wire_labels() {
        assert_eq!(serde_json::to_string(&AnalysisMethod::Ai).unwrap(), "\"AI\"");
        assert_eq!(serde_json::to_string(&AnalysisMethod::Code).unwrap(), "\"Code\"");
    }
}
