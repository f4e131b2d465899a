//! Audit orchestration: cache lookup, detector run, scoring, synthesis and
//! the optional AI merge.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::analyzer::{marketing, seo, technical, ux};
use crate::domain::{
    AiNarrative, AnalysisMethod, AuditResult, CacheEntry, PageSnapshot, PillarNarrative,
    PillarReport, Recommendation, CACHE_TTL_HOURS, MAX_RECOMMENDATIONS,
};
use crate::recommend;
use crate::score;
use crate::service::cache::CacheStore;
use crate::service::claude::{AiAnalyzer, AiPillar, AiReport, PageDigest};

const AI_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct AuditOptions {
    /// Skip the cache lookup and overwrite any stored entry.
    pub force_refresh: bool,
    /// Attempt the AI path; the deterministic result remains the fallback.
    pub use_ai: bool,
}

/// Runs complete audits over captured snapshots.
///
/// The deterministic pipeline always runs to completion first, so an AI
/// failure can never leave the caller without a result.
pub struct AuditEngine {
    cache: Arc<dyn CacheStore>,
    ai: Option<Arc<dyn AiAnalyzer>>,
    ai_timeout: Duration,
}

impl AuditEngine {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache, ai: None, ai_timeout: Duration::from_secs(AI_TIMEOUT_SECS) }
    }

    pub fn with_ai(mut self, ai: Arc<dyn AiAnalyzer>) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn with_ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = timeout;
        self
    }

    /// Audits one snapshot. Returns the cached result unchanged when a fresh
    /// entry exists and no refresh was forced.
    pub async fn audit(&self, snapshot: &PageSnapshot, options: &AuditOptions) -> AuditResult {
        info!("[AUDIT] Starting analysis: {}", snapshot.url);

        if !options.force_refresh {
            if let Some(cached) = self.fresh_cache_entry(&snapshot.url) {
                info!("[AUDIT] Cache hit: {}", snapshot.url);
                return cached.value;
            }
        }

        let mut result = self.run_deterministic(snapshot);

        if options.use_ai {
            match &self.ai {
                Some(ai) => match self.run_ai(ai.as_ref(), snapshot).await {
                    Ok(report) => {
                        debug!("[AUDIT] AI analysis succeeded: {}", snapshot.url);
                        merge_ai_report(&mut result, report);
                    }
                    Err(e) => {
                        warn!("[AUDIT] AI analysis failed, keeping code analysis: {}", e);
                    }
                },
                None => {
                    warn!("[AUDIT] AI requested but no analyzer configured, keeping code analysis");
                }
            }
        }

        if let Err(e) = self.cache.set(&snapshot.url, CacheEntry::new(result.clone())) {
            warn!("[AUDIT] Failed to cache result for {}: {}", snapshot.url, e);
        }

        info!(
            "[AUDIT] Analysis complete: {} (global {}, {:?})",
            snapshot.url, result.global_score, result.analysis_method
        );
        result
    }

    fn fresh_cache_entry(&self, url: &str) -> Option<CacheEntry> {
        let entry = match self.cache.get(url) {
            Ok(entry) => entry?,
            Err(e) => {
                warn!("[AUDIT] Cache read failed for {}: {}", url, e);
                return None;
            }
        };
        let age = Utc::now() - entry.timestamp;
        if age < chrono::Duration::hours(CACHE_TTL_HOURS) {
            Some(entry)
        } else {
            debug!("[AUDIT] Cache entry expired for {}", url);
            None
        }
    }

    fn run_deterministic(&self, snapshot: &PageSnapshot) -> AuditResult {
        debug!("[AUDIT] Running detectors: {}", snapshot.url);
        let seo_findings = seo::analyze(snapshot);
        let marketing_findings = marketing::analyze(snapshot);
        let ux_findings = ux::analyze(snapshot);
        let technical_info = technical::analyze(snapshot);

        let seo_score = score::seo_score(&seo_findings);
        let marketing_score = score::marketing_score(&marketing_findings);
        let ux_score = score::ux_score(&ux_findings);
        let global = score::global_score(seo_score, marketing_score, ux_score);

        let recommendations =
            recommend::synthesize(&seo_findings, &marketing_findings, &ux_findings);

        AuditResult {
            url: snapshot.url.clone(),
            timestamp: Utc::now(),
            analysis_method: AnalysisMethod::Code,
            seo: PillarReport { findings: seo_findings, score: seo_score },
            marketing: PillarReport { findings: marketing_findings, score: marketing_score },
            ux: PillarReport { findings: ux_findings, score: ux_score },
            global_score: global,
            recommendations,
            technical_info,
            narrative: None,
        }
    }

    async fn run_ai(
        &self,
        ai: &dyn AiAnalyzer,
        snapshot: &PageSnapshot,
    ) -> anyhow::Result<AiReport> {
        let digest = PageDigest::from_snapshot(snapshot);
        tokio::time::timeout(self.ai_timeout, ai.analyze(&digest))
            .await
            .map_err(|_| anyhow::anyhow!("AI analysis timed out after {:?}", self.ai_timeout))?
    }
}

/// Overlays the model verdict onto the deterministic result: scores and
/// recommendations are replaced, findings stay as computed.
fn merge_ai_report(result: &mut AuditResult, report: AiReport) {
    result.analysis_method = AnalysisMethod::Ai;
    result.global_score = report.global_score.min(100);
    result.seo.score = report.seo.score.min(100);
    result.marketing.score = report.marketing.score.min(100);
    result.ux.score = report.ux.score.min(100);

    if !report.recommendations.is_empty() {
        result.recommendations = report
            .recommendations
            .iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|r| Recommendation {
                priority: r.parsed_priority(),
                category: r.category.clone(),
                title: r.title.clone(),
                description: r.description.clone(),
                impact: r.impact.clone(),
                action: r.action.clone(),
                tips: r.tips.clone(),
                best_practices: String::new(),
                resources: None,
            })
            .collect();
    }

    result.narrative = Some(AiNarrative {
        global_analysis: report.global_analysis,
        seo: pillar_narrative(report.seo),
        marketing: pillar_narrative(report.marketing),
        ux: pillar_narrative(report.ux),
    });
}

fn pillar_narrative(pillar: AiPillar) -> PillarNarrative {
    PillarNarrative {
        analysis: pillar.analysis,
        strengths: pillar.strengths,
        weaknesses: pillar.weaknesses,
        opportunities: pillar.opportunities,
    }
}
