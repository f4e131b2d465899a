//! End-to-end pipeline tests: HTML in, audit result out.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};

use siteaudit::domain::{AnalysisMethod, CacheEntry, Priority, CACHE_TTL_HOURS, MAX_RECOMMENDATIONS};
use siteaudit::service::claude::{AiAnalyzer, AiPillar, AiRecommendation, AiReport, PageDigest};
use siteaudit::service::CacheStore;
use siteaudit::{AuditEngine, AuditOptions, MemoryCacheStore, PageExtractor};

const HEALTHY_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Wooden furniture handmade in Lyon | Atelier Brive</title>
  <meta name="description" content="Solid oak tables, chairs and shelving, designed and built in our Lyon workshop. Delivery across France within two weeks, with a ten-year guarantee.">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta property="og:title" content="Atelier Brive">
  <meta property="og:description" content="Handmade wooden furniture">
  <meta property="og:image" content="https://atelier-brive.fr/og.jpg">
  <meta property="og:url" content="https://atelier-brive.fr/">
  <meta property="og:type" content="website">
  <link rel="canonical" href="https://atelier-brive.fr/">
  <script type="application/ld+json">{"@type": "Organization", "name": "Atelier Brive"}</script>
  <script src="https://www.googletagmanager.com/gtag/js?id=G-ABC123XYZ"></script>
  <script src="https://www.googletagmanager.com/gtm.js?id=GTM-ABCD12"></script>
</head>
<body>
  <header><nav aria-label="Main"><a href="/tables">Tables</a> <a href="/chairs">Chairs</a></nav></header>
  <main>
    <h1>Handmade wooden furniture</h1>
    <h2>Our workshop</h2>
    <p>Every piece leaves our Lyon workshop as solid oak, assembled by hand and finished with natural oil. Every piece leaves our Lyon workshop as solid oak, assembled by hand and finished with natural oil. Every piece leaves our Lyon workshop as solid oak, assembled by hand and finished with natural oil. Every piece leaves our Lyon workshop as solid oak, assembled by hand and finished with natural oil. Every piece leaves our Lyon workshop as solid oak, assembled by hand and finished with natural oil. Every piece leaves our Lyon workshop as solid oak, assembled by hand and finished with natural oil.</p>
    <img src="/img/table.jpg" alt="Oak dining table" loading="lazy">
    <img src="/img/chair.jpg" alt="Oak chair" loading="lazy">
    <a href="/contact" class="btn btn-primary">Request a quote</a>
    <a href="/catalog" class="btn">Browse the catalog</a>
    <form action="/subscribe">
      <label for="email">Email</label>
      <input id="email" type="email">
      <button type="submit">Subscribe</button>
    </form>
  </main>
  <footer>
    <a href="https://www.linkedin.com/company/atelier-brive">LinkedIn</a>
    <a href="https://www.instagram.com/atelierbrive">Instagram</a>
  </footer>
</body>
</html>"#;

const DEFICIENT_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><meta name="robots" content="noindex"></head>
<body>
  <div>
    <h2>Welcome</h2>
    <h4>Deep section</h4>
    <img src="/a.jpg">
    <a href="#">Read more</a>
    <a href="javascript:void(0)">Click</a>
  </div>
</body>
</html>"##;

fn engine_with(cache: Arc<MemoryCacheStore>) -> AuditEngine {
    AuditEngine::new(cache)
}

#[tokio::test]
async fn healthy_page_scores_high_across_pillars() {
    let snapshot = PageExtractor::extract("https://atelier-brive.fr/", HEALTHY_PAGE);
    let cache = Arc::new(MemoryCacheStore::new());
    let result = engine_with(cache).audit(&snapshot, &AuditOptions::default()).await;

    assert_eq!(result.analysis_method, AnalysisMethod::Code);
    assert!(result.seo.score >= 90, "seo score {}", result.seo.score);
    assert!(result.ux.score >= 70, "ux score {}", result.ux.score);
    assert!(result.marketing.score >= 50, "marketing score {}", result.marketing.score);
    assert!(result.recommendations.iter().all(|r| r.priority != Priority::Critical));
    assert!(result.seo.findings.title.is_optimal);
    assert!(result.seo.findings.open_graph.complete);
    assert!(!result.seo.findings.robots.is_blocking);
    assert_eq!(result.ux.findings.links.broken, 0);
}

#[tokio::test]
async fn deficient_page_triggers_capped_sorted_recommendations() {
    let snapshot = PageExtractor::extract("https://example.com/", DEFICIENT_PAGE);
    let cache = Arc::new(MemoryCacheStore::new());
    let result = engine_with(cache).audit(&snapshot, &AuditOptions::default()).await;

    assert_eq!(result.recommendations.len(), MAX_RECOMMENDATIONS);
    let ranks: Vec<u8> = result.recommendations.iter().map(|r| r.priority.rank()).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);

    assert!(result.seo.findings.robots.is_blocking);
    assert!(result.seo.findings.headings.errors.iter().any(|e| e.contains("H2 → H4")));
    assert_eq!(result.seo.findings.images.without_alt, 1);
    assert_eq!(result.ux.findings.links.broken, 2);
    assert!(result.seo.score < 30, "seo score {}", result.seo.score);
}

#[tokio::test]
async fn second_audit_hits_the_cache() {
    let snapshot = PageExtractor::extract("https://atelier-brive.fr/", HEALTHY_PAGE);
    let cache = Arc::new(MemoryCacheStore::new());
    let engine = engine_with(cache.clone());

    let first = engine.audit(&snapshot, &AuditOptions::default()).await;
    let second = engine.audit(&snapshot, &AuditOptions::default()).await;

    // A cache hit returns the stored result verbatim, timestamp included.
    assert_eq!(first.timestamp, second.timestamp);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn expired_entry_is_reanalyzed() {
    let snapshot = PageExtractor::extract("https://atelier-brive.fr/", HEALTHY_PAGE);
    let cache = Arc::new(MemoryCacheStore::new());
    let engine = engine_with(cache.clone());

    let first = engine.audit(&snapshot, &AuditOptions::default()).await;

    // Backdate the stored entry past the TTL.
    let mut stale = CacheEntry::new(first.clone());
    stale.timestamp = Utc::now() - Duration::hours(CACHE_TTL_HOURS + 1);
    cache.set(&snapshot.url, stale).unwrap();

    let second = engine.audit(&snapshot, &AuditOptions::default()).await;
    assert!(second.timestamp > first.timestamp);
}

#[tokio::test]
async fn force_refresh_bypasses_a_fresh_entry() {
    let snapshot = PageExtractor::extract("https://atelier-brive.fr/", HEALTHY_PAGE);
    let cache = Arc::new(MemoryCacheStore::new());
    let engine = engine_with(cache.clone());

    let first = engine.audit(&snapshot, &AuditOptions::default()).await;
    let second = engine
        .audit(&snapshot, &AuditOptions { force_refresh: true, use_ai: false })
        .await;
    assert!(second.timestamp > first.timestamp);
}

struct FailingAnalyzer;

#[async_trait]
impl AiAnalyzer for FailingAnalyzer {
    async fn analyze(&self, _digest: &PageDigest) -> Result<AiReport> {
        anyhow::bail!("simulated outage")
    }
}

struct CannedAnalyzer;

#[async_trait]
impl AiAnalyzer for CannedAnalyzer {
    async fn analyze(&self, _digest: &PageDigest) -> Result<AiReport> {
        Ok(AiReport {
            global_score: 77,
            global_analysis: "Solid foundation with room to grow.".into(),
            seo: AiPillar { score: 82, analysis: "Good on-page basics.".into(), ..Default::default() },
            marketing: AiPillar { score: 70, ..Default::default() },
            ux: AiPillar { score: 75, ..Default::default() },
            recommendations: vec![AiRecommendation {
                priority: "Important".into(),
                category: "Marketing".into(),
                title: "Add a retargeting pixel".into(),
                description: "No retargeting audience is being built.".into(),
                impact: "Paid campaigns start cold.".into(),
                action: "Install a Meta or LinkedIn pixel.".into(),
                tips: vec![],
            }],
        })
    }
}

#[tokio::test]
async fn ai_failure_falls_back_to_deterministic_result() {
    let snapshot = PageExtractor::extract("https://atelier-brive.fr/", HEALTHY_PAGE);
    let cache = Arc::new(MemoryCacheStore::new());
    let engine = engine_with(cache).with_ai(Arc::new(FailingAnalyzer));

    let result = engine
        .audit(&snapshot, &AuditOptions { force_refresh: false, use_ai: true })
        .await;

    assert_eq!(result.analysis_method, AnalysisMethod::Code);
    assert!(result.narrative.is_none());
    assert!(!result.recommendations.is_empty() || result.global_score > 0);
}

#[tokio::test]
async fn ai_success_overlays_scores_and_narrative() {
    let snapshot = PageExtractor::extract("https://atelier-brive.fr/", HEALTHY_PAGE);
    let cache = Arc::new(MemoryCacheStore::new());
    let engine = engine_with(cache).with_ai(Arc::new(CannedAnalyzer));

    let result = engine
        .audit(&snapshot, &AuditOptions { force_refresh: false, use_ai: true })
        .await;

    assert_eq!(result.analysis_method, AnalysisMethod::Ai);
    assert_eq!(result.global_score, 77);
    assert_eq!(result.seo.score, 82);
    // Findings stay deterministic under the overlaid scores.
    assert!(result.seo.findings.title.is_optimal);
    let narrative = result.narrative.expect("narrative present on the AI path");
    assert_eq!(narrative.seo.analysis, "Good on-page basics.");
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].priority, Priority::Important);
}

#[tokio::test]
async fn cached_ai_result_keeps_its_method_label() {
    let snapshot = PageExtractor::extract("https://atelier-brive.fr/", HEALTHY_PAGE);
    let cache = Arc::new(MemoryCacheStore::new());
    let engine = engine_with(cache).with_ai(Arc::new(CannedAnalyzer));

    engine.audit(&snapshot, &AuditOptions { force_refresh: false, use_ai: true }).await;
    // Second call without the AI flag still returns the cached AI result.
    let cached = engine.audit(&snapshot, &AuditOptions::default()).await;
    assert_eq!(cached.analysis_method, AnalysisMethod::Ai);
}
