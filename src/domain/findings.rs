//! Typed findings: one structured verdict per detector.
//!
//! Each finding carries the raw measured values, a derived status and a short
//! recommendation line. Findings are produced once per audit and never
//! mutated afterward; the scorers and the recommendation synthesizer only
//! read them.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEO FAMILY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleStatus {
    /// Missing or empty title.
    Critical,
    TooShort,
    Optimal,
    TooLong,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleFinding {
    pub exists: bool,
    pub content: String,
    pub length: usize,
    pub status: TitleStatus,
    pub is_optimal: bool,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaDescriptionStatus {
    Absent,
    TooShort,
    Optimal,
    TooLong,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaDescriptionFinding {
    pub exists: bool,
    pub content: String,
    pub length: usize,
    pub status: MetaDescriptionStatus,
    pub is_optimal: bool,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum H1Status {
    Missing,
    Unique,
    Multiple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct H1Finding {
    pub count: usize,
    pub is_unique: bool,
    pub contents: Vec<String>,
    pub status: H1Status,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingHierarchyFinding {
    pub total: usize,
    /// Level-jump and missing-H1 errors, e.g. "H2 → H4".
    pub errors: Vec<String>,
    pub is_valid: bool,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAltFinding {
    pub total: usize,
    /// Images with no `alt` attribute at all.
    pub without_alt: usize,
    /// Images with `alt=""`, acceptable for decorative content.
    pub decorative: usize,
    /// round(without_alt / total * 100), 0 when there are no images.
    pub percentage: u8,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalStatus {
    Absent,
    /// Present but not an absolute http(s) URL.
    Invalid,
    Valid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalFinding {
    pub exists: bool,
    pub href: String,
    pub status: CanonicalStatus,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFinding {
    pub detected: bool,
    /// Number of successfully parsed JSON-LD blocks.
    pub count: usize,
    /// Deduplicated `@type` values, `@graph` arrays flattened.
    pub types: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenGraphFinding {
    pub detected: bool,
    /// How many of the five canonical properties are present.
    pub present_count: usize,
    pub missing: Vec<String>,
    /// At least 4 of 5 canonical properties present.
    pub complete: bool,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotsFinding {
    pub exists: bool,
    pub content: String,
    /// True when the directive contains "noindex" or "nofollow". A warning
    /// condition that reduces the score, never an error.
    pub is_blocking: bool,
    pub recommendation: String,
}

/// All SEO-family findings for one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoFindings {
    pub title: TitleFinding,
    pub meta_description: MetaDescriptionFinding,
    pub h1: H1Finding,
    pub headings: HeadingHierarchyFinding,
    pub images: ImageAltFinding,
    pub canonical: CanonicalFinding,
    pub schema: SchemaFinding,
    pub open_graph: OpenGraphFinding,
    pub robots: RobotsFinding,
}

// ============================================================================
// MARKETING FAMILY
// ============================================================================

/// Marketing tag and pixel vendors detectable from script sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    Ga4,
    Gtm,
    MetaPixel,
    LinkedInInsight,
    TikTokPixel,
    Hotjar,
    Clarity,
    Intercom,
    Drift,
    HubSpot,
}

/// One vendor's presence verdict. The id is extracted opportunistically; a
/// failed extraction omits it without failing the detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagFinding {
    pub vendor: Vendor,
    pub label: String,
    pub detected: bool,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtaFinding {
    /// Size of the deduplicated CTA set.
    pub count: usize,
    /// Up to five example labels.
    pub examples: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialPlatform {
    pub name: String,
    pub found: bool,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLinksFinding {
    pub platforms: Vec<SocialPlatform>,
    /// Number of platforms with at least one profile link.
    pub total_found: usize,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsFinding {
    pub count: usize,
    pub total_fields: usize,
    pub with_submit: usize,
    pub recommendation: String,
}

/// All marketing-family findings for one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingFindings {
    pub tags: Vec<TagFinding>,
    pub cta: CtaFinding,
    pub social: SocialLinksFinding,
    pub forms: FormsFinding,
}

impl MarketingFindings {
    /// Whether a given vendor was detected.
    pub fn detected(&self, vendor: Vendor) -> bool {
        self.tags.iter().any(|t| t.vendor == vendor && t.detected)
    }

    pub fn tag(&self, vendor: Vendor) -> Option<&TagFinding> {
        self.tags.iter().find(|t| t.vendor == vendor)
    }
}

// ============================================================================
// UX FAMILY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportFinding {
    pub exists: bool,
    pub content: String,
    /// Requires `width=device-width` in the content string.
    pub is_valid: bool,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCountFinding {
    pub words: usize,
    /// ceil(words / 200) minutes.
    pub reading_time_min: usize,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksFinding {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
    pub nofollow: usize,
    pub broken: usize,
    pub broken_examples: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityFinding {
    /// Additive 0..=100 from the five independent checks.
    pub score: u8,
    pub issues: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticsFinding {
    pub total: usize,
    pub used: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceFinding {
    pub total_images: usize,
    pub lazy_images: usize,
    /// round(lazy_images / total_images * 100), 0 without images.
    pub lazy_percentage: u8,
    pub recommendation: String,
}

/// All UX-family findings for one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UxFindings {
    pub viewport: ViewportFinding,
    pub word_count: WordCountFinding,
    pub links: LinksFinding,
    pub accessibility: AccessibilityFinding,
    pub semantics: SemanticsFinding,
    pub performance: PerformanceFinding,
}

// ============================================================================
// TECHNICAL FAMILY
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CmsFinding {
    pub detected: bool,
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheFinding {
    /// Page-cache layers, e.g. "WP Rocket".
    pub detected: Vec<String>,
    /// CDN providers, e.g. "Cloudflare".
    pub cdn: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnologiesFinding {
    pub frameworks: Vec<String>,
    pub libraries: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalRating {
    Good,
    NeedsImprovement,
    Poor,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreWebVitalsFinding {
    pub available: bool,
    pub fcp_ms: Option<f64>,
    pub lcp_ms: Option<f64>,
    pub cls: Option<f64>,
    pub ttfb_ms: Option<f64>,
    pub fcp_rating: Option<VitalRating>,
    pub lcp_rating: Option<VitalRating>,
    pub cls_rating: Option<VitalRating>,
    pub ttfb_rating: Option<VitalRating>,
}
