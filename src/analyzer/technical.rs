//! Technical fingerprinting: CMS, cache/CDN layers, front-end stack and
//! Core Web Vitals classification.
//!
//! Everything here is best-effort. A signature that does not match simply
//! leaves the field empty; no detector in this module can fail an audit.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{
    CacheFinding, CmsFinding, CoreWebVitalsFinding, PageSnapshot, TechnologiesFinding,
    TechnicalInfo, VitalRating,
};

// Core Web Vitals rating thresholds, milliseconds except CLS.
const LCP_GOOD_MS: f64 = 2500.0;
const LCP_POOR_MS: f64 = 4000.0;
const FCP_GOOD_MS: f64 = 1800.0;
const FCP_POOR_MS: f64 = 3000.0;
const CLS_GOOD: f64 = 0.1;
const CLS_POOR: f64 = 0.25;
const TTFB_GOOD_MS: f64 = 800.0;
const TTFB_POOR_MS: f64 = 1800.0;

struct CmsSignature {
    name: &'static str,
    /// Any of these substrings in a script src or link href marks the CMS.
    markers: &'static [&'static str],
    /// Substring expected in the generator meta, if that is how it announces.
    generator: Option<&'static str>,
}

const CMS_SIGNATURES: [CmsSignature; 7] = [
    CmsSignature {
        name: "WordPress",
        markers: &["/wp-content/", "/wp-includes/"],
        generator: Some("wordpress"),
    },
    CmsSignature {
        name: "Shopify",
        markers: &["cdn.shopify.com", "shopify.com/s/"],
        generator: Some("shopify"),
    },
    CmsSignature {
        name: "Wix",
        markers: &["static.parastorage.com", "wixstatic.com"],
        generator: Some("wix"),
    },
    CmsSignature {
        name: "Squarespace",
        markers: &["squarespace-cdn.com", "static1.squarespace.com"],
        generator: Some("squarespace"),
    },
    CmsSignature {
        name: "Drupal",
        markers: &["/sites/default/files/", "drupal.js"],
        generator: Some("drupal"),
    },
    CmsSignature {
        name: "Joomla",
        markers: &["/media/jui/", "/components/com_"],
        generator: Some("joomla"),
    },
    CmsSignature {
        name: "Webflow",
        markers: &["assets.website-files.com", "webflow.js"],
        generator: Some("webflow"),
    },
];

/// (label, marker) pairs matched against script sources and inline bodies.
const CACHE_SIGNATURES: [(&str, &str); 4] = [
    ("WP Rocket", "wp-rocket"),
    ("LiteSpeed Cache", "litespeed"),
    ("W3 Total Cache", "w3-total-cache"),
    ("WP Super Cache", "wp-super-cache"),
];

const CDN_SIGNATURES: [(&str, &str); 5] = [
    ("Cloudflare", "cloudflare"),
    ("Fastly", "fastly"),
    ("Akamai", "akamai"),
    ("Amazon CloudFront", "cloudfront.net"),
    ("jsDelivr", "jsdelivr.net"),
];

const FRAMEWORK_SIGNATURES: [(&str, &str); 5] = [
    ("Next.js", "/_next/"),
    ("Nuxt", "/_nuxt/"),
    ("React", "react"),
    ("Vue.js", "vue"),
    ("Angular", "angular"),
];

const LIBRARY_SIGNATURES: [(&str, &str); 4] = [
    ("jQuery", "jquery"),
    ("Bootstrap", "bootstrap"),
    ("GSAP", "gsap"),
    ("Swiper", "swiper"),
];

fn wordpress_version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)wordpress\s+([\d.]+)").unwrap())
}

/// Run the whole technical family against one snapshot.
pub fn analyze(snapshot: &PageSnapshot) -> TechnicalInfo {
    TechnicalInfo {
        cms: detect_cms(snapshot),
        cache: detect_cache(snapshot),
        technologies: detect_technologies(snapshot),
        core_web_vitals: classify_vitals(snapshot),
    }
}

pub fn detect_cms(snapshot: &PageSnapshot) -> CmsFinding {
    let generator = snapshot.meta("generator").unwrap_or_default().to_lowercase();
    let haystacks = script_haystacks(snapshot);

    for sig in &CMS_SIGNATURES {
        let by_generator =
            sig.generator.map(|g| !generator.is_empty() && generator.contains(g)).unwrap_or(false);
        let by_marker =
            haystacks.iter().any(|h| sig.markers.iter().any(|m| h.contains(m)));

        if by_generator || by_marker {
            let version = if sig.name == "WordPress" {
                snapshot.meta("generator").and_then(|g| {
                    wordpress_version_re().captures(g).map(|c| c[1].to_string())
                })
            } else {
                None
            };
            return CmsFinding { detected: true, name: Some(sig.name.to_string()), version };
        }
    }

    CmsFinding::default()
}

pub fn detect_cache(snapshot: &PageSnapshot) -> CacheFinding {
    let haystacks = script_haystacks(snapshot);
    let matches = |marker: &str| haystacks.iter().any(|h| h.contains(marker));

    CacheFinding {
        detected: CACHE_SIGNATURES
            .iter()
            .filter(|(_, m)| matches(m))
            .map(|(name, _)| name.to_string())
            .collect(),
        cdn: CDN_SIGNATURES
            .iter()
            .filter(|(_, m)| matches(m))
            .map(|(name, _)| name.to_string())
            .collect(),
    }
}

pub fn detect_technologies(snapshot: &PageSnapshot) -> TechnologiesFinding {
    // Only script sources here; marker words like "react" are too short to
    // trust inside arbitrary inline code.
    let sources: Vec<String> =
        snapshot.scripts.iter().map(|s| s.src.to_lowercase()).filter(|s| !s.is_empty()).collect();
    let matches = |marker: &str| sources.iter().any(|s| s.contains(marker));

    TechnologiesFinding {
        frameworks: FRAMEWORK_SIGNATURES
            .iter()
            .filter(|(_, m)| matches(m))
            .map(|(name, _)| name.to_string())
            .collect(),
        libraries: LIBRARY_SIGNATURES
            .iter()
            .filter(|(_, m)| matches(m))
            .map(|(name, _)| name.to_string())
            .collect(),
    }
}

pub fn classify_vitals(snapshot: &PageSnapshot) -> CoreWebVitalsFinding {
    let Some(perf) = snapshot.performance else {
        return CoreWebVitalsFinding::default();
    };

    CoreWebVitalsFinding {
        available: true,
        fcp_ms: perf.fcp_ms,
        lcp_ms: perf.lcp_ms,
        cls: perf.cls,
        ttfb_ms: perf.ttfb_ms,
        fcp_rating: perf.fcp_ms.map(|v| rate(v, FCP_GOOD_MS, FCP_POOR_MS)),
        lcp_rating: perf.lcp_ms.map(|v| rate(v, LCP_GOOD_MS, LCP_POOR_MS)),
        cls_rating: perf.cls.map(|v| rate(v, CLS_GOOD, CLS_POOR)),
        ttfb_rating: perf.ttfb_ms.map(|v| rate(v, TTFB_GOOD_MS, TTFB_POOR_MS)),
    }
}

fn rate(value: f64, good: f64, poor: f64) -> VitalRating {
    if value < good {
        VitalRating::Good
    } else if value < poor {
        VitalRating::NeedsImprovement
    } else {
        VitalRating::Poor
    }
}

/// Lowercased script sources, inline bodies and image sources, the corpus
/// every signature substring is matched against.
fn script_haystacks(snapshot: &PageSnapshot) -> Vec<String> {
    let mut haystacks: Vec<String> = snapshot
        .scripts
        .iter()
        .flat_map(|s| [s.src.to_lowercase(), s.inline_text.to_lowercase()])
        .filter(|h| !h.is_empty())
        .collect();
    haystacks.extend(snapshot.images.iter().map(|i| i.src.to_lowercase()));
    if let Some(canonical) = &snapshot.canonical_href {
        haystacks.push(canonical.to_lowercase());
    }
    haystacks
}
