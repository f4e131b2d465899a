//! Data-driven marketing vendor patterns.
//!
//! Tag and pixel detection is inherently heuristic string matching, so the
//! table is the unit under test rather than the dispatch logic. Markers are
//! lowercase and matched case-insensitively against script sources and inline
//! bodies; id patterns run over the original text so vendor-cased ids like
//! `GTM-ABC123` survive.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::{ScriptNode, TagFinding, Vendor};

pub struct VendorPattern {
    pub vendor: Vendor,
    pub label: &'static str,
    /// Lowercase substrings matched against `src` and inline script text.
    pub markers: &'static [&'static str],
    /// Optional id-extraction regex; group 1 when present, whole match
    /// otherwise. Extraction failure only omits the id.
    pub id_pattern: Option<&'static str>,
}

pub const VENDOR_TABLE: &[VendorPattern] = &[
    VendorPattern {
        vendor: Vendor::Ga4,
        label: "Google Analytics 4",
        markers: &["googletagmanager.com/gtag/js", "gtag("],
        id_pattern: Some(r"G-[A-Z0-9]{6,12}"),
    },
    VendorPattern {
        vendor: Vendor::Gtm,
        label: "Google Tag Manager",
        markers: &["googletagmanager.com/gtm.js", "gtm-"],
        id_pattern: Some(r"GTM-[A-Z0-9]{4,10}"),
    },
    VendorPattern {
        vendor: Vendor::MetaPixel,
        label: "Meta Pixel",
        markers: &["fbq(", "facebook.com/tr", "connect.facebook.net"],
        id_pattern: Some(r"fbq\(\s*'init'\s*,\s*'(\d{5,20})'"),
    },
    VendorPattern {
        vendor: Vendor::LinkedInInsight,
        label: "LinkedIn Insight",
        markers: &["snap.licdn.com", "_linkedin_partner_id"],
        id_pattern: None,
    },
    VendorPattern {
        vendor: Vendor::TikTokPixel,
        label: "TikTok Pixel",
        markers: &["analytics.tiktok.com", "ttq.load"],
        id_pattern: None,
    },
    VendorPattern {
        vendor: Vendor::Hotjar,
        label: "Hotjar",
        markers: &["static.hotjar.com", "hotjar"],
        id_pattern: None,
    },
    VendorPattern {
        vendor: Vendor::Clarity,
        label: "Microsoft Clarity",
        markers: &["clarity.ms", "clarity("],
        id_pattern: None,
    },
    VendorPattern {
        vendor: Vendor::Intercom,
        label: "Intercom",
        markers: &["widget.intercom.io", "intercomsettings"],
        id_pattern: None,
    },
    VendorPattern {
        vendor: Vendor::Drift,
        label: "Drift",
        markers: &["js.driftt.com", "drift.load"],
        id_pattern: None,
    },
    VendorPattern {
        vendor: Vendor::HubSpot,
        label: "HubSpot",
        markers: &["js.hs-scripts.com", "js.hubspot.com", "hs-analytics"],
        id_pattern: None,
    },
];

struct CompiledVendor {
    pattern: &'static VendorPattern,
    id_regex: Option<Regex>,
}

fn compiled_table() -> &'static [CompiledVendor] {
    static TABLE: OnceLock<Vec<CompiledVendor>> = OnceLock::new();
    TABLE.get_or_init(|| {
        VENDOR_TABLE
            .iter()
            .map(|pattern| CompiledVendor {
                pattern,
                // Patterns are static and known-valid.
                id_regex: pattern.id_pattern.map(|p| Regex::new(p).unwrap()),
            })
            .collect()
    })
}

/// Detect every vendor against the page's scripts.
pub fn detect_all(scripts: &[ScriptNode]) -> Vec<TagFinding> {
    compiled_table().iter().map(|vendor| detect(vendor, scripts)).collect()
}

fn detect(vendor: &CompiledVendor, scripts: &[ScriptNode]) -> TagFinding {
    let mut detected = false;
    let mut id = None;

    for script in scripts {
        let src_lower = script.src.to_ascii_lowercase();
        let inline_lower = script.inline_text.to_ascii_lowercase();

        let matched = vendor
            .pattern
            .markers
            .iter()
            .any(|m| src_lower.contains(m) || inline_lower.contains(m));
        if !matched {
            continue;
        }
        detected = true;

        if id.is_none() {
            if let Some(regex) = &vendor.id_regex {
                id = extract_id(regex, &script.src).or_else(|| extract_id(regex, &script.inline_text));
            }
        }
    }

    TagFinding {
        vendor: vendor.pattern.vendor,
        label: vendor.pattern.label.to_string(),
        detected,
        id,
    }
}

fn extract_id(regex: &Regex, haystack: &str) -> Option<String> {
    let captures = regex.captures(haystack)?;
    captures
        .get(1)
        .or_else(|| captures.get(0))
        .map(|m| m.as_str().to_string())
}
