//! Marketing detectors: tag/pixel presence, CTA inventory, social profile
//! links and lead-capture forms.

use std::collections::HashSet;

use crate::domain::{
    CtaFinding, FormsFinding, MarketingFindings, PageSnapshot, SocialLinksFinding, SocialPlatform,
};

use super::vendors;

/// Class-name fragments associated with button frameworks.
const CTA_CLASS_MARKERS: [&str; 7] = [
    "btn",
    "button",
    "cta",
    "call-to-action",
    "wp-block-button",
    "elementor-button",
    "et_pb_button",
];

/// Pure navigational labels (localized) that are never conversion CTAs.
const NAV_WORDS: [&str; 10] = [
    "previous", "next", "close", "menu", "back",
    "précédent", "suivant", "fermer", "retour", "accueil",
];

const CTA_MAX_TEXT_LEN: usize = 100;
const CTA_EXAMPLE_LIMIT: usize = 5;

/// Fixed social platform table: display name plus host fragments matched
/// against the absolute link URL.
const SOCIAL_PLATFORMS: [(&str, &[&str]); 6] = [
    ("LinkedIn", &["linkedin.com"]),
    ("Twitter/X", &["twitter.com", "x.com"]),
    ("Facebook", &["facebook.com"]),
    ("Instagram", &["instagram.com"]),
    ("YouTube", &["youtube.com", "youtu.be"]),
    ("TikTok", &["tiktok.com"]),
];

/// Run the whole marketing family against one snapshot.
pub fn analyze(snapshot: &PageSnapshot) -> MarketingFindings {
    MarketingFindings {
        tags: vendors::detect_all(&snapshot.scripts),
        cta: detect_cta(snapshot),
        social: detect_social_links(snapshot),
        forms: detect_forms(snapshot),
    }
}

/// CTA detection: union of native interactive elements, class-allowlisted
/// elements, and anchors whose computed style reads as a visual button.
/// Candidates are deduplicated by trimmed visible text.
pub fn detect_cta(snapshot: &PageSnapshot) -> CtaFinding {
    let mut seen: HashSet<String> = HashSet::new();
    let mut examples = Vec::new();
    let mut count = 0usize;

    let mut admit = |text: &str| {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.chars().count() > CTA_MAX_TEXT_LEN {
            return;
        }
        let key = trimmed.to_lowercase();
        if NAV_WORDS.contains(&key.as_str()) {
            return;
        }
        if seen.insert(key) {
            count += 1;
            if examples.len() < CTA_EXAMPLE_LIMIT {
                examples.push(trimmed.to_string());
            }
        }
    };

    // Native interactive elements: <button> and submit/button inputs.
    for button in &snapshot.buttons {
        admit(&button.text);
    }

    for link in &snapshot.links {
        let by_class = has_cta_class(&link.class_name);
        let by_style = link
            .style
            .as_ref()
            .map(|s| {
                s.has_visible_background()
                    && s.padding_px > 0.0
                    && (s.border_radius_px > 0.0
                        || matches!(s.display.as_str(), "block" | "inline-block" | "flex"))
            })
            .unwrap_or(false);
        if by_class || by_style {
            admit(&link.text);
        }
    }

    let recommendation = match count {
        0 => "No call-to-action found; add at least one clear primary CTA.".to_string(),
        1 => "Only one CTA; add a secondary action for visitors not ready to convert.".to_string(),
        2..=3 => format!("{} CTAs found; a solid base, check their above-the-fold placement.", count),
        _ => format!("{} CTAs found; make sure one clearly dominates the page.", count),
    };

    CtaFinding { count, examples, recommendation }
}

fn has_cta_class(class_name: &str) -> bool {
    let lower = class_name.to_lowercase();
    CTA_CLASS_MARKERS.iter().any(|m| lower.contains(m))
}

pub fn detect_social_links(snapshot: &PageSnapshot) -> SocialLinksFinding {
    let platforms: Vec<SocialPlatform> = SOCIAL_PLATFORMS
        .iter()
        .map(|(name, hosts)| {
            let count = snapshot
                .links
                .iter()
                .filter(|link| {
                    let href = link.href.to_lowercase();
                    hosts.iter().any(|h| href.contains(h)) && !is_tracking_endpoint(&href)
                })
                .count();
            SocialPlatform { name: name.to_string(), found: count > 0, count }
        })
        .collect();

    let total_found = platforms.iter().filter(|p| p.found).count();

    let recommendation = if total_found == 0 {
        "No social profile links found; link your profiles in the footer.".to_string()
    } else {
        format!("{} social platform(s) linked.", total_found)
    };

    SocialLinksFinding { platforms, total_found, recommendation }
}

/// Tracking pixel endpoints share a domain with the social platform but are
/// not profile links (e.g. facebook.com/tr).
fn is_tracking_endpoint(href: &str) -> bool {
    href.contains("facebook.com/tr")
}

pub fn detect_forms(snapshot: &PageSnapshot) -> FormsFinding {
    let count = snapshot.forms.len();
    let total_fields = snapshot.forms.iter().map(|f| f.field_count).sum();
    let with_submit = snapshot.forms.iter().filter(|f| f.has_submit).count();

    let recommendation = if count == 0 {
        "No forms on the page; add a contact or signup form to capture leads.".to_string()
    } else {
        format!("{} form(s) with {} field(s) total.", count, total_fields)
    };

    FormsFinding { count, total_fields, with_submit, recommendation }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComputedStyle, LinkNode, PageSnapshot, Vendor};

    #[test]
    fn cta_deduplicates_by_trimmed_text() {
        let snap = PageSnapshot::builder("https://example.com")
            .button("S'inscrire")
            .button("  S'inscrire ")
            .build();
        let finding = detect_cta(&snap);
        assert_eq!(finding.count, 1);
        assert_eq!(finding.examples, vec!["S'inscrire".to_string()]);
    }

    #[test]
    fn cta_discards_empty_long_and_navigational_text() {
        let snap = PageSnapshot::builder("https://example.com")
            .button("")
            .button("Menu")
            .button("Suivant")
            .button("x".repeat(101))
            .button("Request a demo")
            .build();
        assert_eq!(detect_cta(&snap).count, 1);
    }

    #[test]
    fn cta_accepts_class_allowlisted_anchors() {
        let snap = PageSnapshot::builder("https://example.com")
            .link(LinkNode {
                href: "/signup".into(),
                text: "Start free trial".into(),
                class_name: "btn btn-primary".into(),
                ..Default::default()
            })
            .link(LinkNode {
                href: "/about".into(),
                text: "About us".into(),
                ..Default::default()
            })
            .build();
        assert_eq!(detect_cta(&snap).count, 1);
    }

    #[test]
    fn cta_accepts_visually_styled_anchors() {
        let styled = LinkNode {
            href: "/buy".into(),
            text: "Buy now".into(),
            style: Some(ComputedStyle {
                background_color: "rgb(220, 38, 38)".into(),
                padding_px: 12.0,
                border_radius_px: 6.0,
                display: "inline-block".into(),
            }),
            ..Default::default()
        };
        let flat = LinkNode {
            href: "/terms".into(),
            text: "Terms".into(),
            style: Some(ComputedStyle {
                background_color: "transparent".into(),
                padding_px: 0.0,
                border_radius_px: 0.0,
                display: "inline".into(),
            }),
            ..Default::default()
        };
        let snap = PageSnapshot::builder("https://example.com").link(styled).link(flat).build();
        assert_eq!(detect_cta(&snap).count, 1);
    }

    #[test]
    fn social_counts_platforms_not_links() {
        let snap = PageSnapshot::builder("https://example.com")
            .simple_link("https://www.linkedin.com/company/acme", "LinkedIn")
            .simple_link("https://www.linkedin.com/company/acme/jobs", "Jobs")
            .simple_link("https://x.com/acme", "X")
            .build();
        let finding = detect_social_links(&snap);
        assert_eq!(finding.total_found, 2);

        let linkedin = finding.platforms.iter().find(|p| p.name == "LinkedIn").unwrap();
        assert_eq!(linkedin.count, 2);
    }

    #[test]
    fn facebook_tracking_pixel_is_not_a_profile_link() {
        let snap = PageSnapshot::builder("https://example.com")
            .simple_link("https://www.facebook.com/tr?id=123&ev=PageView", "")
            .build();
        let finding = detect_social_links(&snap);
        assert_eq!(finding.total_found, 0);
    }

    #[test]
    fn vendor_tags_run_against_snapshot_scripts() {
        let snap = PageSnapshot::builder("https://example.com")
            .script_src("https://www.googletagmanager.com/gtag/js?id=G-ABCD1234")
            .build();
        let findings = analyze(&snap);
        assert!(findings.detected(Vendor::Ga4));
        assert!(!findings.detected(Vendor::Gtm));
    }

    #[test]
    fn forms_summary_counts_fields_and_submits() {
        let snap = PageSnapshot::builder("https://example.com")
            .form(3, true)
            .form(1, false)
            .build();
        let finding = detect_forms(&snap);
        assert_eq!(finding.count, 2);
        assert_eq!(finding.total_fields, 4);
        assert_eq!(finding.with_submit, 1);
    }
}
