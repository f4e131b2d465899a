//! Pillar scorers: fixed additive weights over the typed findings.
//!
//! Each scorer is a pure function of its findings family, independent of the
//! other pillars. The same findings always produce the same score.

use crate::domain::{CanonicalStatus, MarketingFindings, SeoFindings, UxFindings, Vendor};

/// Vendor point values for the tag portion of the marketing score. Intercom
/// and Drift are detected for reporting but carry no points.
const VENDOR_POINTS: [(Vendor, i32); 8] = [
    (Vendor::Ga4, 15),
    (Vendor::Gtm, 15),
    (Vendor::MetaPixel, 10),
    (Vendor::HubSpot, 5),
    (Vendor::LinkedInInsight, 5),
    (Vendor::Hotjar, 4),
    (Vendor::TikTokPixel, 3),
    (Vendor::Clarity, 3),
];

/// SEO pillar score, 0..=100. The robots penalty is the only negative weight;
/// the clamp keeps a pathological page at 0 rather than below.
pub fn seo_score(findings: &SeoFindings) -> u8 {
    let mut score: i32 = 0;

    score += if findings.title.is_optimal {
        20
    } else if findings.title.exists {
        10
    } else {
        0
    };

    score += if findings.meta_description.is_optimal {
        15
    } else if findings.meta_description.exists {
        8
    } else {
        0
    };

    score += match findings.h1.count {
        1 => 15,
        0 => 0,
        _ => 8,
    };

    score += if findings.headings.is_valid {
        15
    } else if findings.h1.count >= 1 {
        7
    } else {
        0
    };

    score += if findings.images.total > 0 && findings.images.without_alt == 0 {
        10
    } else if findings.images.percentage <= 25 {
        7
    } else if findings.images.percentage <= 50 {
        3
    } else {
        0
    };

    if findings.canonical.status == CanonicalStatus::Valid {
        score += 5;
    }

    if findings.schema.detected {
        score += 10;
    }

    score += if findings.open_graph.complete {
        5
    } else if findings.open_graph.detected {
        2
    } else {
        0
    };

    score += if findings.robots.is_blocking { -10 } else { 5 };

    score.clamp(0, 100) as u8
}

/// Marketing pillar score, 0..=100. Tags contribute up to 60 points, CTAs up
/// to 20, social profiles and forms up to 10 each.
pub fn marketing_score(findings: &MarketingFindings) -> u8 {
    let mut score: i32 = 0;

    for (vendor, points) in VENDOR_POINTS {
        if findings.detected(vendor) {
            score += points;
        }
    }

    score += match findings.cta.count {
        n if n >= 5 => 20,
        n if n >= 3 => 15,
        n if n >= 1 => 10,
        _ => 0,
    };

    score += match findings.social.total_found {
        n if n >= 4 => 10,
        3 => 7,
        2 => 5,
        1 => 3,
        _ => 0,
    };

    score += match findings.forms.count {
        n if n >= 2 => 10,
        1 => 7,
        _ => 0,
    };

    score.clamp(0, 100) as u8
}

/// UX pillar score, 0..=100. Accessibility chips in a fifth of its own
/// 0..=100 scale.
pub fn ux_score(findings: &UxFindings) -> u8 {
    let mut score: i32 = 0;

    if findings.viewport.exists {
        score += 20;
    }

    score += match findings.word_count.words {
        n if n >= 500 => 20,
        n if n >= 300 => 15,
        n if n >= 100 => 10,
        n if n >= 50 => 5,
        _ => 0,
    };

    if findings.links.total > 0 {
        score += 10;
        let broken_pct = findings.links.broken as f64 / findings.links.total as f64 * 100.0;
        score += if findings.links.broken == 0 {
            10
        } else if broken_pct <= 5.0 {
            7
        } else if broken_pct <= 10.0 {
            5
        } else if broken_pct <= 20.0 {
            2
        } else {
            0
        };
    }

    score += (findings.accessibility.score as f64 * 0.2).round() as i32;

    if findings.performance.total_images > 0 {
        score += match findings.performance.lazy_percentage {
            p if p >= 50 => 10,
            p if p >= 25 => 5,
            _ => 0,
        };
    }

    score += match findings.semantics.total {
        n if n >= 5 => 10,
        n if n >= 3 => 7,
        n if n >= 1 => 3,
        _ => 0,
    };

    score.clamp(0, 100) as u8
}

/// Weighted global score: SEO 40%, marketing 30%, UX 30%, rounded.
pub fn global_score(seo: u8, marketing: u8, ux: u8) -> u8 {
    (seo as f64 * 0.4 + marketing as f64 * 0.3 + ux as f64 * 0.3).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{marketing, seo, ux};
    use crate::domain::{LinkNode, PageSnapshot, SectioningCounts};

    fn seo_findings(snapshot: &PageSnapshot) -> SeoFindings {
        seo::analyze(snapshot)
    }

    #[test]
    fn strong_page_reaches_full_seo_score() {
        let snap = PageSnapshot::builder("https://example.com")
            .title("A descriptive page title that sits inside the optimal band")
            .meta(
                "description",
                "A meta description long enough to land inside the optimal band, \
                 describing the page content for search result snippets in detail.",
            )
            .meta("og:title", "T")
            .meta("og:description", "D")
            .meta("og:image", "https://example.com/i.png")
            .meta("og:url", "https://example.com")
            .meta("og:type", "website")
            .heading(1, "Main")
            .heading(2, "Sub")
            .image("a.jpg", Some("alt"))
            .canonical("https://example.com/")
            .structured_data(serde_json::json!({"@type": "WebPage"}))
            .build();
        assert_eq!(seo_score(&seo_findings(&snap)), 100);
    }

    #[test]
    fn robots_penalty_clamps_at_zero() {
        let snap = PageSnapshot::builder("https://example.com")
            .meta("robots", "noindex, nofollow")
            .build();
        // Everything else fails too, so the -10 would go negative.
        assert_eq!(seo_score(&seo_findings(&snap)), 0);
    }

    #[test]
    fn suboptimal_title_gets_partial_credit() {
        let short = PageSnapshot::builder("https://example.com").title("Short").build();
        let none = PageSnapshot::builder("https://example.com").build();
        let with_title = seo_score(&seo_findings(&short));
        let without_title = seo_score(&seo_findings(&none));
        assert_eq!(with_title - without_title, 10);
    }

    #[test]
    fn full_marketing_stack_reaches_100() {
        let snap = PageSnapshot::builder("https://example.com")
            .script_src("https://www.googletagmanager.com/gtag/js?id=G-ABC123XYZ")
            .script_src("https://www.googletagmanager.com/gtm.js?id=GTM-ABCD12")
            .script_src("https://connect.facebook.net/en_US/fbevents.js")
            .script_src("https://js.hs-scripts.com/123.js")
            .script_src("https://snap.licdn.com/li.lms-analytics/insight.min.js")
            .script_src("https://static.hotjar.com/c/hotjar-1.js")
            .script_src("https://analytics.tiktok.com/i18n/pixel/events.js")
            .script_src("https://www.clarity.ms/tag/abc")
            .simple_link("https://linkedin.com/company/x", "LinkedIn")
            .simple_link("https://twitter.com/x", "Twitter")
            .simple_link("https://facebook.com/x", "Facebook")
            .simple_link("https://instagram.com/x", "Instagram")
            .button("Get started")
            .button("Request a demo")
            .button("Contact sales")
            .button("Download the guide")
            .button("Subscribe now")
            .form(3, true)
            .form(2, true)
            .build();
        assert_eq!(marketing_score(&marketing::analyze(&snap)), 100);
    }

    #[test]
    fn marketing_cta_buckets() {
        let one = PageSnapshot::builder("https://example.com").button("Sign up").build();
        assert_eq!(marketing_score(&marketing::analyze(&one)), 10);

        let three = PageSnapshot::builder("https://example.com")
            .button("Sign up")
            .button("Try free")
            .button("Book a call")
            .build();
        assert_eq!(marketing_score(&marketing::analyze(&three)), 15);
    }

    #[test]
    fn full_ux_page_reaches_100() {
        let text = "word ".repeat(500);
        let mut builder = PageSnapshot::builder("https://example.com")
            .meta("viewport", "width=device-width, initial-scale=1")
            .body_text(text)
            .html_lang("en")
            .aria_elements(6)
            .button("Go")
            .sectioning(SectioningCounts {
                header: 1,
                nav: 1,
                main: 1,
                section: 1,
                footer: 1,
                ..Default::default()
            });
        for i in 0..4 {
            builder = builder.simple_link(format!("/p{}", i), "Page");
            builder = builder.image_node(crate::domain::ImageNode {
                src: format!("{}.jpg", i),
                has_alt_attribute: true,
                lazy_loading: true,
                ..Default::default()
            });
        }
        assert_eq!(ux_score(&ux::analyze(&builder.build())), 100);
    }

    #[test]
    fn broken_link_share_reduces_link_points() {
        let mut builder = PageSnapshot::builder("https://example.com");
        for i in 0..9 {
            builder = builder.simple_link(format!("/p{}", i), "Page");
        }
        builder = builder.link(LinkNode { href: "#".into(), text: "Dead".into(), ..Default::default() });
        let all = ux::analyze(&builder.build());
        // 10 links, 1 broken: base 10 plus the <=10% bucket.
        assert_eq!(all.links.broken, 1);
        let score = ux_score(&all);
        let clean: Vec<_> = (0..10).collect();
        let mut clean_builder = PageSnapshot::builder("https://example.com");
        for i in clean {
            clean_builder = clean_builder.simple_link(format!("/p{}", i), "Page");
        }
        let clean_score = ux_score(&ux::analyze(&clean_builder.build()));
        assert_eq!(clean_score - score, 5);
    }

    #[test]
    fn global_score_is_weighted_and_rounded() {
        assert_eq!(global_score(100, 100, 100), 100);
        assert_eq!(global_score(0, 0, 0), 0);
        // 80*0.4 + 70*0.3 + 60*0.3 = 71
        assert_eq!(global_score(80, 70, 60), 71);
        // 75*0.4 + 50*0.3 + 52*0.3 = 60.6 -> 61
        assert_eq!(global_score(75, 50, 52), 61);
    }
}
