//! UX detectors: viewport, content volume, link health, accessibility and
//! semantic structure.

use url::Url;

use crate::domain::{
    AccessibilityFinding, LinkNode, LinksFinding, PageSnapshot, PerformanceFinding,
    SemanticsFinding, UxFindings, ViewportFinding, WordCountFinding,
};

/// Reading speed used for the reading-time estimate, words per minute.
const READING_WPM: usize = 200;

/// Class-name keywords that mark a link as a menu/dropdown control.
const MENU_KEYWORDS: [&str; 6] = ["menu", "nav", "dropdown", "submenu", "toggle", "expand"];

/// Run the whole UX family against one snapshot.
pub fn analyze(snapshot: &PageSnapshot) -> UxFindings {
    UxFindings {
        viewport: detect_viewport(snapshot),
        word_count: detect_word_count(snapshot),
        links: detect_links(snapshot),
        accessibility: detect_accessibility(snapshot),
        semantics: detect_semantics(snapshot),
        performance: detect_performance(snapshot),
    }
}

pub fn detect_viewport(snapshot: &PageSnapshot) -> ViewportFinding {
    let content = snapshot.meta("viewport").unwrap_or_default().to_string();
    let exists = !content.is_empty();
    let is_valid = content.contains("width=device-width");

    let recommendation = if !exists {
        "Add a viewport meta tag; the page will not render correctly on mobile.".to_string()
    } else if !is_valid {
        "Viewport is missing width=device-width.".to_string()
    } else {
        "Viewport is properly configured.".to_string()
    };

    ViewportFinding { exists, content, is_valid, recommendation }
}

pub fn detect_word_count(snapshot: &PageSnapshot) -> WordCountFinding {
    let words = snapshot.body_text.split_whitespace().count();
    let reading_time_min = words.div_ceil(READING_WPM);

    let recommendation = if words < 300 {
        format!("Only {} words of visible text; thin content ranks poorly.", words)
    } else {
        format!("{} words, about {} min of reading.", words, reading_time_min)
    };

    WordCountFinding { words, reading_time_min, recommendation }
}

pub fn detect_links(snapshot: &PageSnapshot) -> LinksFinding {
    let base = Url::parse(&snapshot.url).ok();
    let base_host = base.as_ref().and_then(|u| u.host_str()).map(str::to_string);

    let mut internal = 0;
    let mut external = 0;
    let mut nofollow = 0;
    let mut broken = 0;
    let mut broken_examples = Vec::new();

    for link in &snapshot.links {
        let href = link.href.trim();

        if is_broken_href(href, link) {
            broken += 1;
            if broken_examples.len() < 3 {
                let label = if link.text.is_empty() { "(no text)" } else { link.text.as_str() };
                broken_examples.push(label.chars().take(30).collect());
            }
            continue;
        }

        if link.rel.as_deref().map(|r| r.contains("nofollow")).unwrap_or(false) {
            nofollow += 1;
        }

        // Relative paths resolve against the page URL, so they land on the
        // same host and count as internal.
        match base.as_ref().and_then(|b| b.join(href).ok()) {
            Some(resolved) if matches!(resolved.scheme(), "http" | "https") => {
                let same_host = resolved.host_str().map(str::to_string) == base_host;
                if same_host {
                    internal += 1;
                } else {
                    external += 1;
                }
            }
            _ => {}
        }
    }

    let total = snapshot.links.len();
    let recommendation = if total == 0 {
        "No links on the page.".to_string()
    } else if broken == 0 {
        format!("{} links, none broken.", total)
    } else {
        format!("{} of {} links are broken or empty.", broken, total)
    };

    LinksFinding { total, internal, external, nofollow, broken, broken_examples, recommendation }
}

fn is_broken_href(href: &str, link: &LinkNode) -> bool {
    match href {
        "" | "javascript:void(0)" | "javascript:;" => true,
        // A bare "#" is broken unless the link is a legitimate menu control.
        "#" => !is_menu_control(link),
        _ => false,
    }
}

/// Legitimacy test for `#` links, first match wins:
/// nav ancestor, menu-keyword class, popup ARIA, onclick handler, or
/// menu-keyword parent class.
fn is_menu_control(link: &LinkNode) -> bool {
    if link.in_nav_ancestor {
        return true;
    }
    if contains_menu_keyword(&link.class_name) {
        return true;
    }
    if link.has_popup_aria {
        return true;
    }
    if link.has_onclick {
        return true;
    }
    contains_menu_keyword(&link.parent_class_name)
}

fn contains_menu_keyword(class_name: &str) -> bool {
    let lower = class_name.to_lowercase();
    MENU_KEYWORDS.iter().any(|k| lower.contains(k))
}

pub fn detect_accessibility(snapshot: &PageSnapshot) -> AccessibilityFinding {
    let mut score: u8 = 0;
    let mut issues = Vec::new();

    // Five independent checks, 20 points each.
    if snapshot.html_lang.as_deref().map(|l| !l.is_empty()).unwrap_or(false) {
        score += 20;
    } else {
        issues.push("The <html> element has no lang attribute.".to_string());
    }

    if snapshot.inputs.iter().all(|i| i.has_label) {
        score += 20;
    } else {
        let unlabeled = snapshot.inputs.iter().filter(|i| !i.has_label).count();
        issues.push(format!("{} form field(s) have no label or aria-label.", unlabeled));
    }

    // Contrast is not computed from a static capture; always credited.
    score += 20;

    if snapshot.aria_element_count > 5 {
        score += 20;
    } else if snapshot.aria_element_count >= 1 {
        score += 10;
        issues.push("Limited ARIA usage; enrich interactive elements with ARIA attributes.".to_string());
    } else {
        issues.push("No ARIA attributes found on the page.".to_string());
    }

    let buttons_labeled = snapshot.buttons.iter().all(|b| {
        !b.text.trim().is_empty()
            || b.aria_label.as_deref().map(|l| !l.trim().is_empty()).unwrap_or(false)
    });
    if buttons_labeled {
        score += 20;
    } else {
        issues.push("Some buttons have neither visible text nor an aria-label.".to_string());
    }

    let recommendation = if issues.is_empty() {
        "No accessibility issues detected by the static checks.".to_string()
    } else {
        format!("{} accessibility issue(s) to address.", issues.len())
    };

    AccessibilityFinding { score, issues, recommendation }
}

pub fn detect_semantics(snapshot: &PageSnapshot) -> SemanticsFinding {
    let total = snapshot.sectioning.total();
    let used: Vec<String> = snapshot.sectioning.used().iter().map(|s| s.to_string()).collect();

    let recommendation = if total == 0 {
        "No HTML5 sectioning elements; replace generic <div>s with semantic tags.".to_string()
    } else {
        format!("Semantic structure uses {}.", used.join(", "))
    };

    SemanticsFinding { total, used, recommendation }
}

pub fn detect_performance(snapshot: &PageSnapshot) -> PerformanceFinding {
    let total_images = snapshot.images.len();
    let lazy_images = snapshot.images.iter().filter(|i| i.lazy_loading).count();
    let lazy_percentage = if total_images > 0 {
        ((lazy_images as f64 / total_images as f64) * 100.0).round() as u8
    } else {
        0
    };

    let recommendation = if total_images == 0 {
        "No images to lazy-load.".to_string()
    } else if lazy_percentage >= 50 {
        format!("{}% of images are lazy-loaded.", lazy_percentage)
    } else {
        format!(
            "Only {} of {} images use loading=\"lazy\"; defer below-the-fold images.",
            lazy_images, total_images
        )
    };

    PerformanceFinding { total_images, lazy_images, lazy_percentage, recommendation }
}
