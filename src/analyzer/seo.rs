//! SEO detectors: title, meta description, headings, images, canonical,
//! structured data, Open Graph and robots directives.
//!
//! Every detector is a pure, total function over the snapshot. Missing data
//! is a worst-case finding value, never an error.

use url::Url;

use crate::domain::{
    CanonicalFinding, CanonicalStatus, H1Finding, H1Status, HeadingHierarchyFinding,
    ImageAltFinding, MetaDescriptionFinding, MetaDescriptionStatus, OpenGraphFinding,
    PageSnapshot, RobotsFinding, SchemaFinding, SeoFindings, TitleFinding, TitleStatus,
};

/// Optimal title length band, inclusive on both ends.
pub const TITLE_MIN: usize = 30;
pub const TITLE_MAX: usize = 70;

/// Optimal meta description length band, inclusive on both ends.
pub const META_DESCRIPTION_MIN: usize = 120;
pub const META_DESCRIPTION_MAX: usize = 170;

const OPEN_GRAPH_PROPERTIES: [&str; 5] =
    ["og:title", "og:description", "og:image", "og:url", "og:type"];

/// Run the whole SEO family against one snapshot.
pub fn analyze(snapshot: &PageSnapshot) -> SeoFindings {
    SeoFindings {
        title: detect_title(snapshot),
        meta_description: detect_meta_description(snapshot),
        h1: detect_h1(snapshot),
        headings: detect_heading_hierarchy(snapshot),
        images: detect_image_alt(snapshot),
        canonical: detect_canonical(snapshot),
        schema: detect_schema(snapshot),
        open_graph: detect_open_graph(snapshot),
        robots: detect_robots(snapshot),
    }
}

pub fn detect_title(snapshot: &PageSnapshot) -> TitleFinding {
    let content = snapshot
        .title
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let length = content.chars().count();
    let exists = !content.is_empty();

    let status = if !exists {
        TitleStatus::Critical
    } else if length < TITLE_MIN {
        TitleStatus::TooShort
    } else if length > TITLE_MAX {
        TitleStatus::TooLong
    } else {
        TitleStatus::Optimal
    };

    let recommendation = match status {
        TitleStatus::Critical => "Add a <title> tag; pages without one are severely penalized.".into(),
        TitleStatus::TooShort => format!(
            "Title is {} characters; aim for {}-{} to fill the search snippet.",
            length, TITLE_MIN, TITLE_MAX
        ),
        TitleStatus::TooLong => format!(
            "Title is {} characters and will be truncated; keep it under {}.",
            length, TITLE_MAX
        ),
        TitleStatus::Optimal => format!("Title length is good ({} characters).", length),
    };

    TitleFinding {
        exists,
        content,
        length,
        status,
        is_optimal: status == TitleStatus::Optimal,
        recommendation,
    }
}

pub fn detect_meta_description(snapshot: &PageSnapshot) -> MetaDescriptionFinding {
    let content = snapshot.meta("description").unwrap_or_default().trim().to_string();
    let length = content.chars().count();
    let exists = !content.is_empty();

    let status = if !exists {
        MetaDescriptionStatus::Absent
    } else if length < META_DESCRIPTION_MIN {
        MetaDescriptionStatus::TooShort
    } else if length > META_DESCRIPTION_MAX {
        MetaDescriptionStatus::TooLong
    } else {
        MetaDescriptionStatus::Optimal
    };

    let recommendation = match status {
        MetaDescriptionStatus::Absent => {
            "Add a meta description; search engines otherwise pick an arbitrary excerpt.".into()
        }
        MetaDescriptionStatus::TooShort => format!(
            "Description is {} characters; expand towards {}-{} to use the full snippet.",
            length, META_DESCRIPTION_MIN, META_DESCRIPTION_MAX
        ),
        MetaDescriptionStatus::TooLong => format!(
            "Description is {} characters and will be cut off; keep it under {}.",
            length, META_DESCRIPTION_MAX
        ),
        MetaDescriptionStatus::Optimal => {
            format!("Description length is good ({} characters).", length)
        }
    };

    MetaDescriptionFinding {
        exists,
        content,
        length,
        status,
        is_optimal: status == MetaDescriptionStatus::Optimal,
        recommendation,
    }
}

pub fn detect_h1(snapshot: &PageSnapshot) -> H1Finding {
    let contents: Vec<String> = snapshot
        .headings
        .iter()
        .filter(|h| h.level == 1)
        .map(|h| h.text.clone())
        .collect();
    let count = contents.len();

    let (status, recommendation) = match count {
        0 => (H1Status::Missing, "Add exactly one H1 describing the page topic.".to_string()),
        1 => (H1Status::Unique, "H1 is unique.".to_string()),
        n => (
            H1Status::Multiple,
            format!("{} H1 headings found; keep a single H1 per page.", n),
        ),
    };

    H1Finding { count, is_unique: count == 1, contents, status, recommendation }
}

pub fn detect_heading_hierarchy(snapshot: &PageSnapshot) -> HeadingHierarchyFinding {
    let mut errors = Vec::new();
    let mut previous = 0u8;

    for heading in &snapshot.headings {
        if previous != 0 && heading.level > previous + 1 {
            errors.push(format!("H{} → H{}", previous, heading.level));
        }
        previous = heading.level;
    }

    if !snapshot.headings.iter().any(|h| h.level == 1) {
        errors.push("No H1 heading".to_string());
    }

    let total = snapshot.headings.len();
    let is_valid = errors.is_empty() && total > 0;

    let recommendation = if is_valid {
        format!("{} headings, hierarchy is consistent.", total)
    } else if total == 0 {
        "No headings found; structure the content with H1-H6.".to_string()
    } else {
        format!("Heading structure has {} issue(s): {}.", errors.len(), errors.join(", "))
    };

    HeadingHierarchyFinding { total, errors, is_valid, recommendation }
}

pub fn detect_image_alt(snapshot: &PageSnapshot) -> ImageAltFinding {
    let total = snapshot.images.len();
    // Missing attribute is a defect; present-but-empty alt marks decorative
    // images and is acceptable.
    let without_alt = snapshot.images.iter().filter(|i| !i.has_alt_attribute).count();
    let decorative = snapshot
        .images
        .iter()
        .filter(|i| i.has_alt_attribute && i.alt_text.is_empty())
        .count();

    let percentage = if total > 0 {
        ((without_alt as f64 / total as f64) * 100.0).round() as u8
    } else {
        0
    };

    let recommendation = if total == 0 {
        "No images on the page.".to_string()
    } else if without_alt == 0 {
        format!("All {} images carry an alt attribute.", total)
    } else {
        format!(
            "{} of {} images ({}%) are missing an alt attribute.",
            without_alt, total, percentage
        )
    };

    ImageAltFinding { total, without_alt, decorative, percentage, recommendation }
}

pub fn detect_canonical(snapshot: &PageSnapshot) -> CanonicalFinding {
    let href = snapshot.canonical_href.clone().unwrap_or_default();

    let status = if href.is_empty() {
        CanonicalStatus::Absent
    } else if is_absolute_http(&href) {
        CanonicalStatus::Valid
    } else {
        CanonicalStatus::Invalid
    };

    let recommendation = match status {
        CanonicalStatus::Absent => "Add a canonical link to prevent duplicate-content dilution.".into(),
        CanonicalStatus::Invalid => {
            format!("Canonical \"{}\" is not an absolute URL; use the full https:// form.", href)
        }
        CanonicalStatus::Valid => "Canonical URL is present and absolute.".into(),
    };

    CanonicalFinding { exists: status != CanonicalStatus::Absent, href, status, recommendation }
}

pub fn detect_schema(snapshot: &PageSnapshot) -> SchemaFinding {
    let mut types = Vec::new();
    for value in &snapshot.structured_data {
        collect_types(value, &mut types);
    }

    let count = snapshot.structured_data.len();
    let detected = count > 0;

    let recommendation = if detected {
        format!("Structured data present ({}).", types.join(", "))
    } else {
        "Add JSON-LD structured data to qualify for rich results.".to_string()
    };

    SchemaFinding { detected, count, types, recommendation }
}

/// Collect `@type` values from a JSON-LD payload, flattening top-level arrays
/// and `@graph` arrays, deduplicating by type name.
fn collect_types(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                collect_types(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            match map.get("@type") {
                Some(serde_json::Value::String(t)) => push_unique(out, t),
                Some(serde_json::Value::Array(ts)) => {
                    for t in ts.iter().filter_map(|v| v.as_str()) {
                        push_unique(out, t);
                    }
                }
                _ => {}
            }
            if let Some(graph) = map.get("@graph") {
                collect_types(graph, out);
            }
        }
        _ => {}
    }
}

fn push_unique(out: &mut Vec<String>, value: &str) {
    if !out.iter().any(|t| t == value) {
        out.push(value.to_string());
    }
}

pub fn detect_open_graph(snapshot: &PageSnapshot) -> OpenGraphFinding {
    let missing: Vec<String> = OPEN_GRAPH_PROPERTIES
        .iter()
        .filter(|p| snapshot.meta(p).map(str::trim).unwrap_or_default().is_empty())
        .map(|p| p.to_string())
        .collect();

    let present_count = OPEN_GRAPH_PROPERTIES.len() - missing.len();
    let complete = present_count >= 4;

    let recommendation = if complete {
        "Open Graph metadata is complete.".to_string()
    } else if present_count > 0 {
        format!("Open Graph is partial; missing {}.", missing.join(", "))
    } else {
        "Add Open Graph tags to control social-sharing previews.".to_string()
    };

    OpenGraphFinding {
        detected: present_count > 0,
        present_count,
        missing,
        complete,
        recommendation,
    }
}

pub fn detect_robots(snapshot: &PageSnapshot) -> RobotsFinding {
    let content = snapshot.meta("robots").unwrap_or_default().to_ascii_lowercase();
    let exists = !content.is_empty();
    let is_blocking = content.contains("noindex") || content.contains("nofollow");

    let recommendation = if is_blocking {
        format!("Robots directive \"{}\" blocks indexing or link following.", content)
    } else if exists {
        "Robots directive does not block crawling.".to_string()
    } else {
        "No robots meta tag; the page is crawlable by default.".to_string()
    };

    RobotsFinding { exists, content, is_blocking, recommendation }
}

fn is_absolute_http(href: &str) -> bool {
    Url::parse(href)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
