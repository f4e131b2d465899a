//! Recommendation synthesis: findings in, prioritized advisories out.

pub mod knowledge;

use crate::domain::{
    CanonicalStatus, MarketingFindings, MetaDescriptionStatus, Priority, Recommendation,
    SeoFindings, TitleStatus, UxFindings, Vendor, MAX_RECOMMENDATIONS,
};

use knowledge::{lookup, RecommendationKey};

/// Builds the prioritized recommendation list for one audit run.
///
/// Each deficiency fires at most one advisory. The list is sorted by priority
/// (stable, so same-priority advisories keep trigger order) and truncated to
/// [`MAX_RECOMMENDATIONS`].
pub fn synthesize(
    seo: &SeoFindings,
    marketing: &MarketingFindings,
    ux: &UxFindings,
) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = Vec::new();
    let mut emit = |key: RecommendationKey, priority: Priority| {
        out.push(lookup(key).to_recommendation(priority));
    };

    match seo.title.status {
        TitleStatus::Critical => emit(RecommendationKey::TitleMissing, Priority::Critical),
        TitleStatus::TooShort => emit(RecommendationKey::TitleTooShort, Priority::Important),
        TitleStatus::TooLong => emit(RecommendationKey::TitleTooLong, Priority::Important),
        TitleStatus::Optimal => {}
    }

    match seo.meta_description.status {
        MetaDescriptionStatus::Absent => {
            emit(RecommendationKey::MetaDescriptionMissing, Priority::Important)
        }
        MetaDescriptionStatus::TooShort | MetaDescriptionStatus::TooLong => {
            emit(RecommendationKey::MetaDescriptionSuboptimal, Priority::Medium)
        }
        MetaDescriptionStatus::Optimal => {}
    }

    match seo.h1.count {
        0 => emit(RecommendationKey::H1Missing, Priority::Critical),
        1 => {}
        _ => emit(RecommendationKey::H1Multiple, Priority::Important),
    }

    // Hierarchy advice only when there is a hierarchy to fix; the missing-H1
    // case is already covered above.
    if !seo.headings.is_valid && seo.h1.count >= 1 {
        emit(RecommendationKey::HeadingHierarchyBroken, Priority::Medium);
    }

    if seo.images.without_alt > 0 {
        emit(RecommendationKey::ImagesMissingAlt, Priority::Medium);
    }

    if seo.canonical.status != CanonicalStatus::Valid {
        emit(RecommendationKey::CanonicalMissing, Priority::Medium);
    }

    if !seo.schema.detected {
        emit(RecommendationKey::SchemaMissing, Priority::Medium);
    }

    if !seo.open_graph.complete {
        emit(RecommendationKey::OpenGraphIncomplete, Priority::Medium);
    }

    if seo.robots.is_blocking {
        emit(RecommendationKey::RobotsBlocking, Priority::Medium);
    }

    if !marketing.detected(Vendor::Ga4) {
        emit(RecommendationKey::Ga4Missing, Priority::Important);
    }

    if !marketing.detected(Vendor::Gtm) {
        emit(RecommendationKey::GtmMissing, Priority::Important);
    }

    if marketing.cta.count < 2 {
        emit(RecommendationKey::CtaInsufficient, Priority::Important);
    }

    if marketing.social.total_found == 0 {
        emit(RecommendationKey::SocialMissing, Priority::Medium);
    }

    if marketing.forms.count == 0 {
        emit(RecommendationKey::FormsMissing, Priority::Important);
    }

    if !ux.viewport.exists {
        emit(RecommendationKey::ViewportMissing, Priority::Critical);
    }

    if ux.links.broken > 0 {
        emit(RecommendationKey::BrokenLinks, Priority::Important);
    }

    if ux.word_count.words < 300 {
        emit(RecommendationKey::ThinContent, Priority::Medium);
    }

    if !ux.accessibility.issues.is_empty() {
        emit(RecommendationKey::AccessibilityIssues, Priority::Medium);
    }

    if ux.semantics.total < 3 {
        emit(RecommendationKey::SemanticsWeak, Priority::Medium);
    }

    out.sort_by_key(|r| r.priority.rank());
    out.truncate(MAX_RECOMMENDATIONS);
    out
}
