//! Static recommendation knowledge base.
//!
//! Each entry carries the full advisory text for one known deficiency. The
//! synthesizer decides which entries fire and at what priority; this module
//! only stores the content.

use crate::domain::{Priority, Recommendation};

/// Stable identifiers for every advisory the synthesizer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationKey {
    TitleMissing,
    TitleTooShort,
    TitleTooLong,
    MetaDescriptionMissing,
    MetaDescriptionSuboptimal,
    H1Missing,
    H1Multiple,
    HeadingHierarchyBroken,
    ImagesMissingAlt,
    CanonicalMissing,
    SchemaMissing,
    OpenGraphIncomplete,
    RobotsBlocking,
    Ga4Missing,
    GtmMissing,
    CtaInsufficient,
    SocialMissing,
    FormsMissing,
    ViewportMissing,
    BrokenLinks,
    ThinContent,
    AccessibilityIssues,
    SemanticsWeak,
}

pub struct KnowledgeEntry {
    pub key: RecommendationKey,
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
    pub action: &'static str,
    pub tips: &'static [&'static str],
    pub best_practices: &'static str,
    pub resources: &'static [&'static str],
}

impl KnowledgeEntry {
    /// Materializes the entry into an owned recommendation at the given
    /// priority.
    pub fn to_recommendation(&self, priority: Priority) -> Recommendation {
        Recommendation {
            priority,
            category: self.category.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            impact: self.impact.to_string(),
            action: self.action.to_string(),
            tips: self.tips.iter().map(|t| t.to_string()).collect(),
            best_practices: self.best_practices.to_string(),
            resources: if self.resources.is_empty() {
                None
            } else {
                Some(self.resources.iter().map(|r| r.to_string()).collect())
            },
        }
    }
}

pub fn lookup(key: RecommendationKey) -> &'static KnowledgeEntry {
    // The table covers every enum variant, so the search always succeeds.
    KNOWLEDGE.iter().find(|e| e.key == key).unwrap_or(&KNOWLEDGE[0])
}

static KNOWLEDGE: &[KnowledgeEntry] = &[
    KnowledgeEntry {
        key: RecommendationKey::TitleMissing,
        category: "SEO",
        title: "Add a title tag",
        description:
            "The page has no title tag. The title is the single strongest on-page ranking \
             signal and the headline shown in search results; without it, engines synthesize \
             one from arbitrary page text.",
        impact: "Search engines cannot present the page properly; click-through rates collapse.",
        action: "Write a unique, descriptive <title> of 30 to 70 characters that includes the \
                 primary topic of the page.",
        tips: &[
            "Put the most important keywords near the beginning",
            "Mention the brand name at the end, separated by a dash or pipe",
            "Write for humans first; the title is an advertisement in the results page",
        ],
        best_practices:
            "Every indexable page gets a unique title between 30 and 70 characters.",
        resources: &["https://developers.google.com/search/docs/appearance/title-link"],
    },
    KnowledgeEntry {
        key: RecommendationKey::TitleTooShort,
        category: "SEO",
        title: "Lengthen the title tag",
        description:
            "The title is under 30 characters. Short titles waste the most visible line of \
             the search snippet and rarely carry enough context to rank for meaningful queries.",
        impact: "The page competes with fuller, more descriptive titles and loses clicks.",
        action: "Expand the title toward 30 to 70 characters with a concrete benefit or topic \
                 qualifier.",
        tips: &[
            "Add a qualifier: a location, an audience, a year or a format",
            "Avoid padding with the brand name alone",
        ],
        best_practices: "Aim for 50 to 60 characters so the full title displays on desktop.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::TitleTooLong,
        category: "SEO",
        title: "Shorten the title tag",
        description:
            "The title exceeds 70 characters, so search engines truncate it with an ellipsis \
             and may rewrite it entirely.",
        impact: "The truncated message loses its call-to-read and the rewrite is out of your control.",
        action: "Cut the title to 70 characters or fewer, keeping the primary keyword intact.",
        tips: &[
            "Drop boilerplate suffixes that repeat on every page",
            "Move secondary keywords into the meta description instead",
        ],
        best_practices: "Front-load meaning: the first 50 characters should stand alone.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::MetaDescriptionMissing,
        category: "SEO",
        title: "Add a meta description",
        description:
            "The page has no meta description. Engines fall back to an automatic excerpt \
             that is rarely persuasive and often mid-sentence.",
        impact: "Lower click-through rate from search results despite unchanged rankings.",
        action: "Write a 120 to 170 character description that summarizes the page and ends \
                 with a reason to click.",
        tips: &[
            "Treat it as ad copy, not a keyword container",
            "Make each page's description unique",
            "Include the primary keyword once; it gets bolded when it matches the query",
        ],
        best_practices: "120 to 170 characters, active voice, one clear value proposition.",
        resources: &["https://developers.google.com/search/docs/appearance/snippet"],
    },
    KnowledgeEntry {
        key: RecommendationKey::MetaDescriptionSuboptimal,
        category: "SEO",
        title: "Adjust the meta description length",
        description:
            "The meta description is outside the 120 to 170 character window: too short to \
             fill the snippet, or long enough to be truncated.",
        impact: "The snippet either looks thin or gets cut off mid-argument.",
        action: "Rewrite the description into the 120 to 170 character range.",
        tips: &[
            "Lead with the answer or benefit, not with the brand",
            "One sentence of substance beats two of filler",
        ],
        best_practices: "Check the rendered snippet width; pixels matter more than characters.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::H1Missing,
        category: "SEO",
        title: "Add an H1 heading",
        description:
            "The page has no H1. The top-level heading anchors the document outline and tells \
             both users and engines what the page is about.",
        impact: "Weakened topical signal and a broken heading outline for assistive technology.",
        action: "Add exactly one H1 that states the page topic, close to the title tag but not \
                 necessarily identical.",
        tips: &[
            "Keep it visible; a hidden H1 is a spam signal",
            "Style it with CSS rather than choosing the tag by font size",
        ],
        best_practices: "One H1 per page, then H2/H3 subsections in order.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::H1Multiple,
        category: "SEO",
        title: "Keep a single H1",
        description:
            "The page declares several H1 headings, diluting the main topical signal and \
             flattening the document outline.",
        impact: "Engines and screen readers cannot tell which heading is the page's subject.",
        action: "Keep the most representative H1 and demote the others to H2.",
        tips: &[
            "Audit templates; duplicated H1s usually come from a logo or banner component",
        ],
        best_practices: "One H1, then a strictly descending hierarchy.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::HeadingHierarchyBroken,
        category: "SEO",
        title: "Fix the heading hierarchy",
        description:
            "Heading levels skip steps (for example an H2 followed directly by an H4). The \
             outline no longer reflects the document structure.",
        impact: "Harder scanning for users, degraded outline for crawlers and screen readers.",
        action: "Renumber headings so each level is at most one deeper than the previous one.",
        tips: &[
            "Choose heading tags by structure and adjust size in CSS",
            "Use a browser outline extension to visualize the tree",
        ],
        best_practices: "The heading sequence should read like a table of contents.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::ImagesMissingAlt,
        category: "SEO",
        title: "Add alt text to images",
        description:
            "Some images lack an alt attribute. Alt text is how image search indexes content \
             and how screen readers describe it; truly decorative images should carry an \
             explicit empty alt instead.",
        impact: "Lost image-search traffic and an accessibility failure on every affected image.",
        action: "Write a short, specific alt for each informative image and alt=\"\" for \
                 decorative ones.",
        tips: &[
            "Describe the content, not the file: \"team signing a contract\", not \"IMG_0123\"",
            "Skip the words \"image of\"; the tag already says so",
        ],
        best_practices: "Every <img> carries an alt attribute, empty only when decorative.",
        resources: &["https://www.w3.org/WAI/tutorials/images/"],
    },
    KnowledgeEntry {
        key: RecommendationKey::CanonicalMissing,
        category: "SEO",
        title: "Declare a canonical URL",
        description:
            "The page declares no valid canonical link. Parameterized, paginated or \
             syndicated variants of the page can split its ranking signals.",
        impact: "Duplicate-content dilution; engines may index the wrong variant.",
        action: "Add <link rel=\"canonical\"> with the absolute https URL of the preferred \
                 version.",
        tips: &[
            "Self-referencing canonicals are fine and recommended",
            "The canonical must be an absolute URL, not a path",
        ],
        best_practices: "One canonical per page, absolute, matching the served protocol.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::SchemaMissing,
        category: "SEO",
        title: "Add structured data",
        description:
            "No JSON-LD structured data was found. Schema.org markup makes the page eligible \
             for rich results: ratings, FAQs, breadcrumbs, product cards.",
        impact: "The page cannot win enhanced result formats that competitors may carry.",
        action: "Add a JSON-LD block describing the page's primary entity (Organization, \
                 Article, Product, FAQPage).",
        tips: &[
            "Validate with the Rich Results Test before shipping",
            "Start with Organization and WebSite markup on the home page",
        ],
        best_practices: "JSON-LD in the head, one top-level entity per block.",
        resources: &["https://schema.org/", "https://search.google.com/test/rich-results"],
    },
    KnowledgeEntry {
        key: RecommendationKey::OpenGraphIncomplete,
        category: "SEO",
        title: "Complete the Open Graph tags",
        description:
            "The Open Graph set is incomplete. Shares on social platforms will render with a \
             missing image, a raw URL or no description.",
        impact: "Shared links look broken and earn fewer clicks.",
        action: "Provide og:title, og:description, og:image, og:url and og:type.",
        tips: &[
            "og:image should be at least 1200x630 for large card rendering",
            "Add twitter:card for the X/Twitter variant",
        ],
        best_practices: "All five core properties on every shareable page.",
        resources: &["https://ogp.me/"],
    },
    KnowledgeEntry {
        key: RecommendationKey::RobotsBlocking,
        category: "SEO",
        title: "Review the robots directive",
        description:
            "The robots meta tag contains noindex or nofollow. If intentional (staging, \
             thank-you pages) this is fine; on a page meant to rank it is self-sabotage.",
        impact: "The page is excluded from the index or its links stop passing signals.",
        action: "Confirm the directive is deliberate; remove noindex/nofollow if the page \
                 should be discoverable.",
        tips: &[
            "Check for a second robots tag injected by a plugin or tag manager",
        ],
        best_practices: "Indexable pages carry either no robots tag or \"index, follow\".",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::Ga4Missing,
        category: "Marketing",
        title: "Install Google Analytics 4",
        description:
            "No GA4 tag was detected. Without analytics there is no visibility into traffic \
             sources, conversions or content performance.",
        impact: "Marketing decisions run blind; no baseline exists for any optimization.",
        action: "Create a GA4 property and deploy the gtag.js snippet or a GTM tag.",
        tips: &[
            "Define conversions for the key actions before driving traffic",
            "Enable enhanced measurement for scroll and outbound-click events",
        ],
        best_practices: "One GA4 property per site, deployed through a tag manager.",
        resources: &["https://support.google.com/analytics/answer/9304153"],
    },
    KnowledgeEntry {
        key: RecommendationKey::GtmMissing,
        category: "Marketing",
        title: "Install Google Tag Manager",
        description:
            "No Tag Manager container was detected. Hardcoded tracking snippets require a \
             deployment for every marketing change.",
        impact: "Slow iteration on tracking and a growing pile of inline vendor scripts.",
        action: "Deploy a GTM container and migrate existing tags into it.",
        tips: &[
            "Use the preview mode to verify triggers before publishing",
            "Version containers; the rollback is one click",
        ],
        best_practices: "All marketing tags flow through the container, none inline.",
        resources: &["https://tagmanager.google.com/"],
    },
    KnowledgeEntry {
        key: RecommendationKey::CtaInsufficient,
        category: "Marketing",
        title: "Strengthen the calls-to-action",
        description:
            "Few or no call-to-action elements were detected. Visitors who are ready to act \
             have nowhere obvious to go.",
        impact: "Traffic leaves without converting; the page works as a brochure, not a funnel.",
        action: "Add one primary CTA above the fold and a secondary, lower-commitment action \
                 further down.",
        tips: &[
            "Use an action verb plus the outcome: \"Get the report\", \"Book a demo\"",
            "Make the primary CTA visually dominant; one color reserved for it",
            "Repeat the CTA after long content sections",
        ],
        best_practices: "One dominant primary action per page, contrasting and above the fold.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::SocialMissing,
        category: "Marketing",
        title: "Link your social profiles",
        description:
            "No social profile links were found. Profiles are trust signals and a secondary \
             channel to retain visitors who are not ready to convert.",
        impact: "Lost social proof and no follow-path for undecided visitors.",
        action: "Add footer links to the active social profiles (LinkedIn, X, Instagram...).",
        tips: &[
            "Only link profiles that are actually maintained",
            "Use rel=\"noopener\" on the external profile links",
        ],
        best_practices: "Consistent profile links in the footer across the whole site.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::FormsMissing,
        category: "Marketing",
        title: "Add a lead-capture form",
        description:
            "No form was found on the page. Without a form, the only conversion paths are \
             off-page (phone, email), which are hard to attribute.",
        impact: "No lead capture and no measurable conversion event.",
        action: "Add a short contact or signup form with a clear submit action.",
        tips: &[
            "Every field you remove raises completion rates",
            "State what happens after submission next to the button",
        ],
        best_practices: "Three fields or fewer for a first-touch form.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::ViewportMissing,
        category: "UX",
        title: "Add a viewport meta tag",
        description:
            "The page declares no viewport. Mobile browsers render it at desktop width and \
             scale it down, producing unreadably small text.",
        impact: "The mobile experience is broken and mobile-first indexing penalizes the page.",
        action: "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">.",
        tips: &[
            "Never disable user zoom; it is an accessibility violation",
        ],
        best_practices: "width=device-width with initial-scale=1 on every page.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::BrokenLinks,
        category: "UX",
        title: "Repair broken links",
        description:
            "Links with empty or placeholder targets were found (href=\"#\" outside a menu, \
             javascript:void(0), empty href). They promise navigation and deliver nothing.",
        impact: "Dead ends frustrate users and waste crawl budget.",
        action: "Point each link at a real destination, or replace it with a <button> if it \
                 only triggers script behavior.",
        tips: &[
            "A link that opens a menu should use a button with aria-expanded",
        ],
        best_practices: "Anchors navigate; buttons act.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::ThinContent,
        category: "UX",
        title: "Expand the page content",
        description:
            "The page carries little visible text. Thin pages give engines almost nothing to \
             rank and give visitors no reason to stay.",
        impact: "Poor rankings for any competitive query and high bounce rates.",
        action: "Grow the page toward at least 300 words of genuinely useful content.",
        tips: &[
            "Answer the questions a visitor would ask next",
            "Structure with descriptive H2 sections rather than one text block",
        ],
        best_practices: "Depth over length: cover the topic, then stop.",
        resources: &[],
    },
    KnowledgeEntry {
        key: RecommendationKey::AccessibilityIssues,
        category: "UX",
        title: "Fix the detected accessibility issues",
        description:
            "The accessibility checks flagged issues: a missing document language, unlabeled \
             form fields, unlabeled buttons or absent ARIA attributes.",
        impact: "Users of assistive technology are excluded and legal exposure grows.",
        action: "Work through the flagged issues: set the lang attribute, label every field \
                 and button, add ARIA where semantics need it.",
        tips: &[
            "Prefer native elements over ARIA retrofits",
            "Test once with a screen reader; ten minutes finds most problems",
        ],
        best_practices: "WCAG 2.1 AA as the working baseline.",
        resources: &["https://www.w3.org/WAI/WCAG21/quickref/"],
    },
    KnowledgeEntry {
        key: RecommendationKey::SemanticsWeak,
        category: "UX",
        title: "Use semantic HTML5 structure",
        description:
            "The page uses few or no sectioning elements (header, nav, main, article, \
             section, aside, footer). A div-only structure hides the page's anatomy.",
        impact: "Screen readers lose their landmarks and engines parse structure heuristically.",
        action: "Replace the structural divs with the matching sectioning elements.",
        tips: &[
            "Exactly one <main> per page",
            "Landmarks let screen-reader users jump directly to content",
        ],
        best_practices: "Structural tags by role, divs only for styling hooks.",
        resources: &[],
    },
];
