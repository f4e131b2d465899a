//! Read-only page snapshot consumed by every detector.
//!
//! A `PageSnapshot` is captured once per audit run and never mutated, so all
//! detectors observe the same page state. Real captures come from
//! `extractor::page_extractor`; tests build synthetic snapshots through
//! `SnapshotBuilder`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A heading in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Heading {
    /// 1..=6
    pub level: u8,
    pub text: String,
}

/// An `<img>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageNode {
    pub src: String,
    /// Whether the `alt` attribute is present at all. An empty `alt=""` is
    /// decorative and acceptable; a missing attribute is not.
    pub has_alt_attribute: bool,
    pub alt_text: String,
    pub lazy_loading: bool,
}

/// Best-effort computed style for an element. The static-HTML extractor has
/// no CSSOM and leaves styles absent; live captures and synthetic snapshots
/// may supply them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputedStyle {
    /// CSS color value, e.g. "rgb(37, 99, 235)" or "transparent".
    pub background_color: String,
    pub padding_px: f64,
    pub border_radius_px: f64,
    /// CSS display value, e.g. "inline-block".
    pub display: String,
}

impl ComputedStyle {
    pub fn has_visible_background(&self) -> bool {
        !self.background_color.is_empty()
            && self.background_color != "transparent"
            && self.background_color != "rgba(0, 0, 0, 0)"
    }
}

/// An `<a>` element with the context needed to classify it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkNode {
    pub href: String,
    pub text: String,
    pub rel: Option<String>,
    pub class_name: String,
    pub parent_class_name: String,
    /// True when an ancestor is `<nav>`, `role="navigation"`, a `menu`/`nav`
    /// class carrier or `<header>`.
    pub in_nav_ancestor: bool,
    /// True when the link carries `aria-haspopup`, `aria-expanded` or
    /// `aria-controls`.
    pub has_popup_aria: bool,
    pub has_onclick: bool,
    pub style: Option<ComputedStyle>,
}

/// A `<button>` or button-like `<input>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonNode {
    pub text: String,
    pub aria_label: Option<String>,
    pub class_name: String,
}

/// A form field relevant to the accessibility labeling check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputNode {
    /// True when the field has a `<label for>`, wrapping `<label>`,
    /// `aria-label` or `aria-labelledby`.
    pub has_label: bool,
}

/// A `<form>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormNode {
    pub field_count: usize,
    pub has_submit: bool,
}

/// A `<script>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptNode {
    pub src: String,
    pub inline_text: String,
}

/// Per-tag counts for the seven HTML5 sectioning elements.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SectioningCounts {
    pub header: usize,
    pub nav: usize,
    pub main: usize,
    pub article: usize,
    pub section: usize,
    pub aside: usize,
    pub footer: usize,
}

impl SectioningCounts {
    pub fn total(&self) -> usize {
        self.header + self.nav + self.main + self.article + self.section + self.aside + self.footer
    }

    /// Names of the sectioning elements actually used, in a fixed order.
    pub fn used(&self) -> Vec<&'static str> {
        [
            ("header", self.header),
            ("nav", self.nav),
            ("main", self.main),
            ("article", self.article),
            ("section", self.section),
            ("aside", self.aside),
            ("footer", self.footer),
        ]
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(name, _)| *name)
        .collect()
    }
}

/// Navigation-timing and layout metrics, when the capture source exposes
/// them. Absence means "insufficient data", never a negative finding.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PerformanceTimings {
    /// First Contentful Paint, milliseconds.
    pub fcp_ms: Option<f64>,
    /// Largest Contentful Paint, milliseconds.
    pub lcp_ms: Option<f64>,
    /// Cumulative Layout Shift, unitless.
    pub cls: Option<f64>,
    /// Time To First Byte, milliseconds.
    pub ttfb_ms: Option<f64>,
}

/// Immutable capture of page state at analysis time. All detectors read the
/// same instance, which keeps one audit run internally consistent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub title: Option<String>,
    /// `name`/`property` attribute (lowercased) to `content`.
    pub meta_tags: HashMap<String, String>,
    pub canonical_href: Option<String>,
    pub html_lang: Option<String>,
    pub headings: Vec<Heading>,
    pub images: Vec<ImageNode>,
    pub links: Vec<LinkNode>,
    pub buttons: Vec<ButtonNode>,
    pub inputs: Vec<InputNode>,
    pub forms: Vec<FormNode>,
    pub scripts: Vec<ScriptNode>,
    /// Successfully parsed JSON-LD payloads; malformed blocks are skipped at
    /// capture time.
    pub structured_data: Vec<serde_json::Value>,
    pub sectioning: SectioningCounts,
    /// Elements carrying any `aria-*` attribute or a `role`.
    pub aria_element_count: usize,
    /// Visible text content, script/style bodies excluded.
    pub body_text: String,
    pub performance: Option<PerformanceTimings>,
}

impl PageSnapshot {
    pub fn builder(url: impl Into<String>) -> SnapshotBuilder {
        SnapshotBuilder {
            snapshot: PageSnapshot { url: url.into(), ..Default::default() },
        }
    }

    /// Content of a meta tag by `name`/`property`, if present.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta_tags.get(key).map(String::as_str)
    }
}

/// Builds synthetic snapshots for tests and non-DOM capture sources.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: PageSnapshot,
}

impl SnapshotBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.snapshot.title = Some(title.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.snapshot.meta_tags.insert(key.into(), content.into());
        self
    }

    pub fn canonical(mut self, href: impl Into<String>) -> Self {
        self.snapshot.canonical_href = Some(href.into());
        self
    }

    pub fn html_lang(mut self, lang: impl Into<String>) -> Self {
        self.snapshot.html_lang = Some(lang.into());
        self
    }

    pub fn heading(mut self, level: u8, text: impl Into<String>) -> Self {
        self.snapshot.headings.push(Heading { level, text: text.into() });
        self
    }

    /// Adds an image; `alt: None` means the attribute is missing entirely.
    pub fn image(mut self, src: impl Into<String>, alt: Option<&str>) -> Self {
        self.snapshot.images.push(ImageNode {
            src: src.into(),
            has_alt_attribute: alt.is_some(),
            alt_text: alt.unwrap_or_default().to_string(),
            lazy_loading: false,
        });
        self
    }

    pub fn image_node(mut self, image: ImageNode) -> Self {
        self.snapshot.images.push(image);
        self
    }

    pub fn link(mut self, link: LinkNode) -> Self {
        self.snapshot.links.push(link);
        self
    }

    pub fn simple_link(mut self, href: impl Into<String>, text: impl Into<String>) -> Self {
        self.snapshot.links.push(LinkNode {
            href: href.into(),
            text: text.into(),
            ..Default::default()
        });
        self
    }

    pub fn button(mut self, text: impl Into<String>) -> Self {
        self.snapshot.buttons.push(ButtonNode { text: text.into(), ..Default::default() });
        self
    }

    pub fn button_node(mut self, button: ButtonNode) -> Self {
        self.snapshot.buttons.push(button);
        self
    }

    pub fn input(mut self, has_label: bool) -> Self {
        self.snapshot.inputs.push(InputNode { has_label });
        self
    }

    pub fn form(mut self, field_count: usize, has_submit: bool) -> Self {
        self.snapshot.forms.push(FormNode { field_count, has_submit });
        self
    }

    pub fn script_src(mut self, src: impl Into<String>) -> Self {
        self.snapshot.scripts.push(ScriptNode { src: src.into(), inline_text: String::new() });
        self
    }

    pub fn inline_script(mut self, text: impl Into<String>) -> Self {
        self.snapshot.scripts.push(ScriptNode { src: String::new(), inline_text: text.into() });
        self
    }

    pub fn structured_data(mut self, value: serde_json::Value) -> Self {
        self.snapshot.structured_data.push(value);
        self
    }

    pub fn sectioning(mut self, counts: SectioningCounts) -> Self {
        self.snapshot.sectioning = counts;
        self
    }

    pub fn aria_elements(mut self, count: usize) -> Self {
        self.snapshot.aria_element_count = count;
        self
    }

    pub fn body_text(mut self, text: impl Into<String>) -> Self {
        self.snapshot.body_text = text.into();
        self
    }

    pub fn performance(mut self, timings: PerformanceTimings) -> Self {
        self.snapshot.performance = Some(timings);
        self
    }

    pub fn build(self) -> PageSnapshot {
        self.snapshot
    }
}
