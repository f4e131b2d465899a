//! Static-HTML snapshot capture.
//!
//! Adapts a fetched HTML document into a read-only `PageSnapshot`. Absent
//! optional elements produce empty/zero defaults rather than failures, and
//! nothing here mutates the source. Performance timings are not observable
//! from static HTML and stay `None`; callers treat that as "insufficient
//! data", not as a negative finding.

use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use tracing::debug;

use crate::domain::{
    ButtonNode, FormNode, Heading, ImageNode, InputNode, LinkNode, PageSnapshot, ScriptNode,
    SectioningCounts,
};

const MENU_CLASS_TOKENS: [&str; 2] = ["menu", "nav"];

pub struct PageExtractor;

impl PageExtractor {
    /// Capture a complete snapshot of `html` as served at `url`.
    pub fn extract(url: &str, html: &str) -> PageSnapshot {
        let document = Html::parse_document(html);

        let mut snapshot = PageSnapshot {
            url: url.to_string(),
            title: Self::extract_title(&document),
            canonical_href: Self::extract_canonical(&document),
            html_lang: Self::extract_lang(&document),
            headings: Self::extract_headings(&document),
            images: Self::extract_images(&document),
            links: Self::extract_links(&document),
            buttons: Self::extract_buttons(&document),
            inputs: Self::extract_inputs(&document),
            forms: Self::extract_forms(&document),
            sectioning: Self::extract_sectioning(&document),
            aria_element_count: Self::count_aria_elements(&document),
            body_text: Self::extract_body_text(&document),
            performance: None,
            ..Default::default()
        };

        snapshot.meta_tags = Self::extract_meta_tags(&document);

        let (scripts, structured_data) = Self::extract_scripts(&document);
        snapshot.scripts = scripts;
        snapshot.structured_data = structured_data;

        snapshot
    }

    fn extract_meta_tags(document: &Html) -> HashMap<String, String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("meta").unwrap());

        let mut tags = HashMap::new();
        for el in document.select(selector) {
            let key = el
                .value()
                .attr("name")
                .or_else(|| el.value().attr("property"));
            if let (Some(key), Some(content)) = (key, el.value().attr("content")) {
                tags.insert(key.to_ascii_lowercase(), content.to_string());
            }
        }
        tags
    }

    fn extract_title(document: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
        document
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    fn extract_canonical(document: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("link[rel='canonical']").unwrap());
        document
            .select(selector)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn extract_lang(document: &Html) -> Option<String> {
        document
            .root_element()
            .value()
            .attr("lang")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn extract_headings(document: &Html) -> Vec<Heading> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector =
            SELECTOR.get_or_init(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

        document
            .select(selector)
            .filter_map(|el| {
                let level = el.value().name().trim_start_matches('h').parse::<u8>().ok()?;
                let text = el.text().collect::<String>().trim().to_string();
                Some(Heading { level, text })
            })
            .collect()
    }

    fn extract_images(document: &Html) -> Vec<ImageNode> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("img").unwrap());

        document
            .select(selector)
            .map(|el| {
                let alt = el.value().attr("alt");
                ImageNode {
                    src: el.value().attr("src").unwrap_or_default().trim().to_string(),
                    has_alt_attribute: alt.is_some(),
                    alt_text: alt.unwrap_or_default().trim().to_string(),
                    lazy_loading: el
                        .value()
                        .attr("loading")
                        .map(|v| v.eq_ignore_ascii_case("lazy"))
                        .unwrap_or(false),
                }
            })
            .collect()
    }

    fn extract_links(document: &Html) -> Vec<LinkNode> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("a").unwrap());

        document
            .select(selector)
            .map(|el| {
                let parent_class = el
                    .parent()
                    .and_then(ElementRef::wrap)
                    .and_then(|p| p.value().attr("class"))
                    .unwrap_or_default()
                    .to_string();

                LinkNode {
                    href: el.value().attr("href").unwrap_or_default().trim().to_string(),
                    text: el.text().collect::<String>().trim().to_string(),
                    rel: el.value().attr("rel").map(str::to_string),
                    class_name: el.value().attr("class").unwrap_or_default().to_string(),
                    parent_class_name: parent_class,
                    in_nav_ancestor: Self::has_nav_ancestor(el),
                    has_popup_aria: el.value().attr("aria-haspopup").is_some()
                        || el.value().attr("aria-expanded").is_some()
                        || el.value().attr("aria-controls").is_some(),
                    has_onclick: el.value().attr("onclick").is_some(),
                    // No CSSOM in static HTML.
                    style: None,
                }
            })
            .collect()
    }

    fn has_nav_ancestor(el: ElementRef) -> bool {
        el.ancestors().filter_map(ElementRef::wrap).any(|anc| {
            let value = anc.value();
            if matches!(value.name(), "nav" | "header") {
                return true;
            }
            if value.attr("role") == Some("navigation") {
                return true;
            }
            value
                .attr("class")
                .map(|c| {
                    c.split_whitespace()
                        .any(|token| MENU_CLASS_TOKENS.contains(&token.to_ascii_lowercase().as_str()))
                })
                .unwrap_or(false)
        })
    }

    fn extract_buttons(document: &Html) -> Vec<ButtonNode> {
        static BUTTONS: OnceLock<Selector> = OnceLock::new();
        static INPUTS: OnceLock<Selector> = OnceLock::new();
        let buttons = BUTTONS.get_or_init(|| Selector::parse("button, [role='button']").unwrap());
        let inputs = INPUTS.get_or_init(|| Selector::parse("input").unwrap());

        let mut out: Vec<ButtonNode> = document
            .select(buttons)
            .map(|el| ButtonNode {
                text: el.text().collect::<String>().trim().to_string(),
                aria_label: el.value().attr("aria-label").map(str::to_string),
                class_name: el.value().attr("class").unwrap_or_default().to_string(),
            })
            .collect();

        for el in document.select(inputs) {
            let kind = el.value().attr("type").unwrap_or("text").to_ascii_lowercase();
            if kind == "submit" || kind == "button" {
                out.push(ButtonNode {
                    text: el.value().attr("value").unwrap_or_default().trim().to_string(),
                    aria_label: el.value().attr("aria-label").map(str::to_string),
                    class_name: el.value().attr("class").unwrap_or_default().to_string(),
                });
            }
        }

        out
    }

    fn extract_inputs(document: &Html) -> Vec<InputNode> {
        static FIELDS: OnceLock<Selector> = OnceLock::new();
        static LABELS: OnceLock<Selector> = OnceLock::new();
        let fields = FIELDS.get_or_init(|| Selector::parse("input, textarea, select").unwrap());
        let labels = LABELS.get_or_init(|| Selector::parse("label[for]").unwrap());

        let labeled_ids: HashSet<String> = document
            .select(labels)
            .filter_map(|el| el.value().attr("for"))
            .map(str::to_string)
            .collect();

        document
            .select(fields)
            .filter(|el| {
                let kind = el.value().attr("type").unwrap_or("text").to_ascii_lowercase();
                !matches!(kind.as_str(), "hidden" | "submit" | "button" | "reset" | "image")
            })
            .map(|el| {
                let by_id = el
                    .value()
                    .attr("id")
                    .map(|id| labeled_ids.contains(id))
                    .unwrap_or(false);
                let by_aria = el.value().attr("aria-label").is_some()
                    || el.value().attr("aria-labelledby").is_some();
                let wrapped = el
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .any(|anc| anc.value().name() == "label");
                InputNode { has_label: by_id || by_aria || wrapped }
            })
            .collect()
    }

    fn extract_forms(document: &Html) -> Vec<FormNode> {
        static FORMS: OnceLock<Selector> = OnceLock::new();
        static FIELDS: OnceLock<Selector> = OnceLock::new();
        static SUBMITS: OnceLock<Selector> = OnceLock::new();
        let forms = FORMS.get_or_init(|| Selector::parse("form").unwrap());
        let fields = FIELDS.get_or_init(|| Selector::parse("input, textarea, select").unwrap());
        let submits = SUBMITS
            .get_or_init(|| Selector::parse("button[type='submit'], input[type='submit']").unwrap());

        document
            .select(forms)
            .map(|form| FormNode {
                field_count: form.select(fields).count(),
                has_submit: form.select(submits).next().is_some(),
            })
            .collect()
    }

    fn extract_scripts(document: &Html) -> (Vec<ScriptNode>, Vec<serde_json::Value>) {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("script").unwrap());

        let mut scripts = Vec::new();
        let mut structured = Vec::new();

        for el in document.select(selector) {
            let inline = el.text().collect::<String>();
            let is_json_ld = el
                .value()
                .attr("type")
                .map(|t| t.eq_ignore_ascii_case("application/ld+json"))
                .unwrap_or(false);

            if is_json_ld {
                // Malformed JSON-LD is skipped, not an error and not detected.
                match serde_json::from_str::<serde_json::Value>(&inline) {
                    Ok(value) => structured.push(value),
                    Err(e) => debug!("Skipping malformed JSON-LD block: {}", e),
                }
            }

            scripts.push(ScriptNode {
                src: el.value().attr("src").unwrap_or_default().trim().to_string(),
                inline_text: inline,
            });
        }

        (scripts, structured)
    }

    fn extract_sectioning(document: &Html) -> SectioningCounts {
        fn count(document: &Html, selector: &Selector) -> usize {
            document.select(selector).count()
        }

        static HEADER: OnceLock<Selector> = OnceLock::new();
        static NAV: OnceLock<Selector> = OnceLock::new();
        static MAIN: OnceLock<Selector> = OnceLock::new();
        static ARTICLE: OnceLock<Selector> = OnceLock::new();
        static SECTION: OnceLock<Selector> = OnceLock::new();
        static ASIDE: OnceLock<Selector> = OnceLock::new();
        static FOOTER: OnceLock<Selector> = OnceLock::new();

        SectioningCounts {
            header: count(document, HEADER.get_or_init(|| Selector::parse("header").unwrap())),
            nav: count(document, NAV.get_or_init(|| Selector::parse("nav").unwrap())),
            main: count(document, MAIN.get_or_init(|| Selector::parse("main").unwrap())),
            article: count(document, ARTICLE.get_or_init(|| Selector::parse("article").unwrap())),
            section: count(document, SECTION.get_or_init(|| Selector::parse("section").unwrap())),
            aside: count(document, ASIDE.get_or_init(|| Selector::parse("aside").unwrap())),
            footer: count(document, FOOTER.get_or_init(|| Selector::parse("footer").unwrap())),
        }
    }

    fn count_aria_elements(document: &Html) -> usize {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("*").unwrap());

        document
            .select(selector)
            .filter(|el| {
                el.value().attr("role").is_some()
                    || el.value().attrs().any(|(name, _)| name.starts_with("aria-"))
            })
            .count()
    }

    /// Visible body text with script/style/noscript/template content excluded.
    fn extract_body_text(document: &Html) -> String {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("body").unwrap());

        let Some(body) = document.select(selector).next() else {
            return String::new();
        };

        let mut out = String::new();
        for node in body.descendants() {
            if let Some(text) = node.value().as_text() {
                let hidden = node
                    .parent()
                    .and_then(ElementRef::wrap)
                    .map(|p| matches!(p.value().name(), "script" | "style" | "noscript" | "template"))
                    .unwrap_or(false);
                if !hidden {
                    out.push_str(text);
                    out.push(' ');
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_title_and_meta_tags() {
        let html = r#"<html><head>
            <title> My Page </title>
            <meta name="description" content="A description">
            <meta property="og:title" content="OG Title">
        </head><body></body></html>"#;
        let snap = PageExtractor::extract("https://example.com", html);

        assert_eq!(snap.title.as_deref(), Some("My Page"));
        assert_eq!(snap.meta("description"), Some("A description"));
        assert_eq!(snap.meta("og:title"), Some("OG Title"));
    }

    #[test]
    fn absent_elements_produce_empty_defaults() {
        let snap = PageExtractor::extract("https://example.com", "<html><body></body></html>");
        assert!(snap.images.is_empty());
        assert!(snap.scripts.is_empty());
        assert!(snap.canonical_href.is_none());
        assert!(snap.performance.is_none());
        assert_eq!(snap.body_text.trim(), "");
    }

    #[test]
    fn distinguishes_missing_alt_from_empty_alt() {
        let html = r#"<body><img src="a.jpg"><img src="b.jpg" alt=""><img src="c.jpg" alt="cat"></body>"#;
        let snap = PageExtractor::extract("https://example.com", html);

        assert_eq!(snap.images.len(), 3);
        assert!(!snap.images[0].has_alt_attribute);
        assert!(snap.images[1].has_alt_attribute);
        assert!(snap.images[1].alt_text.is_empty());
        assert_eq!(snap.images[2].alt_text, "cat");
    }

    #[test]
    fn marks_links_inside_nav_ancestors() {
        let html = r##"<body>
            <nav><a href="#">Products</a></nav>
            <div class="menu wrapper"><a href="#">Services</a></div>
            <p><a href="#">Dangling</a></p>
        </body>"##;
        let snap = PageExtractor::extract("https://example.com", html);

        assert_eq!(snap.links.len(), 3);
        assert!(snap.links[0].in_nav_ancestor);
        assert!(snap.links[1].in_nav_ancestor);
        assert!(!snap.links[2].in_nav_ancestor);
    }

    #[test]
    fn malformed_json_ld_is_skipped_silently() {
        let html = r#"<head>
            <script type="application/ld+json">{"@type": "Organization"}</script>
            <script type="application/ld+json">{not json at all</script>
        </head>"#;
        let snap = PageExtractor::extract("https://example.com", html);

        assert_eq!(snap.structured_data.len(), 1);
        assert_eq!(snap.scripts.len(), 2);
    }

    #[test]
    fn body_text_excludes_script_and_style_content() {
        let html = r#"<body>
            <p>Visible words here</p>
            <script>var invisible = "tokens";</script>
            <style>.hidden { color: red; }</style>
        </body>"#;
        let snap = PageExtractor::extract("https://example.com", html);

        assert!(snap.body_text.contains("Visible words here"));
        assert!(!snap.body_text.contains("invisible"));
        assert!(!snap.body_text.contains("color"));
    }

    #[test]
    fn label_detection_covers_for_attribute_and_wrapping() {
        let html = r#"<body><form>
            <label for="email">Email</label><input type="email" id="email">
            <label>Name <input type="text"></label>
            <input type="text" placeholder="orphan">
            <input type="submit" value="Send">
        </form></body>"#;
        let snap = PageExtractor::extract("https://example.com", html);

        // The submit control is excluded from the labeling check.
        assert_eq!(snap.inputs.len(), 3);
        assert!(snap.inputs[0].has_label);
        assert!(snap.inputs[1].has_label);
        assert!(!snap.inputs[2].has_label);

        assert_eq!(snap.forms.len(), 1);
        assert!(snap.forms[0].has_submit);
        assert_eq!(snap.forms[0].field_count, 4);
    }
}
