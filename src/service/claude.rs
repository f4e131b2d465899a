//! Claude API collaborator: turns a page digest into a scored narrative.
//!
//! The engine treats this path as strictly optional. Any failure here (network,
//! HTTP status, malformed payload) surfaces as an error that the engine
//! converts into a fallback to the deterministic result.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{PageSnapshot, Priority};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const MAX_TOKENS: u32 = 4096;
const BODY_EXCERPT_CHARS: usize = 1500;

/// Compact page summary sent to the model instead of the raw HTML.
#[derive(Debug, Clone, Serialize)]
pub struct PageDigest {
    pub url: String,
    pub title: String,
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub body_excerpt: String,
    pub word_count: usize,
    pub image_count: usize,
    pub images_without_alt: usize,
    pub link_count: usize,
    pub technologies: Vec<String>,
}

impl PageDigest {
    pub fn from_snapshot(snapshot: &PageSnapshot) -> Self {
        let heading_texts = |level: u8| {
            snapshot
                .headings
                .iter()
                .filter(|h| h.level == level)
                .map(|h| h.text.clone())
                .collect::<Vec<_>>()
        };

        let tech = crate::analyzer::technical::detect_technologies(snapshot);
        let mut technologies = tech.frameworks;
        technologies.extend(tech.libraries);

        Self {
            url: snapshot.url.clone(),
            title: snapshot.title.clone().unwrap_or_default(),
            h1: heading_texts(1),
            h2: heading_texts(2),
            body_excerpt: snapshot.body_text.chars().take(BODY_EXCERPT_CHARS).collect(),
            word_count: snapshot.body_text.split_whitespace().count(),
            image_count: snapshot.images.len(),
            images_without_alt: snapshot.images.iter().filter(|i| !i.has_alt_attribute).count(),
            link_count: snapshot.links.len(),
            technologies,
        }
    }
}

/// One pillar's narrative block as the model returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiPillar {
    pub score: u8,
    pub analysis: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiRecommendation {
    pub priority: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub action: String,
    pub tips: Vec<String>,
}

impl AiRecommendation {
    /// Maps the model's free-text priority onto the fixed scale, defaulting
    /// unknown labels to Medium.
    pub fn parsed_priority(&self) -> Priority {
        match self.priority.to_lowercase().as_str() {
            "critical" | "critique" => Priority::Critical,
            "important" | "importante" => Priority::Important,
            _ => Priority::Medium,
        }
    }
}

/// Full model verdict for one page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiReport {
    pub global_score: u8,
    pub global_analysis: String,
    pub seo: AiPillar,
    pub marketing: AiPillar,
    pub ux: AiPillar,
    pub recommendations: Vec<AiRecommendation>,
}

#[async_trait]
pub trait AiAnalyzer: Send + Sync {
    async fn analyze(&self, digest: &PageDigest) -> Result<AiReport>;
}

/// Claude-backed analyzer.
pub struct ClaudeAnalyzer {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl ClaudeAnalyzer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_prompt(digest: &PageDigest) -> String {
        PROMPT_TEMPLATE
            .replace("{url}", &digest.url)
            .replace("{title}", &digest.title)
            .replace("{h1}", &digest.h1.join(" | "))
            .replace("{h2}", &digest.h2.join(" | "))
            .replace("{word_count}", &digest.word_count.to_string())
            .replace("{image_count}", &digest.image_count.to_string())
            .replace("{images_without_alt}", &digest.images_without_alt.to_string())
            .replace("{link_count}", &digest.link_count.to_string())
            .replace("{technologies}", &digest.technologies.join(", "))
            .replace("{body_excerpt}", &digest.body_excerpt)
    }
}

#[async_trait]
impl AiAnalyzer for ClaudeAnalyzer {
    async fn analyze(&self, digest: &PageDigest) -> Result<AiReport> {
        if self.api_key.is_empty() {
            anyhow::bail!("API_KEY_MISSING: no Claude API key configured");
        }

        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{
                "role": "user",
                "content": Self::build_prompt(digest)
            }]
        });

        let response = self
            .client
            .post(API_URL)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Claude API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Claude API error {}: {}", status, error_text);
        }

        let response_json: serde_json::Value =
            response.json().await.context("Failed to parse Claude API response")?;

        let text = response_json["content"][0]["text"]
            .as_str()
            .context("Failed to extract text from Claude response")?;

        let payload = extract_json_block(text)
            .context("No JSON object found in Claude response text")?;

        serde_json::from_str(payload).context("Claude response JSON does not match the report shape")
    }
}

/// Extracts the first-to-last-brace JSON object from a model reply that may
/// wrap it in prose or a code fence.
fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

const PROMPT_TEMPLATE: &str = r#"You are an expert web auditor covering SEO, marketing and UX. Analyze this page and respond with a single JSON object only, no prose around it.

Page: {url}
Title: {title}
H1: {h1}
H2: {h2}
Word count: {word_count}
Images: {image_count} ({images_without_alt} without alt text)
Links: {link_count}
Detected technologies: {technologies}

Content excerpt:
{body_excerpt}

Respond with exactly this JSON shape:
{
  "globalScore": 0-100,
  "globalAnalysis": "two or three sentences",
  "seo": {"score": 0-100, "analysis": "...", "strengths": [], "weaknesses": [], "opportunities": []},
  "marketing": {"score": 0-100, "analysis": "...", "strengths": [], "weaknesses": [], "opportunities": []},
  "ux": {"score": 0-100, "analysis": "...", "strengths": [], "weaknesses": [], "opportunities": []},
  "recommendations": [
    {"priority": "Critical|Important|Medium", "category": "SEO|Marketing|UX", "title": "...", "description": "...", "impact": "...", "action": "...", "tips": []}
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageSnapshot;

    #[test]
    fn digest_summarizes_the_snapshot() {
        let snap = PageSnapshot::builder("https://example.com")
            .title("Example")
            .heading(1, "Main")
            .heading(2, "First")
            .heading(2, "Second")
            .image("a.jpg", None)
            .image("b.jpg", Some("alt"))
            .simple_link("/x", "X")
            .body_text("some visible words here")
            .build();
        let digest = PageDigest::from_snapshot(&snap);
        assert_eq!(digest.h1, vec!["Main"]);
        assert_eq!(digest.h2.len(), 2);
        assert_eq!(digest.word_count, 4);
        assert_eq!(digest.image_count, 2);
        assert_eq!(digest.images_without_alt, 1);
        assert_eq!(digest.link_count, 1);
    }

    #[test]
    fn json_block_extracted_from_fenced_reply() {
        let reply = "Here is the audit:\n```json\n{\"globalScore\": 75}\n```\nDone.";
        assert_eq!(extract_json_block(reply), Some("{\"globalScore\": 75}"));
        assert_eq!(extract_json_block("no json here"), None);
    }

    #[test]
    fn report_parses_with_missing_fields_defaulted() {
        let report: AiReport = serde_json::from_str(
            r#"{"globalScore": 80, "seo": {"score": 70, "analysis": "ok"}}"#,
        )
        .unwrap();
        assert_eq!(report.global_score, 80);
        assert_eq!(report.seo.score, 70);
        assert!(report.marketing.analysis.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn unknown_priority_defaults_to_medium() {
        let rec = AiRecommendation { priority: "Urgent".into(), ..Default::default() };
        assert_eq!(rec.parsed_priority(), Priority::Medium);
        let rec = AiRecommendation { priority: "critique".into(), ..Default::default() };
        assert_eq!(rec.parsed_priority(), Priority::Critical);
    }
}
