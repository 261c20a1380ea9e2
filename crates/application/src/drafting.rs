//! Post drafting and triage on the fast model

use domain::entities::PostType;
use domain::RiskLevel;
use llm::{generate_structured, GenerationRequest, GenerativeModel, LlmError, ResponseSchema};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::errors::AppResult;

pub const EMPTY_DRAFT_PLACEHOLDER: &str = "A beautiful day in the cat circle";

pub const MEDICAL_RISK_WARNING: &str =
    "This looks like a medical risk. For safety, please check with the Cat Assistant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriageCategory {
    /// Medical risk
    Health,
    /// Care or habit question
    Behavior,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub category: TriageCategory,
    pub risk_level: RiskLevel,
    pub should_go_to_vet: bool,
    pub suggested_post_type: PostType,
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl TriageResult {
    /// Health concerns and high risk go to the assistant instead of the feed
    pub fn needs_assistant(&self) -> bool {
        self.category == TriageCategory::Health || self.risk_level.needs_attention()
    }
}

pub fn triage_schema() -> ResponseSchema {
    ResponseSchema::object()
        .property("category", ResponseSchema::string())
        .property("riskLevel", ResponseSchema::string())
        .property("shouldGoToVet", ResponseSchema::boolean())
        .property("suggestedPostType", ResponseSchema::string())
        .property("reasoning", ResponseSchema::string())
        .require(&["category", "riskLevel", "shouldGoToVet", "suggestedPostType"])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftStyle {
    #[default]
    Cute,
    Witty,
    Pro,
    Story,
}

impl DraftStyle {
    pub const ALL: [DraftStyle; 4] = [
        DraftStyle::Cute,
        DraftStyle::Witty,
        DraftStyle::Pro,
        DraftStyle::Story,
    ];

    pub fn instruction(&self) -> &'static str {
        match self {
            DraftStyle::Cute => {
                "Make it extremely cute, friendly, enthusiastic, and full of feline-themed emojis."
            }
            DraftStyle::Witty => {
                "Make it funny, sassy, slightly sarcastic, and from the cat's perspective if possible."
            }
            DraftStyle::Pro => {
                "Make it informative, structured, clear, and professional like an experienced vet tech or cat expert."
            }
            DraftStyle::Story => {
                "Make it an engaging, warm narrative with emotional depth and descriptive language."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStyle::Cute => "Cute",
            DraftStyle::Witty => "Witty",
            DraftStyle::Pro => "Pro",
            DraftStyle::Story => "Story",
        }
    }
}

impl fmt::Display for DraftStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown style '{}', expected Cute, Witty, Pro or Story", s))
    }
}

/// Result of the guarded drafting flow
#[derive(Debug, Clone, PartialEq)]
pub enum DraftOutcome {
    Draft(String),
    /// Triage flagged the text; the owner should ask the assistant instead
    RedirectToAssistant {
        triage: TriageResult,
        warning: &'static str,
    },
}

pub fn build_triage_prompt(query: &str) -> String {
    format!(
        r#"Evaluate the following cat-related query: "{}".
Return a JSON object with:
1. category: "HEALTH" (medical risk) or "BEHAVIOR" (care/habit)
2. riskLevel: "Low", "Medium", or "High"
3. shouldGoToVet: boolean
4. suggestedPostType: "CARE_TIPS" or "PROBLEM"
5. reasoning: brief explanation."#,
        query
    )
}

pub fn build_draft_prompt(raw_content: &str, post_type: PostType, style: DraftStyle) -> String {
    let content = if raw_content.trim().is_empty() {
        EMPTY_DRAFT_PLACEHOLDER
    } else {
        raw_content
    };

    format!(
        r#"Act as an expert social media copywriter for a cat community.
Original Content: "{}"
Post Category: {}
Requested Style: {}

TASK: Polish and optimize the original content. Enhance the flow, improve the vocabulary, and make it engaging for other cat owners.
Maintain the core message of the original text but make it sound more professional and polished.
Include 2-3 relevant hashtags at the very end.
Output ONLY the polished text."#,
        content,
        post_type,
        style.instruction()
    )
}

#[derive(Clone)]
pub struct DraftingService {
    model: Arc<dyn GenerativeModel>,
}

impl DraftingService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn triage_query(&self, query: &str) -> AppResult<TriageResult> {
        let request = GenerationRequest::new(build_triage_prompt(query));
        let triage: TriageResult =
            generate_structured(self.model.as_ref(), request, triage_schema()).await?;
        info!(category = ?triage.category, risk = %triage.risk_level, "Triage complete");
        Ok(triage)
    }

    /// Polished post text (plain text, not JSON)
    pub async fn generate_post_draft(
        &self,
        raw_content: &str,
        post_type: PostType,
        style: DraftStyle,
    ) -> AppResult<String> {
        let request = GenerationRequest::new(build_draft_prompt(raw_content.trim(), post_type, style));
        let draft = self.model.generate(request).await?;
        let draft = draft.trim();
        if draft.is_empty() {
            return Err(LlmError::EmptyResponse.into());
        }
        Ok(draft.to_string())
    }

    /// Draft with the medical guard: PROBLEM posts are triaged first and
    /// health or high-risk content is not polished.
    pub async fn draft_post(
        &self,
        raw_content: &str,
        post_type: PostType,
        style: DraftStyle,
    ) -> AppResult<DraftOutcome> {
        if post_type == PostType::Problem && !raw_content.trim().is_empty() {
            let triage = self.triage_query(raw_content).await?;
            if triage.needs_assistant() {
                warn!(risk = %triage.risk_level, "Draft refused, redirecting to assistant");
                return Ok(DraftOutcome::RedirectToAssistant {
                    triage,
                    warning: MEDICAL_RISK_WARNING,
                });
            }
        }

        let draft = self.generate_post_draft(raw_content, post_type, style).await?;
        Ok(DraftOutcome::Draft(draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::ScriptedModel;
    use serde_json::json;

    fn triage_reply(category: &str, risk: &str) -> String {
        json!({
            "category": category,
            "riskLevel": risk,
            "shouldGoToVet": category == "HEALTH",
            "suggestedPostType": "PROBLEM",
            "reasoning": "test"
        })
        .to_string()
    }

    #[test]
    fn test_style_parsing_and_default() {
        assert_eq!(DraftStyle::default(), DraftStyle::Cute);
        assert_eq!("witty".parse::<DraftStyle>().unwrap(), DraftStyle::Witty);
        assert!("loud".parse::<DraftStyle>().is_err());
    }

    #[test]
    fn test_empty_draft_uses_placeholder() {
        let prompt = build_draft_prompt("  ", PostType::Daily, DraftStyle::Story);
        assert!(prompt.contains("Original Content: \"A beautiful day in the cat circle\""));
        assert!(prompt.contains("Post Category: DAILY"));
        assert!(prompt.contains(DraftStyle::Story.instruction()));
    }

    #[tokio::test]
    async fn test_triage_parses_result() {
        let model = Arc::new(ScriptedModel::new("fast").reply(triage_reply("BEHAVIOR", "Low")));
        let triage = DraftingService::new(model).triage_query("scratching sofa").await.unwrap();

        assert_eq!(triage.category, TriageCategory::Behavior);
        assert_eq!(triage.suggested_post_type, PostType::Problem);
        assert!(!triage.needs_assistant());
    }

    #[tokio::test]
    async fn test_problem_post_with_health_risk_is_redirected() {
        let model = Arc::new(ScriptedModel::new("fast").reply(triage_reply("HEALTH", "Medium")));
        let outcome = DraftingService::new(model.clone())
            .draft_post("He hasn't peed all day", PostType::Problem, DraftStyle::Pro)
            .await
            .unwrap();

        match outcome {
            DraftOutcome::RedirectToAssistant { warning, .. } => {
                assert_eq!(warning, MEDICAL_RISK_WARNING)
            }
            other => panic!("expected redirect, got {:?}", other),
        }
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_high_risk_behavior_is_redirected() {
        let model = Arc::new(ScriptedModel::new("fast").reply(triage_reply("BEHAVIOR", "High")));
        let outcome = DraftingService::new(model)
            .draft_post("Attacks everyone", PostType::Problem, DraftStyle::Cute)
            .await
            .unwrap();
        assert!(matches!(outcome, DraftOutcome::RedirectToAssistant { .. }));
    }

    #[tokio::test]
    async fn test_safe_problem_post_is_drafted() {
        let model = Arc::new(
            ScriptedModel::new("fast")
                .reply(triage_reply("BEHAVIOR", "Low"))
                .reply("  Sofa scratching tips! #CatLife  "),
        );
        let outcome = DraftingService::new(model.clone())
            .draft_post("scratching sofa", PostType::Problem, DraftStyle::Witty)
            .await
            .unwrap();

        assert_eq!(outcome, DraftOutcome::Draft("Sofa scratching tips! #CatLife".into()));
        assert_eq!(model.call_count(), 2);
        assert!(model.requests()[1].response_schema.is_none());
    }

    #[tokio::test]
    async fn test_daily_post_skips_triage() {
        let model = Arc::new(ScriptedModel::new("fast").reply("Sunny nap time ☀️ #Caturday"));
        let outcome = DraftingService::new(model.clone())
            .draft_post("nap", PostType::Daily, DraftStyle::Cute)
            .await
            .unwrap();

        assert!(matches!(outcome, DraftOutcome::Draft(_)));
        assert_eq!(model.call_count(), 1);
    }
}
