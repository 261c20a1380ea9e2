//! Assistant advice: retrieval, prompt, schema, strict parse

use common::OperationTimer;
use domain::entities::{AdviceMetadata, AssistantMessage, Product};
use domain::RiskLevel;
use llm::{generate_structured, GenerationRequest, GenerativeModel, ResponseSchema};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::errors::AppResult;
use crate::knowledge::retrieve_context;

/// Output contract of the advice call
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResponse {
    pub risk_level: RiskLevel,
    pub analysis: String,
    pub actionable_steps: Vec<String>,
    pub citations: Vec<String>,
    pub recommended_product_ids: Vec<String>,
    pub community_summary: String,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

impl AdviceResponse {
    pub fn into_metadata(self) -> AdviceMetadata {
        AdviceMetadata {
            risk_level: self.risk_level,
            analysis: Some(self.analysis),
            actionable_steps: self.actionable_steps,
            citations: self.citations,
            follow_up_questions: self.follow_up_questions,
            community_summary: Some(self.community_summary),
            recommended_product_ids: self.recommended_product_ids,
        }
    }
}

pub fn advice_schema() -> ResponseSchema {
    let string_list = || ResponseSchema::array_of(ResponseSchema::string());

    ResponseSchema::object()
        .property(
            "riskLevel",
            ResponseSchema::string().describe("Low, Medium, or High"),
        )
        .property(
            "analysis",
            ResponseSchema::string().describe("Detailed medical/behavioral advice."),
        )
        .property(
            "actionableSteps",
            string_list().describe("Specific steps to take."),
        )
        .property(
            "citations",
            string_list().describe("Sources or topics referenced."),
        )
        .property(
            "recommendedProductIds",
            string_list().describe("List of matching product IDs from catalog."),
        )
        .property(
            "communitySummary",
            ResponseSchema::string().describe("Short summary for social sharing."),
        )
        .property(
            "followUpQuestions",
            string_list().describe("Optional questions to ask the owner next."),
        )
        .require(&[
            "riskLevel",
            "analysis",
            "actionableSteps",
            "citations",
            "communitySummary",
            "recommendedProductIds",
        ])
}

/// One catalog line per product: id, name, USD price, description
pub fn catalog_context(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| {
            format!(
                "- ID: {}, Name: {}, Price: {}USD, Desc: {}",
                p.id, p.name, p.usd_price, p.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn history_context(history: &[AssistantMessage]) -> String {
    history
        .iter()
        .map(|m| {
            let speaker = if m.is_from_user() { "Owner" } else { "Assistant" };
            format!("{}: {}", speaker, m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_advice_prompt(query: &str, history: &[AssistantMessage], products: &[Product]) -> String {
    let mut prompt = format!(
        r#"You are the CatCircle AI Assistant. Your mission is two-fold:
1. Provide expert-level feline health and behavioral advice based on professional veterinary knowledge.
2. Act as a personal shopping concierge by recommending relevant products from our in-app Mall that directly address the user's concerns.

VET KNOWLEDGE CONTEXT:
{}

MALL PRODUCTS CATALOG:
{}
"#,
        retrieve_context(query),
        catalog_context(products)
    );

    if !history.is_empty() {
        prompt.push_str(&format!("\nCONVERSATION SO FAR:\n{}\n", history_context(history)));
    }

    prompt.push_str(&format!(
        r#"
USER INQUIRY: "{}"

GUIDELINES:
- If the user mentions health symptoms, prioritize medical safety and risk assessment.
- Always look through the MALL PRODUCTS CATALOG. If a product (like specific food, supplements, or gear) is relevant to the solution, include its ID in 'recommendedProductIds'.
- Provide a 'communitySummary' that the user can share to the feed.

Response must be valid JSON."#,
        query
    ));
    prompt
}

/// Advice flow over a reasoning model. Single attempt, no retry.
#[derive(Clone)]
pub struct AdviceService {
    model: Arc<dyn GenerativeModel>,
}

impl AdviceService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn get_advice(
        &self,
        query: &str,
        history: &[AssistantMessage],
        products: &[Product],
    ) -> AppResult<AdviceResponse> {
        let mut timer = OperationTimer::new("assistant_advice");
        timer.add_field("model", self.model.model_name());
        timer.add_field("history", history.len());

        let request = GenerationRequest::new(build_advice_prompt(query, history, products));
        let result =
            generate_structured::<AdviceResponse>(self.model.as_ref(), request, advice_schema())
                .await;
        timer.finish_with_result(&result);

        let mut advice = result?;
        retain_known_products(&mut advice.recommended_product_ids, products);
        info!(risk = %advice.risk_level, products = advice.recommended_product_ids.len(), "Advice ready");
        Ok(advice)
    }
}

/// Drop recommended ids that are not in the catalog
fn retain_known_products(ids: &mut Vec<String>, products: &[Product]) {
    ids.retain(|id| {
        let known = products.iter().any(|p| &p.id == id);
        if !known {
            warn!(product_id = %id, "Model recommended a product outside the catalog");
        }
        known
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::fixtures;
    use llm::ScriptedModel;
    use serde_json::json;

    fn reply(ids: &[&str]) -> String {
        json!({
            "riskLevel": "Medium",
            "analysis": "Watch the litter box closely.",
            "actionableSteps": ["Track urination", "Call your vet if straining"],
            "citations": ["Urinary Issues"],
            "recommendedProductIds": ids,
            "communitySummary": "Straining can be urgent."
        })
        .to_string()
    }

    #[test]
    fn test_prompt_embeds_context_and_catalog() {
        let products = fixtures::products();
        let prompt = build_advice_prompt("He is straining, urinary problem?", &[], &products);

        assert!(prompt.contains("[Source: Urinary Issues]"));
        assert!(prompt.contains(&format!("- ID: {}, Name: {}", products[0].id, products[0].name)));
        assert!(prompt.contains("USER INQUIRY: \"He is straining, urinary problem?\""));
        assert!(!prompt.contains("CONVERSATION SO FAR"));
    }

    #[test]
    fn test_prompt_includes_history() {
        let history = vec![AssistantMessage::user("Hi"), AssistantMessage::assistant("Hello!")];
        let prompt = build_advice_prompt("xyz", &history, &[]);
        assert!(prompt.contains("CONVERSATION SO FAR:\nOwner: Hi\nAssistant: Hello!"));
    }

    #[tokio::test]
    async fn test_unknown_products_are_dropped() {
        let products = fixtures::products();
        let known = products[0].id.clone();
        let model = Arc::new(ScriptedModel::new("scripted").reply(reply(&[&known, "pr_missing"])));

        let advice = AdviceService::new(model.clone())
            .get_advice("urinary", &[], &products)
            .await
            .unwrap();

        assert_eq!(advice.risk_level, RiskLevel::Medium);
        assert_eq!(advice.recommended_product_ids, vec![known]);

        let request = &model.requests()[0];
        assert_eq!(request.response_schema, Some(advice_schema()));
    }

    #[tokio::test]
    async fn test_invalid_risk_level_fails_closed() {
        let bad = reply(&[]).replace("Medium", "Catastrophic");
        let model = Arc::new(ScriptedModel::new("scripted").reply(bad));

        let result = AdviceService::new(model).get_advice("q", &[], &[]).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_into_metadata() {
        let response: AdviceResponse = serde_json::from_str(&reply(&["pr1"])).unwrap();
        let metadata = response.into_metadata();
        assert_eq!(metadata.community_summary.as_deref(), Some("Straining can be urgent."));
        assert_eq!(metadata.actionable_steps.len(), 2);
        assert!(metadata.follow_up_questions.is_empty());
    }
}
