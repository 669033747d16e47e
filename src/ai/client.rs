use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use super::decode::parse_or_empty;
use super::dto::{ChatMessage, ChatRequest, ChatResponse, NutritionFacts, RecipeHit};
use crate::config::AiConfig;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

const NUTRITION_SYSTEM_PROMPT: &str = "You are a nutrition label reader. Analyze the image of a nutrition label and extract the following information as a JSON object:\n\
- \"name\": string (product name if visible, otherwise best guess from the label)\n\
- \"brand\": string or null (brand name if visible)\n\
- \"serving_size\": string (e.g. \"1 cup (240ml)\")\n\
- \"calories\": number\n\
- \"total_fat\": number (grams)\n\
- \"saturated_fat\": number (grams)\n\
- \"trans_fat\": number (grams)\n\
- \"cholesterol\": number (mg)\n\
- \"sodium\": number (mg)\n\
- \"total_carbs\": number (grams)\n\
- \"dietary_fiber\": number (grams)\n\
- \"total_sugars\": number (grams)\n\
- \"protein\": number (grams)\n\n\
Return ONLY the JSON object, no markdown, no code fences, no extra text. If a value is not visible, use 0.";

const SEARCH_SYSTEM_PROMPT: &str = "You are a recipe search assistant. When given a search query, return exactly 6 recipes as a JSON array. Each recipe must have these fields:\n\
- \"name\": string (recipe name)\n\
- \"description\": string (1-2 sentence description)\n\
- \"instructions\": string (detailed step-by-step cooking instructions, each step numbered on a new line)\n\
- \"source_url\": string (a real URL to a popular recipe website where this or a very similar recipe can be found)\n\
- \"ingredients\": array of objects with \"ingredient_name\" (string), \"default_quantity\" (number), \"default_unit\" (string like \"cups\", \"lbs\", \"oz\", \"pieces\", \"tbsp\", \"tsp\", \"cloves\", \"cans\")\n\n\
Return ONLY the JSON array, no markdown, no code fences, no extra text.";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI rate limit exceeded")]
    RateLimited,
    #[error("AI credits exhausted")]
    QuotaExhausted,
    #[error("AI gateway returned {status}: {body}")]
    Gateway { status: StatusCode, body: String },
    #[error("AI request failed: {0}")]
    Network(#[from] reqwest::Error),
}

#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Extract macro data from a photographed nutrition label.
    async fn analyze_nutrition(&self, image_url: &str) -> Result<NutritionFacts, AiError>;
    /// Generate recipe suggestions for a free-text query.
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeHit>, AiError>;
}

/// AI gateway speaking the OpenAI-compatible chat-completions protocol.
pub struct ChatGateway {
    http: Client,
    cfg: AiConfig,
}

impl ChatGateway {
    pub fn new(cfg: AiConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, cfg }
    }

    /// One round trip to the gateway; returns the first choice's content.
    async fn complete(&self, request: ChatRequest) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.cfg.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.cfg.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "AI gateway error");
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => AiError::RateLimited,
                StatusCode::PAYMENT_REQUIRED => AiError::QuotaExhausted,
                _ => AiError::Gateway { status, body },
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        debug!(len = content.len(), "AI completion received");
        Ok(content)
    }
}

#[async_trait]
impl AiGateway for ChatGateway {
    async fn analyze_nutrition(&self, image_url: &str) -> Result<NutritionFacts, AiError> {
        let request = ChatRequest {
            model: self.cfg.vision_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: json!(NUTRITION_SYSTEM_PROMPT),
                },
                ChatMessage {
                    role: "user",
                    content: json!([
                        { "type": "text", "text": "Extract the nutritional information from this label." },
                        { "type": "image_url", "image_url": { "url": image_url } }
                    ]),
                },
            ],
            temperature: 0.2,
        };
        let content = self.complete(request).await?;
        Ok(parse_or_empty(&content))
    }

    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeHit>, AiError> {
        let request = ChatRequest {
            model: self.cfg.search_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: json!(SEARCH_SYSTEM_PROMPT),
                },
                ChatMessage {
                    role: "user",
                    content: json!(format!("Search for recipes: {query}")),
                },
            ],
            temperature: 0.7,
        };
        let content = self.complete(request).await?;
        Ok(parse_or_empty(&content))
    }
}
