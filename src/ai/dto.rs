use serde::{Deserialize, Serialize};

// --- chat-completions wire types ---

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

/// `content` is either a plain string or, for vision requests, an array of
/// text/image parts; both are valid chat-completions shapes.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

// --- extracted payloads ---

/// Macro data extracted from a nutrition-label photo. Every numeric field
/// defaults to 0 when the model could not read it; an empty `name` signals
/// extraction failure to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionFacts {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub total_fat: f64,
    #[serde(default)]
    pub saturated_fat: f64,
    #[serde(default)]
    pub trans_fat: f64,
    #[serde(default)]
    pub cholesterol: f64,
    #[serde(default)]
    pub sodium: f64,
    #[serde(default)]
    pub total_carbs: f64,
    #[serde(default)]
    pub dietary_fiber: f64,
    #[serde(default)]
    pub total_sugars: f64,
    #[serde(default)]
    pub protein: f64,
}

/// One recipe returned by the search model. Nominally six per query, not
/// contractually guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeHit {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<SearchIngredient>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIngredient {
    pub ingredient_name: String,
    #[serde(default)]
    pub default_quantity: Option<f64>,
    #[serde(default)]
    pub default_unit: Option<String>,
}
