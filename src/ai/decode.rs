use serde::de::DeserializeOwned;
use tracing::warn;

/// Model output frequently arrives wrapped in markdown code fences even when
/// the prompt forbids them. Strip the markers before JSON parsing.
pub fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse-or-empty decoder for AI responses: malformed JSON after
/// fence-stripping degrades to `T::default()` instead of failing the
/// request.
pub fn parse_or_empty<T: DeserializeOwned + Default>(raw: &str) -> T {
    let cleaned = strip_fences(raw);
    match serde_json::from_str(&cleaned) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "unparseable AI response, degrading to empty");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::dto::{NutritionFacts, RecipeHit};

    #[test]
    fn strips_json_fences() {
        let raw = "```json\n{\"name\":\"Oats\"}\n```";
        assert_eq!(strip_fences(raw), "{\"name\":\"Oats\"}");
    }

    #[test]
    fn strips_bare_fences_and_whitespace() {
        let raw = "```\n[]\n```\n";
        assert_eq!(strip_fences(raw), "[]");
    }

    #[test]
    fn passes_through_unfenced_content() {
        assert_eq!(strip_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn parses_fenced_nutrition() {
        let raw = "```json\n{\"name\":\"Granola\",\"calories\":220}\n```";
        let facts: NutritionFacts = parse_or_empty(raw);
        assert_eq!(facts.name, "Granola");
        assert_eq!(facts.calories, 220.0);
        // unreadable fields default to 0
        assert_eq!(facts.protein, 0.0);
    }

    #[test]
    fn malformed_json_degrades_to_default() {
        let facts: NutritionFacts = parse_or_empty("sorry, I cannot read this label");
        assert_eq!(facts.name, "");
        let recipes: Vec<RecipeHit> = parse_or_empty("```json\n[{\"broken\":\n```");
        assert!(recipes.is_empty());
    }
}
