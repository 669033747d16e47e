use serde::{Deserialize, Serialize};

use super::group::StoreBucket;
use super::repo::ShoppingItem;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub group_by_store: bool,
}

/// Flat mode preserves creation order; grouped mode emits store buckets.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListResponse {
    Flat { items: Vec<ShoppingItem> },
    Grouped { buckets: Vec<StoreBucket> },
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub ingredient_name: String,
}

/// Partial patch. Absent fields stay untouched; `store` distinguishes
/// absent (no change) from explicit null (clear the label) via the double
/// Option.
#[derive(Debug, Deserialize)]
pub struct PatchItemRequest {
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub is_purchased: Option<bool>,
    #[serde(default, with = "double_option")]
    pub store: Option<Option<String>>,
}

/// Keeps `"store": null` distinguishable from a missing key.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_absent_null_and_value_for_store() {
        let absent: PatchItemRequest = serde_json::from_str(r#"{"quantity": 2.5}"#).unwrap();
        assert_eq!(absent.store, None);
        assert_eq!(absent.quantity, Some(2.5));

        let cleared: PatchItemRequest = serde_json::from_str(r#"{"store": null}"#).unwrap();
        assert_eq!(cleared.store, Some(None));

        let set: PatchItemRequest = serde_json::from_str(r#"{"store": "Costco"}"#).unwrap();
        assert_eq!(set.store, Some(Some("Costco".into())));
    }

    #[test]
    fn patch_with_only_purchased_leaves_other_fields_absent() {
        let p: PatchItemRequest = serde_json::from_str(r#"{"is_purchased": true}"#).unwrap();
        assert_eq!(p.is_purchased, Some(true));
        assert_eq!(p.quantity, None);
        assert_eq!(p.unit, None);
        assert_eq!(p.store, None);
    }
}
