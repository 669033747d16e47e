use std::collections::BTreeMap;

use serde::Serialize;

use super::repo::ShoppingItem;

/// Bucket label for items with no store assigned. Not special-cased in the
/// ordering: it sorts wherever the literal falls among the store names.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Serialize)]
pub struct StoreBucket {
    pub store: String,
    pub items: Vec<ShoppingItem>,
}

/// Partitions items by store label. Buckets come out in case-sensitive
/// byte-wise key order; within a bucket the input (creation) order is kept.
pub fn group_by_store(items: Vec<ShoppingItem>) -> Vec<StoreBucket> {
    let mut buckets: BTreeMap<String, Vec<ShoppingItem>> = BTreeMap::new();
    for item in items {
        let key = item
            .store
            .clone()
            .unwrap_or_else(|| UNASSIGNED.to_string());
        buckets.entry(key).or_default().push(item);
    }
    buckets
        .into_iter()
        .map(|(store, items)| StoreBucket { store, items })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn item(name: &str, store: Option<&str>) -> ShoppingItem {
        ShoppingItem {
            id: Uuid::new_v4(),
            ingredient_name: name.into(),
            quantity: 1.0,
            unit: "pieces".into(),
            store: store.map(Into::into),
            is_purchased: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn preserves_input_order_within_a_bucket() {
        let buckets = group_by_store(vec![
            item("Apples", Some("Costco")),
            item("Bread", Some("Costco")),
            item("Cheese", Some("Costco")),
        ]);
        assert_eq!(buckets.len(), 1);
        let names: Vec<_> = buckets[0]
            .items
            .iter()
            .map(|i| i.ingredient_name.as_str())
            .collect();
        assert_eq!(names, vec!["Apples", "Bread", "Cheese"]);
    }

    #[test]
    fn unassigned_sorts_lexicographically_not_pinned() {
        let buckets = group_by_store(vec![
            item("Milk", Some("Walmart")),
            item("Eggs", None),
            item("Rice", Some("Costco")),
        ]);
        let keys: Vec<_> = buckets.iter().map(|b| b.store.as_str()).collect();
        assert_eq!(keys, vec!["Costco", "Unassigned", "Walmart"]);
    }

    #[test]
    fn ordering_is_case_sensitive_ordinal() {
        // 'U' (0x55) < 'a' (0x61), so a lowercase store name sorts after
        // the Unassigned bucket.
        let buckets = group_by_store(vec![
            item("Beans", Some("aldi")),
            item("Eggs", None),
            item("Rice", Some("Costco")),
        ]);
        let keys: Vec<_> = buckets.iter().map(|b| b.store.as_str()).collect();
        assert_eq!(keys, vec!["Costco", "Unassigned", "aldi"]);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(group_by_store(Vec::new()).is_empty());
    }
}
