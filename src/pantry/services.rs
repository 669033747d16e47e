use anyhow::Context;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use super::repo::{self, BankEntry};
use crate::ai::AiGateway;
use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::StorageClient;

pub struct LabelUpload {
    pub body: Bytes,
    pub content_type: String,
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

fn object_key(user_id: Uuid, content_type: &str) -> String {
    let ext = ext_from_mime(content_type).unwrap_or("jpg");
    format!("labels/{}/{}.{}", user_id, Uuid::new_v4(), ext)
}

/// Label pipeline: upload to object storage, hand the public URL to the AI
/// extractor, insert the bank entry. Non-image uploads are rejected before
/// any storage or AI call. The pipeline is strictly sequential with no
/// compensating rollback; if extraction fails after a successful upload,
/// the object stays orphaned.
pub async fn analyze_and_store(
    state: &AppState,
    user_id: Uuid,
    upload: LabelUpload,
) -> Result<BankEntry, ApiError> {
    if !upload.content_type.starts_with("image/") {
        return Err(ApiError::Validation("Please select an image file".into()));
    }

    let key = object_key(user_id, &upload.content_type);
    state
        .storage
        .put_object(&key, upload.body, &upload.content_type)
        .await
        .context("upload label image")?;
    let image_url = state.storage.public_url(&key);

    let facts = state.ai.analyze_nutrition(&image_url).await?;
    if facts.name.trim().is_empty() {
        return Err(ApiError::Unreadable(
            "Could not read label. Try a clearer photo of the nutrition facts.".into(),
        ));
    }

    let entry = repo::insert(&state.db, user_id, &facts, &image_url, &key).await?;
    info!(entry_id = %entry.id, name = %entry.name, "ingredient saved to bank");
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::dto::{NutritionFacts, RecipeHit};
    use crate::ai::AiError;
    use axum::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingStorage {
        puts: AtomicUsize,
    }

    #[async_trait]
    impl StorageClient for CountingStorage {
        async fn put_object(&self, _k: &str, _b: Bytes, _ct: &str) -> anyhow::Result<()> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn delete_object(&self, _k: &str) -> anyhow::Result<()> {
            Ok(())
        }
        fn public_url(&self, key: &str) -> String {
            format!("mem://{key}")
        }
    }

    struct BlankGateway;

    #[async_trait]
    impl AiGateway for BlankGateway {
        async fn analyze_nutrition(&self, _image_url: &str) -> Result<NutritionFacts, AiError> {
            Ok(NutritionFacts::default())
        }
        async fn search_recipes(&self, _query: &str) -> Result<Vec<RecipeHit>, AiError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("image/heic"), Some("heic"));
        assert_eq!(ext_from_mime("application/octet-stream"), None);
        assert_eq!(ext_from_mime("whatever/else"), None);
    }

    #[test]
    fn object_keys_are_scoped_to_the_user() {
        let user_id = Uuid::new_v4();
        let key = object_key(user_id, "image/png");
        assert!(key.starts_with(&format!("labels/{}/", user_id)));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn unrecognized_image_mime_defaults_to_jpg() {
        let key = object_key(Uuid::new_v4(), "image/tiff");
        assert!(key.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn non_image_upload_never_reaches_storage_or_ai() {
        let storage = Arc::new(CountingStorage {
            puts: AtomicUsize::new(0),
        });
        let mut state = AppState::fake();
        state.storage = storage.clone();

        let upload = LabelUpload {
            body: Bytes::from_static(b"%PDF-1.7"),
            content_type: "application/pdf".into(),
        };
        let err = analyze_and_store(&state, Uuid::new_v4(), upload)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(storage.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_extraction_is_unreadable_not_stored() {
        let mut state = AppState::fake();
        state.ai = Arc::new(BlankGateway);

        let upload = LabelUpload {
            body: Bytes::from_static(&[0xff, 0xd8, 0xff]),
            content_type: "image/jpeg".into(),
        };
        let err = analyze_and_store(&state, Uuid::new_v4(), upload)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unreadable(_)));
    }

    #[tokio::test]
    async fn fake_state_round_trips_label_url_and_extraction() {
        let state = AppState::fake();
        let url = state.storage.public_url("labels/u/x.jpg");
        assert!(url.contains("labels/u/x.jpg"));

        let facts = state.ai.analyze_nutrition(&url).await.unwrap();
        assert_eq!(facts.name, "Rolled Oats");
        assert_eq!(facts.trans_fat, 0.0);
    }
}
