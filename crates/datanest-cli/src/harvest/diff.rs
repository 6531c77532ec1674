//! Change detection against the primary store.
//!
//! Equality is "semantically identical serialized form": the stored copy
//! and the candidate are compared as canonical index documents with
//! structural equality, never as raw source rows, so storage-format
//! metadata can not cause false positives.

use serde_json::Value;

use datanest_store::{PrimaryStore, RepositoryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    New,
    Unchanged,
    Updated,
}

/// Classifies a freshly scraped record against the previous harvest's copy.
///
/// # Errors
///
/// Returns [`RepositoryError`] when the primary-store lookup fails; the
/// caller treats that as run-fatal.
pub async fn classify<P: PrimaryStore>(
    primary: &P,
    id: &str,
    candidate_doc: &Value,
) -> Result<ChangeStatus, RepositoryError> {
    match primary.retrieve(id).await? {
        None => Ok(ChangeStatus::New),
        Some(stored) if stored == *candidate_doc => Ok(ChangeStatus::Unchanged),
        Some(_) => Ok(ChangeStatus::Updated),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use datanest_store::MemoryPrimary;

    use super::*;

    #[tokio::test]
    async fn not_found_is_new() {
        let primary = MemoryPrimary::default();
        let status = classify(&primary, "org_1", &json!({"id": "org_1"}))
            .await
            .unwrap();
        assert_eq!(status, ChangeStatus::New);
    }

    #[tokio::test]
    async fn structural_equality_is_unchanged() {
        let primary = MemoryPrimary::default();
        // Key order differs; structural equality must still hold.
        primary.insert("org_1", json!({"id": "org_1", "name": "A"}));
        let status = classify(&primary, "org_1", &json!({"name": "A", "id": "org_1"}))
            .await
            .unwrap();
        assert_eq!(status, ChangeStatus::Unchanged);
    }

    #[tokio::test]
    async fn different_content_is_updated() {
        let primary = MemoryPrimary::default();
        primary.insert("org_1", json!({"id": "org_1", "name": "A"}));
        let status = classify(&primary, "org_1", &json!({"id": "org_1", "name": "B"}))
            .await
            .unwrap();
        assert_eq!(status, ChangeStatus::Updated);
    }
}
