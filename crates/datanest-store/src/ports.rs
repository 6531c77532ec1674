//! Narrow store/retrieve contracts the pipeline depends on.
//!
//! Concrete back ends (full-text index, triple store, primary document
//! store) are external collaborators implementing these traits; the
//! pipeline never sees their internal protocols. Each call is expected to
//! enforce a bounded timeout inside the adapter.

use serde_json::Value;

use crate::error::RepositoryError;
use crate::payload::SerializedPayload;

/// Write side: accepts one serialized batch payload.
pub trait PayloadSink {
    fn store(
        &self,
        payload: &SerializedPayload,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// Read side of the primary store consulted for change detection.
///
/// `retrieve` returns the previous harvest's copy of a record in the same
/// canonical comparison form the change detector builds for candidates, or
/// `None` when the record has never been stored.
pub trait PrimaryStore {
    fn retrieve(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Value>, RepositoryError>> + Send;
}
