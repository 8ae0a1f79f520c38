//! Raw documents as they come back from the document store, and the
//! decode-and-skip fold that turns them into typed records.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;
use crate::models::field;

/// A schema-less document keyed by its string identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }

    /// Decode the document into `T`. The document key is injected as the
    /// `id` field, overriding whatever the body carries.
    pub fn decode<T: DeserializeOwned>(&self, collection: &str) -> Result<T, AppError> {
        let mut body = self.body.clone();
        match body.as_object_mut() {
            Some(map) => {
                map.insert(field::ID.to_string(), Value::String(self.id.clone()));
            }
            None => {
                return Err(AppError::decode(
                    collection,
                    &self.id,
                    "document body is not an object",
                ))
            }
        }

        serde_json::from_value(body)
            .map_err(|err| AppError::decode(collection, &self.id, err.to_string()))
    }
}

/// Decode every document, dropping (and logging) the ones that fail.
/// A single malformed record never fails the batch.
pub fn decode_documents<T, I>(collection: &str, documents: I) -> Vec<T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = Document>,
{
    documents
        .into_iter()
        .map(|doc| doc.decode::<T>(collection))
        .filter_map(|result| match result {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!("Skipping undecodable document: {}", err);
                None
            }
        })
        .collect()
}
