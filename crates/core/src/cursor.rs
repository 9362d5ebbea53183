//! Pagination cursor codec.
//!
//! A cursor is the backend's last evaluated key projected to a `name -> text`
//! map, serialized as JSON and encoded as URL-safe base64 without padding.
//! Callers must treat it as opaque.
//!
//! Only string attributes can be encoded. Key schemas with numeric or binary
//! attributes are rejected with [`CursorError::UnsupportedAttribute`] rather
//! than silently converted, since they would not decode back to the same type.

use std::collections::BTreeMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

use crate::backend::Item;

/// Errors that can occur while encoding or decoding a cursor.
#[derive(Debug, Error)]
pub enum CursorError {
    #[error("failed to decode last evaluated key: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("failed to unmarshal last evaluated key: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("failed to marshal last evaluated key: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("last evaluated key attribute `{name}` is not a string")]
    UnsupportedAttribute { name: String },
}

/// Encodes a last evaluated key into an opaque cursor.
///
/// An absent or empty key encodes to the empty string, the "no more pages" sentinel.
pub fn encode_last_evaluated_key(key: Option<&Item>) -> Result<String, CursorError> {
    let key = match key {
        Some(key) if !key.is_empty() => key,
        _ => return Ok(String::new()),
    };

    let mut projected = BTreeMap::new();
    for (name, value) in key {
        match value {
            AttributeValue::S(text) => {
                projected.insert(name.as_str(), text.as_str());
            }
            _ => {
                return Err(CursorError::UnsupportedAttribute { name: name.clone() });
            }
        }
    }

    let data = serde_json::to_vec(&projected).map_err(CursorError::Serialize)?;
    Ok(URL_SAFE_NO_PAD.encode(data))
}

/// Decodes a cursor produced by [`encode_last_evaluated_key`] back into a key.
///
/// The empty string decodes to an empty key.
pub fn decode_last_evaluated_key(cursor: &str) -> Result<Item, CursorError> {
    if cursor.is_empty() {
        return Ok(Item::new());
    }

    let data = URL_SAFE_NO_PAD.decode(cursor)?;
    let projected: BTreeMap<String, String> =
        serde_json::from_slice(&data).map_err(CursorError::Deserialize)?;

    Ok(projected
        .into_iter()
        .map(|(name, text)| (name, AttributeValue::S(text)))
        .collect())
}
