//! Request body shapes.
//!
//! Creation bodies are accepted flat or wrapped in an envelope
//! (`{"colaborador": {...}}`, `{"epi": {...}}`), the way the original clients
//! send them. A delivery body with `employee`/`item`/`record` envelopes is the
//! compound variant; anything else is the flat variant.

use super::error::{ApiError, ApiResult};
use crate::libs::delivery::{DeliveryBundleDraft, DeliveryDraft};
use crate::libs::employee::EmployeeDraft;
use crate::libs::item::ItemDraft;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

const EMPLOYEE_ENVELOPES: &[&str] = &["employee", "colaborador"];
const ITEM_ENVELOPES: &[&str] = &["item", "epi"];
const BUNDLE_KEYS: &[&str] = &["employee", "colaborador", "item", "epi", "record", "registro"];

/// Query string of the employee listing.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeSearch {
    #[serde(alias = "name")]
    pub nome: Option<String>,
}

#[derive(Debug)]
pub enum DeliveryPayload {
    Bundle(DeliveryBundleDraft),
    Flat(DeliveryDraft),
}

impl DeliveryPayload {
    pub fn from_value(value: Value) -> ApiResult<Self> {
        let is_bundle = value
            .as_object()
            .is_some_and(|map| BUNDLE_KEYS.iter().any(|key| map.contains_key(*key)));

        if is_bundle {
            Ok(Self::Bundle(decode(value)?))
        } else {
            Ok(Self::Flat(decode(value)?))
        }
    }
}

pub fn employee_draft(value: Value) -> ApiResult<EmployeeDraft> {
    decode(unwrap_envelope(value, EMPLOYEE_ENVELOPES))
}

pub fn item_draft(value: Value) -> ApiResult<ItemDraft> {
    decode(unwrap_envelope(value, ITEM_ENVELOPES))
}

fn unwrap_envelope(value: Value, envelopes: &[&str]) -> Value {
    if let Value::Object(map) = &value {
        if let Some(inner) = envelopes.iter().find_map(|key| map.get(*key)) {
            return inner.clone();
        }
    }
    value
}

fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|err| ApiError::BadRequest(format!("Invalid request body: {}", err)))
}
