//! Delivery records: an employee received an item on a date, and signed for it.
//!
//! Two creation shapes exist. The flat [`NewDelivery`] references an employee
//! and an item by id. The compound [`DeliveryBundle`] carries the employee and
//! the item by natural key, and the store resolves or creates them in the
//! same atomic unit as the record.

use crate::libs::employee::{Employee, EmployeeDraft, NewEmployee};
use crate::libs::error::{RegistryError, RegistryResult};
use crate::libs::identity::{parse_iso_date, required};
use crate::libs::item::{ItemDraft, NewItem, ProtectiveItem};
use crate::libs::messages::Message;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub id: i64,
    #[serde(rename = "colaborador_id", alias = "employee_id")]
    pub employee_id: i64,
    #[serde(rename = "epi_id", alias = "item_id")]
    pub item_id: i64,
    #[serde(rename = "data_entrega", alias = "delivery_date")]
    pub delivery_date: NaiveDate,
    /// Opaque signature payload (usually a data URL of the signature image).
    #[serde(rename = "assinatura_data", alias = "signature_data")]
    pub signature_data: String,
    #[serde(default, rename = "observacoes", alias = "notes")]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat delivery payload referencing existing ids.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryDraft {
    #[serde(alias = "colaborador_id")]
    pub employee_id: Option<i64>,
    #[serde(alias = "epi_id")]
    pub item_id: Option<i64>,
    #[serde(alias = "data_entrega")]
    pub delivery_date: Option<String>,
    #[serde(alias = "assinatura_data")]
    pub signature_data: Option<String>,
    #[serde(alias = "observacoes")]
    pub notes: Option<String>,
}

/// Record part of a compound payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordDraft {
    #[serde(alias = "data_entrega")]
    pub delivery_date: Option<String>,
    #[serde(alias = "assinatura_data")]
    pub signature_data: Option<String>,
    #[serde(alias = "observacoes")]
    pub notes: Option<String>,
}

/// Compound payload: employee, item and record in one request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryBundleDraft {
    #[serde(alias = "colaborador")]
    pub employee: Option<EmployeeDraft>,
    #[serde(alias = "epi")]
    pub item: Option<ItemDraft>,
    #[serde(alias = "registro")]
    pub record: Option<RecordDraft>,
}

/// Validated record fields shared by both creation shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryDetails {
    pub delivery_date: NaiveDate,
    pub signature_data: String,
    pub notes: String,
}

impl DeliveryDetails {
    fn parse(delivery_date: Option<&str>, signature_data: Option<&str>, notes: Option<&str>) -> RegistryResult<Self> {
        let delivery_date = required("delivery_date", delivery_date)?;
        let signature_data = match signature_data {
            Some(data) if !data.trim().is_empty() => data.to_string(),
            _ => return Err(RegistryError::Validation(Message::MissingField("signature_data"))),
        };
        Ok(Self {
            delivery_date: parse_iso_date("delivery_date", &delivery_date)?,
            signature_data,
            notes: notes.unwrap_or_default().to_string(),
        })
    }
}

impl TryFrom<&RecordDraft> for DeliveryDetails {
    type Error = RegistryError;

    fn try_from(draft: &RecordDraft) -> RegistryResult<Self> {
        Self::parse(draft.delivery_date.as_deref(), draft.signature_data.as_deref(), draft.notes.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDelivery {
    pub employee_id: i64,
    pub item_id: i64,
    pub details: DeliveryDetails,
}

impl TryFrom<&DeliveryDraft> for NewDelivery {
    type Error = RegistryError;

    fn try_from(draft: &DeliveryDraft) -> RegistryResult<Self> {
        let employee_id = draft.employee_id.ok_or(RegistryError::Validation(Message::MissingField("employee_id")))?;
        let item_id = draft.item_id.ok_or(RegistryError::Validation(Message::MissingField("item_id")))?;
        let details = DeliveryDetails::parse(draft.delivery_date.as_deref(), draft.signature_data.as_deref(), draft.notes.as_deref())?;
        Ok(Self { employee_id, item_id, details })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryBundle {
    pub employee: NewEmployee,
    pub item: NewItem,
    pub details: DeliveryDetails,
}

impl TryFrom<&DeliveryBundleDraft> for DeliveryBundle {
    type Error = RegistryError;

    fn try_from(draft: &DeliveryBundleDraft) -> RegistryResult<Self> {
        let (Some(employee), Some(item), Some(record)) = (&draft.employee, &draft.item, &draft.record) else {
            return Err(RegistryError::Validation(Message::IncompleteDelivery));
        };
        Ok(Self {
            employee: NewEmployee::try_from(employee)?,
            item: NewItem::try_from(item)?,
            details: DeliveryDetails::try_from(record)?,
        })
    }
}

/// Result of a compound delivery creation.
///
/// Carries the full employee and item instead of their foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub id: i64,
    #[serde(rename = "colaborador")]
    pub employee: Employee,
    #[serde(rename = "epi")]
    pub item: ProtectiveItem,
    #[serde(rename = "data_entrega")]
    pub delivery_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "colaborador_criado")]
    pub employee_created: bool,
    #[serde(rename = "epi_criado")]
    pub item_created: bool,
}

impl DeliveryReceipt {
    pub fn new(record: &DeliveryRecord, employee: Employee, employee_created: bool, item: ProtectiveItem, item_created: bool) -> Self {
        Self {
            id: record.id,
            employee,
            item,
            delivery_date: record.delivery_date,
            created_at: record.created_at,
            employee_created,
            item_created,
        }
    }
}
