use crate::libs::error::RegistryResult;
use crate::libs::identity::required;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogued piece of protective equipment (EPI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectiveItem {
    pub id: i64,
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
    /// CA number, stored verbatim.
    #[serde(rename = "ca", alias = "certification_code")]
    pub certification_code: String,
    #[serde(default, rename = "observacoes", alias = "notes", alias = "descricao")]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemDraft {
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "ca")]
    pub certification_code: Option<String>,
    #[serde(alias = "observacoes", alias = "descricao")]
    pub notes: Option<String>,
}

impl ItemDraft {
    pub fn new(name: &str, certification_code: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            certification_code: Some(certification_code.to_string()),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub certification_code: String,
    pub notes: String,
}

impl TryFrom<&ItemDraft> for NewItem {
    type Error = crate::libs::error::RegistryError;

    fn try_from(draft: &ItemDraft) -> RegistryResult<Self> {
        Ok(Self {
            name: required("name", draft.name.as_deref())?,
            certification_code: required("certification_code", draft.certification_code.as_deref())?,
            notes: draft.notes.clone().unwrap_or_default(),
        })
    }
}
