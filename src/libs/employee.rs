use crate::libs::error::RegistryResult;
use crate::libs::identity::{parse_iso_date, required, required_national_id};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A staff member who receives protective equipment.
///
/// Serialized with the Portuguese names the web client reads; the English
/// names are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    #[serde(rename = "nome_completo", alias = "full_name")]
    pub full_name: String,
    /// CPF, digits only.
    #[serde(rename = "cpf", alias = "national_id")]
    pub national_id: String,
    #[serde(rename = "data_admissao", alias = "admission_date")]
    pub admission_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee fields as received from a client, before validation.
///
/// The Portuguese names used by the original clients are accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeDraft {
    #[serde(alias = "nome_completo")]
    pub full_name: Option<String>,
    #[serde(alias = "cpf")]
    pub national_id: Option<String>,
    #[serde(alias = "data_admissao")]
    pub admission_date: Option<String>,
}

impl EmployeeDraft {
    pub fn new(full_name: &str, national_id: &str, admission_date: &str) -> Self {
        Self {
            full_name: Some(full_name.to_string()),
            national_id: Some(national_id.to_string()),
            admission_date: Some(admission_date.to_string()),
        }
    }
}

/// A validated employee ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub full_name: String,
    pub national_id: String,
    pub admission_date: NaiveDate,
}

impl TryFrom<&EmployeeDraft> for NewEmployee {
    type Error = crate::libs::error::RegistryError;

    fn try_from(draft: &EmployeeDraft) -> RegistryResult<Self> {
        let full_name = required("full_name", draft.full_name.as_deref())?;
        let national_id = required_national_id("national_id", draft.national_id.as_deref())?;
        let admission_date = required("admission_date", draft.admission_date.as_deref())?;
        let admission_date = parse_iso_date("admission_date", &admission_date)?;

        Ok(Self {
            full_name,
            national_id,
            admission_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_accepts_original_field_names() {
        let draft: EmployeeDraft =
            serde_json::from_str(r#"{"nome_completo":"Ana Silva","cpf":"123.456.789-00","data_admissao":"2024-01-10"}"#).unwrap();
        let employee = NewEmployee::try_from(&draft).unwrap();
        assert_eq!(employee.full_name, "Ana Silva");
        assert_eq!(employee.national_id, "12345678900");
        assert_eq!(employee.admission_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn stored_employee_uses_client_field_names() {
        let now = Utc::now();
        let employee = Employee {
            id: 1,
            full_name: "Ana Silva".to_string(),
            national_id: "12345678900".to_string(),
            admission_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["nome_completo"], "Ana Silva");
        assert_eq!(value["cpf"], "12345678900");
        assert_eq!(value["data_admissao"], "2024-01-10");
        assert!(value.get("full_name").is_none());

        let english = serde_json::json!({
            "id": 1,
            "full_name": "Ana Silva",
            "national_id": "12345678900",
            "admission_date": "2024-01-10",
            "created_at": value["created_at"],
            "updated_at": value["updated_at"],
        });
        assert_eq!(serde_json::from_value::<Employee>(english).unwrap(), employee);
    }

    #[test]
    fn every_field_is_required() {
        let missing_name = EmployeeDraft {
            full_name: None,
            ..EmployeeDraft::new("x", "123", "2024-01-10")
        };
        assert!(NewEmployee::try_from(&missing_name).unwrap_err().is_validation());

        let missing_date = EmployeeDraft {
            admission_date: Some(String::new()),
            ..EmployeeDraft::new("Ana", "123", "2024-01-10")
        };
        assert!(NewEmployee::try_from(&missing_date).unwrap_err().is_validation());
    }
}
