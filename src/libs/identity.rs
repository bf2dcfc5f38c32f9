//! Natural-key normalization and input parsing helpers.
//!
//! Both storage strategies go through these functions, so a CPF typed as
//! `123.456.789-00` and one typed as `12345678900` always resolve to the same
//! employee, and the name filter behaves identically on SQLite and on JSON
//! snapshots.

use crate::libs::error::{RegistryError, RegistryResult};
use crate::libs::messages::Message;
use chrono::NaiveDate;

/// Wire format for every calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Strips every non-digit character from a CPF.
pub fn normalize_national_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parses a strict `YYYY-MM-DD` date, naming `field` in the error.
pub fn parse_iso_date(field: &'static str, raw: &str) -> RegistryResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        RegistryError::Validation(Message::InvalidDate {
            field,
            value: raw.to_string(),
        })
    })
}

/// Returns the trimmed value of a required text field.
pub fn required(field: &'static str, value: Option<&str>) -> RegistryResult<String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(RegistryError::Validation(Message::MissingField(field))),
    }
}

/// Normalizes a required CPF, rejecting values without any digit.
pub fn required_national_id(field: &'static str, value: Option<&str>) -> RegistryResult<String> {
    let raw = required(field, value)?;
    let normalized = normalize_national_id(&raw);
    if normalized.is_empty() {
        return Err(RegistryError::Validation(Message::NationalIdWithoutDigits(raw)));
    }
    Ok(normalized)
}

/// Case-insensitive, unanchored substring match used by the employee name filter.
pub fn name_matches(full_name: &str, needle: &str) -> bool {
    full_name.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_spaces() {
        assert_eq!(normalize_national_id("123.456.789-00"), "12345678900");
        assert_eq!(normalize_national_id(" 123 456 789 00 "), "12345678900");
        assert_eq!(normalize_national_id("12345678900"), "12345678900");
        assert_eq!(normalize_national_id("abc"), "");
    }

    #[test]
    fn parse_accepts_iso_dates() {
        let date = parse_iso_date("admission_date", "2024-01-10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn parse_rejects_invalid_month() {
        let err = parse_iso_date("admission_date", "2024-13-01").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("admission_date"));
    }

    #[test]
    fn parse_rejects_other_layouts() {
        assert!(parse_iso_date("delivery_date", "10/01/2024").is_err());
        assert!(parse_iso_date("delivery_date", "2024-02-30").is_err());
        assert!(parse_iso_date("delivery_date", "").is_err());
    }

    #[test]
    fn required_rejects_blank_values() {
        assert!(required("full_name", None).unwrap_err().is_validation());
        assert!(required("full_name", Some("   ")).unwrap_err().is_validation());
        assert_eq!(required("full_name", Some(" Ana ")).unwrap(), "Ana");
    }

    #[test]
    fn national_id_needs_digits() {
        let err = required_national_id("national_id", Some("x-y")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(required_national_id("national_id", Some("123.456")).unwrap(), "123456");
    }

    #[test]
    fn name_filter_is_case_insensitive_and_unanchored() {
        assert!(name_matches("Ana Silva", "ana"));
        assert!(name_matches("Mariana Costa", "ana"));
        assert!(name_matches("JULIANA", "Ana"));
        assert!(!name_matches("Pedro Lima", "ana"));
    }
}
