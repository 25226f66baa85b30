//! Extraction results and per-document rename outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ExtractionError;

/// Document family; selects the extractors and the naming template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentCategory {
    /// Financing contracts, named `{cpf}_{contract}`.
    Contract,
    /// Certificates issued "with reference to the name of", named `{name}-2`.
    CertificateByName,
    /// Registry-office certificates, named `{name}-5` or `{name}-6`.
    CertificateByOffice,
}

impl DocumentCategory {
    /// All categories, in display order.
    pub const ALL: [DocumentCategory; 3] = [
        DocumentCategory::Contract,
        DocumentCategory::CertificateByName,
        DocumentCategory::CertificateByOffice,
    ];

    /// Folder name used for this category under the input and output trees.
    pub fn folder_name(&self) -> &'static str {
        match self {
            Self::Contract => "contracts",
            Self::CertificateByName => "certificates-2",
            Self::CertificateByOffice => "certificates-5-6",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

impl FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.folder_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown document category: {}", s))
    }
}

/// How a field value was obtained, or why it is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Found through the authoritative anchor (or directly, for fields without tiers).
    Ok,
    /// Found in the section of a generic role anchor.
    OkViaFallback,
    /// Found by scanning the whole text.
    OkViaFullScan,
    /// The primary anchor was present but yielded nothing valid.
    NotFoundAfterPrimary,
    /// Nothing valid anywhere.
    NotFound,
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::OkViaFallback => "OK-via-fallback",
            Self::OkViaFullScan => "OK-via-full-scan",
            Self::NotFoundAfterPrimary => "NOT_FOUND-after-primary",
            Self::NotFound => "NOT_FOUND",
        };
        f.write_str(s)
    }
}

impl Serialize for FieldStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A field value together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedField<T> {
    /// Extracted value, present only for found statuses.
    pub value: Option<T>,
    /// Provenance or failure tag.
    pub status: FieldStatus,
}

impl<T> ExtractedField<T> {
    /// A found value.
    pub fn found(value: T, status: FieldStatus) -> Self {
        Self {
            value: Some(value),
            status,
        }
    }

    /// A missing value.
    pub fn missing(status: FieldStatus) -> Self {
        Self {
            value: None,
            status,
        }
    }

    /// Lift an optional value from a field without tiers.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::found(v, FieldStatus::Ok),
            None => Self::missing(FieldStatus::NotFound),
        }
    }
}

/// Registry office classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OfficeCode {
    #[serde(rename = "5")]
    Fifth,
    #[serde(rename = "6")]
    Sixth,
}

impl OfficeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fifth => "5",
            Self::Sixth => "6",
        }
    }
}

impl fmt::Display for OfficeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one processed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Renamed from authoritative matches.
    Ok,
    /// Renamed, but the ID came from a fallback anchor.
    OkViaFallback,
    /// Renamed, but the ID came from a full-text scan.
    OkViaFullScan,
    /// Not renamed.
    Failed(ExtractionError),
}

impl OutcomeStatus {
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// Status for a successful rename whose lowest-confidence field had `field`.
    pub fn from_field_status(field: FieldStatus) -> Self {
        match field {
            FieldStatus::OkViaFallback => Self::OkViaFallback,
            FieldStatus::OkViaFullScan => Self::OkViaFullScan,
            _ => Self::Ok,
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::OkViaFallback => f.write_str("OK (fallback anchor)"),
            Self::OkViaFullScan => f.write_str("OK (full-text scan)"),
            Self::Failed(e) => write!(f, "ERROR: {}", e),
        }
    }
}

impl Serialize for OutcomeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The record emitted for every processed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOutcome {
    /// File name of the source document.
    pub original_name: String,
    /// Computed destination name; empty on error.
    pub new_name: String,
    /// Result of processing.
    pub status: OutcomeStatus,
}

impl RenameOutcome {
    pub fn renamed(original_name: impl Into<String>, new_name: impl Into<String>, status: OutcomeStatus) -> Self {
        Self {
            original_name: original_name.into(),
            new_name: new_name.into(),
            status,
        }
    }

    pub fn failed(original_name: impl Into<String>, error: ExtractionError) -> Self {
        Self {
            original_name: original_name.into(),
            new_name: String::new(),
            status: OutcomeStatus::Failed(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdMiss;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_round_trip_through_folder_name() {
        for category in DocumentCategory::ALL {
            assert_eq!(category.folder_name().parse::<DocumentCategory>(), Ok(category));
        }
        assert!("invoices".parse::<DocumentCategory>().is_err());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(FieldStatus::OkViaFallback.to_string(), "OK-via-fallback");
        assert_eq!(OutcomeStatus::Ok.to_string(), "OK");
        assert_eq!(
            OutcomeStatus::Failed(ExtractionError::IdNotFound(IdMiss::AfterPrimaryAnchor)).to_string(),
            "ERROR: taxpayer ID not found (no valid ID after the primary anchor)"
        );
    }

    #[test]
    fn test_failed_outcome_has_empty_name() {
        let outcome = RenameOutcome::failed("a.pdf", ExtractionError::NoText);
        assert!(!outcome.is_ok());
        assert!(outcome.new_name.is_empty());
    }

    #[test]
    fn test_outcome_serializes_status_as_text() {
        let outcome = RenameOutcome::renamed("a.pdf", "JOAO-2.pdf", OutcomeStatus::Ok);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "OK");
        assert_eq!(json["new_name"], "JOAO-2.pdf");
    }
}
