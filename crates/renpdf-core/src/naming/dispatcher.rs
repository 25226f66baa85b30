//! Per-category extraction and naming.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::resolver::{certificate_base, contract_base, CollisionStyle, Destination, FileNameResolver};
use crate::error::{ExtractionError, IdMiss};
use crate::extraction::rules::contract::ContractNumberExtractor;
use crate::extraction::rules::cpf::TaxpayerIdExtractor;
use crate::extraction::rules::name::NameExtractor;
use crate::extraction::rules::office::classify_office;
use crate::extraction::rules::patterns::{NAME_ANCHORS_BY_NAME, NAME_ANCHORS_BY_OFFICE};
use crate::extraction::FieldExtractor;
use crate::models::config::ExtractionConfig;
use crate::models::outcome::{
    DocumentCategory, ExtractedField, FieldStatus, OfficeCode, OutcomeStatus, RenameOutcome,
};
use crate::pdf::TextSource;

/// Suffix of certificates named by reference to a person.
const BY_NAME_CODE: &str = "2";

/// Fields extracted for one document; which ones are set depends on the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFields {
    pub category: DocumentCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxpayer_id: Option<ExtractedField<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_number: Option<ExtractedField<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ExtractedField<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<OfficeCode>,
}

impl DocumentFields {
    fn empty(category: DocumentCategory) -> Self {
        Self {
            category,
            taxpayer_id: None,
            contract_number: None,
            name: None,
            office: None,
        }
    }

    /// Naming base, collision style and status, or the first missing field.
    pub fn plan(&self) -> Result<(String, CollisionStyle, OutcomeStatus), ExtractionError> {
        match self.category {
            DocumentCategory::Contract => {
                let id = self
                    .taxpayer_id
                    .as_ref()
                    .ok_or(ExtractionError::IdNotFound(IdMiss::NoValidId))?;
                let cpf = id.value.as_deref().ok_or(ExtractionError::IdNotFound(
                    match id.status {
                        FieldStatus::NotFoundAfterPrimary => IdMiss::AfterPrimaryAnchor,
                        _ => IdMiss::NoValidId,
                    },
                ))?;
                let contract = self
                    .contract_number
                    .as_ref()
                    .and_then(|f| f.value.as_deref())
                    .ok_or(ExtractionError::ContractNotFound)?;

                Ok((
                    contract_base(cpf, contract),
                    CollisionStyle::Underscore,
                    OutcomeStatus::from_field_status(id.status),
                ))
            }
            DocumentCategory::CertificateByName | DocumentCategory::CertificateByOffice => {
                let name = self
                    .name
                    .as_ref()
                    .and_then(|f| f.value.as_deref())
                    .ok_or(ExtractionError::NameNotFound)?;
                let code = self.office.map_or(BY_NAME_CODE, |o| o.as_str());

                Ok((certificate_base(name, code), CollisionStyle::Dotted, OutcomeStatus::Ok))
            }
        }
    }
}

/// Chooses the extractors for a document category and turns their results
/// into a [`RenameOutcome`].
pub struct CaseDispatcher {
    ids: TaxpayerIdExtractor,
    contracts: ContractNumberExtractor,
    resolver: FileNameResolver,
}

impl CaseDispatcher {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            ids: TaxpayerIdExtractor::from_config(config),
            contracts: ContractNumberExtractor::from_config(config),
            resolver: FileNameResolver::new(),
        }
    }

    /// Run the extractors relevant to `category`.
    pub fn extract_fields(&self, category: DocumentCategory, text: &str) -> DocumentFields {
        let mut fields = DocumentFields::empty(category);

        match category {
            DocumentCategory::Contract => {
                fields.taxpayer_id = Some(self.ids.extract(text));
                fields.contract_number = Some(ExtractedField::from_option(
                    self.contracts.extract(text).map(|m| m.value),
                ));
            }
            DocumentCategory::CertificateByName => {
                fields.name = Some(ExtractedField::from_option(
                    NameExtractor::new(&NAME_ANCHORS_BY_NAME).extract(text).map(|m| m.value),
                ));
            }
            DocumentCategory::CertificateByOffice => {
                fields.name = Some(ExtractedField::from_option(
                    NameExtractor::new(&NAME_ANCHORS_BY_OFFICE).extract(text).map(|m| m.value),
                ));
                fields.office = Some(classify_office(text));
            }
        }

        debug!("Extracted fields: {:?}", fields);
        fields
    }

    /// Extract and name a document whose text is already available.
    pub fn rename_text<D: Destination + ?Sized>(
        &self,
        category: DocumentCategory,
        original_name: &str,
        text: &str,
        destination: &D,
    ) -> RenameOutcome {
        if text.trim().is_empty() {
            return RenameOutcome::failed(original_name, ExtractionError::NoText);
        }

        match self.extract_fields(category, text).plan() {
            Ok((base, style, status)) => {
                let new_name = self.resolver.resolve(&base, style, destination);
                info!("{} -> {} ({})", original_name, new_name, status);
                RenameOutcome::renamed(original_name, new_name, status)
            }
            Err(e) => {
                warn!("{}: {}", original_name, e);
                RenameOutcome::failed(original_name, e)
            }
        }
    }

    /// Read a document through `source` and name it. Never fails: source
    /// errors become an error status on the outcome.
    pub fn process<S, D>(
        &self,
        category: DocumentCategory,
        path: &Path,
        source: &S,
        destination: &D,
    ) -> RenameOutcome
    where
        S: TextSource + ?Sized,
        D: Destination + ?Sized,
    {
        let original_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match source.document_text(path) {
            Ok(text) => self.rename_text(category, &original_name, &text, destination),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                RenameOutcome::failed(original_name, ExtractionError::Unexpected(e.to_string()))
            }
        }
    }
}

impl Default for CaseDispatcher {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}
