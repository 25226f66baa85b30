//! Rule-based field extractors for contracts and registry certificates.

pub mod normalize;
pub mod anchor;
pub mod patterns;
pub mod cpf;
pub mod contract;
pub mod name;
pub mod office;

pub use normalize::{normalize, only_digits, NormalizedView};
pub use anchor::{
    earliest_match, find_all_anchors, find_anchor, locate_section, section_after, AnchorMatch,
    AnchorPattern, Section,
};
pub use cpf::{extract_taxpayer_id, format_cpf, validate_cpf, CpfScanner, TaxpayerIdExtractor, Tier, TierOutcome};
pub use contract::{extract_contract_number, ContractNumberExtractor};
pub use name::{extract_name, NameExtractor};
pub use office::classify_office;
