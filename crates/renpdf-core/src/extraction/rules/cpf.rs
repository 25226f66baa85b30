//! CPF (Brazilian individual taxpayer ID) extraction and validation.

use tracing::debug;

use super::anchor::{find_all_anchors, locate_section, section_after};
use super::normalize::NormalizedView;
use super::patterns::{
    CPF_BARE, CPF_LABEL, CPF_SEPARATED, FALLBACK_ID_ANCHORS, ID_TERMINATORS, PRIMARY_ID_ANCHORS,
};
use crate::extraction::{ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;
use crate::models::outcome::{ExtractedField, FieldStatus};

/// How far past a CPF label the first digit may appear.
const LABEL_LOOKAHEAD: usize = 24;

/// Scans a span of text for checksum-valid CPFs.
///
/// Strategies run in order: digits following a CPF label, the separated
/// `XXX.XXX.XXX-XX` form, then a bare 11-digit run.
pub struct CpfScanner;

impl CpfScanner {
    /// Create a new CPF scanner.
    pub fn new() -> Self {
        Self
    }

    fn accept(&self, candidate: &str, results: &[ExtractionMatch<String>]) -> bool {
        validate_cpf(candidate) && !results.iter().any(|r| r.value == candidate)
    }
}

impl Default for CpfScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CpfScanner {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for label in CPF_LABEL.find_iter(text) {
            if let Some((cpf, end)) = digits_after_label(text, label.end()) {
                if self.accept(&cpf, &results) {
                    results.push(
                        ExtractionMatch::new(cpf, 0.95, &text[label.start()..end])
                            .with_position(label.start(), end),
                    );
                }
            }
        }

        for m in CPF_SEPARATED.find_iter(text) {
            let cpf: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
            if self.accept(&cpf, &results) {
                results.push(ExtractionMatch::new(cpf, 0.8, m.as_str()).with_position(m.start(), m.end()));
            }
        }

        for m in CPF_BARE.find_iter(text) {
            let cpf = m.as_str().to_string();
            if self.accept(&cpf, &results) {
                results.push(ExtractionMatch::new(cpf, 0.6, m.as_str()).with_position(m.start(), m.end()));
            }
        }

        results
    }
}

/// Collect the 11 digits following a label, skipping punctuation between them.
///
/// Letters are tolerated only before the first digit (`CPF/MF nº ...`).
fn digits_after_label(text: &str, from: usize) -> Option<(String, usize)> {
    let mut digits = String::with_capacity(11);

    for (i, c) in text[from..].char_indices() {
        if c.is_ascii_digit() {
            digits.push(c);
            if digits.len() == 11 {
                return Some((digits, from + i + 1));
            }
        } else if digits.is_empty() {
            if i > LABEL_LOOKAHEAD {
                return None;
            }
        } else if c.is_alphanumeric() {
            return None;
        }
    }

    None
}

/// Extraction tiers, from most to least trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Section after the debtor/buyer clause.
    Primary,
    /// Sections after generic role names.
    Fallback,
    /// The whole text.
    FullScan,
}

impl Tier {
    pub const SEQUENCE: [Tier; 3] = [Tier::Primary, Tier::Fallback, Tier::FullScan];

    fn found_status(self) -> FieldStatus {
        match self {
            Tier::Primary => FieldStatus::Ok,
            Tier::Fallback => FieldStatus::OkViaFallback,
            Tier::FullScan => FieldStatus::OkViaFullScan,
        }
    }
}

/// Result of attempting one tier.
#[derive(Debug, Clone)]
pub enum TierOutcome {
    /// The tier's anchors are absent; the next tier may run.
    Inapplicable,
    /// A valid CPF was found.
    Found(ExtractionMatch<String>),
    /// The tier applied but nothing validated.
    Exhausted,
}

/// Tiered CPF extractor for contracts.
///
/// The primary anchor is authoritative: when it is present but its section
/// holds no valid CPF, extraction stops unless `continue_after_primary_miss`
/// is set. Fallback anchors run only when the primary anchor is absent, and the
/// full-text scan only when no fallback anchor matched.
pub struct TaxpayerIdExtractor {
    section_window: usize,
    continue_after_primary_miss: bool,
    scanner: CpfScanner,
}

impl TaxpayerIdExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            section_window: config.id_section_window,
            continue_after_primary_miss: config.continue_after_primary_miss,
            scanner: CpfScanner::new(),
        }
    }

    pub fn with_section_window(mut self, window: usize) -> Self {
        self.section_window = window;
        self
    }

    pub fn with_continue_after_primary_miss(mut self, enabled: bool) -> Self {
        self.continue_after_primary_miss = enabled;
        self
    }

    /// Run the tiers in order and report the value with its provenance.
    pub fn extract(&self, text: &str) -> ExtractedField<String> {
        let view = NormalizedView::new(text);

        for tier in Tier::SEQUENCE {
            let outcome = self.attempt(tier, &view);
            debug!("CPF tier {:?}: {:?}", tier, outcome);

            match outcome {
                TierOutcome::Found(m) => return ExtractedField::found(m.value, tier.found_status()),
                TierOutcome::Inapplicable => continue,
                TierOutcome::Exhausted => match tier {
                    Tier::Primary if self.continue_after_primary_miss => continue,
                    Tier::Primary => return ExtractedField::missing(FieldStatus::NotFoundAfterPrimary),
                    Tier::Fallback | Tier::FullScan => break,
                },
            }
        }

        ExtractedField::missing(FieldStatus::NotFound)
    }

    /// Attempt a single tier.
    pub fn attempt(&self, tier: Tier, view: &NormalizedView<'_>) -> TierOutcome {
        match tier {
            Tier::Primary => {
                match locate_section(view, &PRIMARY_ID_ANCHORS, &ID_TERMINATORS, self.section_window) {
                    None => TierOutcome::Inapplicable,
                    Some(section) => self
                        .scanner
                        .extract(view.original_slice(section.range()))
                        .map_or(TierOutcome::Exhausted, TierOutcome::Found),
                }
            }
            Tier::Fallback => {
                let anchors = find_all_anchors(view.text(), &FALLBACK_ID_ANCHORS);
                if anchors.is_empty() {
                    return TierOutcome::Inapplicable;
                }
                anchors
                    .into_iter()
                    .find_map(|anchor| {
                        let section = section_after(view.text(), anchor, &ID_TERMINATORS, self.section_window);
                        self.scanner.extract(view.original_slice(section.range()))
                    })
                    .map_or(TierOutcome::Exhausted, TierOutcome::Found)
            }
            Tier::FullScan => self
                .scanner
                .extract(view.original())
                .map_or(TierOutcome::Exhausted, TierOutcome::Found),
        }
    }
}

impl Default for TaxpayerIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the debtor's CPF from a contract with default settings.
pub fn extract_taxpayer_id(text: &str) -> ExtractedField<String> {
    TaxpayerIdExtractor::new().extract(text)
}

/// Validate a CPF using its two mod-11 check digits.
///
/// Non-digit characters are ignored; exactly 11 digits must remain and they
/// must not all be the same.
pub fn validate_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Weights run from `len + 1` down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        dv => dv,
    }
}

/// Format a CPF as XXX.XXX.XXX-XX.
pub fn format_cpf(cpf: &str) -> String {
    let digits: String = cpf.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 11 {
        return cpf.to_string();
    }

    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_cpf_valid() {
        assert!(validate_cpf("52998224725"));
        assert!(validate_cpf("111.444.777-35"));
        assert!(validate_cpf("12345678909"));
    }

    #[test]
    fn test_validate_cpf_invalid() {
        assert!(!validate_cpf("52998224724")); // Last digit altered
        assert!(!validate_cpf("12345678900"));
        assert!(!validate_cpf("5299822472")); // Too short
        assert!(!validate_cpf("529982247250")); // Too long
    }

    #[test]
    fn test_validate_cpf_rejects_repeated_digits() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert!(!validate_cpf(&cpf), "{cpf}");
        }
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cpf("123"), "123");
    }

    #[test]
    fn test_label_window_skips_punctuation() {
        let scanner = CpfScanner::new();
        let m = scanner.extract("inscrito no CPF/MF nº 529 . 982 . 247 – 25, residente").unwrap();
        assert_eq!(m.value, "52998224725");
        assert_eq!(m.confidence, 0.95);
    }

    #[test]
    fn test_label_strategy_preferred_over_earlier_number() {
        let scanner = CpfScanner::new();
        let m = scanner
            .extract("conta 529.982.247-25, depois C.P.F.: 111.444.777-35")
            .unwrap();
        assert_eq!(m.value, "11144477735");
    }

    #[test]
    fn test_scanner_falls_back_to_bare_digits() {
        let scanner = CpfScanner::new();
        let found = scanner.extract_all("documento 11144477735 registrado");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "11144477735");
    }

    #[test]
    fn test_scanner_skips_invalid_candidates() {
        let scanner = CpfScanner::new();
        let m = scanner.extract("CPF 123.456.789-00 ou 111.444.777-35").unwrap();
        assert_eq!(m.value, "11144477735");
    }

    #[test]
    fn test_scanner_never_emits_invalid_checksum() {
        let scanner = CpfScanner::new();
        assert!(scanner.extract("CPF 123.456.789-00").is_none());
        assert!(scanner.extract_all("12345678900 e 123.456.789-00").is_empty());
    }

    #[test]
    fn test_primary_anchor() {
        let text = "CONTRATO DE COMPRA E VENDA\n\
            COMPRADOR(ES) E DEVEDOR(ES)/FIDUCIANTE(S): JOSÉ DA SILVA, brasileiro, \
            CPF/MF nº 529.982.247-25, residente em Brasília.";
        let field = extract_taxpayer_id(text);
        assert_eq!(field.value.as_deref(), Some("52998224725"));
        assert_eq!(field.status, FieldStatus::Ok);
    }

    #[test]
    fn test_primary_searched_before_earlier_fallback_anchor() {
        let text = "DEVEDOR ORIGINAL: CPF 111.444.777-35\n\
            COMPRADOR(ES) E DEVEDOR(ES)/FIDUCIANTE(S): CPF 529.982.247-25";
        let field = extract_taxpayer_id(text);
        assert_eq!(field.value.as_deref(), Some("52998224725"));
        assert_eq!(field.status, FieldStatus::Ok);
    }

    const PRIMARY_WITHOUT_VALID_ID: &str = "COMPRADOR E DEVEDOR/FIDUCIANTE: FULANO, CPF 123.456.789-00.\n\
        VENDEDOR: EMPRESA X\n\
        PARTE ADQUIRENTE: CPF 111.444.777-35";

    #[test]
    fn test_primary_exhausted_stops() {
        let field = extract_taxpayer_id(PRIMARY_WITHOUT_VALID_ID);
        assert_eq!(field.value, None);
        assert_eq!(field.status, FieldStatus::NotFoundAfterPrimary);
    }

    #[test]
    fn test_primary_exhausted_then_fallback_when_enabled() {
        let field = TaxpayerIdExtractor::new()
            .with_continue_after_primary_miss(true)
            .extract(PRIMARY_WITHOUT_VALID_ID);
        assert_eq!(field.value.as_deref(), Some("11144477735"));
        assert_eq!(field.status, FieldStatus::OkViaFallback);
    }

    #[test]
    fn test_fallback_anchor() {
        let field = extract_taxpayer_id("DEVEDOR: MARIA, CPF 111.444.777-35");
        assert_eq!(field.value.as_deref(), Some("11144477735"));
        assert_eq!(field.status, FieldStatus::OkViaFallback);
    }

    #[test]
    fn test_fallback_exhausted_skips_full_scan() {
        let field = extract_taxpayer_id("CPF 111.444.777-35\nCOMPRADOR: sem documento");
        assert_eq!(field.value, None);
        assert_eq!(field.status, FieldStatus::NotFound);
    }

    #[test]
    fn test_full_scan() {
        let field = extract_taxpayer_id("Requerente: Maria, inscrita no CPF sob o nº 111.444.777-35");
        assert_eq!(field.value.as_deref(), Some("11144477735"));
        assert_eq!(field.status, FieldStatus::OkViaFullScan);
    }

    #[test]
    fn test_nothing_found() {
        let field = extract_taxpayer_id("sem identificação 123");
        assert_eq!(field, ExtractedField::missing(FieldStatus::NotFound));
    }

    #[test]
    fn test_section_window_excludes_distant_id() {
        let text = format!("DEVEDOR: {} CPF 111.444.777-35", "x".repeat(100));
        let field = TaxpayerIdExtractor::new().with_section_window(50).extract(&text);
        assert_eq!(field.status, FieldStatus::NotFound);
    }
}
