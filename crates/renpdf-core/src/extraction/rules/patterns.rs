//! Patterns for Brazilian contract and certificate extraction.
//!
//! Everything except [`CPF_LABEL`] and the CPF digit patterns is matched
//! against normalized text (upper case, no accents). Ordered lists are
//! evaluated entry by entry, never as one alternation.

use lazy_static::lazy_static;
use regex::Regex;

use super::anchor::AnchorPattern;

/// Hyphen-like characters accepted between digit groups.
pub const HYPHENS: &[char] = &[
    '-', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}',
    '\u{FE63}', '\u{FF0D}',
];

lazy_static! {
    // CPF patterns (matched against the original text)
    pub static ref CPF_LABEL: Regex = Regex::new(
        r"(?i)\bC\s*\.?\s*P\s*\.?\s*F"
    ).unwrap();

    pub static ref CPF_SEPARATED: Regex = Regex::new(
        r"\b\d{3}[. \u{00a0}\-\u{2010}-\u{2015}\u{2212}\u{FE63}\u{FF0D}]?\d{3}[. \u{00a0}\-\u{2010}-\u{2015}\u{2212}\u{FE63}\u{FF0D}]?\d{3}[. \u{00a0}\-\u{2010}-\u{2015}\u{2212}\u{FE63}\u{FF0D}]?\d{2}\b"
    ).unwrap();

    pub static ref CPF_BARE: Regex = Regex::new(
        r"\b\d{11}\b"
    ).unwrap();

    // Debtor clause of the financing contract template
    pub static ref PRIMARY_ID_ANCHORS: Vec<AnchorPattern> = vec![
        AnchorPattern::new(
            "buyer-and-debtor-clause",
            r"COMPRADOR[A-Z()]*\s+E\s+DEVEDOR[A-Z()]*\s*/\s*FIDUCIANTE",
        ),
    ];

    pub static ref FALLBACK_ID_ANCHORS: Vec<AnchorPattern> = vec![
        AnchorPattern::new("buyer", r"COMPRADOR"),
        AnchorPattern::new("debtor", r"DEVEDOR"),
        AnchorPattern::new("acquiring-party", r"PARTE\s+ADQUIRENTE"),
        AnchorPattern::new("buying-party", r"PARTE\s+COMPRADORA"),
    ];

    // Start of the next party's clause
    pub static ref ID_TERMINATORS: Vec<AnchorPattern> = vec![
        AnchorPattern::new("seller", r"\bVENDEDOR"),
        AnchorPattern::new("creditor", r"\bCREDOR"),
        AnchorPattern::new("intervening-party", r"\bINTERVENIENTE"),
    ];

    // Contract number
    pub static ref CONTRACT_KEYWORD: Regex = Regex::new(
        r"CONTRATO"
    ).unwrap();

    pub static ref NUMBER_LABEL: Regex = Regex::new(
        r"\bN\s*\.?\s*(?:[º°]|O\b\.?)|\bNUMERO\b|\bNRO?\b\.?"
    ).unwrap();

    pub static ref CONTRACT_DIGIT_RUN: Regex = Regex::new(
        r"[0-9./\-\u{2010}-\u{2015}\u{2212}\u{FE63}\u{FF0D}]{13,}"
    ).unwrap();

    // Person-name anchors per certificate template
    pub static ref NAME_ANCHORS_BY_NAME: Vec<AnchorPattern> = vec![
        AnchorPattern::new("with-reference-to-name", r"COM\s+REFERENCIA\s+AO\s+NOME\s+DE"),
    ];

    pub static ref NAME_ANCHORS_BY_OFFICE: Vec<AnchorPattern> = vec![
        AnchorPattern::new("nothing-on-record", r"NADA\s+CONSTA\s+EM\s+NOME\s+DE"),
        AnchorPattern::new("in-the-name-of", r"EM\s+NOME\s+DE"),
    ];

    // Tokens that end a person's name
    pub static ref NAME_STOPWORDS: Vec<AnchorPattern> = vec![
        AnchorPattern::new("cpf", r"\bC\s?\.?\s?P\s?\.?\s?F\b"),
        AnchorPattern::new("cnpj", r"\bCNPJ\b"),
        AnchorPattern::new("rg", r"\bR\.?\s?G\b"),
        AnchorPattern::new("identity", r"\bIDENTIDADE\b"),
        AnchorPattern::new("resident", r"\bRESIDENTE\b"),
        AnchorPattern::new("domiciled", r"\bDOMICILIAD[OA]S?\b"),
        AnchorPattern::new("address", r"\bENDERECO\b"),
        AnchorPattern::new("issued", r"\bEXPEDID[OA]\b"),
        AnchorPattern::new("emitted", r"\bEMITID[OA]\b"),
        AnchorPattern::new("issuance", r"\bEMISSAO\b"),
        AnchorPattern::new("in", r"\bEM\b"),
        AnchorPattern::new("and", r"\bE\b"),
    ];

    // Registry office
    pub static ref SIXTH_OFFICE: Regex = Regex::new(
        r"\b6\s*\.?\s*(?:[º°ªO]\.?)?\s*OFICIO\b|\bSEXTO\s+OFICIO\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_label_variants() {
        for label in ["Nº 1", "N° 1", "N.º 1", "NO. 1", "NUMERO 1", "NR 1", "N º 1"] {
            assert!(NUMBER_LABEL.is_match(label), "{label}");
        }
        assert!(!NUMBER_LABEL.is_match("NOME"));
    }

    #[test]
    fn test_cpf_separated_accepts_unicode_hyphens() {
        assert!(CPF_SEPARATED.is_match("529.982.247-25"));
        assert!(CPF_SEPARATED.is_match("529.982.247\u{2013}25"));
        assert!(CPF_SEPARATED.is_match("529 982 247 25"));
        assert!(CPF_SEPARATED.is_match("52998224725"));
        assert!(!CPF_SEPARATED.is_match("529.982.247-2"));
    }

    #[test]
    fn test_cpf_label_variants() {
        for label in ["CPF", "C.P.F.", "cpf/mf", "C P F"] {
            assert!(CPF_LABEL.is_match(label), "{label}");
        }
    }

    #[test]
    fn test_hyphens_cover_the_digit_run_class() {
        for hyphen in HYPHENS {
            let run = format!("123456{hyphen}7890123");
            assert!(CONTRACT_DIGIT_RUN.is_match(&run), "{hyphen:?}");
        }
    }
}
