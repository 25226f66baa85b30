//! Registry office classification.

use super::normalize::normalize;
use super::patterns::SIXTH_OFFICE;
use crate::models::outcome::OfficeCode;

/// `Sixth` when the text mentions the 6th registry office, otherwise `Fifth`.
pub fn classify_office(text: &str) -> OfficeCode {
    if SIXTH_OFFICE.is_match(&normalize(text)) {
        OfficeCode::Sixth
    } else {
        OfficeCode::Fifth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixth_office_variants() {
        for text in [
            "6º Ofício de Registro de Imóveis",
            "6° OFÍCIO",
            "6o oficio",
            "6 O OFICIO",
            "6ª Ofício",
            "6.º OFÍCIO DE REGISTRO",
            "6.° Ofício",
            "Cartório do Sexto Ofício",
        ] {
            assert_eq!(classify_office(text), OfficeCode::Sixth, "{text}");
        }
    }

    #[test]
    fn test_defaults_to_fifth() {
        assert_eq!(classify_office("5º Ofício de Notas"), OfficeCode::Fifth);
        assert_eq!(classify_office("16º Ofício"), OfficeCode::Fifth);
        assert_eq!(classify_office(""), OfficeCode::Fifth);
        assert_eq!(classify_office("6º Tabelionato"), OfficeCode::Fifth);
    }
}
