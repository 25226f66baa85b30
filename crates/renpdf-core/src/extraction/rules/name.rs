//! Person-name extraction from certificates.

use tracing::debug;

use super::anchor::{earliest_match, find_anchor, AnchorPattern};
use super::normalize::normalize;
use super::patterns::NAME_STOPWORDS;
use crate::extraction::{ExtractionMatch, FieldExtractor};

/// Extracts the name that follows one of a priority-ordered list of anchors.
///
/// The name ends at the first comma or stopword (ID, address and issuance
/// labels, the words EM and E). Without either, the first non-blank line
/// after the anchor is used. Output is upper case without accents.
pub struct NameExtractor<'a> {
    anchors: &'a [AnchorPattern],
}

impl<'a> NameExtractor<'a> {
    pub fn new(anchors: &'a [AnchorPattern]) -> Self {
        Self { anchors }
    }
}

impl FieldExtractor for NameExtractor<'_> {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let normalized = normalize(text);
        let anchor = find_anchor(&normalized, self.anchors)?;
        let tail = &normalized[anchor.end..];

        let comma = tail.find(',');
        let stopword = earliest_match(tail, 0, &NAME_STOPWORDS);
        let candidate = match (comma, stopword) {
            (None, None) => tail.lines().map(str::trim).find(|l| !l.is_empty())?,
            (Some(c), Some(s)) => &tail[..c.min(s)],
            (Some(cut), None) | (None, Some(cut)) => &tail[..cut],
        };

        let name = sanitize_name(candidate);
        debug!("Name after anchor {}: {:?}", anchor.label, name);

        if name.is_empty() {
            return None;
        }
        Some(
            ExtractionMatch::new(name, 0.9, candidate)
                .with_position(anchor.end, anchor.end + candidate.len()),
        )
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Extract the name after the first matching anchor.
pub fn extract_name(text: &str, anchors: &[AnchorPattern]) -> Option<String> {
    NameExtractor::new(anchors).extract(text).map(|m| m.value)
}

/// Replace everything but A-Z with spaces and collapse whitespace.
fn sanitize_name(candidate: &str) -> String {
    let letters: String = candidate
        .chars()
        .map(|c| if c.is_ascii_uppercase() { c } else { ' ' })
        .collect();
    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}
