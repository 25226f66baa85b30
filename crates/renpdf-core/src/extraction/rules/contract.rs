//! Contract number extraction (13 digits near a "CONTRATO" label).

use tracing::debug;

use super::normalize::{normalize, only_digits};
use super::patterns::{CONTRACT_DIGIT_RUN, CONTRACT_KEYWORD, NUMBER_LABEL};
use crate::extraction::{ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

pub const CONTRACT_DIGITS: usize = 13;

/// Line-based contract number extractor.
///
/// Lines carrying the contract keyword are tried in order, each widened with
/// the following line so that wrapped labels are still seen. When none of
/// them yields a number, the document header is rescanned for a bare number
/// label.
pub struct ContractNumberExtractor {
    header_lines: usize,
    unconditional_lines: usize,
}

impl ContractNumberExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            header_lines: config.contract_header_lines,
            unconditional_lines: config.contract_unconditional_lines,
        }
    }

    fn from_keyword_line(&self, lines: &[&str], idx: usize) -> Option<ExtractionMatch<String>> {
        let window = match lines.get(idx + 1) {
            Some(next) => format!("{}\n{}", lines[idx], next),
            None => lines[idx].to_string(),
        };
        let keyword = CONTRACT_KEYWORD.find(&window)?;
        let tail = &window[keyword.end()..];

        let (start, confidence) = match NUMBER_LABEL.find(tail) {
            Some(label) => (label.end(), 0.9),
            None => (0, 0.8),
        };

        if let Some(number) = first_digits(&tail[start..]) {
            return Some(ExtractionMatch::new(number, confidence, lines[idx]));
        }

        longest_digit_run(tail)
            .and_then(first_digits)
            .map(|number| ExtractionMatch::new(number, 0.7, lines[idx]))
    }

    fn from_header(&self, lines: &[&str]) -> Vec<ExtractionMatch<String>> {
        let header = &lines[..lines.len().min(self.header_lines)];
        let with_keyword = header.iter().filter(|line| CONTRACT_KEYWORD.is_match(line));
        let leading = header.iter().take(self.unconditional_lines);

        with_keyword
            .chain(leading)
            .filter_map(|line| {
                let label = NUMBER_LABEL.find(line)?;
                first_digits(&line[label.end()..]).map(|number| ExtractionMatch::new(number, 0.6, *line))
            })
            .collect()
    }
}

impl Default for ContractNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ContractNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let result = self.extract_all(text).into_iter().next();
        debug!("Contract number: {:?}", result.as_ref().map(|m| &m.value));
        result
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let normalized = normalize(text);
        let lines: Vec<&str> = normalized.lines().collect();

        let mut results: Vec<Self::Output> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| CONTRACT_KEYWORD.is_match(line))
            .filter_map(|(idx, _)| self.from_keyword_line(&lines, idx))
            .collect();

        results.extend(self.from_header(&lines));
        results
    }
}

/// Extract the contract number with default settings.
pub fn extract_contract_number(text: &str) -> Option<String> {
    ContractNumberExtractor::new().extract(text).map(|m| m.value)
}

/// First 13 digits of `text`, ignoring everything else.
///
/// Taking the leading digits keeps trailing page numbers out of the result.
fn first_digits(text: &str) -> Option<String> {
    let digits = only_digits(text);
    (digits.len() >= CONTRACT_DIGITS).then(|| digits[..CONTRACT_DIGITS].to_string())
}

/// Longest run of digits and separators; the earliest wins a tie.
fn longest_digit_run(text: &str) -> Option<&str> {
    CONTRACT_DIGIT_RUN
        .find_iter(text)
        .fold(None, |best: Option<regex::Match<'_>>, m| match best {
            Some(b) if b.len() >= m.len() => Some(b),
            _ => Some(m),
        })
        .map(|m| m.as_str())
}
