//! Accent stripping and case folding with an offset map back to the source.

use std::ops::Range;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Upper-cased, accent-free copy of a text that remembers where each byte came from.
///
/// Patterns are matched against [`NormalizedView::text`]; [`NormalizedView::original_slice`]
/// maps a located range back onto the untouched source.
#[derive(Debug, Clone)]
pub struct NormalizedView<'a> {
    original: &'a str,
    text: String,
    // origin[i] is the byte offset in `original` of the char that produced byte i
    origin: Vec<usize>,
}

impl<'a> NormalizedView<'a> {
    pub fn new(original: &'a str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut origin = Vec::with_capacity(original.len());

        for (offset, ch) in original.char_indices() {
            for upper in ch.to_uppercase() {
                for c in std::iter::once(upper).nfd().filter(|c| !is_combining_mark(*c)) {
                    text.push(c);
                    origin.extend(std::iter::repeat_n(offset, c.len_utf8()));
                }
            }
        }

        Self {
            original,
            text,
            origin,
        }
    }

    /// The normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The source text.
    pub fn original(&self) -> &'a str {
        self.original
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset in the source text corresponding to `offset` in the normalized text.
    pub fn original_offset(&self, offset: usize) -> usize {
        self.origin.get(offset).copied().unwrap_or(self.original.len())
    }

    /// Source slice covering the normalized range.
    pub fn original_slice(&self, range: Range<usize>) -> &'a str {
        let start = self.original_offset(range.start);
        let end = self.original_offset(range.end).max(start);
        &self.original[start..end]
    }
}

/// Strip diacritics and upper-case `text`.
pub fn normalize(text: &str) -> String {
    NormalizedView::new(text).text
}

/// Keep only ASCII digits.
pub fn only_digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Largest char boundary of `text` not above `index`.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
