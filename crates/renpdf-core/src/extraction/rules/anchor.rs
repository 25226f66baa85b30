//! Anchor phrases and the sections they open.

use std::ops::Range;

use regex::Regex;
use tracing::trace;

use super::normalize::{NormalizedView, floor_char_boundary};

/// A labelled pattern in a priority-ordered list.
#[derive(Debug, Clone)]
pub struct AnchorPattern {
    /// Short name used in logs.
    pub label: &'static str,
    /// Pattern over normalized text.
    pub regex: Regex,
}

impl AnchorPattern {
    /// Compile a pattern. Panics on an invalid pattern, so only use with literals.
    pub fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

/// Where an anchor matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorMatch {
    /// Position of the anchor in its priority list.
    pub priority: usize,
    pub label: &'static str,
    pub start: usize,
    pub end: usize,
}

/// A span of normalized text following an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub anchor: AnchorMatch,
    pub start: usize,
    pub end: usize,
}

impl Section {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// First anchor, in priority order, that matches anywhere in `text`.
///
/// A higher-priority anchor wins even if a lower-priority one occurs earlier.
pub fn find_anchor(text: &str, anchors: &[AnchorPattern]) -> Option<AnchorMatch> {
    anchors.iter().enumerate().find_map(|(priority, anchor)| {
        anchor.regex.find(text).map(|m| AnchorMatch {
            priority,
            label: anchor.label,
            start: m.start(),
            end: m.end(),
        })
    })
}

/// Every anchor of the list that matches, in priority order (first occurrence each).
pub fn find_all_anchors(text: &str, anchors: &[AnchorPattern]) -> Vec<AnchorMatch> {
    anchors
        .iter()
        .enumerate()
        .filter_map(|(priority, anchor)| {
            anchor.regex.find(text).map(|m| AnchorMatch {
                priority,
                label: anchor.label,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}

/// Smallest start position, at or after `from`, of any pattern in `patterns`.
///
/// Each pattern is searched independently and the earliest hit wins.
pub fn earliest_match(text: &str, from: usize, patterns: &[AnchorPattern]) -> Option<usize> {
    let from = floor_char_boundary(text, from);
    let tail = &text[from..];
    patterns
        .iter()
        .filter_map(|p| p.regex.find(tail).map(|m| from + m.start()))
        .min()
}

/// Section opened by `anchor`, bounded by the nearest terminator or `max_window`.
pub fn section_after(
    text: &str,
    anchor: AnchorMatch,
    terminators: &[AnchorPattern],
    max_window: usize,
) -> Section {
    let start = anchor.end;
    let window_end = floor_char_boundary(text, start.saturating_add(max_window));
    let end = earliest_match(text, start, terminators)
        .map_or(window_end, |t| t.min(window_end))
        .max(start);

    trace!("Section for anchor {}: {}..{}", anchor.label, start, end);
    Section { anchor, start, end }
}

/// Locate the section after the highest-priority matching anchor.
pub fn locate_section(
    view: &NormalizedView<'_>,
    anchors: &[AnchorPattern],
    terminators: &[AnchorPattern],
    max_window: usize,
) -> Option<Section> {
    let anchor = find_anchor(view.text(), anchors)?;
    Some(section_after(view.text(), anchor, terminators, max_window))
}
