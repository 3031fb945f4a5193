//! Dotted token paths.
//!
//! A [`TokenPath`] is the ordered list of segments that locates a token in
//! the merged token tree, e.g. `color.rawColors.blue.500`. Paths are the keys
//! of a token set and the targets of `{…}` references.
//!
//! Paths order segment by segment. When both segments are unsigned integers
//! they compare numerically, so color scales sort as `50, 100, 500, 900`
//! rather than lexicographically.

use std::{cmp::Ordering, fmt};

use crate::category::Category;

/// An ordered sequence of path segments identifying a token.
///
/// # Examples
///
/// ```
/// use tokenweave_core::path::TokenPath;
///
/// let path = TokenPath::parse("color.rawColors.blue.500");
/// assert_eq!(path.len(), 4);
/// assert_eq!(path.to_string(), "color.rawColors.blue.500");
///
/// let nested = TokenPath::parse("color.rawColors").join("blue");
/// assert!(nested.starts_with(&TokenPath::parse("color")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TokenPath(Vec<String>);

impl TokenPath {
    /// Creates a path from already split segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Splits a dotted string into a path. Empty segments are dropped, so
    /// `""` yields the empty (root) path.
    pub fn parse(dotted: &str) -> Self {
        Self(
            dotted
                .split('.')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Returns a new path with `segment` appended.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the category derived from the first segment.
    pub fn category(&self) -> Category {
        self.0
            .first()
            .map(|first| Category::from_segment(first))
            .unwrap_or(Category::Other)
    }

    /// Returns `true` if `prefix` matches the leading segments of this path.
    pub fn starts_with(&self, prefix: &TokenPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Returns the segments following `prefix`, or `None` when `prefix` does
    /// not match.
    pub fn strip_prefix(&self, prefix: &TokenPath) -> Option<&[String]> {
        self.0.strip_prefix(prefix.0.as_slice())
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for TokenPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl PartialOrd for TokenPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TokenPath {
    fn cmp(&self, other: &Self) -> Ordering {
        for (left, right) in self.0.iter().zip(other.0.iter()) {
            let ordering = compare_segments(left, right);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

/// Natural ordering for a single segment.
fn compare_segments(left: &str, right: &str) -> Ordering {
    match (left.parse::<u64>(), right.parse::<u64>()) {
        (Ok(l), Ok(r)) => l.cmp(&r).then_with(|| left.cmp(right)),
        _ => left.cmp(right),
    }
}
