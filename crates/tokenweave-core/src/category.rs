//! Token categories.

use std::fmt;

/// The category of a token, derived from the first segment of its path.
///
/// Categories decide which platform file a token lands in and which unit
/// rules apply to it (for example `fontSize` dimensions become `sp` on
/// Android while every other dimension becomes `dp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Color,
    Size,
    FontSize,
    FontWeight,
    LineHeight,
    FontFamily,
    /// Any first segment not listed above.
    Other,
}

impl Category {
    /// Maps a first path segment to its category.
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "color" => Category::Color,
            "size" => Category::Size,
            "fontSize" => Category::FontSize,
            "fontWeight" => Category::FontWeight,
            "lineHeight" => Category::LineHeight,
            "fontFamily" => Category::FontFamily,
            _ => Category::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Size => "size",
            Category::FontSize => "fontSize",
            Category::FontWeight => "fontWeight",
            Category::LineHeight => "lineHeight",
            Category::FontFamily => "fontFamily",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
