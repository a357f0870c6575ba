//! Formatting state carried through the scope stack.
//!
//! One [`Format`] value travels with the reader: groups copy it on entry and
//! restore it on exit, so every field here automatically has
//! inherit-override-revert semantics. Defaults follow the values the format
//! assumes before any control word has been seen.

use bitflags::bitflags;

bitflags! {
    /// Character style toggles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CharStyle: u8 {
        const BOLD       = 1;
        const ITALIC     = 1 << 1;
        const UNDERLINE  = 1 << 2;
        const STRIKE     = 1 << 3;
        const SMALL_CAPS = 1 << 4;
        const HIDDEN     = 1 << 5;
    }
}

/// Character-run properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharFormat {
    pub style: CharStyle,
    /// Font table index.
    pub font: u16,
    /// Size in half-points.
    pub size: u16,
}

impl Default for CharFormat {
    fn default() -> Self {
        Self { style: CharStyle::empty(), font: 0, size: 24 }
    }
}

/// Paragraph justification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Paragraph properties. Indents are in twips.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParFormat {
    pub alignment: Alignment,
    pub first_indent: i32,
    pub left_indent: i32,
    pub right_indent: i32,
}

/// Section properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFormat {
    pub columns: u16,
}

impl Default for SectionFormat {
    fn default() -> Self {
        Self { columns: 1 }
    }
}

/// Document properties. Dimensions are in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocFormat {
    pub page_width: i32,
    pub page_height: i32,
    pub left_margin: i32,
    pub right_margin: i32,
    pub top_margin: i32,
    pub bottom_margin: i32,
    pub default_font: u16,
    pub landscape: bool,
    pub facing_pages: bool,
}

impl Default for DocFormat {
    fn default() -> Self {
        // US letter with the margins every writer assumes.
        Self {
            page_width: 12240,
            page_height: 15840,
            left_margin: 1800,
            right_margin: 1800,
            top_margin: 1440,
            bottom_margin: 1440,
            default_font: 0,
            landscape: false,
            facing_pages: false,
        }
    }
}

/// Full formatting snapshot, one per open group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub character: CharFormat,
    pub paragraph: ParFormat,
    pub section: SectionFormat,
    pub document: DocFormat,
}
