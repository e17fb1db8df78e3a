//! Per-cell formatting attributes.
//!
//! Formatting lives beside the grid, keyed by cell address. An absent
//! entry means default formatting; entries are created lazily on the
//! first format command and never pruned automatically.

use serde::{Deserialize, Serialize};

/// Horizontal text alignment within a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Toggleable boolean format attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormatKind {
    Bold,
    Italic,
    Underline,
}

/// Flat per-cell style record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
}

impl CellStyle {
    pub fn toggle(&mut self, kind: FormatKind) {
        match kind {
            FormatKind::Bold => self.bold = !self.bold,
            FormatKind::Italic => self.italic = !self.italic,
            FormatKind::Underline => self.underline = !self.underline,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == CellStyle::default()
    }
}
