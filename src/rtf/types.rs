//! Formatting types for the RTF writer.

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// The RTF control word for this alignment.
    pub fn control_word(&self) -> &'static str {
        match self {
            Self::Left => "ql",
            Self::Center => "qc",
            Self::Right => "qr",
            Self::Justify => "qj",
        }
    }
}

/// Font family, as written in the font table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Nil,
    Roman,
    Swiss,
    Modern,
}

impl FontFamily {
    pub fn control_word(&self) -> &'static str {
        match self {
            Self::Nil => "fnil",
            Self::Roman => "froman",
            Self::Swiss => "fswiss",
            Self::Modern => "fmodern",
        }
    }
}

/// A font table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub family: FontFamily,
    pub name: String,
}

impl Font {
    pub fn new(family: FontFamily, name: impl Into<String>) -> Self {
        Self {
            family,
            name: name.into(),
        }
    }
}

/// Character formatting of a paragraph or cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatting {
    pub bold: bool,
    pub italic: bool,
    /// Font size in half-points; document default when unset
    pub font_size: Option<u16>,
}

impl Formatting {
    pub const PLAIN: Self = Self {
        bold: false,
        italic: false,
        font_size: None,
    };

    pub const BOLD: Self = Self {
        bold: true,
        italic: false,
        font_size: None,
    };

    pub const ITALIC: Self = Self {
        bold: false,
        italic: true,
        font_size: None,
    };

    /// Same formatting at a different size.
    pub const fn with_size(mut self, half_points: u16) -> Self {
        self.font_size = Some(half_points);
        self
    }

    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && self.font_size.is_none()
    }
}
