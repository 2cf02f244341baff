use compact_str::{CompactString, format_compact};
use core::fmt;

/// A single table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(CompactString),
    Number(f64),
}

impl Cell {
    /// Build a text cell from trimmed input, treating blank input as no value.
    #[must_use]
    pub fn text(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::Text(trimmed.into()))
        }
    }

    /// Like [`Cell::text`], but produces a number cell when the input parses as one.
    #[must_use]
    pub fn inferred(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map_or_else(|| Self::Text(trimmed.into()), Self::Number),
        )
    }

    /// The textual form of the cell, used for join keys and prefix filters.
    #[must_use]
    pub fn to_key(&self) -> CompactString {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_compact!("{n}"),
        }
    }

    /// Interpret the cell as a number, parsing text when needed.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Number(n) => Some(*n),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_trims_and_drops_blank() {
        assert_eq!(Cell::text("  G100 "), Some(Cell::Text("G100".into())));
        assert_eq!(Cell::text("   "), None);
        assert_eq!(Cell::text(""), None);
    }

    #[test]
    fn test_inferred_detects_numbers() {
        assert_eq!(Cell::inferred("1.85"), Some(Cell::Number(1.85)));
        assert_eq!(Cell::inferred(" 42 "), Some(Cell::Number(42.0)));
        assert_eq!(Cell::inferred("RUN_7"), Some(Cell::Text("RUN_7".into())));
        assert_eq!(Cell::inferred("NaN"), Some(Cell::Text("NaN".into())));
        assert_eq!(Cell::inferred(""), None);
    }

    #[test]
    fn test_to_key() {
        assert_eq!(Cell::Text("S001".into()).to_key(), "S001");
        assert_eq!(Cell::Number(12.0).to_key(), "12");
        assert_eq!(Cell::Number(0.5).to_key(), "0.5");
        assert_eq!(Cell::Number(12.0).to_key(), Cell::Number(12.0).to_string());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Cell::Text(" 3000000000 ".into()).as_number(), Some(3_000_000_000.0));
        assert_eq!(Cell::Text("NA".into()).as_number(), None);
        assert_eq!(Cell::Number(2.5).as_number(), Some(2.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::Text("XY".into()).to_string(), "XY");
        assert_eq!(Cell::Number(3.25).to_string(), "3.25");
    }
}
