//! Delimiter between composed name components.

use serde::{Deserialize, Serialize};

/// The single separator character inserted between component values.
///
/// Only four separators are legal; anything else read from the active
/// configuration is a configuration error, not a fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `-` separator.
    #[default]
    Hyphen,
    /// `_` separator.
    Underscore,
    /// `.` separator.
    Period,
    /// No separator at all.
    None,
}

impl Delimiter {
    /// Parse the active delimiter from its raw configuration string.
    ///
    /// # Errors
    ///
    /// Returns the offending string if it is not `-`, `_`, `.`, or empty.
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        match raw {
            "-" => Ok(Self::Hyphen),
            "_" => Ok(Self::Underscore),
            "." => Ok(Self::Period),
            "" => Ok(Self::None),
            other => Err(other.to_string()),
        }
    }

    /// The separator as a string slice (empty for [`Delimiter::None`]).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hyphen => "-",
            Self::Underscore => "_",
            Self::Period => ".",
            Self::None => "",
        }
    }

    /// The separator character, if there is one.
    #[must_use]
    pub const fn char(&self) -> Option<char> {
        match self {
            Self::Hyphen => Some('-'),
            Self::Underscore => Some('_'),
            Self::Period => Some('.'),
            Self::None => None,
        }
    }

    /// Whether this delimiter inserts nothing.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_delimiters() {
        assert_eq!(Delimiter::parse("-"), Ok(Delimiter::Hyphen));
        assert_eq!(Delimiter::parse("_"), Ok(Delimiter::Underscore));
        assert_eq!(Delimiter::parse("."), Ok(Delimiter::Period));
        assert_eq!(Delimiter::parse(""), Ok(Delimiter::None));
    }

    #[test]
    fn test_parse_rejects_anything_else() {
        assert_eq!(Delimiter::parse("+"), Err("+".to_string()));
        assert_eq!(Delimiter::parse("--"), Err("--".to_string()));
        assert_eq!(Delimiter::parse(" "), Err(" ".to_string()));
    }

    #[test]
    fn test_as_str_round_trip() {
        for d in [
            Delimiter::Hyphen,
            Delimiter::Underscore,
            Delimiter::Period,
            Delimiter::None,
        ] {
            assert_eq!(Delimiter::parse(d.as_str()), Ok(d));
        }
    }
}
