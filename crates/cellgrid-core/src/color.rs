//! Color annotations from format strings

/// Named colors recognized inside a `[...]` format tag, case-insensitive.
///
/// The canonical capitalization here is what gets surfaced to the UI.
const NAMED_COLORS: [&str; 12] = [
    "Red", "Green", "Blue", "Yellow", "Cyan", "Magenta", "Black", "White", "Gray", "Orange",
    "Purple", "Brown",
];

/// A color annotation carried by a format section: either a named color or a
/// `#RRGGBB`-style hex value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorTag {
    /// Canonical color name, or the hex string including the `#`
    pub value: String,
    /// True when `value` is a hex color rather than a name
    pub is_hex: bool,
}

impl ColorTag {
    /// Parse the content of a bracket tag as a color.
    ///
    /// Accepts the named colors in [`NAMED_COLORS`] (any case) and `#` followed
    /// by 3-6 hex digits. Anything else is not a color tag.
    pub fn parse(content: &str) -> Option<ColorTag> {
        let content = content.trim();

        if let Some(hex) = content.strip_prefix('#') {
            if (3..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Some(ColorTag {
                    value: format!("#{}", hex),
                    is_hex: true,
                });
            }
            return None;
        }

        NAMED_COLORS
            .iter()
            .find(|name| name.eq_ignore_ascii_case(content))
            .map(|name| ColorTag {
                value: (*name).to_string(),
                is_hex: false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_named_colors() {
        let tag = ColorTag::parse("Red").unwrap();
        assert_eq!(tag.value, "Red");
        assert!(!tag.is_hex);

        // Case-insensitive, canonicalized
        assert_eq!(ColorTag::parse("ORANGE").unwrap().value, "Orange");
        assert_eq!(ColorTag::parse("gray").unwrap().value, "Gray");
    }

    #[test]
    fn test_hex_colors() {
        let tag = ColorTag::parse("#FF0000").unwrap();
        assert_eq!(tag.value, "#FF0000");
        assert!(tag.is_hex);

        assert!(ColorTag::parse("#abc").is_some());
        assert!(ColorTag::parse("#ab").is_none());
        assert!(ColorTag::parse("#GGGGGG").is_none());
        assert!(ColorTag::parse("#1234567").is_none());
    }

    #[test]
    fn test_non_colors() {
        assert!(ColorTag::parse("NotAColor").is_none());
        assert!(ColorTag::parse(">100").is_none());
        assert!(ColorTag::parse("").is_none());
    }
}
