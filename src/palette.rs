use crate::foundation::error::{RippleError, RippleResult};

/// Glyphs used by the default water field, ordered from calm to crest.
pub const DEFAULT_PALETTE: &str = "~≈≋⋿⊰⊱◟◝";

/// Ordered, non-empty sequence of glyphs indexed by the field renderer.
///
/// Glyphs are Unicode scalar values, so multi-byte characters count as one entry.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Palette {
    glyphs: Vec<char>,
}

impl Palette {
    /// Build a palette from a glyph string. Empty strings are rejected.
    pub fn new(glyphs: &str) -> RippleResult<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(RippleError::validation("palette must contain at least one glyph"));
        }
        Ok(Self { glyphs })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `idx`, wrapping around the palette length.
    pub fn glyph(&self, idx: usize) -> char {
        self.glyphs[idx % self.glyphs.len()]
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_PALETTE.chars().collect(),
        }
    }
}

impl TryFrom<String> for Palette {
    type Error = RippleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Palette> for String {
    fn from(value: Palette) -> Self {
        value.glyphs.into_iter().collect()
    }
}

impl std::fmt::Display for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for g in &self.glyphs {
            write!(f, "{g}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_has_eight_glyphs() {
        let p = Palette::default();
        assert_eq!(p.len(), 8);
        assert_eq!(p.glyph(0), '~');
        assert_eq!(p.glyph(7), '◝');
        assert_eq!(p.to_string(), DEFAULT_PALETTE);
    }

    #[test]
    fn empty_palette_is_rejected() {
        let err = Palette::new("").unwrap_err();
        assert!(err.to_string().contains("at least one glyph"));
    }

    #[test]
    fn glyph_wraps() {
        let p = Palette::new("AB").unwrap();
        assert_eq!(p.glyph(2), 'A');
        assert_eq!(p.glyph(5), 'B');
    }

    #[test]
    fn serde_uses_plain_string() {
        let p: Palette = serde_json::from_str("\"xyz\"").unwrap();
        assert_eq!(p.glyphs(), &['x', 'y', 'z']);
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"xyz\"");
        assert!(serde_json::from_str::<Palette>("\"\"").is_err());
    }
}
