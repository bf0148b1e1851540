// src/tiles.rs
use serde::{Deserialize, Serialize};

/// Number of distinct symbols on a board. Each one is dealt exactly twice.
pub const SYMBOL_COUNT: usize = 24;

/// Tile face. Discriminants follow the Unicode Mahjong block starting at U+1F000.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    East = 0, South, West, North,
    Red, Green, White,
    Man1, Man2, Man3, Man4, Man5, Man6, Man7, Man8, Man9,
    Sou1, Sou2, Sou3, Sou4, Sou5, Sou6, Sou7, Sou8,
}

impl Symbol {
    pub const ALL: [Symbol; SYMBOL_COUNT] = {
        use Symbol::*;
        [
            East, South, West, North,
            Red, Green, White,
            Man1, Man2, Man3, Man4, Man5, Man6, Man7, Man8, Man9,
            Sou1, Sou2, Sou3, Sou4, Sou5, Sou6, Sou7, Sou8,
        ]
    };

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Returns the Unicode Mahjong tile glyph
    pub fn to_unicode(self) -> char {
        // U+1F000..=U+1F017 are all assigned scalar values
        char::from_u32(0x1F000 + self as u32).unwrap_or('?')
    }

    pub fn from_unicode(glyph: char) -> Option<Symbol> {
        let offset = (glyph as u32).checked_sub(0x1F000)?;
        u8::try_from(offset).ok().and_then(|id| Symbol::try_from(id).ok())
    }
}

impl TryFrom<u8> for Symbol {
    type Error = ();
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Symbol::ALL.get(v as usize).copied().ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_to_unicode() {
        let east = Symbol::try_from(0).unwrap();
        assert_eq!(east, Symbol::East);
        assert_eq!(east.to_unicode(), '🀀');

        let last = Symbol::try_from(23).unwrap();
        assert_eq!(last, Symbol::Sou8);
        assert_eq!(last.to_unicode(), '🀗');

        assert!(Symbol::try_from(24).is_err());
    }

    #[test]
    fn glyph_lookup_is_inverse() {
        for s in Symbol::ALL {
            assert_eq!(Symbol::from_unicode(s.to_unicode()), Some(s));
            assert_eq!(Symbol::try_from(s.id()), Ok(s));
        }
        assert_eq!(Symbol::from_unicode('🀘'), None); // Sou9 is not dealt
        assert_eq!(Symbol::from_unicode('A'), None);
    }
}
