//! The character to glyph index mapping table.

mod subtable0;
mod subtable12;
mod subtable4;
mod subtable6;

use rustc_hash::FxHashMap;

use self::subtable0::Subtable0;
use self::subtable12::Subtable12;
use self::subtable4::Subtable4;
use self::subtable6::Subtable6;
use crate::face::{Face, Tag};
use crate::read::{Readable, Reader};
use crate::{Error, Result};

/// An encoding record in the cmap table.
#[derive(Debug, Copy, Clone)]
struct EncodingRecord {
    platform_id: u16,
    encoding_id: u16,
    offset: u32,
}

impl EncodingRecord {
    /// Whether this record maps Unicode codepoints.
    fn is_unicode(&self) -> bool {
        self.platform_id == 0
            || (self.platform_id == 3 && [0, 1, 10].contains(&self.encoding_id))
    }
}

impl Readable<'_> for EncodingRecord {
    const SIZE: usize = u16::SIZE + u16::SIZE + u32::SIZE;

    fn read(r: &mut Reader) -> Option<Self> {
        let platform_id = r.read::<u16>()?;
        let encoding_id = r.read::<u16>()?;
        let offset = r.read::<u32>()?;
        Some(EncodingRecord { platform_id, encoding_id, offset })
    }
}

/// A parsed subtable of a supported format.
enum Subtable<'a> {
    Format0(Subtable0),
    Format4(Subtable4<'a>),
    Format6(Subtable6),
    Format12(Subtable12),
}

impl Subtable<'_> {
    /// Returns a glyph index for a code point.
    fn glyph_index(&self, code_point: u32) -> Option<u16> {
        match self {
            Subtable::Format0(s) => s.glyph_index(code_point),
            Subtable::Format4(s) => s.glyph_index(code_point),
            Subtable::Format6(s) => s.glyph_index(code_point),
            Subtable::Format12(s) => s.glyph_index(code_point),
        }
    }

    /// Calls `f` for each codepoint defined in this table.
    fn codepoints(&self, f: impl FnMut(u32)) {
        match self {
            Subtable::Format0(s) => s.codepoints(f),
            Subtable::Format4(s) => s.codepoints(f),
            Subtable::Format6(s) => s.codepoints(f),
            Subtable::Format12(s) => s.codepoints(f),
        }
    }
}

/// The union of a font's Unicode character mappings.
///
/// Collects the mappings of every Unicode subtable in the font's cmap
/// table. When several subtables map the same codepoint, the mapping of
/// the earliest record wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterMap {
    map: FxHashMap<u32, u16>,
}

impl CharacterMap {
    /// Extract the character map from a font file.
    ///
    /// For font collections, the first face is read.
    pub fn parse(data: &[u8]) -> Result<CharacterMap> {
        let face = Face::parse(data)?;
        let cmap = face.table(Tag::CMAP).ok_or(Error::MissingCmap)?;

        let mut r = Reader::new(cmap);
        r.read::<u16>().ok_or(Error::MalformedFont)?; // Version.
        let count = r.read::<u16>().ok_or(Error::MalformedFont)?;

        let mut map = FxHashMap::default();
        let mut supported = false;

        for _ in 0..count {
            let record = r.read::<EncodingRecord>().ok_or(Error::MalformedFont)?;
            if !record.is_unicode() {
                continue;
            }

            let subdata = cmap
                .get(record.offset as usize..)
                .ok_or(Error::MalformedFont)?;

            let format = u16::read_at(subdata, 0).ok_or(Error::MalformedFont)?;
            let subtable = match format {
                0 => Subtable0::parse(subdata).map(Subtable::Format0),
                4 => Subtable4::parse(subdata).map(Subtable::Format4),
                6 => Subtable6::parse(subdata).map(Subtable::Format6),
                12 => Subtable12::parse(subdata).map(Subtable::Format12),
                _ => continue,
            };

            let subtable = subtable.ok_or(Error::MalformedFont)?;
            subtable.codepoints(|code_point| {
                if let Some(glyph) = subtable.glyph_index(code_point) {
                    // Glyph id 0 marks a missing character.
                    if glyph != 0 {
                        map.entry(code_point).or_insert(glyph);
                    }
                }
            });

            supported = true;
        }

        if !supported {
            return Err(Error::UnsupportedCmap);
        }

        Ok(CharacterMap { map })
    }

    /// The glyph id a codepoint maps to, if any.
    pub fn get(&self, code_point: u32) -> Option<u16> {
        self.map.get(&code_point).copied()
    }

    /// The number of mapped codepoints.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the font maps no codepoints at all.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_mappings(mappings: &[(u32, u16)]) -> CharacterMap {
        let mut map = FxHashMap::default();
        for &(code_point, glyph) in mappings {
            map.entry(code_point).or_insert(glyph);
        }
        CharacterMap { map }
    }
}
