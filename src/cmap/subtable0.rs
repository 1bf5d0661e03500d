use crate::read::Reader;

/// A format 0 subtable.
///
/// Maps the codepoints 0 to 255 through a plain byte table.
pub struct Subtable0 {
    glyphs: Vec<u8>,
}

impl Subtable0 {
    /// Parse a format 0 subtable.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut r = Reader::new(data);
        r.skip_bytes(6)?; // Format, length and language.
        let glyphs = r.read_vector::<u8>(256)?;
        Some(Subtable0 { glyphs })
    }

    /// Returns a glyph index for a code point.
    pub fn glyph_index(&self, code_point: u32) -> Option<u16> {
        let index = u8::try_from(code_point).ok()?;
        self.glyphs.get(usize::from(index)).map(|id| u16::from(*id))
    }

    /// Calls `f` for each codepoint defined in this table.
    pub fn codepoints(&self, mut f: impl FnMut(u32)) {
        for (i, glyph) in self.glyphs.iter().enumerate() {
            if *glyph != 0 {
                f(i as u32);
            }
        }
    }
}
