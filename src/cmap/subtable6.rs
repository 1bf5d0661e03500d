use crate::read::Reader;

/// A format 6 subtable.
///
/// Maps a single dense range of codepoints to consecutive array entries.
pub struct Subtable6 {
    first_code_point: u16,
    glyphs: Vec<u16>,
}

impl Subtable6 {
    /// Parse a format 6 subtable.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut r = Reader::new(data);
        r.skip_bytes(6)?; // Format, length and language.
        let first_code_point = r.read::<u16>()?;
        let count = r.read::<u16>()?;
        let glyphs = r.read_vector::<u16>(usize::from(count))?;
        Some(Subtable6 { first_code_point, glyphs })
    }

    /// Returns a glyph index for a code point.
    pub fn glyph_index(&self, code_point: u32) -> Option<u16> {
        // This subtable supports code points only in a u16 range.
        let code_point = u16::try_from(code_point).ok()?;
        let index = code_point.checked_sub(self.first_code_point)?;
        self.glyphs.get(usize::from(index)).copied()
    }

    /// Calls `f` for each codepoint defined in this table.
    pub fn codepoints(&self, mut f: impl FnMut(u32)) {
        for i in 0..self.glyphs.len() as u32 {
            if let Some(code_point) = u32::from(self.first_code_point).checked_add(i) {
                f(code_point);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(first: u16, glyphs: &[u16]) -> Vec<u8> {
        let mut data: Vec<u8> = vec![0, 6, 0, 0, 0, 0]; // Format, length and language.
        data.extend(first.to_be_bytes());
        data.extend((glyphs.len() as u16).to_be_bytes());
        data.extend(glyphs.iter().flat_map(|g| g.to_be_bytes()));
        data
    }

    #[test]
    fn lookup_and_enumeration() {
        let data = table(0x61, &[10, 0, 12]);
        let subtable = Subtable6::parse(&data).unwrap();

        assert_eq!(subtable.glyph_index(0x61), Some(10));
        assert_eq!(subtable.glyph_index(0x62), Some(0));
        assert_eq!(subtable.glyph_index(0x63), Some(12));
        assert_eq!(subtable.glyph_index(0x60), None);
        assert_eq!(subtable.glyph_index(0x64), None);

        let mut codepoints = vec![];
        subtable.codepoints(|c| codepoints.push(c));
        assert_eq!(codepoints, vec![0x61, 0x62, 0x63]);
    }

    #[test]
    fn truncated() {
        let data = table(0x61, &[10, 11, 12]);
        assert!(Subtable6::parse(&data[..data.len() - 1]).is_none());
    }
}
