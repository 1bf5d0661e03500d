use crate::read::{Readable, Reader};

/// A sequential map group record.
struct SequentialMapGroup {
    start_char_code: u32,
    end_char_code: u32,
    start_glyph_id: u32,
}

impl Readable<'_> for SequentialMapGroup {
    const SIZE: usize = u32::SIZE + u32::SIZE + u32::SIZE;

    fn read(r: &mut Reader<'_>) -> Option<Self> {
        let start_char_code = r.read::<u32>()?;
        let end_char_code = r.read::<u32>()?;
        let start_glyph_id = r.read::<u32>()?;
        Some(Self { start_char_code, end_char_code, start_glyph_id })
    }
}

/// A format 12 subtable.
///
/// Maps codepoints beyond the basic multilingual plane through groups of
/// consecutive characters with consecutive glyph ids.
pub struct Subtable12 {
    groups: Vec<SequentialMapGroup>,
}

impl Subtable12 {
    /// Parse a format 12 subtable.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut r = Reader::new(data);
        r.skip_bytes(4)?; // Format and reserved.
        r.read::<u32>()?; // Length.
        r.read::<u32>()?; // Language.
        let num_groups = usize::try_from(r.read::<u32>()?).ok()?;

        // The group count must fit into the remaining data.
        if num_groups > r.tail()?.len() / SequentialMapGroup::SIZE {
            return None;
        }

        let groups = r.read_vector::<SequentialMapGroup>(num_groups)?;
        Some(Subtable12 { groups })
    }

    /// Returns a glyph index for a code point.
    pub fn glyph_index(&self, code_point: u32) -> Option<u16> {
        let index = self
            .groups
            .binary_search_by(|range| {
                use core::cmp::Ordering;

                if range.start_char_code > code_point {
                    Ordering::Greater
                } else if range.end_char_code < code_point {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .ok()?;

        let group = self.groups.get(index)?;
        let id = group
            .start_glyph_id
            .checked_add(code_point)?
            .checked_sub(group.start_char_code)?;
        u16::try_from(id).ok()
    }

    /// Calls `f` for each codepoint defined in this table.
    pub fn codepoints(&self, mut f: impl FnMut(u32)) {
        for group in &self.groups {
            // Groups beyond the Unicode range are ignored.
            let end = group.end_char_code.min(0x10FFFF);
            for code_point in group.start_char_code..=end {
                f(code_point);
            }
        }
    }
}
