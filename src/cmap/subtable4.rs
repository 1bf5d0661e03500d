use crate::read::{Readable, Reader};

/// A format 4 subtable.
///
/// Maps codepoints in the basic multilingual plane through segments of
/// either uniform glyph deltas or dedicated glyph id ranges.
pub struct Subtable4<'a> {
    end_codes: Vec<u16>,
    start_codes: Vec<u16>,
    id_deltas: Vec<i16>,
    id_range_offsets: Vec<u16>,
    glyph_id_array: &'a [u8],
}

impl<'a> Subtable4<'a> {
    /// Parse a format 4 subtable.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut r = Reader::new(data);
        r.skip_bytes(4)?; // Format and length.
        r.read::<u16>()?; // Language.
        let seg_count_x2 = r.read::<u16>()?;

        if seg_count_x2 < 2 {
            return None;
        }

        let seg_count = usize::from(seg_count_x2 / 2);
        r.skip_bytes(6)?; // Search range, entry selector and range shift.
        let end_codes = r.read_vector::<u16>(seg_count)?;
        r.skip_bytes(2)?; // Reserved pad.
        let start_codes = r.read_vector::<u16>(seg_count)?;
        let id_deltas = r.read_vector::<i16>(seg_count)?;

        // Glyph array offsets are relative to the position of the range
        // offset itself, so the tail must be captured before reading them.
        let glyph_id_array = r.tail()?;
        let id_range_offsets = r.read_vector::<u16>(seg_count)?;

        Some(Subtable4 {
            end_codes,
            start_codes,
            id_deltas,
            id_range_offsets,
            glyph_id_array,
        })
    }

    /// Returns a glyph index for a code point.
    pub fn glyph_index(&self, code_point: u32) -> Option<u16> {
        // This subtable supports code points only in a u16 range.
        let code_point = u16::try_from(code_point).ok()?;

        // A custom binary search.
        let mut start = 0;
        let mut end = self.start_codes.len();
        while end > start {
            let index = (start + end) / 2;
            let end_value = *self.end_codes.get(index)?;
            if end_value >= code_point {
                let start_value = *self.start_codes.get(index)?;
                if start_value > code_point {
                    end = index;
                } else {
                    let id_range_offset = *self.id_range_offsets.get(index)?;
                    let id_delta = *self.id_deltas.get(index)?;
                    if id_range_offset == 0 {
                        return Some(code_point.wrapping_add(id_delta as u16));
                    } else if id_range_offset == 0xFFFF {
                        // Some malformed fonts have 0xFFFF as the last offset,
                        // which is invalid and should be ignored.
                        return None;
                    }

                    let delta = (u32::from(code_point) - u32::from(start_value)) * 2;
                    let delta = u16::try_from(delta).ok()?;

                    let id_range_offset_pos = (index * 2) as u16;
                    let pos = id_range_offset_pos.wrapping_add(delta);
                    let pos = pos.wrapping_add(id_range_offset);

                    let glyph_array_value =
                        u16::read_at(self.glyph_id_array, usize::from(pos))?;

                    // 0 indicates missing glyph.
                    if glyph_array_value == 0 {
                        return None;
                    }

                    let glyph_id = (glyph_array_value as i16).wrapping_add(id_delta);
                    return u16::try_from(glyph_id).ok();
                }
            } else {
                start = index + 1;
            }
        }

        None
    }

    /// Calls `f` for each codepoint defined in this table.
    pub fn codepoints(&self, mut f: impl FnMut(u32)) {
        for (start, end) in self.start_codes.iter().zip(&self.end_codes) {
            // 0xFFFF value is special and indicates codes end.
            if *start == *end && *start == 0xFFFF {
                break;
            }

            for code_point in *start..=*end {
                f(u32::from(code_point));
            }
        }
    }
}
