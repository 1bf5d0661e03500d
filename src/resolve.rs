use rustc_hash::FxHashSet;

use crate::cmap::CharacterMap;

/// The glyphs a conversion keeps and the codepoints they stand for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The glyph ids to retain, led by the missing glyph.
    pub glyph_ids: Vec<u16>,
    /// The codepoints of the retained glyphs, in the same order as
    /// `glyph_ids` minus the leading missing glyph.
    pub codepoints: Vec<u32>,
}

/// Resolve selected codepoints to the glyphs that survive subsetting.
///
/// Glyphs are claimed in ascending codepoint order, so when several
/// codepoints share a glyph, the smallest one keeps it. The missing
/// glyph always leads the id list and owns no codepoint; codepoint
/// zero is covered by it and never claims a mapping.
pub fn resolve(cmap: &CharacterMap, selection: &[u32]) -> Resolution {
    let mut points = selection.to_vec();
    points.sort_unstable();

    let mut claimed = FxHashSet::default();
    let mut pairs = vec![];
    for &code_point in &points {
        if code_point == 0 {
            continue;
        }
        if let Some(glyph) = cmap.get(code_point) {
            if claimed.insert(glyph) {
                pairs.push((glyph, code_point));
            }
        }
    }

    // Sorting the pairs keeps ids and codepoints in lockstep.
    pairs.sort_unstable();

    let mut glyph_ids = Vec::with_capacity(pairs.len() + 1);
    let mut codepoints = Vec::with_capacity(pairs.len());
    glyph_ids.push(0);
    for (glyph, code_point) in pairs {
        glyph_ids.push(glyph);
        codepoints.push(code_point);
    }

    Resolution { glyph_ids, codepoints }
}
