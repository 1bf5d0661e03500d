use crate::{Error, Include, Result};

/// Determine the codepoints a conversion should cover.
///
/// The returned sequence is ascending and deduplicated, and always
/// leads with codepoint zero, which stands for the missing glyph.
pub fn codepoints(include: Option<&Include>) -> Result<Vec<u32>> {
    let mut points = vec![0];

    match include {
        None => {}
        Some(Include::Text(text)) => {
            points.extend(text.chars().map(u32::from));
        }
        Some(Include::Chars(chars)) => {
            for element in chars {
                let mut iter = element.chars();
                match (iter.next(), iter.next()) {
                    (Some(c), None) => points.push(u32::from(c)),
                    _ => return Err(Error::InvalidInclude(element.clone())),
                }
            }
        }
    }

    points.sort_unstable();
    points.dedup();
    Ok(points)
}
