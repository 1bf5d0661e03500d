use crate::{Error, Result};

/// The attributes the SVG font-face element admits.
///
/// Override names are checked against this vocabulary before any other
/// work happens.
pub const FONT_FACE_ATTRS: &[&str] = &[
    "font-family",
    "font-style",
    "font-variant",
    "font-weight",
    "font-stretch",
    "font-size",
    "unicode-range",
    "units-per-em",
    "panose-1",
    "stemv",
    "stemh",
    "slope",
    "cap-height",
    "x-height",
    "accent-height",
    "ascent",
    "descent",
    "widths",
    "bbox",
    "ideographic",
    "alphabetic",
    "mathematical",
    "hanging",
    "v-ideographic",
    "v-alphabetic",
    "v-mathematical",
    "v-hanging",
    "underline-position",
    "underline-thickness",
    "strikethrough-position",
    "strikethrough-thickness",
    "overline-position",
    "overline-thickness",
];

/// Validate attribute overrides against the font-face vocabulary.
pub fn validate(attrs: &[(String, String)]) -> Result<()> {
    for (name, _) in attrs {
        if !FONT_FACE_ATTRS.contains(&name.as_str()) {
            return Err(Error::InvalidAttribute(name.clone()));
        }
    }
    Ok(())
}
