/*!
Converts OpenType fonts into subsetted SVG font documents.

This crate drives an external subsetting tool (`tx` from the Adobe Font
Development Kit for OpenType) to turn a font with TrueType or CFF
outlines into an SVG font covering exactly the glyphs for a requested
set of characters, plus the missing glyph. Each surviving glyph is
tagged with the character it stands for, so the resulting document can
be served directly to renderers that still consume SVG fonts.

# Example
In the example below, we reduce a font to the glyphs needed for one
greeting and write the resulting document next to the original.

```no_run
use svgfont::{Include, Options};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
// Read the raw font data.
let data = std::fs::read("fonts/NotoSans-Regular.ttf")?;

// Keep only the glyphs for these characters.
let options = Options {
    include: Some(Include::Text("Hello, ☆!".into())),
    ..Options::default()
};
let output = svgfont::convert(&data, &options)?;

// Write the resulting document.
std::fs::write("target/NotoSans-Hello.svg", output.into_bytes())?;
# Ok(())
# }
```
*/

#![deny(unsafe_code)]
#![deny(missing_docs)]

mod attrs;
mod cmap;
mod document;
mod encode;
mod face;
mod read;
mod resolve;
mod select;
mod tool;

pub use crate::attrs::FONT_FACE_ATTRS;
pub use crate::cmap::CharacterMap;
pub use crate::encode::Output;
pub use crate::tool::{SubsetTool, Tx};

use crate::document::SvgFontDocument;

/// The default ceiling for the subsetting tool's output.
const DEFAULT_MAX_BUFFER: usize = 300_000_000;

/// Convert a font into an SVG font document.
///
/// Runs `tx` from the search path, or the program named by the
/// `SVGFONT_TX` environment variable. See [`convert_with`] for what
/// the conversion produces.
pub fn convert(data: &[u8], options: &Options) -> Result<Output> {
    convert_with(data, options, &Tx::from_env())
}

/// Convert a font into an SVG font document with a custom tool.
///
/// - The `data` must be in the OpenType font format. For font
///   collections, the first face is converted.
/// - The document covers the glyphs for all characters of
///   [`Options::include`] that the font maps, preceded by the missing
///   glyph. Every glyph except the missing one carries a numeric
///   character reference naming its character in its unicode
///   attribute; the missing glyph carries none.
/// - Overrides from [`Options::font_face_attrs`] are applied to the
///   font-face element of the output.
pub fn convert_with(
    data: &[u8],
    options: &Options,
    tool: &dyn SubsetTool,
) -> Result<Output> {
    attrs::validate(&options.font_face_attrs)?;

    let cmap = CharacterMap::parse(data)?;
    let selection = select::codepoints(options.include.as_ref())?;
    let resolution = resolve::resolve(&cmap, &selection);

    let raw = tool.subset(data, &resolution.glyph_ids, options.max_buffer)?;

    let mut document = SvgFontDocument::parse(&raw)?;
    document.set_face_attrs(&options.font_face_attrs);
    document.retag_unicode(&resolution.codepoints)?;

    encode::encode(document.into_svg(), options.encoding.as_deref())
}

/// Configuration for a conversion.
#[derive(Debug, Clone)]
pub struct Options {
    /// The characters whose glyphs the output should cover, besides
    /// the missing glyph. Without it, only the missing glyph survives.
    pub include: Option<Include>,
    /// Attribute overrides for the font-face element of the output.
    ///
    /// Names must come from [`FONT_FACE_ATTRS`].
    pub font_face_attrs: Vec<(String, String)>,
    /// The text encoding of the output. Without it, the raw document
    /// bytes are returned.
    pub encoding: Option<String>,
    /// The most bytes the subsetting tool may produce.
    pub max_buffer: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            include: None,
            font_face_attrs: vec![],
            encoding: None,
            max_buffer: DEFAULT_MAX_BUFFER,
        }
    }
}

/// The characters a conversion should cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Include {
    /// Individual characters. Each element must consist of exactly one
    /// Unicode codepoint.
    Chars(Vec<String>),
    /// Free-form text. Every distinct codepoint of it is covered.
    Text(String),
}

impl From<&str> for Include {
    fn from(text: &str) -> Self {
        Include::Text(text.into())
    }
}

impl From<String> for Include {
    fn from(text: String) -> Self {
        Include::Text(text)
    }
}

/// The result type for everything.
pub type Result<T> = std::result::Result<T, Error>;

/// The conversion failed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// An attribute override targets a name outside the font-face
    /// vocabulary.
    InvalidAttribute(String),
    /// An include element does not consist of exactly one codepoint.
    InvalidInclude(String),
    /// The file contains an unsupported kind of font.
    UnknownKind,
    /// The font file is damaged.
    MalformedFont,
    /// The font has no cmap table.
    MissingCmap,
    /// None of the font's cmap subtables has a supported Unicode
    /// format.
    UnsupportedCmap,
    /// The subsetting tool could not be run or failed.
    Tool(String),
    /// The subsetting tool produced output the conversion cannot use.
    UnusableOutput(String),
    /// The requested output encoding does not exist.
    UnknownEncoding(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidAttribute(name) => {
                write!(f, "{name} is not an attribute of the font-face element")
            }
            Self::InvalidInclude(element) => {
                write!(f, "include element {element:?} is not a single character")
            }
            Self::UnknownKind => f.pad("unsupported font format"),
            Self::MalformedFont => f.pad("malformed font"),
            Self::MissingCmap => f.pad("missing cmap table"),
            Self::UnsupportedCmap => f.pad("no supported cmap subtable"),
            Self::Tool(message) => write!(f, "subsetting tool failed: {message}"),
            Self::UnusableOutput(message) => {
                write!(f, "unusable subsetting tool output: {message}")
            }
            Self::UnknownEncoding(name) => write!(f, "unknown encoding {name:?}"),
        }
    }
}

impl std::error::Error for Error {}
