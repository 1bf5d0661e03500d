use crate::read::{Readable, Reader};
use crate::{Error, Result};

/// A 4-byte OpenType tag.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// The character to glyph index mapping table.
    pub const CMAP: Self = Self(*b"cmap");
}

impl Readable<'_> for Tag {
    const SIZE: usize = 4;

    fn read(r: &mut Reader) -> Option<Self> {
        r.read::<[u8; 4]>().map(Self)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.pad(std::str::from_utf8(&self.0).unwrap_or("...."))
    }
}

impl std::fmt::Debug for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// What kind of container holds the font.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum FontKind {
    /// TrueType outlines.
    TrueType,
    /// CFF outlines.
    Cff,
    /// A font collection.
    Collection,
}

impl Readable<'_> for FontKind {
    const SIZE: usize = u32::SIZE;

    fn read(r: &mut Reader) -> Option<Self> {
        match r.read::<u32>()? {
            0x00010000 | 0x74727565 => Some(FontKind::TrueType),
            0x4F54544F => Some(FontKind::Cff),
            0x74746366 => Some(FontKind::Collection),
            _ => None,
        }
    }
}

/// Locates a table in the font file.
#[derive(Debug, Copy, Clone)]
struct TableRecord {
    tag: Tag,
    offset: u32,
    length: u32,
}

impl Readable<'_> for TableRecord {
    const SIZE: usize = Tag::SIZE + u32::SIZE + u32::SIZE + u32::SIZE;

    fn read(r: &mut Reader) -> Option<Self> {
        let tag = r.read::<Tag>()?;
        r.read::<u32>()?; // Checksum.
        let offset = r.read::<u32>()?;
        let length = r.read::<u32>()?;
        Some(TableRecord { tag, offset, length })
    }
}

/// A single font face with its table records.
pub struct Face<'a> {
    /// The underlying data. Table offsets point into this.
    data: &'a [u8],
    /// The table records for this face, sorted by tag.
    records: Vec<TableRecord>,
}

impl<'a> Face<'a> {
    /// Parse a font face from OpenType data.
    ///
    /// Collections contribute their first face.
    pub fn parse(data: &'a [u8]) -> Result<Face<'a>> {
        let mut r = Reader::new(data);
        let kind = r.read::<FontKind>().ok_or(Error::UnknownKind)?;

        if kind == FontKind::Collection {
            let offset = u32::read_at(data, 12).ok_or(Error::MalformedFont)?;
            let subdata =
                data.get(offset as usize..).ok_or(Error::MalformedFont)?;
            r = Reader::new(subdata);

            if r.read::<FontKind>().ok_or(Error::UnknownKind)?
                == FontKind::Collection
            {
                return Err(Error::UnknownKind);
            }
        }

        let count = r.read::<u16>().ok_or(Error::MalformedFont)?;
        r.read::<u16>().ok_or(Error::MalformedFont)?; // Search range.
        r.read::<u16>().ok_or(Error::MalformedFont)?; // Entry selector.
        r.read::<u16>().ok_or(Error::MalformedFont)?; // Range shift.

        let mut records = vec![];
        for _ in 0..count {
            records.push(r.read::<TableRecord>().ok_or(Error::MalformedFont)?);
        }

        Ok(Face { data, records })
    }

    /// Retrieve the data for the given table.
    pub fn table(&self, tag: Tag) -> Option<&'a [u8]> {
        let i = self.records.binary_search_by(|record| record.tag.cmp(&tag)).ok()?;
        let record = self.records.get(i)?;
        let start = record.offset as usize;
        let end = start + record.length as usize;
        self.data.get(start..end)
    }
}
