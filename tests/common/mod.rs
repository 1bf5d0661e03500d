//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;

use svgfont::{Error, SubsetTool};

/// Build an OpenType font from raw tables.
pub fn font(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    font_at(tables, 0)
}

/// Build a font collection holding a single face.
pub fn collection(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut data = vec![];
    data.extend(*b"ttcf");
    data.extend(0x00010000u32.to_be_bytes()); // Version.
    data.extend(1u32.to_be_bytes()); // Number of faces.
    data.extend(12u32.to_be_bytes()); // Offset of the first face.
    data.extend(font_at(tables, 12));
    data
}

/// Build a font whose table offsets are relative to `base` bytes before
/// the start of the returned data.
fn font_at(tables: &[(&[u8; 4], Vec<u8>)], base: usize) -> Vec<u8> {
    let mut tables = tables.to_vec();
    tables.sort_by_key(|(tag, _)| **tag);

    let count = tables.len() as u16;
    let entry_selector = count.ilog2() as u16;
    let search_range = 16u16 << entry_selector;

    let mut data = vec![];
    data.extend(0x00010000u32.to_be_bytes());
    data.extend(count.to_be_bytes());
    data.extend(search_range.to_be_bytes());
    data.extend(entry_selector.to_be_bytes());
    data.extend((16 * count - search_range).to_be_bytes());

    let mut offset = base + 12 + 16 * tables.len();
    for (tag, table) in &tables {
        data.extend(**tag);
        data.extend(0u32.to_be_bytes()); // Checksum.
        data.extend((offset as u32).to_be_bytes());
        data.extend((table.len() as u32).to_be_bytes());
        offset += (table.len() + 3) & !3;
    }

    for (_, table) in &tables {
        data.extend(table);
        while (base + data.len()) % 4 != 0 {
            data.push(0);
        }
    }

    data
}

/// Build a cmap table from (platform, encoding, subtable) triples.
pub fn cmap(subtables: &[(u16, u16, Vec<u8>)]) -> Vec<u8> {
    let mut data = vec![];
    data.extend(0u16.to_be_bytes()); // Version.
    data.extend((subtables.len() as u16).to_be_bytes());

    let mut offset = 4 + 8 * subtables.len();
    for (platform, encoding, subtable) in subtables {
        data.extend(platform.to_be_bytes());
        data.extend(encoding.to_be_bytes());
        data.extend((offset as u32).to_be_bytes());
        offset += subtable.len();
    }

    for (_, _, subtable) in subtables {
        data.extend(subtable);
    }

    data
}

/// Build a format 4 subtable with one segment per mapping.
pub fn format4(mappings: &[(u16, u16)]) -> Vec<u8> {
    let mut mappings = mappings.to_vec();
    mappings.sort();

    let mut segments: Vec<(u16, u16, u16)> = mappings
        .iter()
        .map(|&(code, glyph)| (code, code, glyph.wrapping_sub(code)))
        .collect();
    segments.push((0xFFFF, 0xFFFF, 1));

    let seg_count = segments.len() as u16;
    let entry_selector = seg_count.ilog2() as u16;
    let search_range = 2 * (1u16 << entry_selector);

    let mut data = vec![];
    data.extend(4u16.to_be_bytes()); // Format.
    data.extend((16 + 8 * seg_count).to_be_bytes()); // Length.
    data.extend(0u16.to_be_bytes()); // Language.
    data.extend((2 * seg_count).to_be_bytes());
    data.extend(search_range.to_be_bytes());
    data.extend(entry_selector.to_be_bytes());
    data.extend((2 * seg_count - search_range).to_be_bytes());
    for (_, end, _) in &segments {
        data.extend(end.to_be_bytes());
    }
    data.extend(0u16.to_be_bytes()); // Reserved pad.
    for (start, _, _) in &segments {
        data.extend(start.to_be_bytes());
    }
    for (_, _, delta) in &segments {
        data.extend(delta.to_be_bytes());
    }
    for _ in &segments {
        data.extend(0u16.to_be_bytes()); // Id range offsets.
    }
    data
}

/// Build a format 12 subtable from (start, end, glyph) groups.
///
/// Groups must be sorted by start codepoint.
pub fn format12(groups: &[(u32, u32, u32)]) -> Vec<u8> {
    let mut data = vec![];
    data.extend(12u16.to_be_bytes()); // Format.
    data.extend(0u16.to_be_bytes()); // Reserved.
    data.extend((16 + 12 * groups.len() as u32).to_be_bytes()); // Length.
    data.extend(0u32.to_be_bytes()); // Language.
    data.extend((groups.len() as u32).to_be_bytes());
    for &(start, end, glyph) in groups {
        data.extend(start.to_be_bytes());
        data.extend(end.to_be_bytes());
        data.extend(glyph.to_be_bytes());
    }
    data
}

/// A minimal head table.
pub fn head() -> Vec<u8> {
    let mut data = vec![];
    data.extend(0x00010000u32.to_be_bytes()); // Version.
    data.extend(0u32.to_be_bytes()); // Revision.
    data.extend(0u32.to_be_bytes()); // Checksum adjustment.
    data.extend(0x5F0F3CF5u32.to_be_bytes()); // Magic.
    data.extend(0u16.to_be_bytes()); // Flags.
    data.extend(1000u16.to_be_bytes()); // Units per em.
    data.extend(0u64.to_be_bytes()); // Created.
    data.extend(0u64.to_be_bytes()); // Modified.
    data.extend([0; 8]); // Bounding box.
    data.extend(0u16.to_be_bytes()); // Mac style.
    data.extend(8u16.to_be_bytes()); // Lowest recommended ppem.
    data.extend(2i16.to_be_bytes()); // Font direction hint.
    data.extend(0i16.to_be_bytes()); // Index to loc format.
    data.extend(0i16.to_be_bytes()); // Glyph data format.
    data
}

/// A minimal hhea table.
pub fn hhea() -> Vec<u8> {
    let mut data = vec![];
    data.extend(0x00010000u32.to_be_bytes()); // Version.
    data.extend(800i16.to_be_bytes()); // Ascender.
    data.extend((-200i16).to_be_bytes()); // Descender.
    data.extend(0i16.to_be_bytes()); // Line gap.
    data.extend(1000u16.to_be_bytes()); // Advance width max.
    data.extend([0; 22]); // Side bearings, carets and reserved.
    data.extend(1u16.to_be_bytes()); // Number of h metrics.
    data
}

/// A minimal maxp table.
pub fn maxp(num_glyphs: u16) -> Vec<u8> {
    let mut data = vec![];
    data.extend(0x00005000u32.to_be_bytes()); // Version 0.5.
    data.extend(num_glyphs.to_be_bytes());
    data
}

/// A font whose cmap is a single Windows BMP subtable.
pub fn bmp_font(mappings: &[(u16, u16)]) -> Vec<u8> {
    let num_glyphs = mappings.iter().map(|&(_, g)| g).max().unwrap_or(0) + 1;
    font(&[
        (b"cmap", cmap(&[(3, 1, format4(mappings))])),
        (b"head", head()),
        (b"hhea", hhea()),
        (b"maxp", maxp(num_glyphs)),
    ])
}

/// Render a document shaped like the subsetting tool's output.
///
/// Like tx, it tags every glyph with a private use codepoint.
pub fn render(glyph_ids: &[u16]) -> String {
    let mut svg = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\">\n\
         <font id=\"Stub\" horiz-adv-x=\"1000\">\n\
         <font-face font-family=\"Stub\" units-per-em=\"1000\" \
         ascent=\"800\" descent=\"-200\"/>\n",
    );
    for (i, glyph) in glyph_ids.iter().enumerate() {
        svg.push_str(&format!(
            "<glyph unicode=\"&#{};\" glyph-name=\"g{glyph}\" horiz-adv-x=\"500\"/>\n",
            0xE000 + i
        ));
    }
    svg.push_str("</font>\n</svg>\n");
    svg
}

/// A tool that renders a plausible document for the requested glyphs.
pub struct StubTool;

impl SubsetTool for StubTool {
    fn subset(
        &self,
        _font: &[u8],
        glyph_ids: &[u16],
        _max_buffer: usize,
    ) -> Result<String, Error> {
        Ok(render(glyph_ids))
    }
}

/// A tool that records every invocation.
#[derive(Default)]
pub struct RecordingTool {
    pub calls: RefCell<Vec<Vec<u16>>>,
    pub max_buffers: RefCell<Vec<usize>>,
}

impl SubsetTool for RecordingTool {
    fn subset(
        &self,
        _font: &[u8],
        glyph_ids: &[u16],
        max_buffer: usize,
    ) -> Result<String, Error> {
        self.calls.borrow_mut().push(glyph_ids.to_vec());
        self.max_buffers.borrow_mut().push(max_buffer);
        Ok(render(glyph_ids))
    }
}

/// A tool that loses the last requested glyph.
pub struct ShortTool;

impl SubsetTool for ShortTool {
    fn subset(
        &self,
        _font: &[u8],
        glyph_ids: &[u16],
        _max_buffer: usize,
    ) -> Result<String, Error> {
        Ok(render(&glyph_ids[..glyph_ids.len() - 1]))
    }
}

/// A scratch directory removed again on drop.
pub struct TestDir {
    pub path: PathBuf,
}

impl TestDir {
    pub fn new(name: &str) -> TestDir {
        let path = std::env::temp_dir()
            .join(format!("svgfont-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        TestDir { path }
    }

    /// Write an executable shell script into the directory.
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        let mut permissions = std::fs::metadata(&path).unwrap().permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(&path, permissions).unwrap();
        path
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.path).ok();
    }
}

/// A fake tx that emits one glyph per requested id.
///
/// Mirrors the real tool's shape: the id list arrives behind `-g` and
/// every glyph gets a private use codepoint.
pub const FAKE_TX: &str = r#"ids="$4"
printf '%s' '<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg"><font id="Fake" horiz-adv-x="1000"><font-face font-family="Fake" units-per-em="1000"/>'
pua=57344
for id in $(printf '%s' "$ids" | tr ',' ' '); do
  printf '<glyph unicode="&#%s;" glyph-name="g%s"/>' "$pua" "$id"
  pua=$((pua+1))
done
printf '%s' '</font></svg>'
"#;
