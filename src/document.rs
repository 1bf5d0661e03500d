use std::borrow::Cow;

use xmlwriter::{Options, XmlWriter};

use crate::{Error, Result};

/// An attribute list in document order.
type Attrs = Vec<(String, String)>;

/// The skeleton of an SVG font document.
///
/// Only the parts that matter for a font survive a round trip: the svg
/// root, its first font element, that font's first font-face and its
/// glyphs. Everything else the tool may have emitted is dropped.
pub struct SvgFontDocument {
    svg: Attrs,
    font: Attrs,
    face: Attrs,
    glyphs: Vec<Attrs>,
}

impl SvgFontDocument {
    /// Parse a document from the subsetting tool's output.
    pub fn parse(text: &str) -> Result<SvgFontDocument> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|e| Error::UnusableOutput(e.to_string()))?;

        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(Error::UnusableOutput("missing svg element".into()));
        }

        let font = root
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "font")
            .ok_or_else(|| Error::UnusableOutput("missing font element".into()))?;

        let mut face = None;
        let mut glyphs = vec![];
        for child in font.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "font-face" if face.is_none() => face = Some(attributes(child)),
                "glyph" => glyphs.push(attributes(child)),
                _ => {}
            }
        }

        let face = face.ok_or_else(|| {
            Error::UnusableOutput("missing font-face element".into())
        })?;

        Ok(SvgFontDocument {
            svg: root_attributes(root),
            font: attributes(font),
            face,
            glyphs,
        })
    }

    /// Overwrite attributes of the font-face element.
    ///
    /// Present attributes keep their position, new ones are appended.
    pub fn set_face_attrs(&mut self, attrs: &[(String, String)]) {
        for (name, value) in attrs {
            set(&mut self.face, name, value.clone());
        }
    }

    /// Re-tag the glyphs with the codepoints they stand for.
    ///
    /// The first glyph is the missing glyph. It stands for no character
    /// and loses any unicode attribute the tool gave it. Each further
    /// glyph must correspond to one codepoint, so the glyph count has
    /// to be one larger than the codepoint count.
    pub fn retag_unicode(&mut self, codepoints: &[u32]) -> Result<()> {
        let expected = codepoints.len() + 1;
        if self.glyphs.len() != expected {
            return Err(Error::UnusableOutput(format!(
                "expected {expected} glyphs, found {}",
                self.glyphs.len()
            )));
        }

        if let Some(first) = self.glyphs.first_mut() {
            first.retain(|(name, _)| name != "unicode");
        }

        for (glyph, code_point) in self.glyphs[1..].iter_mut().zip(codepoints) {
            set(glyph, "unicode", format!("&#{code_point};"));
        }

        Ok(())
    }

    /// Serialize the document.
    pub fn into_svg(self) -> String {
        let mut w = XmlWriter::new(Options::default());
        w.write_declaration();

        w.start_element("svg");
        for (name, value) in &self.svg {
            w.write_attribute(name, &escape_value(value));
        }

        w.start_element("font");
        for (name, value) in &self.font {
            w.write_attribute(name, &escape_value(value));
        }

        w.start_element("font-face");
        for (name, value) in &self.face {
            w.write_attribute(name, &escape_value(value));
        }
        w.end_element();

        for glyph in &self.glyphs {
            w.start_element("glyph");
            for (name, value) in glyph {
                w.write_attribute(name, &escape_value(value));
            }
            w.end_element();
        }

        restore_character_references(&w.end_document())
    }
}

/// The attributes of a node in document order.
fn attributes(node: roxmltree::Node) -> Attrs {
    node.attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect()
}

/// Like [`attributes`], with the node's namespace declarations leading.
fn root_attributes(node: roxmltree::Node) -> Attrs {
    let mut attrs = vec![];
    for ns in node.namespaces() {
        // The implicit xml namespace never needs a declaration.
        let name = match ns.name() {
            Some("xml") => continue,
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        attrs.push((name, ns.uri().to_string()));
    }
    attrs.extend(attributes(node));
    attrs
}

/// Overwrite an attribute in place or append it.
fn set(attrs: &mut Attrs, name: &str, value: String) {
    match attrs.iter_mut().find(|(n, _)| n == name) {
        Some((_, v)) => *v = value,
        None => attrs.push((name.to_string(), value)),
    }
}

/// Escape an attribute value. The writer only handles quotes itself.
fn escape_value(value: &str) -> Cow<'_, str> {
    if value.contains('&') || value.contains('<') {
        Cow::Owned(value.replace('&', "&amp;").replace('<', "&lt;"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Undo the escaping of the numeric character references injected into
/// the unicode attributes. Only well-formed decimal or hexadecimal
/// references are restored; any other ampersand stays escaped.
fn restore_character_references(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("&amp;#") {
        let (before, after) = rest.split_at(pos);
        result.push_str(before);
        let candidate = &after["&amp;#".len()..];
        match reference_end(candidate) {
            Some(end) => {
                result.push_str("&#");
                result.push_str(&candidate[..end]);
                rest = &candidate[end..];
            }
            None => {
                result.push_str("&amp;#");
                rest = candidate;
            }
        }
    }
    result.push_str(rest);
    result
}

/// The length of a reference body including the closing semicolon, if a
/// decimal or hexadecimal one starts here.
fn reference_end(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let hex = bytes.first() == Some(&b'x');
    let start = usize::from(hex);

    let mut i = start;
    while bytes.get(i).is_some_and(|b| {
        if hex {
            b.is_ascii_hexdigit()
        } else {
            b.is_ascii_digit()
        }
    }) {
        i += 1;
    }

    if i > start && bytes.get(i) == Some(&b';') {
        Some(i + 1)
    } else {
        None
    }
}
