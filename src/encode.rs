use data_encoding::{BASE64, BASE64URL_NOPAD, HEXLOWER};

use crate::{Error, Result};

/// A finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The raw document bytes.
    Bytes(Vec<u8>),
    /// The document in the requested text encoding.
    Text(String),
}

impl Output {
    /// The output as bytes, with text encoded as UTF-8.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Output::Bytes(bytes) => bytes,
            Output::Text(text) => text.into_bytes(),
        }
    }

    /// The output as text, if an encoding was requested.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Bytes(_) => None,
            Output::Text(text) => Some(text),
        }
    }
}

/// Encode the document in the requested encoding.
///
/// Without an encoding, the raw bytes pass through unchanged. Encoding
/// names are matched case-insensitively.
pub fn encode(svg: String, encoding: Option<&str>) -> Result<Output> {
    let Some(name) = encoding else {
        return Ok(Output::Bytes(svg.into_bytes()));
    };

    let text = match name.to_ascii_lowercase().as_str() {
        "utf8" | "utf-8" => svg,
        "base64" => BASE64.encode(svg.as_bytes()),
        "base64url" => BASE64URL_NOPAD.encode(svg.as_bytes()),
        "hex" => HEXLOWER.encode(svg.as_bytes()),
        // Each byte becomes the character with its value.
        "latin1" | "binary" => svg.bytes().map(char::from).collect(),
        // The high bit of each byte is masked off.
        "ascii" => svg.bytes().map(|b| char::from(b & 0x7F)).collect(),
        // Byte pairs become little-endian code units. A trailing odd
        // byte is dropped and unpaired surrogates are replaced.
        "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => {
            let units = svg
                .as_bytes()
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
            char::decode_utf16(units)
                .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        }
        _ => return Err(Error::UnknownEncoding(name.to_string())),
    };

    Ok(Output::Text(text))
}
