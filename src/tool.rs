use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::{Error, Result};

/// How much of a failing tool's stderr is kept for the error message.
const STDERR_KEEP: u64 = 64 * 1024;

/// Produces an SVG font document covering a set of glyphs.
///
/// Implementations receive the raw font data and the glyph ids to
/// retain, led by the missing glyph, and return the document text.
pub trait SubsetTool {
    /// Subset `font` to the given glyphs.
    ///
    /// The tool must not produce more than `max_buffer` bytes.
    fn subset(&self, font: &[u8], glyph_ids: &[u16], max_buffer: usize)
        -> Result<String>;
}

/// The `tx` tool from the Adobe Font Development Kit for OpenType.
///
/// The font is staged in a temporary file, which is removed again when
/// the call returns, and the document is captured from the tool's
/// standard output.
pub struct Tx {
    program: PathBuf,
}

impl Tx {
    /// A tool that runs `tx` from the search path.
    pub fn new() -> Tx {
        Tx { program: "tx".into() }
    }

    /// A tool that runs the given program in place of `tx`.
    pub fn with_program(program: impl Into<PathBuf>) -> Tx {
        Tx { program: program.into() }
    }

    /// A tool honoring the `SVGFONT_TX` environment variable.
    ///
    /// When the variable is unset, `tx` from the search path is used.
    pub fn from_env() -> Tx {
        match std::env::var_os("SVGFONT_TX") {
            Some(program) => Tx { program: program.into() },
            None => Tx::new(),
        }
    }
}

impl Default for Tx {
    fn default() -> Self {
        Self::new()
    }
}

impl SubsetTool for Tx {
    fn subset(
        &self,
        font: &[u8],
        glyph_ids: &[u16],
        max_buffer: usize,
    ) -> Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix("svgfont-")
            .tempfile()
            .map_err(|e| Error::Tool(e.to_string()))?;
        file.write_all(font).map_err(|e| Error::Tool(e.to_string()))?;

        let list = glyph_ids
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let mut child = Command::new(&self.program)
            .arg("-svg")
            .arg("-sa")
            .arg("-g")
            .arg(&list)
            .arg(file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Tool(e.to_string()))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Tool("missing stdout".into()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Tool("missing stderr".into()))?;

        // Drain stderr on the side so a chatty tool cannot deadlock
        // against the stdout pipe.
        let drain = std::thread::spawn(move || {
            let mut buffer = Vec::new();
            (&mut stderr).take(STDERR_KEEP).read_to_end(&mut buffer).ok();
            std::io::copy(&mut stderr, &mut std::io::sink()).ok();
            buffer
        });

        // Read one byte past the ceiling to detect overflow.
        let mut output = Vec::new();
        let limit = (max_buffer as u64).saturating_add(1);
        let capture = (&mut stdout)
            .take(limit)
            .read_to_end(&mut output)
            .map_err(|e| Error::Tool(e.to_string()));

        if capture.is_err() || output.len() > max_buffer {
            child.kill().ok();
            child.wait().ok();
            // The kill does not reach the tool's children. Closing the
            // stdout read end fails their writes, so the drain sees the
            // stderr pipe close instead of blocking on it.
            drop(stdout);
            drain.join().ok();
            capture?;
            return Err(Error::Tool(format!("output exceeded {max_buffer} bytes")));
        }

        let status = child.wait().map_err(|e| Error::Tool(e.to_string()))?;
        let stderr_output = drain.join().unwrap_or_default();

        if !status.success() {
            let message = String::from_utf8_lossy(&stderr_output);
            let message = message.trim();
            return Err(Error::Tool(if message.is_empty() {
                format!("exited with {status}")
            } else {
                message.to_string()
            }));
        }

        String::from_utf8(output)
            .map_err(|_| Error::Tool("output is not valid UTF-8".into()))
    }
}
