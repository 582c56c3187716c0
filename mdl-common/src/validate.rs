//! Structural validation of serialized alias models
//!
//! Checks the header and walks the sections using the counts it declares.
//! Problems are reported as [`Diagnostic`]s; validation never fails outright
//! and never panics on malformed input.

use std::fmt;

use crate::formats::{
    FRAME_SINGLE, Frame, MDL_FORMAT, MDL_IDENT, MDL_VERSION, MdlHeader, SKIN_SINGLE, TexCoord,
    TriVertex, Triangle,
};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The loader will reject the file.
    Error,
    /// The file loads but is probably not what was intended.
    Warning,
}

/// One finding about a model byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}", self.message)
    }
}

/// Result of [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// False when any diagnostic is an error.
    pub ok: bool,
    /// Parsed header, present whenever the stream holds at least 84 bytes.
    pub header: Option<MdlHeader>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    fn from_diagnostics(header: Option<MdlHeader>, diagnostics: Vec<Diagnostic>) -> Self {
        let ok = !diagnostics.iter().any(|d| d.severity == Severity::Error);
        Self {
            ok,
            header,
            diagnostics,
        }
    }

    /// Diagnostics with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Diagnostics with [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Build a report holding a single error, for callers that fail before
    /// any bytes are available.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::from_diagnostics(None, vec![Diagnostic::error(message)])
    }
}

/// Validate a serialized model.
pub fn validate(bytes: &[u8]) -> ValidationReport {
    let Some(header) = MdlHeader::from_bytes(bytes) else {
        return ValidationReport::failed(format!(
            "stream is {} bytes, shorter than the {}-byte header",
            bytes.len(),
            MdlHeader::SIZE
        ));
    };

    let mut diagnostics = Vec::new();
    if header.ident != MDL_IDENT {
        diagnostics.push(Diagnostic::error(format!(
            "bad magic {:?}, expected {:?}",
            header.ident.to_le_bytes(),
            MDL_FORMAT.magic
        )));
    }
    if header.version != MDL_VERSION {
        diagnostics.push(Diagnostic::error(format!(
            "unsupported version {}, expected {MDL_VERSION}",
            header.version
        )));
    }
    if !diagnostics.is_empty() {
        return ValidationReport::from_diagnostics(Some(header), diagnostics);
    }

    check_counts(&header, &mut diagnostics);
    walk_sections(&header, bytes, &mut diagnostics);

    ValidationReport::from_diagnostics(Some(header), diagnostics)
}

fn check_counts(header: &MdlHeader, diagnostics: &mut Vec<Diagnostic>) {
    let counts = [
        ("vertices", header.num_verts, MDL_FORMAT.max_verts),
        ("triangles", header.num_tris, MDL_FORMAT.max_tris),
        ("frames", header.num_frames, MDL_FORMAT.max_frames),
        ("skins", header.num_skins, MDL_FORMAT.max_skins),
    ];
    for (what, count, max) in counts {
        if count == 0 {
            diagnostics.push(Diagnostic::warning(format!("model has no {what}")));
        } else if count as usize > max {
            diagnostics.push(Diagnostic::warning(format!(
                "{count} {what} exceeds the loader limit of {max}"
            )));
        }
    }
}

/// Read cursor over the section area. All arithmetic is in u64 so absurd
/// header counts cannot overflow.
struct Cursor<'a> {
    bytes: &'a [u8],
    offset: u64,
}

impl Cursor<'_> {
    fn remaining(&self) -> u64 {
        (self.bytes.len() as u64).saturating_sub(self.offset)
    }

    fn read_u32(&mut self) -> Option<u32> {
        let start = usize::try_from(self.offset).ok()?;
        let chunk = self.bytes.get(start..start.checked_add(4)?)?;
        self.offset += 4;
        Some(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }

    fn skip(&mut self, len: u64) -> bool {
        if self.remaining() < len {
            return false;
        }
        self.offset += len;
        true
    }
}

fn walk_sections(header: &MdlHeader, bytes: &[u8], diagnostics: &mut Vec<Diagnostic>) {
    let mut cursor = Cursor {
        bytes,
        offset: MdlHeader::SIZE as u64,
    };
    let truncated = |section: &str, index: Option<u32>| {
        let at = index.map(|i| format!(" {i}")).unwrap_or_default();
        Diagnostic::error(format!("stream truncated in {section}{at}"))
    };

    let skin_pixels = u64::from(header.skin_width) * u64::from(header.skin_height);
    for i in 0..header.num_skins {
        let Some(group) = cursor.read_u32() else {
            diagnostics.push(truncated("skin", Some(i)));
            return;
        };
        if group != SKIN_SINGLE {
            diagnostics.push(Diagnostic::warning(format!(
                "skin {i} is a skin group; section sizes past it are not checked"
            )));
            return;
        }
        if !cursor.skip(skin_pixels) {
            diagnostics.push(truncated("skin", Some(i)));
            return;
        }
    }

    let verts = u64::from(header.num_verts);
    if !cursor.skip(verts * TexCoord::SIZE as u64) {
        diagnostics.push(truncated("texcoords", None));
        return;
    }
    if !cursor.skip(u64::from(header.num_tris) * Triangle::SIZE as u64) {
        diagnostics.push(truncated("triangles", None));
        return;
    }

    let frame_body = (Frame::HEADER_SIZE - 4) as u64 + verts * TriVertex::SIZE as u64;
    for i in 0..header.num_frames {
        let Some(kind) = cursor.read_u32() else {
            diagnostics.push(truncated("frame", Some(i)));
            return;
        };
        if kind != FRAME_SINGLE {
            diagnostics.push(Diagnostic::warning(format!(
                "frame {i} is a frame group; section sizes past it are not checked"
            )));
            return;
        }
        if !cursor.skip(frame_body) {
            diagnostics.push(truncated("frame", Some(i)));
            return;
        }
    }

    let trailing = cursor.remaining();
    if trailing > 0 {
        diagnostics.push(Diagnostic::warning(format!(
            "{trailing} trailing bytes after the last frame"
        )));
    }
}
