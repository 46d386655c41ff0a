//! Errors that occur when reading font data.

use font_types::Tag;

/// An error that occurs while parsing font data.
///
/// The first failure aborts the parse that produced it; none of the
/// parsers expose partially decoded state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadError {
    /// An offset or read was out of bounds.
    OutOfBounds,
    /// The container signature was not a recognized sfnt version.
    InvalidSfnt(u32),
    /// A collection file did not start with the `ttcf` tag.
    InvalidTtc(Tag),
    /// A collection declared no fonts.
    EmptyCollection,
    /// The `head` table magic number was wrong.
    BadHeadMagic(u32),
    /// A table's contents did not sum to its directory checksum.
    ChecksumMismatch(Tag),
    /// A table had a version this crate does not support.
    UnsupportedVersion(Tag, u32),
    /// A required table was absent from the directory.
    TableIsMissing(Tag),
    /// Glyph queries on a font without TrueType outlines (e.g. CFF).
    NoTrueTypeOutlines,
    /// A glyph's encoding needed more bytes than its `loca` span allows.
    GlyphSpanMismatch(u16),
    /// Catch-all for structurally invalid data.
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "an offset was out of bounds"),
            Self::InvalidSfnt(version) => write!(f, "invalid sfnt version 0x{version:08X}"),
            Self::InvalidTtc(tag) => write!(f, "invalid ttc tag {tag}"),
            Self::EmptyCollection => write!(f, "font collection contains no fonts"),
            Self::BadHeadMagic(magic) => {
                write!(f, "head magic number 0x{magic:08X} != 0x5F0F3CF5")
            }
            Self::ChecksumMismatch(tag) => write!(f, "checksum mismatch for the {tag} table"),
            Self::UnsupportedVersion(tag, version) => {
                write!(f, "unsupported {tag} version 0x{version:08X}")
            }
            Self::TableIsMissing(tag) => write!(f, "the {tag} table is missing"),
            Self::NoTrueTypeOutlines => {
                write!(f, "font does not contain TrueType outlines")
            }
            Self::GlyphSpanMismatch(gid) => {
                write!(f, "glyph {gid} data is inconsistent with its loca span")
            }
            Self::MalformedData(msg) => write!(f, "malformed data: '{msg}'"),
        }
    }
}

impl std::error::Error for ReadError {}

/// An error produced by the font container: either file I/O or parsing.
#[derive(Debug)]
pub enum FontError {
    Io(std::io::Error),
    Read(ReadError),
}

impl std::fmt::Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Read(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Read(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for FontError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReadError> for FontError {
    fn from(err: ReadError) -> Self {
        Self::Read(err)
    }
}
