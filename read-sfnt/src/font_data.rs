//! Bounds-checked big-endian reads over raw font bytes.

use std::ops::RangeBounds;

use font_types::Tag;

use crate::error::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice providing bounds-checked,
/// big-endian primitive reads. Every multi-byte field in an sfnt file is
/// big-endian, so no other byte order is offered.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

macro_rules! read_be_at {
    ($name:ident, $ty:ty) => {
        #[doc = concat!("Reads a big-endian `", stringify!($ty), "` at `offset`.")]
        pub fn $name(&self, offset: usize) -> Result<$ty, ReadError> {
            const LEN: usize = std::mem::size_of::<$ty>();
            self.bytes
                .get(offset..offset + LEN)
                .and_then(|bytes| bytes.try_into().ok())
                .map(<$ty>::from_be_bytes)
                .ok_or(ReadError::OutOfBounds)
        }
    };
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData { bytes })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    read_be_at!(read_u8_at, u8);
    read_be_at!(read_i8_at, i8);
    read_be_at!(read_u16_at, u16);
    read_be_at!(read_i16_at, i16);
    read_be_at!(read_u32_at, u32);
    read_be_at!(read_i32_at, i32);
    read_be_at!(read_u64_at, u64);
    read_be_at!(read_i64_at, i64);

    /// Reads a 4-byte table tag at `offset`.
    pub fn read_tag_at(&self, offset: usize) -> Result<Tag, ReadError> {
        self.read_u32_at(offset).map(Tag::from_u32)
    }

    /// Returns `len` raw bytes starting at `offset`.
    pub fn read_bytes_at(&self, offset: usize, len: usize) -> Result<&'a [u8], ReadError> {
        self.bytes
            .get(offset..offset + len)
            .ok_or(ReadError::OutOfBounds)
    }

    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }
}

/// A cursor over [`FontData`] that tracks the bytes consumed so far.
///
/// Each `read_*` method advances by the size of the value read, so a
/// parser is a straight-line sequence of reads with `?`, and the final
/// [`position`](Self::position) tells the caller how many bytes the
/// structure actually occupied.
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

macro_rules! cursor_read {
    ($name:ident, $at:ident, $ty:ty) => {
        pub fn $name(&mut self) -> Result<$ty, ReadError> {
            let value = self.data.$at(self.pos)?;
            self.pos += std::mem::size_of::<$ty>();
            Ok(value)
        }
    };
}

impl<'a> Cursor<'a> {
    cursor_read!(read_u8, read_u8_at, u8);
    cursor_read!(read_i8, read_i8_at, i8);
    cursor_read!(read_u16, read_u16_at, u16);
    cursor_read!(read_i16, read_i16_at, i16);
    cursor_read!(read_u32, read_u32_at, u32);
    cursor_read!(read_i32, read_i32_at, i32);
    cursor_read!(read_u64, read_u64_at, u64);
    cursor_read!(read_i64, read_i64_at, i64);

    pub fn read_tag(&mut self) -> Result<Tag, ReadError> {
        self.read_u32().map(Tag::from_u32)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let bytes = self.data.read_bytes_at(self.pos, len)?;
        self.pos += len;
        Ok(bytes)
    }

    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos += n_bytes;
    }

    /// The number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}
