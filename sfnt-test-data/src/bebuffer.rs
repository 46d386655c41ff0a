//! A buffer for building font data in big-endian order.

use font_types::Tag;

/// A growable byte buffer that writes scalars big-endian.
///
/// Convenient for assembling synthetic tables and fonts in tests.
#[derive(Clone, Default, Debug)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push_u8(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn push_i8(&mut self, value: i8) -> &mut Self {
        self.data.push(value as u8);
        self
    }

    pub fn push_u16(&mut self, value: u16) -> &mut Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn push_i16(&mut self, value: i16) -> &mut Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn push_u32(&mut self, value: u32) -> &mut Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn push_i32(&mut self, value: i32) -> &mut Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn push_i64(&mut self, value: i64) -> &mut Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn push_tag(&mut self, tag: Tag) -> &mut Self {
        self.data.extend_from_slice(&tag.to_be_bytes());
        self
    }

    pub fn extend(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Pads with zero bytes to the next multiple of four.
    ///
    /// Table offsets in a font file are expected to be word aligned.
    pub fn align4(&mut self) -> &mut Self {
        while self.data.len() % 4 != 0 {
            self.data.push(0);
        }
        self
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
