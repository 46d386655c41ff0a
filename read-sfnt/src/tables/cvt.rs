//! The [cvt (Control Value Table)](https://docs.microsoft.com/en-us/typography/opentype/spec/cvt) table

use font_types::Tag;

use crate::error::ReadError;
use crate::font_data::FontData;

/// The control value table: a flat array of signed values referenced by
/// hinting instructions.
///
/// The hinting engine holds a mutable borrow while it runs (WCVTP and
/// friends write entries); the table is never resized after parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cvt {
    values: Vec<i16>,
}

impl Cvt {
    pub const TAG: Tag = Tag::new(b"cvt ");

    /// Reads `data.len() / 2` control values.
    ///
    /// There is nothing to validate beyond the reads themselves; a
    /// truncated table surfaces as a read failure.
    pub fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let count = data.len() / 2;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(cursor.read_i16()?);
        }
        Ok(Cvt { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i16> {
        self.values.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: i16) -> Option<()> {
        *self.values.get_mut(index)? = value;
        Some(())
    }

    pub fn values(&self) -> &[i16] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_signed_values() {
        let bytes = sfnt_test_data::cvt_table(&[0, -1, 512, i16::MIN]);
        let cvt = Cvt::read(FontData::new(&bytes)).unwrap();
        assert_eq!(cvt.values(), &[0, -1, 512, i16::MIN]);
    }

    #[test]
    fn set_is_bounds_checked() {
        let bytes = sfnt_test_data::cvt_table(&[1, 2]);
        let mut cvt = Cvt::read(FontData::new(&bytes)).unwrap();
        assert_eq!(cvt.set(1, 9), Some(()));
        assert_eq!(cvt.get(1), Some(9));
        assert_eq!(cvt.set(2, 9), None);
        assert_eq!(cvt.get(2), None);
    }

    #[test]
    fn odd_trailing_byte_is_ignored() {
        // length / 2 values; a trailing odd byte is simply not a value
        let cvt = Cvt::read(FontData::new(&[0, 5, 7])).unwrap();
        assert_eq!(cvt.values(), &[5]);
    }
}
