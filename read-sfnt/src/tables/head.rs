//! The [head (Font Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use font_types::{Fixed, LongDateTime, Tag};

use crate::error::ReadError;
use crate::font_data::FontData;

/// The expected value of [`Head::magic_number`].
pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The `head` table: font-wide metrics and flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Head {
    pub major_version: u16,
    pub minor_version: u16,
    pub font_revision: Fixed,
    pub checksum_adjustment: u32,
    pub magic_number: u32,
    pub flags: u16,
    pub units_per_em: u16,
    pub created: LongDateTime,
    pub modified: LongDateTime,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    /// Selects the `loca` table's integer width: 0 for short, 1 for long.
    pub index_to_loc_format: i16,
    pub glyph_data_format: i16,
}

impl Head {
    pub const TAG: Tag = Tag::new(b"head");

    /// Reads the table, failing with [`ReadError::BadHeadMagic`] as soon
    /// as the magic number field is seen to be wrong.
    ///
    /// The caller is responsible for having verified the table checksum
    /// first; the magic number is the one field that can independently
    /// fail the whole font.
    pub fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let major_version = cursor.read_u16()?;
        let minor_version = cursor.read_u16()?;
        let font_revision = Fixed::from_bits(cursor.read_i32()?);
        let checksum_adjustment = cursor.read_u32()?;
        let magic_number = cursor.read_u32()?;
        if magic_number != MAGIC_NUMBER {
            return Err(ReadError::BadHeadMagic(magic_number));
        }
        Ok(Head {
            major_version,
            minor_version,
            font_revision,
            checksum_adjustment,
            magic_number,
            flags: cursor.read_u16()?,
            units_per_em: cursor.read_u16()?,
            created: LongDateTime::new(cursor.read_i64()?),
            modified: LongDateTime::new(cursor.read_i64()?),
            x_min: cursor.read_i16()?,
            y_min: cursor.read_i16()?,
            x_max: cursor.read_i16()?,
            y_max: cursor.read_i16()?,
            mac_style: cursor.read_u16()?,
            lowest_rec_ppem: cursor.read_u16()?,
            font_direction_hint: cursor.read_i16()?,
            index_to_loc_format: cursor.read_i16()?,
            glyph_data_format: cursor.read_i16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_table() {
        let bytes = sfnt_test_data::head_table(1, MAGIC_NUMBER);
        let head = Head::read(FontData::new(&bytes)).unwrap();
        assert_eq!(head.major_version, 1);
        assert_eq!(head.units_per_em, 1000);
        assert_eq!(head.magic_number, MAGIC_NUMBER);
        assert_eq!(head.index_to_loc_format, 1);
        assert_eq!((head.x_max, head.y_max), (10, 8));
    }

    #[test]
    fn bad_magic_fails() {
        let bytes = sfnt_test_data::head_table(0, 0xDEADBEEF);
        assert_eq!(
            Head::read(FontData::new(&bytes)),
            Err(ReadError::BadHeadMagic(0xDEADBEEF))
        );
    }

    #[test]
    fn truncated_table_fails() {
        let bytes = sfnt_test_data::head_table(0, MAGIC_NUMBER);
        assert_eq!(
            Head::read(FontData::new(&bytes[..30])),
            Err(ReadError::OutOfBounds)
        );
    }
}
