//! Storage area for the hinting interpreter.

use crate::error::HintErrorKind;

/// The interpreter's scratch storage area.
///
/// A fixed-size array of 32-bit values addressed by the WS and RS
/// instructions; its size comes from `maxp.maxStorage`.
pub struct Storage {
    values: Vec<i32>,
}

impl Storage {
    pub fn new(size: usize) -> Self {
        Self {
            values: vec![0; size],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<i32, HintErrorKind> {
        self.values
            .get(index)
            .copied()
            .ok_or(HintErrorKind::InvalidStorageIndex(index))
    }

    pub fn set(&mut self, index: usize, value: i32) -> Result<(), HintErrorKind> {
        *self
            .values
            .get_mut(index)
            .ok_or(HintErrorKind::InvalidStorageIndex(index))? = value;
        Ok(())
    }
}
