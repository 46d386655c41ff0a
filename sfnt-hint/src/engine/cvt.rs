//! Control value table instructions.

use super::Engine;
use crate::error::HintErrorKind;

impl Engine<'_> {
    /// WCVTP[] (0x44) Write Control Value Table in Pixel units
    ///
    /// Pops a value and a CVT location, in that order, and writes the
    /// value to the table.
    pub(super) fn op_wcvtp(&mut self) -> Result<(), HintErrorKind> {
        let value = self.value_stack.pop()?;
        let index = self.value_stack.pop_usize()?;
        self.cvt
            .set(index, value as i16)
            .ok_or(HintErrorKind::InvalidCvtIndex(index))
    }

    /// WCVTF[] (0x70) Write Control Value Table in Funits
    ///
    /// Funit scaling needs a live scale factor, which this engine does
    /// not model, so the value is written unscaled like WCVTP.
    pub(super) fn op_wcvtf(&mut self) -> Result<(), HintErrorKind> {
        self.op_wcvtp()
    }

    /// RCVT[] (0x45) Read Control Value Table entry
    ///
    /// Pops a CVT location and pushes the value held there.
    pub(super) fn op_rcvt(&mut self) -> Result<(), HintErrorKind> {
        let index = self.value_stack.pop_usize()?;
        let value = self
            .cvt
            .get(index)
            .ok_or(HintErrorKind::InvalidCvtIndex(index))?;
        self.value_stack.push(value as i32)
    }
}
