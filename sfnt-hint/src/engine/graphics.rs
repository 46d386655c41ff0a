//! Graphics state instructions.

use font_types::Point;

use super::Engine;
use crate::error::HintErrorKind;

impl Engine<'_> {
    /// SVTCA[] (0x00 - 0x01) Set Vectors To Coordinate Axis
    /// SPVTCA[] (0x02 - 0x03) Set Projection Vector To Coordinate Axis
    /// SFVTCA[] (0x04 - 0x05) Set Freedom Vector To Coordinate Axis
    ///
    /// The low bit of the opcode selects the axis (1 = x); the next bit
    /// distinguishes projection-only from freedom-only variants.
    pub(super) fn op_svtca(&mut self, opcode: u8) -> Result<(), HintErrorKind> {
        let x = ((opcode & 1) as i32) << 14;
        let y = x ^ 0x4000;
        let vector = Point::new(x, y);
        if opcode < 4 {
            self.graphics.proj_vector = vector;
            self.graphics.dual_proj_vector = vector;
        }
        if opcode & 2 == 0 {
            self.graphics.freedom_vector = vector;
        }
        Ok(())
    }

    /// SPVTL[] (0x06 - 0x07) Set Projection Vector To Line
    ///
    /// This engine has no zone point storage to take the line's
    /// endpoints from, so the two point numbers are consumed and the
    /// instruction is reported as unhandled rather than producing a
    /// made-up vector.
    pub(super) fn op_spvtl(&mut self, opcode: u8) -> Result<(), HintErrorKind> {
        let _point1 = self.value_stack.pop_usize()?;
        let _point2 = self.value_stack.pop_usize()?;
        Err(HintErrorKind::UnhandledOpcode(opcode))
    }
}
