//! Graphics state for the hinting interpreter.

use font_types::Point;

/// The interpreter's graphics state.
///
/// Distances and cut-in values are 26.6 fixed point; the freedom,
/// projection and dual projection vectors are 2.14 fixed point unit
/// vectors. Instructions mutate exactly the fields they name; everything
/// else persists until [`reset`](Self::reset).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GraphicsState {
    /// Auto flip state (true by default)
    pub auto_flip: bool,
    /// Limit for changes to the control value table, 26.6 (default 17/16
    /// pixels).
    pub control_value_cutin: i32,
    /// Base for delta instruction ppem offsets.
    pub delta_base: u16,
    /// Magnitude scale for delta instruction adjustments.
    pub delta_shift: u16,
    /// Second projection vector, used by dual projection instructions.
    pub dual_proj_vector: Point<i32>,
    /// Direction in which movement along the outline occurs.
    pub freedom_vector: Point<i32>,
    /// Direction in which distances are measured.
    pub proj_vector: Point<i32>,
    /// Number of times to repeat the next loop-aware instruction.
    pub loop_counter: u32,
    /// Minimum distance between hinted points, 26.6.
    pub min_distance: i32,
    /// Rounding mode for distances.
    pub round_state: i32,
    /// Reference points 0 through 2.
    pub rp0: usize,
    pub rp1: usize,
    pub rp2: usize,
    /// Dropout control mode.
    pub scan_control: bool,
    /// Distances under this cut-in use the single width value, 26.6.
    pub single_width_cutin: i32,
    /// Uniform stem width used below the cut-in, 26.6.
    pub single_width: i32,
    /// Zone pointers 0 through 2; 0 is the twilight zone, 1 the glyph
    /// zone.
    pub zp0: u8,
    pub zp1: u8,
    pub zp2: u8,
}

/// 2.14 fixed point unit vector along the x axis.
const AXIS_X: Point<i32> = Point::new(0x4000, 0);

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            auto_flip: true,
            control_value_cutin: (17 << 24) | 16,
            delta_base: 9,
            delta_shift: 3,
            dual_proj_vector: AXIS_X,
            freedom_vector: AXIS_X,
            proj_vector: AXIS_X,
            loop_counter: 1,
            min_distance: 1,
            round_state: 1,
            rp0: 0,
            rp1: 0,
            rp2: 0,
            scan_control: false,
            single_width_cutin: 0,
            single_width: 0,
            zp0: 1,
            zp1: 1,
            zp2: 1,
        }
    }
}

impl GraphicsState {
    /// Restores every field to its TrueType default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
