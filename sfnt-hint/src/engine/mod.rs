//! The bytecode interpreter.

mod cvt;
mod dispatch;
mod graphics;
mod stack;
mod storage;

use read_sfnt::tables::cvt::Cvt;
use read_sfnt::tables::maxp::Maxp;

use crate::graphics::GraphicsState;
use crate::storage::Storage;
use crate::value_stack::ValueStack;

/// Stack depth used when no `maxp` maxima are available.
pub const DEFAULT_STACK_ELEMENTS: usize = 256;
/// Storage size used when no `maxp` maxima are available.
pub const DEFAULT_STORAGE_AREA: usize = 64;

/// The TrueType bytecode interpreter.
///
/// Borrows the font's control value table for the duration of a run;
/// graphics state, value stack and storage are owned by the engine and
/// nothing is retained between engines.
pub struct Engine<'a> {
    graphics: GraphicsState,
    value_stack: ValueStack,
    storage: Storage,
    cvt: &'a mut Cvt,
}

impl<'a> Engine<'a> {
    pub fn new(cvt: &'a mut Cvt, max_stack_elements: usize, max_storage: usize) -> Self {
        Self {
            graphics: GraphicsState::default(),
            value_stack: ValueStack::new(max_stack_elements),
            storage: Storage::new(max_storage),
            cvt,
        }
    }

    /// Builds an engine sized from the font's `maxp` maxima.
    ///
    /// A version 0.5 table carries no maxima, so those fonts get the
    /// default sizes.
    pub fn for_font(cvt: &'a mut Cvt, maxp: &Maxp) -> Self {
        let (stack_elements, storage) = match &maxp.v1 {
            Some(v1) => (v1.max_stack_elements as usize, v1.max_storage as usize),
            None => (DEFAULT_STACK_ELEMENTS, DEFAULT_STORAGE_AREA),
        };
        Self::new(cvt, stack_elements, storage)
    }

    pub fn graphics(&self) -> &GraphicsState {
        &self.graphics
    }

    pub fn value_stack(&self) -> &ValueStack {
        &self.value_stack
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

/// Owns a control value table so tests can spin up engines without a
/// full font.
#[cfg(test)]
pub(crate) struct MockEngine {
    cvt: Cvt,
}

#[cfg(test)]
impl MockEngine {
    pub fn new() -> Self {
        let bytes = sfnt_test_data::cvt_table(&[0; 8]);
        let cvt = Cvt::read(read_sfnt::FontData::new(&bytes)).unwrap();
        Self { cvt }
    }

    pub fn engine(&mut self) -> Engine<'_> {
        Engine::new(&mut self.cvt, 32, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_from_maxp_maxima() {
        let bytes = sfnt_test_data::maxp_v1(1);
        let maxp = Maxp::read(read_sfnt::FontData::new(&bytes)).unwrap();
        let cvt_bytes = sfnt_test_data::cvt_table(&[0; 4]);
        let mut cvt = Cvt::read(read_sfnt::FontData::new(&cvt_bytes)).unwrap();
        let engine = Engine::for_font(&mut cvt, &maxp);
        assert_eq!(engine.value_stack().limit(), 256);
        assert_eq!(engine.storage().len(), 64);
    }

    #[test]
    fn version_half_maxp_gets_defaults() {
        let bytes = sfnt_test_data::maxp_v05(1);
        let maxp = Maxp::read(read_sfnt::FontData::new(&bytes)).unwrap();
        let cvt_bytes = sfnt_test_data::cvt_table(&[]);
        let mut cvt = Cvt::read(read_sfnt::FontData::new(&cvt_bytes)).unwrap();
        let engine = Engine::for_font(&mut cvt, &maxp);
        assert_eq!(engine.value_stack().limit(), DEFAULT_STACK_ELEMENTS);
        assert_eq!(engine.storage().len(), DEFAULT_STORAGE_AREA);
    }
}
