//! A TrueType hinting bytecode interpreter.
//!
//! [`Engine`] executes the subset of the TrueType instruction set needed
//! for stack manipulation, storage and control value table access, and
//! vector selection. It borrows a font's control value table (parsed by
//! `read-sfnt`) mutably for the duration of a [`run`](Engine::run);
//! outline points are not modeled, so instructions that move points are
//! rejected as unhandled.

pub mod code;
pub mod engine;
pub mod error;
pub mod graphics;
pub mod storage;
pub mod value_stack;

pub use engine::Engine;
pub use error::{HintError, HintErrorKind};
pub use graphics::GraphicsState;
