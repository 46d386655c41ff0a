//! Value stack for the hinting interpreter.

use crate::code::Args;
use crate::error::HintErrorKind;

use HintErrorKind::{ValueStackOverflow, ValueStackUnderflow};

/// The interpreter's LIFO stack of 32-bit values.
///
/// Capacity comes from `maxp.maxStackElements`; pushing past it is an
/// error rather than a reallocation, so a runaway program cannot grow
/// memory without bound.
pub struct ValueStack {
    values: Vec<i32>,
    limit: usize,
}

impl ValueStack {
    pub fn new(limit: usize) -> Self {
        Self {
            values: Vec::with_capacity(limit),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// The maximum number of values the stack will hold.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: i32) -> Result<(), HintErrorKind> {
        if self.values.len() == self.limit {
            return Err(ValueStackOverflow);
        }
        self.values.push(value);
        Ok(())
    }

    /// Pushes the inline operands of a PUSHB/PUSHW family instruction.
    pub fn push_args(&mut self, args: &Args) -> Result<(), HintErrorKind> {
        for value in args.values() {
            self.push(value)?;
        }
        Ok(())
    }

    pub fn pop(&mut self) -> Result<i32, HintErrorKind> {
        self.values.pop().ok_or(ValueStackUnderflow)
    }

    /// Pops a value to be used as an index.
    pub fn pop_usize(&mut self) -> Result<usize, HintErrorKind> {
        Ok(self.pop()? as usize)
    }

    pub fn peek(&self) -> Option<i32> {
        self.values.last().copied()
    }
}
