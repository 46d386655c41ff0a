//! The supported font tables.

pub mod cvt;
pub mod glyf;
pub mod head;
pub mod loca;
pub mod maxp;
