//! Syntax Tree Walk
//!
//! Depth-first walk over a parsed tree that reports function-like
//! declarations and loops written in the primary file.
//!
//! @module walk

pub mod filter;
pub mod traverse;

pub use filter::{classify, is_reportable, Decision};
pub use traverse::{walk, Reporter};
