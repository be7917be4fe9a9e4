//! Exact symbolic algebra used by the initial-data pipeline.

pub mod calculus;
pub mod eval;
pub mod expr;
pub mod matrix;
pub mod rational;
pub mod tensor;
