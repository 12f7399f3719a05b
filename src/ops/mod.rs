//! Promotion and dispatch of elementwise operators.

mod dispatch;
mod kernels;
mod operator;

pub use dispatch::{binary, resolve, unary, Operand, Resolution};
pub use operator::{BinaryOp, OpFamily, UnaryOp};
