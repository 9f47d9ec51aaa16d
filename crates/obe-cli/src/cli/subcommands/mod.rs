pub mod matrix;

pub use matrix::{MatrixArgs, MatrixCommands, OutcomeKindArg};
