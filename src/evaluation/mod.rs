//! Evaluation core: XIRR solver and schedule evaluator

mod evaluator;
pub mod xirr;

pub use evaluator::{evaluate, evaluate_scaled, EvaluatedRow, Evaluation};
pub use xirr::{xirr as solve_xirr, xirr_with_guess, DEFAULT_GUESS};
