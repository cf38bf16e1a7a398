pub mod evaluator;
pub mod pool;

pub use evaluator::{score, Evaluator};
pub use pool::{BatchOutcome, EvaluationPool};
