//! Ethos Runtime - the decision engine over a sealed genome

pub mod engine;

pub use engine::DecisionEngine;
