//! examples of usage of RustedCalc
/// equation solver examples: single equations, systems, failures, configuration, batches
pub mod solver_examples;
