// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Examples;
pub mod Utils;
pub mod numerical;
pub mod symbolic;

pub use numerical::equation_solver::{EquationSolver, solve, solve_batch, solve_with};
pub use numerical::errors::EquationError;
pub use numerical::solution::{Solution, format_solutions};
