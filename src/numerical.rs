//! solvers and their shared machinery
/// tolerances for zero tests, root deduplication and verification
pub mod tolerances;
/// error type of the engine
pub mod errors;
/// solutions, their formatting and the step recorder
pub mod solution;
/// a x + b = 0
pub mod linear;
/// a x² + b x + c = 0, real and complex roots
pub mod quadratic;
/// a x³ + b x² + c x + d = 0 by Cardano's method with the trigonometric branch
pub mod cubic;
/// 2x2 linear systems by Cramer's rule, rank based diagnostics of singular systems
pub mod linear_system;
/// equations reduced to polynomial ones: absolute values and square roots, with verification
pub mod derived;
/// # Equation solver
/// classification, dispatch, batch solving, reports and export
///# Example
/// ```
/// use RustedCalc::numerical::equation_solver::solve;
/// use RustedCalc::numerical::solution::format_solutions;
/// let solutions = solve("x + y = 3; x - y = 1").unwrap();
/// assert_eq!(format_solutions(&solutions), "x = 2\ny = 1");
/// ```
pub mod equation_solver;
/// sampling of equation sides and system lines for plotting
pub mod graph_points;
