#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// small text helpers shared by the front stages: superscripts, implicit multiplication, brackets
pub mod utils;
/// checks that raw input can be handled at all: one `=`, known characters, balanced brackets
pub mod validator;
/// rewrites free-form input into the canonical form: `²`, `³`, `√` and `|…|`
pub mod normalizer;
/// nom parser turning a normalized equation into a typed expression tree
///# Example
/// ```
/// use RustedCalc::symbolic::parse_expr::parse_equation;
/// let equation = parse_equation("2*x+3=15").unwrap();
/// let poly = equation.residual().to_polynomial().unwrap();
/// assert_eq!(poly.degree_x(), 1);
/// ```
pub mod parse_expr;
/// # Symbolic engine
/// expression tree, unknowns and equations; expansion into polynomials
pub mod symbolic_engine;
/// polynomials in x and y: coefficient buckets keyed by powers
pub mod polynomial;
/// left-to-right evaluator for expressions without unknowns
pub mod eval_expr;
