use std::fmt;
use strum_macros::Display;

/// How a singular 2x2 system fails to have a unique solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Degeneracy {
    /// rank(A) != rank([A|c]): the rows contradict each other
    #[strum(to_string = "inconsistent (no solution)")]
    Inconsistent,
    /// rank(A) == rank([A|c]) < 2: the rows describe the same line
    #[strum(to_string = "dependent (infinitely many solutions)")]
    Dependent,
}

/// Error types of a single solve call
#[derive(Debug, Clone, PartialEq)]
pub enum EquationError {
    /// malformed input, raised before any solver runs
    Validation(String),
    /// the leading coefficient of the detected class vanishes, or nothing satisfies the equation
    Unsolvable(String),
    /// the 2x2 system determinant is ~0
    NoUniqueSolution {
        degeneracy: Degeneracy,
        determinant: f64,
    },
    /// the equation is outside the supported forms (e.g. a lone two-variable equation)
    UnsupportedForm(String),
    /// the text matched no recognizable term pattern
    Extraction(String),
}

impl fmt::Display for EquationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EquationError::Validation(msg) => write!(f, "Invalid equation: {}", msg),
            EquationError::Unsolvable(msg) => write!(f, "Equation cannot be solved: {}", msg),
            EquationError::NoUniqueSolution {
                degeneracy,
                determinant,
            } => write!(
                f,
                "The system has no unique solution: determinant = {:e}, the system is {}",
                determinant, degeneracy
            ),
            EquationError::UnsupportedForm(msg) => write!(f, "Unsupported equation form: {}", msg),
            EquationError::Extraction(msg) => write!(f, "Could not read the equation terms: {}", msg),
        }
    }
}

impl std::error::Error for EquationError {}
