//! 2x2 linear systems by Cramer's rule.
//!
//! Every sub-equation is reduced to a row a·x + b·y = c. For a non-singular
//! system
//! ```text
//!   det = a1·b2 - b1·a2
//!   x   = (c1·b2 - b1·c2) / det
//!   y   = (a1·c2 - c1·a2) / det
//! ```
//! When det ≈ 0 the Rouché–Capelli theorem decides what went wrong: rank(A) differs
//! from rank([A|c]) for inconsistent rows, and both ranks are below 2 for dependent rows.
use crate::numerical::errors::{Degeneracy, EquationError};
use crate::numerical::solution::{Solution, StepRecorder};
use crate::numerical::tolerances::{EPSILON, is_zero};
use crate::symbolic::polynomial::{Polynomial, Powers};
use log::{info, warn};
use nalgebra::{Matrix2, Matrix2x3};

/// one canonical row a·x + b·y = c
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemRow {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl SystemRow {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        SystemRow { a, b, c }
    }

    /// reads a row from the expanded `left - right` of one sub-equation
    pub fn from_polynomial(poly: &Polynomial) -> Result<Self, EquationError> {
        let allowed = [Powers::ONE, Powers::x(1), Powers::y(1)];
        if let Some((powers, _)) = poly.significant_terms().find(|(p, _)| !allowed.contains(p)) {
            return Err(EquationError::UnsupportedForm(format!(
                "only linear terms in x and y are allowed in a system, found x^{} y^{}",
                powers.x, powers.y
            )));
        }
        Ok(SystemRow {
            a: poly.coefficient(Powers::x(1)),
            b: poly.coefficient(Powers::y(1)),
            c: -poly.constant_term(),
        })
    }

    pub fn to_text(&self, rec: &StepRecorder) -> String {
        format!("{} = {}", rec.terms(&[(self.a, "x"), (self.b, "y")]), rec.num(self.c))
    }

    /// true if (x, y) satisfies the row
    pub fn holds_at(&self, x: f64, y: f64) -> bool {
        (self.a * x + self.b * y - self.c).abs() <= 1e-9 * 1f64.max(self.c.abs())
    }
}

/// rank comparison of A and [A|c]
pub fn classify_singular(rows: &[SystemRow; 2]) -> Degeneracy {
    let [r1, r2] = rows;
    let coefficients = Matrix2::new(r1.a, r1.b, r2.a, r2.b);
    let augmented = Matrix2x3::new(r1.a, r1.b, r1.c, r2.a, r2.b, r2.c);
    let rank_a = coefficients.rank(EPSILON);
    let rank_ab = augmented.rank(EPSILON);
    if rank_a != rank_ab {
        warn!(
            "The system has no solution. rank(A) = {} != rank([A c]) = {}",
            rank_a, rank_ab
        );
        Degeneracy::Inconsistent
    } else {
        warn!(
            "The system has infinitely many solutions. rank(A) = rank([A c]) = {}",
            rank_a
        );
        Degeneracy::Dependent
    }
}

pub fn solve_system(
    rows: &[SystemRow; 2],
    rec: &mut StepRecorder,
) -> Result<Vec<Solution>, EquationError> {
    let [r1, r2] = rows;
    let (first, second) = (r1.to_text(rec), r2.to_text(rec));
    rec.record(format!("equation 1: {}", first));
    rec.record(format!("equation 2: {}", second));
    let det = r1.a * r2.b - r1.b * r2.a;
    rec.record(format!("det = a1·b2 - b1·a2 = {}", rec.num(det)));
    if is_zero(det) {
        let degeneracy = classify_singular(rows);
        rec.record(format!("det = 0: the system is {}", degeneracy));
        return Err(EquationError::NoUniqueSolution {
            degeneracy,
            determinant: det,
        });
    }
    let x = (r1.c * r2.b - r1.b * r2.c) / det;
    let y = (r1.a * r2.c - r1.c * r2.a) / det;
    rec.record(format!("x = (c1·b2 - b1·c2) / det = {}", rec.num(x)));
    rec.record(format!("y = (a1·c2 - c1·a2) / det = {}", rec.num(y)));
    info!("system solution x = {}, y = {}", x, y);
    Ok(vec![Solution::system(x, y)])
}
