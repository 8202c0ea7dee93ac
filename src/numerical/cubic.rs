//! Cardano's method for ax³ + bx² + cx + d = 0.
//!
//! The substitution x = t - b/3a gives the depressed cubic t³ + pt + q = 0 with
//! ```text
//!   p = (3ac - b²) / 3a²
//!   q = (2b³ - 9abc + 27a²d) / 27a³
//!   Δ = q²/4 + p³/27
//! ```
//! and the sign of Δ selects the branch:
//! - Δ ≈ 0, p ≈ 0: triple root
//! - Δ ≈ 0, p ≠ 0: simple root t₁ = 3q/p and double root t₂ = -3q/2p
//! - Δ > 0: one real root u + v and a complex conjugate pair
//! - Δ < 0: three distinct real roots from the trigonometric form
//!
//! The derivation (p, q, Δ, the case and every root) is recorded once and shared
//! by all returned solutions.
use crate::numerical::errors::EquationError;
use crate::numerical::solution::{Solution, StepRecorder};
use crate::numerical::tolerances::is_zero;
use log::{debug, info, warn};
use num_complex::Complex;
use std::f64::consts::PI;

/// coefficients of the depressed cubic and its discriminant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Depressed {
    pub p: f64,
    pub q: f64,
    pub delta: f64,
    /// -b/3a, added back to every root of the depressed cubic
    pub shift: f64,
}

impl Depressed {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        let p = (3.0 * a * c - b * b) / (3.0 * a * a);
        let q = (2.0 * b.powi(3) - 9.0 * a * b * c + 27.0 * a * a * d) / (27.0 * a.powi(3));
        let delta = q * q / 4.0 + p.powi(3) / 27.0;
        Depressed {
            p,
            q,
            delta,
            shift: -b / (3.0 * a),
        }
    }
}

pub fn solve_cubic(
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    rec: &mut StepRecorder,
) -> Result<Vec<Solution>, EquationError> {
    rec.record(format!(
        "{} = 0",
        rec.terms(&[(a, "x³"), (b, "x²"), (c, "x"), (d, "")])
    ));
    if is_zero(a) {
        warn!("cubic leading coefficient vanished, a = {:e}", a);
        return Err(EquationError::Unsolvable(
            "the coefficient of x³ is zero".to_string(),
        ));
    }
    let Depressed { p, q, delta, shift } = Depressed::new(a, b, c, d);
    debug!("depressed cubic p = {}, q = {}, delta = {}", p, q, delta);
    rec.record(format!("substitute x = t - b/3a = t + {}", rec.num(shift)));
    rec.record(format!("p = (3ac - b²) / 3a² = {}", rec.num(p)));
    rec.record(format!("q = (2b³ - 9abc + 27a²d) / 27a³ = {}", rec.num(q)));
    rec.record(format!("Δ = q²/4 + p³/27 = {}", rec.num(delta)));

    let solutions = if is_zero(delta) && is_zero(p) {
        rec.record("Δ = 0 and p = 0: one triple real root");
        rec.record(format!("x = -b / 3a = {}", rec.num(shift)));
        vec![Solution::real(shift).with_multiplicity(3)]
    } else if is_zero(delta) {
        rec.record("Δ = 0 and p ≠ 0: a simple and a double real root");
        let t1 = 3.0 * q / p;
        let t2 = -3.0 * q / (2.0 * p);
        let x1 = t1 + shift;
        let x2 = t2 + shift;
        rec.record(format!("x1 = 3q/p - b/3a = {}", rec.num(x1)));
        rec.record(format!("x2 = -3q/2p - b/3a = {} (double)", rec.num(x2)));
        vec![
            Solution::real(x1).with_multiplicity(1),
            Solution::real(x2).with_multiplicity(2),
        ]
    } else if delta > 0.0 {
        rec.record("Δ > 0: one real root and two complex conjugate roots");
        let sqrt_delta = delta.sqrt();
        let u = (-q / 2.0 + sqrt_delta).cbrt();
        let v = (-q / 2.0 - sqrt_delta).cbrt();
        rec.record(format!("u = ∛(-q/2 + √Δ) = {}", rec.num(u)));
        rec.record(format!("v = ∛(-q/2 - √Δ) = {}", rec.num(v)));
        let x1 = u + v + shift;
        let re = -(u + v) / 2.0 + shift;
        let im = 3f64.sqrt() / 2.0 * (u - v);
        let x2 = Complex::new(re, im);
        let x3 = x2.conj();
        rec.record(format!("x1 = u + v - b/3a = {}", rec.num(x1)));
        rec.record(format!("x2 = -(u + v)/2 - b/3a + i(√3/2)(u - v) = {}", rec.complex(x2)));
        rec.record(format!("x3 = -(u + v)/2 - b/3a - i(√3/2)(u - v) = {}", rec.complex(x3)));
        vec![
            Solution::real(x1),
            Solution::complex(x2.re, x2.im),
            Solution::complex(x3.re, x3.im),
        ]
    } else {
        rec.record("Δ < 0: three distinct real roots (trigonometric form)");
        let m = (-p / 3.0).sqrt();
        // rounding can push the argument slightly outside [-1, 1]
        let cos_arg = (-q / (2.0 * m.powi(3))).clamp(-1.0, 1.0);
        let phi = cos_arg.acos();
        let r = 2.0 * m;
        rec.record(format!("φ = arccos(-q / (2√(-(p/3)³))) = {}", rec.num(phi)));
        rec.record(format!("r = 2√(-p/3) = {}", rec.num(r)));
        (0..3)
            .map(|k| {
                let x = r * ((phi + 2.0 * PI * k as f64) / 3.0).cos() + shift;
                rec.record(format!(
                    "x{} = r·cos((φ + {}π)/3) - b/3a = {}",
                    k + 1,
                    2 * k,
                    rec.num(x)
                ));
                Solution::real(x)
            })
            .collect()
    };
    info!("cubic roots: {:?}", solutions.iter().map(|s| s.x).collect::<Vec<_>>());
    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::solution::SolutionKind;
    use approx::assert_relative_eq;

    fn residual(a: f64, b: f64, c: f64, d: f64, x: Complex<f64>) -> f64 {
        (x * x * x * a + x * x * b + x * c + d).norm()
    }

    fn sorted_real(sols: &[Solution]) -> Vec<f64> {
        let mut xs: Vec<f64> = sols.iter().filter_map(|s| s.real_x()).collect();
        xs.sort_by(|l, r| l.total_cmp(r));
        xs
    }

    #[test]
    fn test_three_real_roots() {
        let mut rec = StepRecorder::default();
        let sols = solve_cubic(1.0, -6.0, 11.0, -6.0, &mut rec).unwrap();
        assert_eq!(sols.len(), 3);
        assert!(sols.iter().all(|s| s.kind == SolutionKind::Real));
        let xs = sorted_real(&sols);
        assert_relative_eq!(xs[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(xs[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(xs[2], 3.0, epsilon = 1e-9);
        assert!(rec.steps().iter().any(|s| s.starts_with("Δ < 0")));
    }

    #[test]
    fn test_one_real_and_conjugates() {
        // x³ - 1 = 0
        let mut rec = StepRecorder::default();
        let sols = solve_cubic(1.0, 0.0, 0.0, -1.0, &mut rec).unwrap();
        assert_eq!(sols.len(), 3);
        assert_relative_eq!(sols[0].real_x().unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(sols[1].x_text(), "-0.5 + 0.866i");
        assert_eq!(sols[2].x_text(), "-0.5 - 0.866i");
        for s in &sols {
            assert!(residual(1.0, 0.0, 0.0, -1.0, s.x.as_complex()) < 1e-9);
        }
    }

    #[test]
    fn test_double_root_branch() {
        // (x - 1)²(x - 2) = x³ - 4x² + 5x - 2
        let mut rec = StepRecorder::default();
        let sols = solve_cubic(1.0, -4.0, 5.0, -2.0, &mut rec).unwrap();
        assert_eq!(sols.len(), 2);
        assert_relative_eq!(sols[0].real_x().unwrap(), 2.0, epsilon = 1e-9);
        assert_eq!(sols[0].multiplicity, Some(1));
        assert_relative_eq!(sols[1].real_x().unwrap(), 1.0, epsilon = 1e-9);
        assert_eq!(sols[1].multiplicity, Some(2));
    }

    #[test]
    fn test_triple_root() {
        // (x + 2)³ = x³ + 6x² + 12x + 8
        let mut rec = StepRecorder::default();
        let sols = solve_cubic(1.0, 6.0, 12.0, 8.0, &mut rec).unwrap();
        assert_eq!(sols.len(), 1);
        assert_relative_eq!(sols[0].real_x().unwrap(), -2.0, epsilon = 1e-12);
        assert_eq!(sols[0].multiplicity, Some(3));
    }

    #[test]
    fn test_back_substitution_non_monic() {
        let (a, b, c, d) = (2.0, -3.0, 5.0, 7.0);
        let mut rec = StepRecorder::default();
        let sols = solve_cubic(a, b, c, d, &mut rec).unwrap();
        for s in &sols {
            assert!(residual(a, b, c, d, s.x.as_complex()) < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_leading_coefficient() {
        let mut rec = StepRecorder::default();
        assert!(matches!(
            solve_cubic(0.0, 1.0, 0.0, 0.0, &mut rec),
            Err(EquationError::Unsolvable(_))
        ));
    }
}
