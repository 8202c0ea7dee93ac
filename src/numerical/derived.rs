//! Solvers that reduce an equation to polynomial cases and keep only the
//! candidates that satisfy the original equation.
//!
//! - absolute values: every |…| is replaced by +… or -… for each sign combination,
//!   each case is solved as a polynomial
//! - square roots: with r = √g the equation reads A + B·r = 0, squaring gives
//!   B²·g - A² = 0
//!
//! Squaring and sign splitting both produce candidates that do not solve the
//! original equation, every candidate is substituted back before it is returned.
use crate::numerical::cubic::solve_cubic;
use crate::numerical::errors::EquationError;
use crate::numerical::linear::solve_linear;
use crate::numerical::quadratic::solve_quadratic;
use crate::numerical::solution::{Solution, StepRecorder};
use crate::numerical::tolerances::{EPSILON, same_root};
use crate::symbolic::polynomial::{Polynomial, Powers};
use crate::symbolic::symbolic_engine::{Equation, Expr};
use log::{debug, info, warn};

/// more absolute values than this would mean 2^n sign cases
pub const MAX_ABS_TERMS: usize = 6;

/// solves a polynomial in x of degree <= 3 with the matching closed form
pub fn solve_polynomial(
    poly: &Polynomial,
    rec: &mut StepRecorder,
) -> Result<Vec<Solution>, EquationError> {
    if !poly.is_univariate() {
        return Err(EquationError::UnsupportedForm(
            "the reduced equation still contains y or a square root".to_string(),
        ));
    }
    let degree = poly.degree_x();
    debug!("solving polynomial of degree {}", degree);
    match degree {
        0 | 1 => {
            let c = poly.coefficients_desc(1);
            solve_linear(c[0], c[1], rec)
        }
        2 => {
            let c = poly.coefficients_desc(2);
            solve_quadratic(c[0], c[1], c[2], rec)
        }
        3 => {
            let c = poly.coefficients_desc(3);
            solve_cubic(c[0], c[1], c[2], c[3], rec)
        }
        n => Err(EquationError::UnsupportedForm(format!(
            "polynomial of degree {} (only degrees up to 3 are solved)",
            n
        ))),
    }
}

/// accepted roots become the solutions; none at all is a failure
fn accepted_solutions(roots: Vec<f64>) -> Result<Vec<Solution>, EquationError> {
    if roots.is_empty() {
        return Err(EquationError::Unsolvable(
            "no candidate satisfies the original equation".to_string(),
        ));
    }
    info!("accepted roots: {:?}", roots);
    Ok(roots.into_iter().map(Solution::real).collect())
}

/// substitutes the real candidates into `original`, keeping distinct ones that satisfy it
fn verify_candidates(
    original: &Equation,
    candidates: &[Solution],
    roots: &mut Vec<f64>,
    rec: &mut StepRecorder,
) {
    if candidates.iter().any(|s| s.real_x().is_none()) {
        rec.record("complex candidates are discarded");
    }
    for x in candidates.iter().filter_map(|s| s.real_x()) {
        let (left, right) = original.eval_sides(x, 0.0);
        if !original.is_satisfied_by(x, 0.0) {
            warn!("extraneous root x = {} rejected: {} != {}", x, left, right);
            rec.record(format!(
                "check x = {}: {} ≠ {}, rejected",
                rec.num(x),
                rec.num(left),
                rec.num(right)
            ));
        } else if roots.iter().any(|r| same_root(*r, x)) {
            rec.record(format!("check x = {}: already found", rec.num(x)));
        } else {
            rec.record(format!(
                "check x = {}: {} = {}, accepted",
                rec.num(x),
                rec.num(left),
                rec.num(right)
            ));
            roots.push(x);
        }
    }
}

/// true when the k-th absolute value is taken with its own sign in `mask`
fn keeps_sign(mask: u32, k: usize) -> bool {
    (mask >> k) & 1 == 0
}

/// Points where the sign of every argument is sampled: around the real roots of the
/// polynomial arguments, plus a fixed grid for arguments that do not expand.
fn sign_sample_points(args: &[Expr]) -> Vec<f64> {
    let mut cuts: Vec<f64> = Vec::new();
    for arg in args {
        let Ok(poly) = arg.to_polynomial() else {
            continue;
        };
        if poly.is_univariate() && !poly.is_constant() {
            let mut scratch = StepRecorder::default();
            if let Ok(roots) = solve_polynomial(&poly, &mut scratch) {
                cuts.extend(roots.iter().filter_map(|s| s.real_x()));
            }
        }
    }
    cuts.sort_by(|a, b| a.total_cmp(b));
    cuts.dedup_by(|a, b| same_root(*a, *b));
    let mut points: Vec<f64> = cuts.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
    if let (Some(first), Some(last)) = (cuts.first(), cuts.last()) {
        points.push(first - 1.0);
        points.push(last + 1.0);
    }
    points.extend((-200..=200).map(|k| f64::from(k) * 0.5));
    points
}

/// a point strictly inside the region where every argument has the sign chosen by `mask`
fn interior_point(args: &[Expr], mask: u32) -> Option<f64> {
    sign_sample_points(args).into_iter().find(|&x| {
        args.iter().enumerate().all(|(k, arg)| {
            let v = arg.eval(x, 0.0);
            if keeps_sign(mask, k) { v > EPSILON } else { v < -EPSILON }
        })
    })
}

fn region_text(args: &[Expr], mask: u32) -> String {
    args.iter()
        .enumerate()
        .map(|(k, arg)| format!("{} {} 0", arg, if keeps_sign(mask, k) { "≥" } else { "≤" }))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn solve_absolute(
    equation: &Equation,
    rec: &mut StepRecorder,
) -> Result<Vec<Solution>, EquationError> {
    let n = equation.count_abs();
    if n > MAX_ABS_TERMS {
        return Err(EquationError::UnsupportedForm(format!(
            "{} absolute values, at most {} are supported",
            n, MAX_ABS_TERMS
        )));
    }
    let cases = 1u32 << n;
    let args = equation.abs_arguments();
    rec.record(format!("{} absolute value(s): {} sign cases", n, cases));
    let mut roots = Vec::new();
    for mask in 0..cases {
        let mut counter = 0;
        let left = equation.left.replace_abs(mask, &mut counter);
        let right = equation.right.replace_abs(mask, &mut counter);
        let signs: String = (0..n)
            .map(|k| if keeps_sign(mask, k) { '+' } else { '-' })
            .collect();
        rec.record(format!("case {} (signs {}): {} = {}", mask + 1, signs, left, right));
        let poly = (left - right).to_polynomial()?;
        if poly.significant_terms().next().is_none() {
            let region = region_text(&args, mask);
            if let Some(x) = interior_point(&args, mask) {
                warn!("case {} is an identity on {} (e.g. x = {})", mask + 1, region, x);
                rec.record(format!("case {}: identity, holds for every x with {}", mask + 1, region));
                return Err(EquationError::Unsolvable(format!(
                    "infinitely many solutions: every x with {} satisfies the equation",
                    region
                )));
            }
            rec.record(format!(
                "case {}: identity, but {} leaves no interval, skipped",
                mask + 1,
                region
            ));
            continue;
        }
        let candidates = match solve_polynomial(&poly, rec) {
            Ok(candidates) => candidates,
            Err(EquationError::Unsolvable(msg)) => {
                warn!("case {} skipped: {}", mask + 1, msg);
                rec.record(format!("case {} skipped: {}", mask + 1, msg));
                continue;
            }
            Err(e) => return Err(e),
        };
        verify_candidates(equation, &candidates, &mut roots, rec);
    }
    accepted_solutions(roots)
}

/// r^k = g^(k/2) r^(k%2), so the result is at most linear in r
fn reduce_radical(poly: &Polynomial, radicand: &Polynomial) -> Polynomial {
    poly.significant_terms()
        .fold(Polynomial::zero(), |acc, (powers, coef)| {
            let rest = Polynomial::monomial(
                coef,
                Powers {
                    root: powers.root % 2,
                    ..powers
                },
            );
            acc + rest * radicand.pow(powers.root / 2)
        })
}

fn radical_text(radicand: &Expr) -> String {
    let inner = radicand.to_string();
    if inner.starts_with('(') {
        format!("√{}", inner)
    } else {
        format!("√({})", inner)
    }
}

pub fn solve_square_root(
    equation: &Equation,
    rec: &mut StepRecorder,
) -> Result<Vec<Solution>, EquationError> {
    let radicals = equation.radicals();
    let [radicand] = radicals.as_slice() else {
        return Err(EquationError::UnsupportedForm(format!(
            "{} different square roots of the unknown, only one is supported",
            radicals.len()
        )));
    };
    let g = radicand.to_polynomial()?;
    let expanded = equation.residual().expand(Some(radicand))?;
    let (free, with_root) = reduce_radical(&expanded, &g).split_by_root();
    let root = radical_text(radicand);
    rec.record(format!("r = {}, the equation reads A + B·r = 0", root));
    rec.record(format!("square both sides of B·r = -A: B²·({}) - A² = 0", radicand));
    let squared = (&with_root * &with_root) * g - (&free * &free);
    let candidates = solve_polynomial(&squared, rec)?;
    let mut roots = Vec::new();
    verify_candidates(equation, &candidates, &mut roots, rec);
    accepted_solutions(roots)
}
