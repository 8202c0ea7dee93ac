//! Monomial-sum buckets: every term of an expanded equation side is a signed
//! coefficient attached to a power of `x`, a power of `y` and a power of the
//! (single) radical symbol `r = √g` used by the square-root solver.
//! Terms are summed per bucket, no tree structure is kept.
use crate::numerical::tolerances::EPSILON;
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Powers {
    pub x: u32,
    pub y: u32,
    pub root: u32,
}

impl Powers {
    pub const ONE: Powers = Powers { x: 0, y: 0, root: 0 };

    pub fn x(n: u32) -> Self {
        Powers { x: n, ..Powers::ONE }
    }

    pub fn y(n: u32) -> Self {
        Powers { y: n, ..Powers::ONE }
    }

    pub fn root(n: u32) -> Self {
        Powers { root: n, ..Powers::ONE }
    }

    fn times(self, other: Powers) -> Powers {
        Powers {
            x: self.x + other.x,
            y: self.y + other.y,
            root: self.root + other.root,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polynomial {
    terms: BTreeMap<Powers, f64>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Polynomial::default()
    }

    pub fn monomial(coef: f64, powers: Powers) -> Self {
        let mut p = Polynomial::zero();
        p.add_term(coef, powers);
        p
    }

    pub fn constant(c: f64) -> Self {
        Self::monomial(c, Powers::ONE)
    }

    pub fn x() -> Self {
        Self::monomial(1.0, Powers::x(1))
    }

    pub fn y() -> Self {
        Self::monomial(1.0, Powers::y(1))
    }

    /// the radical symbol r standing for the one square root of the equation
    pub fn radical() -> Self {
        Self::monomial(1.0, Powers::root(1))
    }

    /// adds `coef` into the bucket of `powers`
    pub fn add_term(&mut self, coef: f64, powers: Powers) {
        *self.terms.entry(powers).or_insert(0.0) += coef;
    }

    pub fn coefficient(&self, powers: Powers) -> f64 {
        self.terms.get(&powers).copied().unwrap_or(0.0)
    }

    pub fn x_coefficient(&self, n: u32) -> f64 {
        self.coefficient(Powers::x(n))
    }

    pub fn constant_term(&self) -> f64 {
        self.coefficient(Powers::ONE)
    }

    /// buckets whose coefficient is not negligible
    pub fn significant_terms(&self) -> impl Iterator<Item = (Powers, f64)> + '_ {
        self.terms
            .iter()
            .filter(|(_, c)| c.abs() >= EPSILON)
            .map(|(p, c)| (*p, *c))
    }

    pub fn scale(&self, k: f64) -> Polynomial {
        Polynomial {
            terms: self.terms.iter().map(|(p, c)| (*p, c * k)).collect(),
        }
    }

    pub fn pow(&self, n: u32) -> Polynomial {
        (0..n).fold(Polynomial::constant(1.0), |acc, _| &acc * self)
    }

    pub fn is_constant(&self) -> bool {
        self.significant_terms().all(|(p, _)| p == Powers::ONE)
    }

    /// highest power of x among the significant terms
    pub fn degree_x(&self) -> u32 {
        self.significant_terms().map(|(p, _)| p.x).max().unwrap_or(0)
    }

    pub fn degree_root(&self) -> u32 {
        self.significant_terms().map(|(p, _)| p.root).max().unwrap_or(0)
    }

    /// highest total power (x + y + r) over every stored bucket, cancelled ones included
    pub fn stored_degree(&self) -> u32 {
        self.terms.keys().map(|p| p.x + p.y + p.root).max().unwrap_or(0)
    }

    /// only powers of x (no y, no radical)
    pub fn is_univariate(&self) -> bool {
        self.significant_terms().all(|(p, _)| p.y == 0 && p.root == 0)
    }

    /// [a_n, ..., a_1, a_0] for the given degree n
    pub fn coefficients_desc(&self, degree: u32) -> Vec<f64> {
        (0..=degree).rev().map(|k| self.x_coefficient(k)).collect()
    }

    /// splits a polynomial that is linear in the radical into (A, B) with self = A + B*r
    pub fn split_by_root(&self) -> (Polynomial, Polynomial) {
        let mut free = Polynomial::zero();
        let mut with_root = Polynomial::zero();
        for (p, c) in &self.terms {
            match p.root {
                0 => free.add_term(*c, *p),
                _ => with_root.add_term(*c, Powers { root: p.root - 1, ..*p }),
            }
        }
        (free, with_root)
    }

    pub fn eval(&self, x: f64, y: f64, root: f64) -> f64 {
        self.terms
            .iter()
            .map(|(p, c)| c * x.powi(p.x as i32) * y.powi(p.y as i32) * root.powi(p.root as i32))
            .sum()
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: Polynomial) -> Polynomial {
        for (p, c) in rhs.terms {
            self.add_term(c, p);
        }
        self
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        self + (-rhs)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut out = Polynomial::zero();
        for (p1, c1) in &self.terms {
            for (p2, c2) in &rhs.terms {
                out.add_term(c1 * c2, p1.times(*p2));
            }
        }
        out
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_are_summed() {
        let p = Polynomial::monomial(3.0, Powers::x(2)) + Polynomial::monomial(-1.0, Powers::x(2))
            + Polynomial::x()
            + Polynomial::constant(5.0);
        assert_eq!(p.x_coefficient(2), 2.0);
        assert_eq!(p.x_coefficient(1), 1.0);
        assert_eq!(p.constant_term(), 5.0);
        assert_eq!(p.degree_x(), 2);
        assert_eq!(p.coefficients_desc(2), vec![2.0, 1.0, 5.0]);
    }

    #[test]
    fn test_cancellation_lowers_degree() {
        let x2 = Polynomial::monomial(1.0, Powers::x(2));
        let p = x2.scale(2.0) - x2.clone() - x2 + Polynomial::x();
        assert_eq!(p.degree_x(), 1);
    }

    #[test]
    fn test_product_expansion() {
        // (x - 1)(x - 2) = x² - 3x + 2
        let p = (Polynomial::x() - Polynomial::constant(1.0)) * (Polynomial::x() - Polynomial::constant(2.0));
        assert_eq!(p.coefficients_desc(2), vec![1.0, -3.0, 2.0]);
        let cube = (Polynomial::x() + Polynomial::constant(1.0)).pow(3);
        assert_eq!(cube.coefficients_desc(3), vec![1.0, 3.0, 3.0, 1.0]);
    }

    #[test]
    fn test_split_by_root() {
        // 2x*r + r - 3 = (-3) + (2x + 1) r
        let r = Polynomial::radical();
        let p = Polynomial::x().scale(2.0) * r.clone() + r - Polynomial::constant(3.0);
        let (a, b) = p.split_by_root();
        assert_eq!(a.constant_term(), -3.0);
        assert_eq!(b.x_coefficient(1), 2.0);
        assert_eq!(b.constant_term(), 1.0);
        assert!(a.is_univariate() && b.is_univariate());
    }

    #[test]
    fn test_classification_helpers() {
        let row = Polynomial::x() + Polynomial::y().scale(2.0) - Polynomial::constant(3.0);
        assert!(!row.is_univariate());
        assert_eq!(row.stored_degree(), 1);
        let cancelled = Polynomial::monomial(1.0, Powers::x(4)) - Polynomial::monomial(1.0, Powers::x(4));
        assert_eq!(cancelled.degree_x(), 0);
        assert_eq!(cancelled.stored_degree(), 4);
        assert!(Polynomial::constant(4.0).is_constant());
        assert_eq!(row.eval(1.0, 1.0, 0.0), 0.0);
    }
}
