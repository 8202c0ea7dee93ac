//! # Equation AST
//!
//! Typed tree for one side of an equation. The parser in `parse_expr` builds it,
//! the solvers inspect it (which variables appear, whether absolute values or
//! square roots are present) and expand it into monomial buckets
//! (`Polynomial`) for coefficient extraction.
//!
//! ## Main Structures and Methods
//! - `Expr` - constants, the variables x/y/z, + - * /, integer powers,
//!   negation, absolute value and square root
//! - `expand()` - multiplies everything out into a `Polynomial`
//! - `replace_abs()` - substitutes every |…| by +… or -… according to a sign mask
//! - `radicals()` - distinct square roots that depend on a variable
//! - `eval()` - numeric value at given x and y, used for back-substitution
//! - `Equation` - the two sides of one equation
use crate::numerical::errors::EquationError;
use crate::numerical::tolerances::{is_zero, sides_agree};
use crate::symbolic::polynomial::Polynomial;
use std::collections::BTreeSet;
use std::fmt;
use strum_macros::Display;

/// largest integer exponent accepted during expansion
pub const MAX_EXPONENT: u32 = 12;
/// largest total degree a product or power may reach while expanding
pub const MAX_EXPANDED_DEGREE: u32 = 12;

fn check_expanded_degree(degree: u64, expr: &Expr) -> Result<(), EquationError> {
    if degree > u64::from(MAX_EXPANDED_DEGREE) {
        return Err(EquationError::UnsupportedForm(format!(
            "expanding {} gives degree {}, at most {} is supported",
            expr, degree, MAX_EXPANDED_DEGREE
        )));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Variable {
    X,
    Y,
    Z,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Const(f64),
    Var(Variable),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// base ^ non-negative integer exponent
    Pow(Box<Expr>, u32),
    Neg(Box<Expr>),
    Abs(Box<Expr>),
    Sqrt(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Var(v) => write!(f, "{}", v),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, n) => write!(f, "{}^{}", base, n),
            Expr::Neg(expr) => write!(f, "-{}", expr),
            Expr::Abs(expr) => write!(f, "|{}|", expr),
            Expr::Sqrt(expr) => write!(f, "√({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Neg(self.boxed())
    }
}

impl Expr {
    pub fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }

    fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Const(_) | Expr::Var(_) => vec![],
            Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) | Expr::Div(l, r) => {
                vec![l.as_ref(), r.as_ref()]
            }
            Expr::Pow(e, _) | Expr::Neg(e) | Expr::Abs(e) | Expr::Sqrt(e) => vec![e.as_ref()],
        }
    }

    /// all variables mentioned anywhere in the tree
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<Variable>) {
        if let Expr::Var(v) = self {
            out.insert(*v);
        }
        for child in self.children() {
            child.collect_variables(out);
        }
    }

    pub fn count_abs(&self) -> usize {
        let own = usize::from(matches!(self, Expr::Abs(_)));
        own + self.children().iter().map(|c| c.count_abs()).sum::<usize>()
    }

    /// Replaces the absolute values in pre-order: the k-th |e| becomes e when bit k
    /// of `mask` is 0 and -(e) when it is 1. `counter` carries the numbering across sides.
    pub fn replace_abs(&self, mask: u32, counter: &mut u32) -> Expr {
        match self {
            Expr::Const(_) | Expr::Var(_) => self.clone(),
            Expr::Abs(inner) => {
                let index = *counter;
                *counter += 1;
                let inner = inner.replace_abs(mask, counter);
                if (mask >> index) & 1 == 0 { inner } else { -inner }
            }
            Expr::Add(l, r) => l.replace_abs(mask, counter) + r.replace_abs(mask, counter),
            Expr::Sub(l, r) => l.replace_abs(mask, counter) - r.replace_abs(mask, counter),
            Expr::Mul(l, r) => l.replace_abs(mask, counter) * r.replace_abs(mask, counter),
            Expr::Div(l, r) => l.replace_abs(mask, counter) / r.replace_abs(mask, counter),
            Expr::Pow(e, n) => Expr::Pow(e.replace_abs(mask, counter).boxed(), *n),
            Expr::Neg(e) => -e.replace_abs(mask, counter),
            Expr::Sqrt(e) => Expr::Sqrt(e.replace_abs(mask, counter).boxed()),
        }
    }

    /// arguments of the absolute values in the numbering used by `replace_abs`
    pub fn abs_arguments(&self) -> Vec<Expr> {
        let mut out = Vec::new();
        self.collect_abs_arguments(&mut out);
        out
    }

    fn collect_abs_arguments(&self, out: &mut Vec<Expr>) {
        if let Expr::Abs(inner) = self {
            out.push(inner.as_ref().clone());
        }
        for child in self.children() {
            child.collect_abs_arguments(out);
        }
    }

    /// distinct radicands of square roots that depend on a variable
    pub fn radicals(&self) -> Vec<Expr> {
        let mut out = Vec::new();
        self.collect_radicals(&mut out);
        out
    }

    fn collect_radicals(&self, out: &mut Vec<Expr>) {
        if let Expr::Sqrt(inner) = self {
            if !inner.variables().is_empty() && !out.contains(inner.as_ref()) {
                out.push(inner.as_ref().clone());
            }
        }
        for child in self.children() {
            child.collect_radicals(out);
        }
    }

    pub fn eval(&self, x: f64, y: f64) -> f64 {
        match self {
            Expr::Const(c) => *c,
            Expr::Var(Variable::X) => x,
            Expr::Var(Variable::Y) => y,
            Expr::Var(Variable::Z) => f64::NAN,
            Expr::Add(l, r) => l.eval(x, y) + r.eval(x, y),
            Expr::Sub(l, r) => l.eval(x, y) - r.eval(x, y),
            Expr::Mul(l, r) => l.eval(x, y) * r.eval(x, y),
            Expr::Div(l, r) => l.eval(x, y) / r.eval(x, y),
            Expr::Pow(e, n) => e.eval(x, y).powi(*n as i32),
            Expr::Neg(e) => -e.eval(x, y),
            Expr::Abs(e) => e.eval(x, y).abs(),
            Expr::Sqrt(e) => e.eval(x, y).sqrt(),
        }
    }

    /// expands into monomial buckets; absolute values and square roots of variables are rejected
    pub fn to_polynomial(&self) -> Result<Polynomial, EquationError> {
        self.expand(None)
    }

    /// Expands into monomial buckets. A square root whose radicand equals `radical`
    /// becomes the radical symbol r; square roots of constants are evaluated.
    pub fn expand(&self, radical: Option<&Expr>) -> Result<Polynomial, EquationError> {
        Ok(match self {
            Expr::Const(c) => Polynomial::constant(*c),
            Expr::Var(Variable::X) => Polynomial::x(),
            Expr::Var(Variable::Y) => Polynomial::y(),
            Expr::Var(Variable::Z) => {
                return Err(EquationError::UnsupportedForm(
                    "only x and y can be used as unknowns".to_string(),
                ));
            }
            Expr::Add(l, r) => l.expand(radical)? + r.expand(radical)?,
            Expr::Sub(l, r) => l.expand(radical)? - r.expand(radical)?,
            Expr::Mul(l, r) => {
                let (l, r) = (l.expand(radical)?, r.expand(radical)?);
                check_expanded_degree(u64::from(l.stored_degree()) + u64::from(r.stored_degree()), self)?;
                l * r
            }
            Expr::Div(l, r) => {
                let denominator = r.expand(radical)?;
                if !denominator.is_constant() {
                    return Err(EquationError::Extraction(format!(
                        "division by the non-constant expression {}",
                        r
                    )));
                }
                let d = denominator.constant_term();
                if is_zero(d) {
                    return Err(EquationError::Extraction(format!("division by zero in {}", self)));
                }
                l.expand(radical)?.scale(1.0 / d)
            }
            Expr::Pow(base, n) => {
                if *n > MAX_EXPONENT {
                    return Err(EquationError::UnsupportedForm(format!(
                        "exponent {} is too large",
                        n
                    )));
                }
                let base = base.expand(radical)?;
                check_expanded_degree(u64::from(base.stored_degree()) * u64::from(*n), self)?;
                base.pow(*n)
            }
            Expr::Neg(e) => -e.expand(radical)?,
            Expr::Abs(e) => {
                return Err(EquationError::Extraction(format!(
                    "absolute value |{}| has to be split into cases first",
                    e
                )));
            }
            Expr::Sqrt(e) => {
                if radical == Some(e.as_ref()) {
                    Polynomial::radical()
                } else {
                    let inner = e.expand(radical)?;
                    if !inner.is_constant() {
                        return Err(EquationError::UnsupportedForm(format!(
                            "the square root √({}) cannot be combined with another radical",
                            e
                        )));
                    }
                    let value = inner.constant_term();
                    if value < 0.0 {
                        return Err(EquationError::Extraction(format!(
                            "square root of the negative constant {}",
                            value
                        )));
                    }
                    Polynomial::constant(value.sqrt())
                }
            }
        })
    }
}

/// One equation: left side = right side
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    pub left: Expr,
    pub right: Expr,
}

impl Equation {
    pub fn new(left: Expr, right: Expr) -> Self {
        Equation { left, right }
    }

    /// left - right, the side everything is moved to
    pub fn residual(&self) -> Expr {
        self.left.clone() - self.right.clone()
    }

    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = self.left.variables();
        vars.extend(self.right.variables());
        vars
    }

    pub fn count_abs(&self) -> usize {
        self.left.count_abs() + self.right.count_abs()
    }

    /// left side first, then right side
    pub fn abs_arguments(&self) -> Vec<Expr> {
        let mut out = self.left.abs_arguments();
        out.extend(self.right.abs_arguments());
        out
    }

    pub fn radicals(&self) -> Vec<Expr> {
        let mut out = self.left.radicals();
        for r in self.right.radicals() {
            if !out.contains(&r) {
                out.push(r);
            }
        }
        out
    }

    /// both sides evaluated at (x, y)
    pub fn eval_sides(&self, x: f64, y: f64) -> (f64, f64) {
        (self.left.eval(x, y), self.right.eval(x, y))
    }

    /// back-substitution check used to reject extraneous roots
    pub fn is_satisfied_by(&self, x: f64, y: f64) -> bool {
        let (l, r) = self.eval_sides(x, y);
        sides_agree(l, r)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::Var(Variable::X)
    }

    #[test]
    fn test_expand_product() {
        // 3(x + 1) - x = 2x + 3
        let e = Expr::Const(3.0) * (x() + Expr::Const(1.0)) - x();
        let p = e.to_polynomial().unwrap();
        assert_eq!(p.coefficients_desc(1), vec![2.0, 3.0]);
    }

    #[test]
    fn test_stacked_powers_stop_at_the_degree_limit() {
        let base = x() + Expr::Const(1.0);
        let e = Expr::Pow(Expr::Pow(Expr::Pow(base.clone().boxed(), 12).boxed(), 12).boxed(), 12);
        assert!(matches!(e.to_polynomial(), Err(EquationError::UnsupportedForm(_))));
        let product = Expr::Pow(base.clone().boxed(), 7) * Expr::Pow(base.clone().boxed(), 6);
        assert!(matches!(product.to_polynomial(), Err(EquationError::UnsupportedForm(_))));
        let p = Expr::Pow(Expr::Pow(base.boxed(), 3).boxed(), 4).to_polynomial().unwrap();
        assert_eq!(p.degree_x(), 12);
    }

    #[test]
    fn test_division_rules() {
        let half = (x() / Expr::Const(2.0)).to_polynomial().unwrap();
        assert_eq!(half.x_coefficient(1), 0.5);
        assert!(matches!(
            (Expr::Const(1.0) / x()).to_polynomial(),
            Err(EquationError::Extraction(_))
        ));
        assert!(matches!(
            (x() / Expr::Const(0.0)).to_polynomial(),
            Err(EquationError::Extraction(_))
        ));
    }

    #[test]
    fn test_replace_abs_mask() {
        let e = Expr::Abs(x().boxed()) + Expr::Const(2.0);
        let mut counter = 0;
        let plus = e.replace_abs(0, &mut counter);
        assert_eq!(plus, x() + Expr::Const(2.0));
        let mut counter = 0;
        let minus = e.replace_abs(1, &mut counter);
        assert_eq!(minus, -x() + Expr::Const(2.0));
        assert_eq!(e.count_abs(), 1);
        let nested = Expr::Abs((Expr::Abs(x().boxed()) - Expr::Const(1.0)).boxed());
        assert_eq!(
            nested.abs_arguments(),
            vec![Expr::Abs(x().boxed()) - Expr::Const(1.0), x()]
        );
    }

    #[test]
    fn test_radicals_and_constant_roots() {
        let e = Expr::Sqrt(x().boxed()) + Expr::Sqrt(Expr::Const(4.0).boxed());
        assert_eq!(e.radicals(), vec![x()]);
        let p = e.expand(Some(&x())).unwrap();
        assert_eq!(p.constant_term(), 2.0);
        assert_eq!(p.degree_root(), 1);
        assert!(matches!(e.to_polynomial(), Err(EquationError::UnsupportedForm(_))));
    }

    #[test]
    fn test_eval_and_satisfaction() {
        let eq = Equation::new(Expr::Sqrt(x().boxed()), Expr::Const(-1.0));
        assert!(!eq.is_satisfied_by(1.0, 0.0));
        let eq = Equation::new(Expr::Abs(x().boxed()), Expr::Const(3.0));
        assert!(eq.is_satisfied_by(-3.0, 0.0));
        assert_eq!(eq.to_string(), "|x| = 3");
    }
}
