//! Every "is this zero" decision of the solvers goes through this module: leading
//! coefficients, discriminants, determinants and root deduplication share one
//! epsilon so that branch boundaries are the same everywhere.

/// absolute tolerance for branch selection (leading coefficient, discriminant, determinant)
pub const EPSILON: f64 = 1e-10;
/// relative tolerance used when a candidate root is substituted back into the original equation
pub const VERIFY_TOLERANCE: f64 = 1e-6;

pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// true if `a` and `b` coincide as roots
pub fn same_root(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// compares the two sides of an equation evaluated at a candidate root.
/// NaN on either side (square root of a negative number) never agrees.
pub fn sides_agree(left: f64, right: f64) -> bool {
    if !left.is_finite() || !right.is_finite() {
        return false;
    }
    let scale = 1.0_f64.max(left.abs()).max(right.abs());
    (left - right).abs() <= VERIFY_TOLERANCE * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero_boundary() {
        assert!(is_zero(0.0));
        assert!(is_zero(-5e-11));
        assert!(!is_zero(1e-9));
    }

    #[test]
    fn test_sides_agree() {
        assert!(sides_agree(3.0, 3.0 + 1e-9));
        assert!(sides_agree(1e6, 1e6 + 0.1));
        assert!(!sides_agree(2.0, -2.0));
        assert!(!sides_agree(f64::NAN, 0.0));
    }
}
