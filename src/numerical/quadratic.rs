/// ax² + bx + c = 0 by the discriminant D = b² - 4ac.
/// Roots come in the order of the ± branch: "+" first.
use crate::numerical::errors::EquationError;
use crate::numerical::solution::{Solution, StepRecorder};
use crate::numerical::tolerances::is_zero;
use log::{info, warn};

pub fn solve_quadratic(
    a: f64,
    b: f64,
    c: f64,
    rec: &mut StepRecorder,
) -> Result<Vec<Solution>, EquationError> {
    rec.record(format!("{} = 0", rec.terms(&[(a, "x²"), (b, "x"), (c, "")])));
    if is_zero(a) {
        warn!("quadratic leading coefficient vanished, a = {:e}", a);
        return Err(EquationError::Unsolvable(
            "the coefficient of x² is zero".to_string(),
        ));
    }
    rec.record(format!("a = {}, b = {}, c = {}", rec.num(a), rec.num(b), rec.num(c)));
    let d = b * b - 4.0 * a * c;
    rec.record(format!("D = b² - 4ac = {}", rec.num(d)));

    let solutions = if is_zero(d) {
        rec.record("D = 0: one repeated real root");
        let x = -b / (2.0 * a);
        rec.record(format!("x = -b / 2a = {}", rec.num(x)));
        vec![Solution::real(x).with_multiplicity(2)]
    } else if d > 0.0 {
        rec.record("D > 0: two distinct real roots");
        let sqrt_d = d.sqrt();
        // q = -(b + sign(b)·√D) / 2 never subtracts close numbers; the roots are q/a and c/q
        let sign = if b < 0.0 { -1.0 } else { 1.0 };
        let q = -(b + sign * sqrt_d) / 2.0;
        rec.record(format!(
            "q = -(b + sign(b)·√D) / 2 = -({} {} {}) / 2 = {}",
            rec.num(b),
            if sign < 0.0 { "-" } else { "+" },
            rec.num(sqrt_d),
            rec.num(q)
        ));
        let (by_a, by_q) = (q / a, c / q);
        // for b >= 0, q/a is the (-b - √D) / 2a branch
        let (x1, x2) = if sign > 0.0 { (by_q, by_a) } else { (by_a, by_q) };
        let (x1_rule, x2_rule) = if sign > 0.0 { ("c / q", "q / a") } else { ("q / a", "c / q") };
        rec.record(format!("x1 = (-b + √D) / 2a = {} = {}", x1_rule, rec.num(x1)));
        rec.record(format!("x2 = (-b - √D) / 2a = {} = {}", x2_rule, rec.num(x2)));
        vec![Solution::real(x1), Solution::real(x2)]
    } else {
        rec.record("D < 0: two complex conjugate roots");
        let re = -b / (2.0 * a);
        let im = (-d).sqrt() / (2.0 * a).abs();
        rec.record(format!("Re = -b / 2a = {}", rec.num(re)));
        rec.record(format!("Im = √(-D) / 2|a| = {}", rec.num(im)));
        let first = Solution::complex(re, im);
        let second = Solution::complex(re, -im);
        rec.record(format!("x1 = {}", rec.complex(first.x.as_complex())));
        rec.record(format!("x2 = {}", rec.complex(second.x.as_complex())));
        vec![first, second]
    };
    info!("quadratic roots: {:?}", solutions.iter().map(|s| s.x).collect::<Vec<_>>());
    Ok(solutions)
}
