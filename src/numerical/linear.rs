/// ax + b = 0
use crate::numerical::errors::EquationError;
use crate::numerical::solution::{Solution, StepRecorder};
use crate::numerical::tolerances::is_zero;
use log::{info, warn};

pub fn solve_linear(
    a: f64,
    b: f64,
    rec: &mut StepRecorder,
) -> Result<Vec<Solution>, EquationError> {
    rec.record(format!("{} = 0", rec.terms(&[(a, "x"), (b, "")])));
    if is_zero(a) {
        warn!("linear coefficient vanished, a = {:e}, b = {:e}", a, b);
        let msg = if is_zero(b) {
            "the equation is an identity (0 = 0), every x is a solution"
        } else {
            "the equation is a contradiction, no x satisfies it"
        };
        rec.record(msg);
        return Err(EquationError::Unsolvable(format!(
            "the coefficient of x is zero: {}",
            msg
        )));
    }
    rec.record(format!("{} = {}", rec.terms(&[(a, "x")]), rec.num(-b)));
    let x = -b / a;
    rec.record(format!("x = {} / {} = {}", rec.num(-b), rec.num(a), rec.num(x)));
    info!("linear root x = {}", x);
    Ok(vec![Solution::real(x)])
}
