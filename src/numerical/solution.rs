//! Solutions, the step recorder and the result formatter.
//!
//! Roots are stored with full `f64` precision; rounding to a fixed number of
//! decimals happens only when something is rendered (root values, solution
//! summaries and every derivation step), so substituting a returned root back
//! into the equation stays accurate.
use itertools::Itertools;
use num_complex::Complex;
use std::fmt;
use strum_macros::{Display, EnumIter};

/// number of decimals used to render roots and steps unless configured otherwise
pub const DEFAULT_PRECISION: usize = 4;

/// more decimals than an `f64` carries are not rendered
pub const MAX_PRECISION: usize = 15;

/// rounds `value` to `precision` decimals, turning `-0` into `0`
pub fn round_to(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// rounded number without trailing zeros: 6.0 -> "6", 2.50004 -> "2.5"
pub fn fmt_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    format!("{}", round_to(value, precision))
}

/// renders a complex value as "re + im i" / "re - im i"
pub fn fmt_complex(value: Complex<f64>, precision: usize) -> String {
    let re = fmt_number(value.re, precision);
    let im = fmt_number(value.im.abs(), precision);
    let sign = if value.im < 0.0 && round_to(value.im, precision) != 0.0 {
        '-'
    } else {
        '+'
    };
    format!("{} {} {}i", re, sign, im)
}

/// renders a sum of terms like "2x² - 5x + 6"; zero coefficients are skipped,
/// an all-zero sum renders as "0"
pub fn format_terms(terms: &[(f64, &str)], precision: usize) -> String {
    let mut out = String::new();
    for &(coef, symbol) in terms {
        if round_to(coef, precision) == 0.0 {
            continue;
        }
        let magnitude = coef.abs();
        let body = if symbol.is_empty() {
            fmt_number(magnitude, precision)
        } else if round_to(magnitude, precision) == 1.0 {
            symbol.to_string()
        } else {
            format!("{}{}", fmt_number(magnitude, precision), symbol)
        };
        if out.is_empty() {
            if coef < 0.0 {
                out.push('-');
            }
            out.push_str(&body);
        } else {
            out.push_str(if coef < 0.0 { " - " } else { " + " });
            out.push_str(&body);
        }
    }
    if out.is_empty() { "0".to_string() } else { out }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SolutionKind {
    Real,
    Complex,
    System,
    /// value of a variable-free equation
    Expression,
}

/// value of the `x` unknown: a real number or a complex root
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootValue {
    Real(f64),
    Complex(Complex<f64>),
}

impl RootValue {
    pub fn as_real(&self) -> Option<f64> {
        match self {
            RootValue::Real(x) => Some(*x),
            RootValue::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Complex<f64> {
        match self {
            RootValue::Real(x) => Complex::new(*x, 0.0),
            RootValue::Complex(z) => *z,
        }
    }

    pub fn to_text(&self, precision: usize) -> String {
        match self {
            RootValue::Real(x) => fmt_number(*x, precision),
            RootValue::Complex(z) => fmt_complex(*z, precision),
        }
    }
}

/// `{}` renders with 4 decimals, `{:.6}` with 6
impl fmt::Display for RootValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        write!(f, "{}", self.to_text(precision))
    }
}

/// One solution of an equation together with the derivation that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub x: RootValue,
    /// second unknown, only for systems
    pub y: Option<f64>,
    pub kind: SolutionKind,
    /// set for repeated roots (2 or 3) and for the simple root next to a double one
    pub multiplicity: Option<u32>,
    /// derivation shared by every solution of the same solve call
    pub steps: Vec<String>,
    /// decimals used when the solution is rendered
    pub precision: usize,
}

impl Solution {
    fn new(x: RootValue, y: Option<f64>, kind: SolutionKind) -> Self {
        Solution {
            x,
            y,
            kind,
            multiplicity: None,
            steps: Vec::new(),
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn real(x: f64) -> Self {
        Self::new(RootValue::Real(x), None, SolutionKind::Real)
    }

    pub fn complex(re: f64, im: f64) -> Self {
        Self::new(
            RootValue::Complex(Complex::new(re, im)),
            None,
            SolutionKind::Complex,
        )
    }

    pub fn system(x: f64, y: f64) -> Self {
        Self::new(RootValue::Real(x), Some(y), SolutionKind::System)
    }

    pub fn expression(value: f64) -> Self {
        Self::new(RootValue::Real(value), None, SolutionKind::Expression)
    }

    pub fn with_multiplicity(mut self, multiplicity: u32) -> Self {
        self.multiplicity = Some(multiplicity);
        self
    }

    /// real value of `x`, None for complex roots
    pub fn real_x(&self) -> Option<f64> {
        self.x.as_real()
    }

    /// rendered `x`: "6", "2.5", "0 + 1i"
    pub fn x_text(&self) -> String {
        self.x.to_text(self.precision)
    }

    pub fn y_text(&self) -> Option<String> {
        self.y.map(|y| fmt_number(y, self.precision))
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.kind, self.y_text()) {
            (SolutionKind::System, Some(y)) => write!(f, "x = {}, y = {}", self.x_text(), y),
            (SolutionKind::Expression, _) => write!(f, "{}", self.x_text()),
            _ => {
                write!(f, "x = {}", self.x_text())?;
                if let Some(m) = self.multiplicity.filter(|m| *m > 1) {
                    write!(f, " (multiplicity {})", m)?;
                }
                Ok(())
            }
        }
    }
}

/// Display text for a whole solution set: "x1 = 3\nx2 = 2", "x = 2\ny = 1"
pub fn format_solutions(solutions: &[Solution]) -> String {
    match solutions {
        [] => String::new(),
        [single] if single.kind == SolutionKind::System => format!(
            "x = {}\ny = {}",
            single.x_text(),
            single.y_text().unwrap_or_default()
        ),
        [single] => single.to_string(),
        many => many
            .iter()
            .enumerate()
            .map(|(i, s)| format!("x{} = {}", i + 1, s.x_text()))
            .join("\n"),
    }
}

/// Accumulates the human-readable derivation of one solve call
#[derive(Debug, Clone)]
pub struct StepRecorder {
    steps: Vec<String>,
    precision: usize,
}

impl StepRecorder {
    pub fn new(precision: usize) -> Self {
        StepRecorder {
            steps: Vec::new(),
            precision,
        }
    }

    pub fn record(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    /// number rendered with the recorder precision
    pub fn num(&self, value: f64) -> String {
        fmt_number(value, self.precision)
    }

    pub fn complex(&self, value: Complex<f64>) -> String {
        fmt_complex(value, self.precision)
    }

    pub fn terms(&self, terms: &[(f64, &str)]) -> String {
        format_terms(terms, self.precision)
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// hands the recorded derivation to every solution of the call
    pub fn attach(&self, solutions: Vec<Solution>) -> Vec<Solution> {
        solutions
            .into_iter()
            .map(|mut s| {
                s.steps = self.steps.clone();
                s.precision = self.precision;
                s
            })
            .collect()
    }
}

impl Default for StepRecorder {
    fn default() -> Self {
        StepRecorder::new(DEFAULT_PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_and_format() {
        assert_eq!(fmt_number(6.0, 4), "6");
        assert_eq!(fmt_number(1.0 / 3.0, 4), "0.3333");
        assert_eq!(fmt_number(-0.00001, 4), "0");
        assert_eq!(fmt_number(2.50004, 4), "2.5");
    }

    #[test]
    fn test_round_extreme_values() {
        assert_eq!(round_to(1.0 / 3.0, 400), round_to(1.0 / 3.0, MAX_PRECISION));
        assert!(round_to(2.5, 400).is_finite());
        assert_eq!(round_to(1e306, 4), 1e306);
        assert_eq!(round_to(-1.7e308, 4), -1.7e308);
        assert_eq!(fmt_number(1e306, 4), format!("{}", 1e306));
        assert_eq!(fmt_number(2.0, 400), "2");
    }

    #[test]
    fn test_complex_rendering() {
        assert_eq!(fmt_complex(Complex::new(0.0, 1.0), 4), "0 + 1i");
        assert_eq!(fmt_complex(Complex::new(-0.0, -1.0), 4), "0 - 1i");
        assert_eq!(fmt_complex(Complex::new(-1.5, 0.8660254), 4), "-1.5 + 0.866i");
        assert_eq!(format!("{}", RootValue::Complex(Complex::new(1.0, -2.0))), "1 - 2i");
        assert_eq!(format!("{:.2}", RootValue::Real(1.0 / 3.0)), "0.33");
    }

    #[test]
    fn test_format_terms() {
        assert_eq!(format_terms(&[(1.0, "x²"), (-5.0, "x"), (6.0, "")], 4), "x² - 5x + 6");
        assert_eq!(format_terms(&[(-1.0, "x"), (0.0, "")], 4), "-x");
        assert_eq!(format_terms(&[(0.0, "x")], 4), "0");
    }

    #[test]
    fn test_format_solutions() {
        let rec = StepRecorder::default();
        let roots = rec.attach(vec![Solution::real(3.0), Solution::real(2.0)]);
        assert_eq!(format_solutions(&roots), "x1 = 3\nx2 = 2");
        let system = rec.attach(vec![Solution::system(2.0, 1.0)]);
        assert_eq!(format_solutions(&system), "x = 2\ny = 1");
        let double = rec.attach(vec![Solution::real(-1.0).with_multiplicity(2)]);
        assert_eq!(format_solutions(&double), "x = -1 (multiplicity 2)");
    }

    #[test]
    fn test_attach_shares_steps() {
        let mut rec = StepRecorder::new(2);
        rec.record("first");
        rec.record(format!("value {}", rec.num(1.23456)));
        let sols = rec.attach(vec![Solution::real(1.0), Solution::complex(0.0, 1.0)]);
        assert_eq!(sols[0].steps, vec!["first".to_string(), "value 1.23".to_string()]);
        assert_eq!(sols[0].steps, sols[1].steps);
        assert_eq!(sols[1].precision, 2);
        assert_eq!(sols[1].kind, SolutionKind::Complex);
    }
}
