/// Point lists for the graph view: the residual f(x) = left - right of a single
/// equation, or y = (c - a·x)/b for every row of a 2x2 system.
use crate::numerical::errors::EquationError;
use crate::numerical::linear_system::SystemRow;
use crate::numerical::tolerances::is_zero;
use crate::symbolic::parse_expr::parse_equation;
use crate::symbolic::validator::validate;
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

fn linspace(x_min: f64, x_max: f64, samples: usize) -> impl Iterator<Item = f64> {
    let step = (x_max - x_min) / (samples - 1) as f64;
    (0..samples).map(move |i| x_min + step * i as f64)
}

fn keep(point: (f64, f64), y_limit: f64) -> bool {
    point.1.is_finite() && point.1.abs() <= y_limit
}

pub fn sample_curves(
    text: &str,
    x_min: f64,
    x_max: f64,
    samples: usize,
    y_limit: f64,
) -> Result<Vec<Curve>, EquationError> {
    if samples < 2 || x_min >= x_max {
        return Err(EquationError::Validation(format!(
            "cannot sample {} points on [{}, {}]",
            samples, x_min, x_max
        )));
    }
    let normalized = validate(text)?;
    let parts: Vec<&str> = normalized.as_str().split(';').collect();
    let curves = if parts.len() == 1 {
        let equation = parse_equation(parts[0])?;
        let residual = equation.residual();
        let points = linspace(x_min, x_max, samples)
            .map(|x| (x, residual.eval(x, 0.0)))
            .filter(|p| keep(*p, y_limit))
            .collect();
        vec![Curve {
            label: format!("f(x) = {}", residual),
            points,
        }]
    } else {
        let mut curves = Vec::with_capacity(parts.len());
        for part in parts {
            let row = SystemRow::from_polynomial(&parse_equation(part)?.residual().to_polynomial()?)?;
            let points = if is_zero(row.b) {
                if is_zero(row.a) {
                    Vec::new()
                } else {
                    let x = row.c / row.a;
                    vec![(x, -y_limit), (x, y_limit)]
                }
            } else {
                linspace(x_min, x_max, samples)
                    .map(|x| (x, (row.c - row.a * x) / row.b))
                    .filter(|p| keep(*p, y_limit))
                    .collect()
            };
            curves.push(Curve {
                label: part.to_string(),
                points,
            });
        }
        curves
    };
    debug!(
        "sampled {} curve(s) for '{}'",
        curves.len(),
        normalized
    );
    Ok(curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_equation_residual() {
        let curves = sample_curves("x²-4=0", -2.0, 2.0, 5, 100.0).unwrap();
        assert_eq!(curves.len(), 1);
        let ys: Vec<f64> = curves[0].points.iter().map(|p| p.1).collect();
        assert_eq!(ys, vec![0.0, -3.0, -4.0, -3.0, 0.0]);
    }

    #[test]
    fn test_points_outside_limit_are_dropped() {
        let curves = sample_curves("x³=0", -10.0, 10.0, 21, 100.0).unwrap();
        assert!(curves[0].points.iter().all(|p| p.1.abs() <= 100.0));
        assert_eq!(curves[0].points.len(), 9);
    }

    #[test]
    fn test_system_lines() {
        let curves = sample_curves("x+y=3;x-y=1", 0.0, 4.0, 3, 100.0).unwrap();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].label, "x+y=3");
        assert_relative_eq!(curves[0].points[1].1, 1.0);
        assert_relative_eq!(curves[1].points[1].1, 1.0);
        let vertical = sample_curves("x=2;x+y=1", 0.0, 4.0, 3, 10.0).unwrap();
        assert_eq!(vertical[0].points, vec![(2.0, -10.0), (2.0, 10.0)]);
    }

    #[test]
    fn test_bad_window() {
        assert!(sample_curves("x=1", 1.0, 0.0, 10, 10.0).is_err());
        assert!(sample_curves("x=1", 0.0, 1.0, 1, 10.0).is_err());
    }
}
