//! # Equation solver
//!
//! Entry point of the engine: raw text goes through the validator and the
//! normalizer, is parsed into an AST, classified, and handed to exactly one
//! solver. Every solver writes its derivation into a `StepRecorder`; the recorded
//! steps are attached to each returned solution.
//!
//! Classification order:
//! 1) `;` present - 2x2 linear system
//! 2) `z` present - unsupported
//! 3) `y` present - unsupported (a lone two-variable equation needs a partner)
//! 4) no unknown at all - plain expression, evaluated left to right
//! 5) absolute value - sign cases
//! 6) square root of the unknown - squaring with verification
//! 7) degree of `left - right` after expansion: 3 cubic, 2 quadratic, 0 or 1 linear
//!
//! ## Example
//! ```
//! use RustedCalc::numerical::equation_solver::solve;
//! let solutions = solve("x² - 5x + 6 = 0").unwrap();
//! assert_eq!(solutions[0].real_x(), Some(3.0));
//! assert_eq!(solutions[1].real_x(), Some(2.0));
//! ```
use crate::Utils::logger::{default_export_name, init_logger, save_solutions_to_csv};
use crate::Utils::settings::SolverConfig;
use crate::numerical::cubic::solve_cubic;
use crate::numerical::derived::{solve_absolute, solve_square_root};
use crate::numerical::errors::EquationError;
use crate::numerical::graph_points::{Curve, sample_curves};
use crate::numerical::linear::solve_linear;
use crate::numerical::linear_system::{SystemRow, solve_system};
use crate::numerical::quadratic::solve_quadratic;
use crate::numerical::solution::{DEFAULT_PRECISION, Solution, StepRecorder, format_solutions};
use crate::numerical::tolerances::sides_agree;
use crate::symbolic::eval_expr::evaluate_expression;
use crate::symbolic::parse_expr::parse_equation;
use crate::symbolic::symbolic_engine::{Equation, Variable};
use crate::symbolic::validator::validate;
use enum_dispatch::enum_dispatch;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use strum_macros::{Display, EnumIter};
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum EquationClass {
    Linear,
    Quadratic,
    Cubic,
    System,
    Absolute,
    SquareRoot,
    Expression,
}

#[enum_dispatch]
pub trait Solve {
    fn solve(&self, rec: &mut StepRecorder) -> Result<Vec<Solution>, EquationError>;
    fn class(&self) -> EquationClass;
}

/// ax + b = 0
#[derive(Debug, Clone, PartialEq)]
pub struct LinearEquation {
    pub a: f64,
    pub b: f64,
}

impl Solve for LinearEquation {
    fn solve(&self, rec: &mut StepRecorder) -> Result<Vec<Solution>, EquationError> {
        solve_linear(self.a, self.b, rec)
    }

    fn class(&self) -> EquationClass {
        EquationClass::Linear
    }
}

/// ax² + bx + c = 0
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Solve for QuadraticEquation {
    fn solve(&self, rec: &mut StepRecorder) -> Result<Vec<Solution>, EquationError> {
        solve_quadratic(self.a, self.b, self.c, rec)
    }

    fn class(&self) -> EquationClass {
        EquationClass::Quadratic
    }
}

/// ax³ + bx² + cx + d = 0
#[derive(Debug, Clone, PartialEq)]
pub struct CubicEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Solve for CubicEquation {
    fn solve(&self, rec: &mut StepRecorder) -> Result<Vec<Solution>, EquationError> {
        solve_cubic(self.a, self.b, self.c, self.d, rec)
    }

    fn class(&self) -> EquationClass {
        EquationClass::Cubic
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemOfTwo {
    pub rows: [SystemRow; 2],
}

impl Solve for SystemOfTwo {
    fn solve(&self, rec: &mut StepRecorder) -> Result<Vec<Solution>, EquationError> {
        solve_system(&self.rows, rec)
    }

    fn class(&self) -> EquationClass {
        EquationClass::System
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbsoluteEquation {
    pub equation: Equation,
}

impl Solve for AbsoluteEquation {
    fn solve(&self, rec: &mut StepRecorder) -> Result<Vec<Solution>, EquationError> {
        solve_absolute(&self.equation, rec)
    }

    fn class(&self) -> EquationClass {
        EquationClass::Absolute
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SquareRootEquation {
    pub equation: Equation,
}

impl Solve for SquareRootEquation {
    fn solve(&self, rec: &mut StepRecorder) -> Result<Vec<Solution>, EquationError> {
        solve_square_root(&self.equation, rec)
    }

    fn class(&self) -> EquationClass {
        EquationClass::SquareRoot
    }
}

/// an equation without unknowns; both sides are evaluated and compared
#[derive(Debug, Clone, PartialEq)]
pub struct PlainExpression {
    pub left: String,
    pub right: String,
}

impl Solve for PlainExpression {
    fn solve(&self, rec: &mut StepRecorder) -> Result<Vec<Solution>, EquationError> {
        let left = evaluate_expression(&self.left)?;
        rec.record(format!("left side: {}", self.left));
        left.steps.into_iter().for_each(|s| rec.record(s));
        let right = evaluate_expression(&self.right)?;
        rec.record(format!("right side: {}", self.right));
        right.steps.into_iter().for_each(|s| rec.record(s));
        rec.record(format!("{} = {}", rec.num(left.value), rec.num(right.value)));
        if sides_agree(left.value, right.value) {
            Ok(vec![Solution::expression(left.value)])
        } else {
            Err(EquationError::Unsolvable(format!(
                "the sides evaluate to different values: {} and {}",
                rec.num(left.value),
                rec.num(right.value)
            )))
        }
    }

    fn class(&self) -> EquationClass {
        EquationClass::Expression
    }
}

#[enum_dispatch(Solve)]
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedEquation {
    LinearEquation,
    QuadraticEquation,
    CubicEquation,
    SystemOfTwo,
    AbsoluteEquation,
    SquareRootEquation,
    PlainExpression,
}

fn classify_system(first: &str, second: &str) -> Result<ClassifiedEquation, EquationError> {
    let row = |text: &str| -> Result<SystemRow, EquationError> {
        let poly = parse_equation(text)?.residual().to_polynomial()?;
        SystemRow::from_polynomial(&poly)
    };
    Ok(SystemOfTwo {
        rows: [row(first)?, row(second)?],
    }
    .into())
}

/// picks the solver for a normalized equation
pub fn classify(normalized: &str) -> Result<ClassifiedEquation, EquationError> {
    let parts: Vec<&str> = normalized.split(';').collect();
    match parts.as_slice() {
        [_] => {}
        [first, second] => return classify_system(first, second),
        _ => {
            return Err(EquationError::UnsupportedForm(format!(
                "{} equations given, at most a system of two is supported",
                parts.len()
            )));
        }
    }
    let equation = parse_equation(normalized)?;
    let variables = equation.variables();
    if variables.contains(&Variable::Z) {
        return Err(EquationError::UnsupportedForm(
            "only x and y can be used as unknowns".to_string(),
        ));
    }
    if variables.contains(&Variable::Y) {
        return Err(EquationError::UnsupportedForm(
            "an equation in x and y has infinitely many solutions on its own; \
             pair it with a second equation separated by ';', e.g. x+y=3;x-y=1"
                .to_string(),
        ));
    }
    if variables.is_empty() {
        let Some((left, right)) = normalized.split_once('=') else {
            return Err(EquationError::Extraction(format!(
                "'{}' is not a single equation",
                normalized
            )));
        };
        return Ok(PlainExpression {
            left: left.to_string(),
            right: right.to_string(),
        }
        .into());
    }
    if equation.count_abs() > 0 {
        return Ok(AbsoluteEquation { equation }.into());
    }
    if !equation.radicals().is_empty() {
        return Ok(SquareRootEquation { equation }.into());
    }
    let poly = equation.residual().to_polynomial()?;
    debug!("expanded residual coefficients {:?}", poly.coefficients_desc(poly.degree_x()));
    let classified: ClassifiedEquation = match poly.degree_x() {
        0 | 1 => {
            let c = poly.coefficients_desc(1);
            LinearEquation { a: c[0], b: c[1] }.into()
        }
        2 => {
            let c = poly.coefficients_desc(2);
            QuadraticEquation {
                a: c[0],
                b: c[1],
                c: c[2],
            }
            .into()
        }
        3 => {
            let c = poly.coefficients_desc(3);
            CubicEquation {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
            }
            .into()
        }
        n => {
            return Err(EquationError::UnsupportedForm(format!(
                "equation of degree {}, only degrees up to 3 are solved",
                n
            )));
        }
    };
    Ok(classified)
}

/// validation, normalization and classification of raw text
fn prepare(text: &str) -> Result<ClassifiedEquation, EquationError> {
    let normalized = validate(text)?;
    let classified = classify(normalized.as_str())?;
    info!("'{}' classified as {}", normalized, classified.class());
    Ok(classified)
}

/// runs the chosen solver and attaches the recorded steps to its solutions
fn run(classified: &ClassifiedEquation, precision: usize) -> Result<Vec<Solution>, EquationError> {
    let mut rec = StepRecorder::new(precision);
    let solutions = classified.solve(&mut rec)?;
    Ok(rec.attach(solutions))
}

fn solve_with_precision(text: &str, precision: usize) -> Result<Vec<Solution>, EquationError> {
    run(&prepare(text)?, precision)
}

/// solves one equation (or a system "eq1; eq2") with the default precision
pub fn solve(text: &str) -> Result<Vec<Solution>, EquationError> {
    solve_with_precision(text, DEFAULT_PRECISION)
}

pub fn solve_with(text: &str, config: &SolverConfig) -> Result<Vec<Solution>, EquationError> {
    solve_with_precision(text, config.precision)
}

/// independent inputs solved in parallel, results in input order
pub fn solve_batch(texts: &[&str]) -> Vec<Result<Vec<Solution>, EquationError>> {
    texts.par_iter().map(|text| solve(text)).collect()
}

/// Front end used by the calculator: keeps the configuration and the last result,
/// renders tables, exports and samples the graph.
#[derive(Debug, Clone, Default)]
pub struct EquationSolver {
    pub config: SolverConfig,
    pub equation: String,
    pub class: Option<EquationClass>,
    pub solutions: Vec<Solution>,
}

impl EquationSolver {
    pub fn new(config: SolverConfig) -> Self {
        EquationSolver {
            config,
            ..Default::default()
        }
    }

    pub fn solve(&mut self, text: &str) -> Result<&[Solution], EquationError> {
        if let Some(loglevel) = &self.config.loglevel {
            if let Err(e) = init_logger(loglevel) {
                eprintln!("{}", e);
            }
        }
        self.equation = text.to_string();
        self.class = None;
        self.solutions.clear();

        let classified = prepare(text)?;
        self.class = Some(classified.class());
        match run(&classified, self.config.precision) {
            Ok(solutions) => {
                self.solutions = solutions;
                info!("{}", self.display_text());
                Ok(&self.solutions)
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    /// "x1 = 3\nx2 = 2"
    pub fn display_text(&self) -> String {
        format_solutions(&self.solutions)
    }

    pub fn steps(&self) -> &[String] {
        self.solutions.first().map(|s| s.steps.as_slice()).unwrap_or(&[])
    }

    pub fn steps_table(&self) -> String {
        let mut rows = vec![vec!["#".to_string(), "step".to_string()]];
        rows.extend(
            self.steps()
                .iter()
                .enumerate()
                .map(|(i, s)| vec![(i + 1).to_string(), s.clone()]),
        );
        let mut table = Builder::from(rows).build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    pub fn solutions_table(&self) -> String {
        let mut rows = vec![
            ["#", "x", "y", "type", "multiplicity"]
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<String>>(),
        ];
        rows.extend(self.solutions.iter().enumerate().map(|(i, s)| {
            vec![
                (i + 1).to_string(),
                s.x_text(),
                s.y_text().unwrap_or_default(),
                s.kind.to_string(),
                s.multiplicity.map(|m| m.to_string()).unwrap_or_default(),
            ]
        }));
        let mut table = Builder::from(rows).build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    /// logs the derivation and the solution tables
    pub fn report(&self) {
        let class = self
            .class
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unclassified".to_string());
        info!("\n equation: {} ({})", self.equation, class);
        info!("\n{}", self.steps_table());
        info!("\n{}", self.solutions_table());
    }

    /// writes the solutions into the configured directory; None when export is off
    pub fn export(&self) -> Result<Option<PathBuf>, String> {
        let Some(dir) = &self.config.export else {
            return Ok(None);
        };
        fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {}", dir.display(), e))?;
        let path = dir.join(default_export_name());
        save_solutions_to_csv(&self.solutions, &self.equation, &path)
            .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
        info!("solutions saved to {}", path.display());
        Ok(Some(path))
    }

    /// curves of the last equation over the configured window
    pub fn graph(&self) -> Result<Vec<Curve>, EquationError> {
        let g = &self.config.graph;
        sample_curves(&self.equation, g.x_min, g.x_max, g.samples, g.y_limit)
    }
}
