use crate::Utils::settings::SolverConfig;
use crate::numerical::equation_solver::{EquationSolver, solve, solve_batch};
use crate::numerical::graph_points::sample_curves;
use crate::numerical::solution::format_solutions;
use crate::symbolic::eval_expr::evaluate_expression;

pub fn solver_examples(example: usize) {
    match example {
        0 => {
            // the shortest way: one call, a list of solutions with their derivation
            let solutions = solve("2x + 3 = 15").unwrap();
            println!("{}", format_solutions(&solutions));
            for step in &solutions[0].steps {
                println!("  {}", step);
            }
        }
        1 => {
            // every class of equation the engine knows
            let equations = [
                "x^2 - 5x + 6 = 0",
                "x^2 + 1 = 0",
                "x^3 - 6x^2 + 11x - 6 = 0",
                "x^3 - 1 = 0",
                "x + y = 3; x - y = 1",
                "abs(x) + 2 = 5",
                "sqrt(x + 7) = x + 1",
                "(x - 1)(x + 4) = 0",
            ];
            for text in equations {
                match solve(text) {
                    Ok(solutions) => println!("{}\n{}\n", text, format_solutions(&solutions)),
                    Err(e) => println!("{}\n{}\n", text, e),
                }
            }
        }
        2 => {
            // failures are typed and carry a message for the display
            for text in ["2x + 3", "0x + 5 = 0", "x + y = 2; 2x + 2y = 5", "x + y = 3", "x^4 = 16", "|x| = x"] {
                match solve(text) {
                    Ok(solutions) => println!("{} -> {}", text, format_solutions(&solutions)),
                    Err(e) => println!("{} -> {}", text, e),
                }
            }
        }
        3 => {
            // front end with configuration, logging and tables
            let config = SolverConfig::from_document(
                "solver\n  precision: 6\n  loglevel: info\ngraph\n  x_min: -5\n  x_max: 5\n  samples: 11",
            )
            .unwrap();
            let mut solver = EquationSolver::new(config);
            solver.solve("x^3 - 2x - 5 = 0").unwrap();
            solver.report();
            for curve in solver.graph().unwrap() {
                println!("{}: {:?}", curve.label, curve.points);
            }
        }
        4 => {
            // many independent equations at once
            let inputs = ["x^2 - 2 = 0", "3x - 1 = 0", "x^3 + x + 1 = 0", "abs(2x - 1) = 3"];
            for (text, result) in inputs.iter().zip(solve_batch(&inputs)) {
                match result {
                    Ok(solutions) => println!("{} -> {}", text, format_solutions(&solutions).replace('\n', ", ")),
                    Err(e) => println!("{} -> {}", text, e),
                }
            }
        }
        5 => {
            // expressions without unknowns are evaluated strictly left to right
            let evaluation = evaluate_expression("2 + 3 * 4").unwrap();
            println!("2 + 3 * 4 = {}", evaluation.value);
            println!("{:?}", evaluation.steps);
            let curves = sample_curves("x + y = 3; x - y = 1", 0.0, 4.0, 5, 10.0).unwrap();
            for curve in curves {
                println!("{}: {:?}", curve.label, curve.points);
            }
        }
        _ => {
            println!("no example {}", example);
        }
    }
}
