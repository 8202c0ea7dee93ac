#![allow(non_snake_case)]
use RustedCalc::Examples::solver_examples::solver_examples;
use RustedCalc::Utils::settings::SolverConfig;
use RustedCalc::numerical::equation_solver::EquationSolver;
use std::env;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let Some(path) = args.get(i + 1).cloned() else {
                eprintln!("--config needs a file name");
                return ExitCode::FAILURE;
            };
            args.drain(i..=i + 1);
            match SolverConfig::from_file(Path::new(&path)) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => SolverConfig::default(),
    };

    if args.is_empty() {
        for example in 0..6 {
            println!("\n ====== example {} ======", example);
            solver_examples(example);
        }
        return ExitCode::SUCCESS;
    }

    let mut solver = EquationSolver::new(config);
    let mut failed = false;
    for text in &args {
        println!("\n{}", text);
        match solver.solve(text) {
            Ok(_) => {
                println!("{}", solver.display_text());
                println!("{}", solver.steps_table());
                match solver.export() {
                    Ok(Some(path)) => println!("saved to {}", path.display()),
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", e),
                }
            }
            Err(e) => {
                println!("{}", e);
                failed = true;
            }
        }
    }
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
