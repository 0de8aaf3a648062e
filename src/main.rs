use std::env;
use std::process::ExitCode;

use u_quantum::dispatching::{simulate, SimulationConfig};
use u_quantum::report;
use u_quantum::scheduler::QuantumSweep;
use u_quantum::source::load_jobs;
use u_quantum::validation::validate_jobs;

const DEFAULT_INPUT: &str = "input.txt";
const SCENARIOS: [u64; 3] = [1, 2, 3];

fn main() -> ExitCode {
    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_INPUT.to_string());

    println!("Reading input...");
    let jobs = match load_jobs(&path) {
        Ok(jobs) => jobs,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(errors) = validate_jobs(&jobs) {
        for err in errors {
            eprintln!("Error: {err}");
        }
        return ExitCode::FAILURE;
    }

    for quantum in SCENARIOS {
        println!("\n================ SCENARIO q={quantum} ================\n");
        let config = SimulationConfig::default()
            .with_quantum(quantum)
            .with_trace(true);
        match simulate(&jobs, &config) {
            Ok(outcome) => print!("{}", report::render_run(&outcome)),
            Err(errors) => {
                for err in errors {
                    eprintln!("Error: {err}");
                }
                return ExitCode::FAILURE;
            }
        }
    }

    println!("\n\n================ OPTIMIZATION SUMMARY ================");
    print!("{}", report::render_sweep(&QuantumSweep::new(&jobs).run()));

    ExitCode::SUCCESS
}
