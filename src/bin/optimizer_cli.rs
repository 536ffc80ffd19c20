//! CLI Entry Point: `optimizer-cli solve` and `optimizer-cli validate`,
//! reading an `OptimizerInput` from a file or stdin (`-`) and writing the
//! JSON result to stdout. Mirrors `main.py`'s HTTP handlers without the
//! transport layer, grounded on the teacher's clap-derive CLI shape.

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use courier_optimizer::api_types::OptimizerInput;
use courier_optimizer::{solver, validate};

#[derive(Parser)]
#[command(name = "optimizer-cli", about = "Courier hub routing optimizer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the fleet search and print the OptimizerOutput JSON.
    Solve {
        /// Input JSON file, or "-" to read from stdin.
        input: String,
    },
    /// Run the lightweight structural check and print the result JSON.
    Validate {
        /// Input JSON file, or "-" to read from stdin.
        input: String,
    },
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn main() -> ExitCode {
    courier_optimizer::config::init_tracing();
    let cli = Cli::parse();

    let (path, is_solve) = match &cli.command {
        Command::Solve { input } => (input, true),
        Command::Validate { input } => (input, false),
    };

    let raw = match read_input(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read input: {err}");
            return ExitCode::FAILURE;
        }
    };

    let input: OptimizerInput = match serde_json::from_str(&raw) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("failed to parse input JSON: {err}");
            return ExitCode::FAILURE;
        }
    };

    if is_solve {
        match solver::solve(&input) {
            Ok(output) => {
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("solve failed: {err}");
                ExitCode::FAILURE
            }
        }
    } else {
        let response = validate::validate_input(&input);
        println!("{}", serde_json::to_string_pretty(&response).unwrap());
        ExitCode::SUCCESS
    }
}
