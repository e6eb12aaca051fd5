// SPDX-License-Identifier: Apache-2.0
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `zkc`: a small CLI wrapping the circuit core for ad hoc inspection
//! (`spec.md` §6's exit-code contract, `SPEC_FULL.md` §4.7's CLI flow).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pinocchio_ir::core::Core;
use pinocchio_ir::error::CoreError;
use pinocchio_ir::field::PrimeFieldElement;
use pinocchio_ir::R1cs;

#[derive(Parser)]
#[command(name = "zkc", about = "Pinocchio arithmetic-circuit checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise the log level to trace.
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a circuit, optionally evaluate it against an input file, emit
    /// its constraints, and report whether they are satisfied.
    Check {
        /// Path to the circuit file.
        circuit: PathBuf,
        /// Path to an input-wire assignment file.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

const EXIT_SUCCESS: u8 = 0;
const EXIT_USAGE: u8 = 1;
const EXIT_UNSATISFIED_OR_INTERNAL: u8 = 2;
const EXIT_MISSING_ARGS: u8 = 5;
const EXIT_ARITY_MISMATCH: u8 = 6;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "trace" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match cli.command {
        Command::Check { circuit, input } => run_check(&circuit, input.as_deref()),
    }
}

fn run_check(circuit_path: &std::path::Path, input_path: Option<&std::path::Path>) -> ExitCode {
    let circuit_source = match fs::read_to_string(circuit_path) {
        Ok(s) => s,
        Err(err) => {
            error!(path = %circuit_path.display(), %err, "failed to read circuit file");
            return ExitCode::from(EXIT_MISSING_ARGS);
        }
    };

    let input_source = match input_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(s) => Some(s),
            Err(err) => {
                error!(path = %path.display(), %err, "failed to read input file");
                return ExitCode::from(EXIT_MISSING_ARGS);
            }
        },
        None => None,
    };

    let core = match Core::<PrimeFieldElement, R1cs<PrimeFieldElement>>::new(
        &circuit_source,
        input_source.as_deref(),
        R1cs::new(),
    ) {
        Ok(core) => core,
        Err(err) => {
            error!(%err, "failed to build circuit core");
            return ExitCode::from(exit_code_for(&err));
        }
    };

    info!(
        num_inputs = core.num_inputs(),
        num_outputs = core.num_outputs(),
        "parsed and emitted circuit"
    );

    if input_source.is_some() {
        if core.is_satisfied() {
            println!("satisfied");
            ExitCode::from(EXIT_SUCCESS)
        } else {
            println!("unsatisfied");
            ExitCode::from(EXIT_UNSATISFIED_OR_INTERNAL)
        }
    } else {
        println!(
            "parsed: {} public input(s), {} output(s); constraints emitted",
            core.num_inputs(),
            core.num_outputs()
        );
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn exit_code_for(err: &CoreError) -> u8 {
    match err {
        CoreError::Parse(pinocchio_ir::error::ParseError::ArityMismatch { .. })
        | CoreError::Parse(pinocchio_ir::error::ParseError::WrongInputArity { .. })
        | CoreError::Parse(pinocchio_ir::error::ParseError::WrongOutputArity { .. })
        | CoreError::Parse(pinocchio_ir::error::ParseError::UnsupportedTableSize { .. })
        | CoreError::Parse(pinocchio_ir::error::ParseError::TableSizeMismatch { .. }) => {
            EXIT_ARITY_MISMATCH
        }
        CoreError::Parse(_) | CoreError::Input(_) => EXIT_USAGE,
        CoreError::Eval(_) | CoreError::Constraint(_) => EXIT_UNSATISFIED_OR_INTERNAL,
    }
}
