//! main entry point for the compiler driver executable.

use std::process::ExitCode;

use libtealc::compiler_driver::args;
use libtealc::compiler_driver::{Driver, DriverError};
use libtealc::ir;

fn main() -> ExitCode {
    // Parse the command-line arguments into the source file path and the compiler driver's options.
    let Some((source_file, options)) = args::Parser::parse_command_line_args() else {
        return ExitCode::SUCCESS;
    };

    // Run the compiler driver's pipeline for the source file.
    let mut driver = Driver::new(&source_file, options);

    match driver.run() {
        // The pipeline ran to completion: print the IR listing to stdout.
        Ok(Some(program)) => {
            debug_assert!(!driver.has_error_diagnostics());
            ir::printer::print(&program);
            ExitCode::SUCCESS
        }

        // A stop-early option halted the pipeline without error.
        Ok(None) => ExitCode::SUCCESS,

        Err(DriverError::CompilerFailed) => {
            driver.print_diagnostics();
            ExitCode::FAILURE
        }

        Err(_) => ExitCode::FAILURE,
    }
}
