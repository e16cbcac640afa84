//! Integration tests that expect the compiler to generate error diagnostics when compiling ill-formed source
//! files.

use libtealc::compiler_driver::options::DriverOptions;
use libtealc::compiler_driver::{Driver, DriverError};

// Include the generated test case functions.
include!(concat!(env!("OUT_DIR"), "/generated_invalid_program_tests.rs"));

/// Compiles the given source file and verifies that there is one or more error diagnostics.
fn compile_source_file_and_expect_diagnostics(source_filename: &str) {
    let mut driver = Driver::new(source_filename, DriverOptions::default());
    let driver_result = driver.run();

    assert!(driver_result.is_err_and(|e| e == DriverError::CompilerFailed));
    assert!(driver.has_error_diagnostics());
}
