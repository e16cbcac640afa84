//! Integration tests that compile well-formed source files and compare the printed IR listing against the
//! expected listing stored next to each source file.

use libtealc::compiler_driver::options::DriverOptions;
use libtealc::compiler_driver::Driver;
use libtealc::ir::printer;

// Include the generated test case functions.
include!(concat!(env!("OUT_DIR"), "/generated_valid_program_tests.rs"));

/// Compiles the given source file and compares its IR listing with the expected `.ir` file.
fn compile_source_file_and_compare_ir(source_filename: &str, expected_ir_filename: &str) {
    let mut driver = Driver::new(source_filename, DriverOptions::default());
    let driver_result = driver.run();

    let program = driver_result
        .unwrap_or_else(|e| panic!("Compilation of '{source_filename}' failed: {e:?}"))
        .expect("The pipeline should run to completion with default options");

    assert!(!driver.has_error_diagnostics());

    let mut buffer = Vec::new();
    printer::write_program(&program, &mut buffer).expect("Writing into a Vec cannot fail");
    let listing = String::from_utf8(buffer).expect("The IR listing is UTF-8");

    let expected = std::fs::read_to_string(expected_ir_filename)
        .unwrap_or_else(|e| panic!("Cannot read '{expected_ir_filename}': {e}"));

    assert_eq!(listing, expected, "IR listing mismatch for {source_filename}");
}
