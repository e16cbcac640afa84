//! Build script to generate integration test cases based on files in the `tests/valid` and `tests/invalid`
//! directories.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glob::glob;

const INVALID_TEST_CASES_FILENAME: &str = "generated_invalid_program_tests.rs";
const VALID_TEST_CASES_FILENAME: &str = "generated_valid_program_tests.rs";

fn main() {
    generate_valid_program_tests();
    generate_invalid_program_tests();

    // We want cargo to rerun our build.rs script if any of the integration test files change.
    println!("cargo:rerun-if-changed=tests");
}

/// Generate test functions for cases we expect to compile successfully. Each case compares the printed IR
/// listing against the `.ir` file next to the source file.
fn generate_valid_program_tests() {
    let out_dir = std::env::var("OUT_DIR").unwrap(); // Set by cargo when running `cargo test`
    let generated_rs_filename = Path::new(&out_dir).join(VALID_TEST_CASES_FILENAME);
    let mut writer = BufWriter::new(File::create(generated_rs_filename).expect("Failed to create file"));

    let valid_tests_dir_path = get_tests_directory_path("valid");

    for entry in glob(&format!("{}/**/*.teal", valid_tests_dir_path)).expect("Failed to read glob pattern") {
        match entry {
            Ok(source_file_path) => {
                let test_case_name = make_test_case_name(&valid_tests_dir_path, &source_file_path);

                let mut expected_ir_path = source_file_path.clone();
                expected_ir_path.set_extension("ir");
                let expected_ir_filename = expected_ir_path.into_os_string().into_string().expect("Invalid path");

                let source_filename = source_file_path.into_os_string().into_string().expect("Invalid path");

                let test_case_code = &format!(
                    r#"
                        #[test]
                        #[allow(non_snake_case)]
                        fn {test_case_name}() {{
                            compile_source_file_and_compare_ir("{source_filename}", "{expected_ir_filename}");
                        }}
                    "#
                );

                let res = writer.write_all(test_case_code.as_bytes());
                assert!(res.is_ok());
            }
            Err(e) => println!("{:?}", e),
        }
    }
}

/// Generate test functions for cases we expect to fail due to the compiler emitting a diagnostic because the
/// source file has lexical, syntax, or semantic errors.
fn generate_invalid_program_tests() {
    let out_dir = std::env::var("OUT_DIR").unwrap(); // Set by cargo when running `cargo test`
    let generated_rs_filename = Path::new(&out_dir).join(INVALID_TEST_CASES_FILENAME);
    let mut writer = BufWriter::new(File::create(generated_rs_filename).expect("Failed to create file"));

    let invalid_tests_dir_path = get_tests_directory_path("invalid");

    for entry in glob(&format!("{}/**/*.teal", invalid_tests_dir_path)).expect("Failed to read glob pattern") {
        match entry {
            Ok(source_file_path) => {
                let test_case_name = make_test_case_name(&invalid_tests_dir_path, &source_file_path);
                let source_filename = source_file_path.into_os_string().into_string().expect("Invalid path");

                let test_case_code = &format!(
                    r#"
                        #[test]
                        #[allow(non_snake_case)]
                        fn {test_case_name}() {{
                            compile_source_file_and_expect_diagnostics("{source_filename}");
                        }}
                    "#
                );

                let res = writer.write_all(test_case_code.as_bytes());
                assert!(res.is_ok());
            }
            Err(e) => println!("{:?}", e),
        }
    }
}

fn make_test_case_name(root_dir_path: &str, source_file_path: &Path) -> String {
    let root = Path::new(root_dir_path);
    let rel = match source_file_path.strip_prefix(root) {
        Ok(r) => r,
        Err(_) => source_file_path,
    };

    // Replace '/' with '_'
    let name = rel.with_extension("").iter().map(|s| s.to_string_lossy()).collect::<Vec<_>>().join("_");

    name.replace('-', "_")
}

fn get_tests_directory_path(directory: &str) -> String {
    let mut resource_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")); // Only set when using `cargo ...`
    resource_path.push("tests/");
    resource_path.push(directory);
    resource_path.into_os_string().into_string().expect("Invalid path")
}
