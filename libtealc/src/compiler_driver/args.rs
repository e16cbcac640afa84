//! The `args` module defines the command-line argument parser.
//! Although crates like `clap` are excellent, we have a design goal to minimize dependencies on third-party crates
//! and so TealC uses a custom argument parser.

use super::options::DriverOptions;

/// The command-line argument parser.
pub struct Parser;

impl Parser {
    /// Parses the command-line arguments into the source file path and the compiler driver options.
    ///
    /// Returns `None` when the process should exit without compiling (help/version output, or a usage error).
    pub fn parse_command_line_args() -> Option<(String, DriverOptions)> {
        let args = std::env::args().skip(1).collect::<Vec<String>>();
        parse_args(args)
    }
}

fn parse_args(args: Vec<String>) -> Option<(String, DriverOptions)> {
    let mut options = DriverOptions::default();
    let mut source_file: Option<String> = None;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return None;
            }
            "-V" | "--version" => {
                print_version();
                return None;
            }
            "--lex" => options.lex = true,
            "--parse" => options.parse = true,
            "--validate" => options.validate = true,
            _ if arg.starts_with('-') => {
                eprintln!("error: Unknown option '{arg}'");
                print_help();
                return None;
            }
            _ => {
                if source_file.is_some() {
                    eprintln!("error: Expected exactly one source file");
                    return None;
                }
                source_file = Some(arg);
            }
        }
    }

    match source_file {
        Some(source_file) => Some((source_file, options)),
        None => {
            print_help();
            None
        }
    }
}

fn print_help() {
    println!("Usage: tealc [options] <source-file>");
    println!();
    println!("Compiles a Teal source file and prints its TealTac IR listing to stdout.");
    println!();
    println!("Options:");
    println!("  --lex          Stop after lexical analysis");
    println!("  --parse        Stop after parsing");
    println!("  --validate     Stop after semantic analysis, without emitting IR");
    println!("  -h, --help     Print this help text");
    println!("  -V, --version  Print the compiler version");
}

fn print_version() {
    println!("tealc {}", env!("CARGO_PKG_VERSION"));
}
