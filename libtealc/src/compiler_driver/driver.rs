//! The `driver` module defines `Driver`, which is the TealC compiler driver type.

use std::io::Write;

use super::diagnostics::Diagnostic;
use super::options::DriverOptions;
use super::DriverError;

use crate::ir::TtProgram;

/// The TealC compiler driver.
pub struct Driver {
    // The path to the source `.teal` file.
    pub source_filename: String,

    // Options that control the driver.
    options: DriverOptions,

    // Diagnostics emitted by the compiler, in insertion order.
    errors: Vec<Diagnostic>,
}

impl Driver {
    /// Creates a new compiler driver configured to compile the given source file.
    pub fn new(source_filename: &str, options: DriverOptions) -> Self {
        Self { source_filename: source_filename.to_string(), options, errors: Vec::new() }
    }

    /// Creates a new compiler driver for unit tests, with default options and no source filename.
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self { source_filename: String::new(), options: DriverOptions::default(), errors: Vec::new() }
    }

    /// Runs the compiler pipeline.
    ///
    /// Returns the TealTac program on success, `Ok(None)` when a stop-early option halted the pipeline, and an
    /// error when any diagnostic was recorded. The driver never emits IR for a program with recorded errors.
    pub fn run(&mut self) -> Result<Option<TtProgram>, DriverError> {
        super::compile(self)
    }

    /// The compiler driver's options.
    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Adds an error diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    /// Are there any error diagnostics?
    pub fn has_error_diagnostics(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// The recorded diagnostics, in insertion order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Prints all diagnostics to `stderr`, ordered by source position.
    pub fn print_diagnostics(&self) {
        self.print_diagnostics_to_buffer(std::io::stderr());
    }

    /// Prints all diagnostics to the given `buffer`, ordered by source position.
    ///
    /// Diagnostics are sorted by (line, column); the sort is stable, so diagnostics at the same position keep
    /// their insertion order.
    pub fn print_diagnostics_to_buffer(&self, mut buffer: impl Write) {
        let mut ordered = self.errors.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|diagnostic| (diagnostic.location().line, diagnostic.location().column));

        for diagnostic in ordered {
            let loc = diagnostic.location();
            _ = writeln!(
                buffer,
                "{}:{}:{}: error: {}",
                self.source_filename,
                loc.line,
                loc.column,
                diagnostic.message()
            );
        }
    }
}
