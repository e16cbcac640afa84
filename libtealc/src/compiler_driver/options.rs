//! The `options` module defines the options that control the compiler driver.

/// Options that control the compiler driver.
#[derive(Debug, Default, Clone)]
pub struct DriverOptions {
    /// Stop after the lexer stage.
    pub lex: bool,

    /// Stop after the parser stage.
    pub parse: bool,

    /// Stop after semantic analysis, without emitting IR.
    pub validate: bool,
}
