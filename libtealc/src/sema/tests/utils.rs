use crate::compiler_driver::{Driver, SemErrorKind};
use crate::lexer;
use crate::parser::{self, AstProgram};

use super::super::{semantic_analysis, SemanticContext};

/// Lexes, parses and runs both semantic passes over the given source.
///
/// Panics on lexical or syntax errors: semantic tests exercise well-formed programs.
pub fn analyze(source: &str) -> (Driver, SemanticContext, AstProgram) {
    let mut driver = Driver::for_testing();

    let tokens = lexer::lex(&mut driver, source);
    let ast = parser::parse(&mut driver, tokens);
    assert!(!driver.has_error_diagnostics(), "unexpected lex/parse diagnostics: {:?}", driver.diagnostics());

    let sema = semantic_analysis(&ast, &mut driver);
    (driver, sema, ast)
}

/// The kinds of the recorded semantic diagnostics, in insertion order.
pub fn sem_error_kinds(driver: &Driver) -> Vec<SemErrorKind> {
    driver.diagnostics().iter().filter_map(|diagnostic| diagnostic.sem_kind()).collect()
}
