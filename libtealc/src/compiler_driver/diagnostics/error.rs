//! The `error` module defines functions to emit error diagnostics.

use crate::core::{SourceIdentifier, SourceLocation};

use super::super::Driver;
use super::{Diagnostic, SemErrorKind};

/// An error diagnostic.
pub struct Error;

impl Error {
    /// Emits an error that a name is declared more than once in the same scope.
    pub fn declared_ident(ident: SourceIdentifier, driver: &mut Driver) {
        let err = format!("identifier '{}' is already declared in this scope", ident.0);
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::DeclaredIdent, err, ident.1));
    }

    /// Emits an error that a name is used without being declared.
    pub fn undeclared_ident(ident: SourceIdentifier, driver: &mut Driver) {
        let err = format!("use of undeclared identifier '{}'", ident.0);
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::UndeclaredIdent, err, ident.1));
    }

    /// Emits an error that the two sides of an assignment have incompatible types.
    pub fn incompatible_assignment(loc: SourceLocation, driver: &mut Driver) {
        let err = "incompatible types in assignment".to_string();
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::IncompatibleAssignment, err, loc));
    }

    /// Emits an error that a call argument is incompatible with the corresponding parameter.
    ///
    /// `index` is the 1-based position of the parameter.
    pub fn incompatible_parameter(loc: SourceLocation, index: usize, callee: &str, driver: &mut Driver) {
        let err = format!("incompatible type for parameter {index} in call to '{callee}'");
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::IncompatibleParameter, err, loc));
    }

    /// Emits an error that a return value is incompatible with the function's declared return type.
    pub fn incompatible_return(loc: SourceLocation, driver: &mut Driver) {
        let err = "return value is incompatible with the function's return type".to_string();
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::IncompatibleReturn, err, loc));
    }

    /// Emits an error that an operator is applied to operands of the wrong type.
    pub fn incompatible_operator(operator: &str, loc: SourceLocation, driver: &mut Driver) {
        let err = format!("incompatible operands for operator '{operator}'");
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::IncompatibleOperator, err, loc));
    }

    /// Emits an error that the left-hand side of an assignment does not denote a storable location.
    pub fn non_referenceable_left_expr(loc: SourceLocation, driver: &mut Driver) {
        let err = "left-hand side of assignment does not denote a storable location".to_string();
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::NonReferenceableLeftExpr, err, loc));
    }

    /// Emits an error that an expression does not denote a storable location.
    pub fn non_referenceable_expression(loc: SourceLocation, driver: &mut Driver) {
        let err = "expression does not denote a storable location".to_string();
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::NonReferenceableExpression, err, loc));
    }

    /// Emits an error that an if/while condition is not boolean.
    pub fn boolean_required(loc: SourceLocation, driver: &mut Driver) {
        let err = "condition must be a boolean expression".to_string();
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::BooleanRequired, err, loc));
    }

    /// Emits an error that a read/write statement was given a non-basic operand.
    pub fn read_write_require_basic(loc: SourceLocation, driver: &mut Driver) {
        let err = "read and write require an operand of basic type".to_string();
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::ReadWriteRequireBasic, err, loc));
    }

    /// Emits an error that an array index expression is not an integer.
    pub fn non_integer_index_in_array_access(loc: SourceLocation, driver: &mut Driver) {
        let err = "array index must be an integer expression".to_string();
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::NonIntegerIndexInArrayAccess, err, loc));
    }

    /// Emits an error that an indexed expression is not an array.
    pub fn non_array_in_array_access(loc: SourceLocation, driver: &mut Driver) {
        let err = "indexed expression is not an array".to_string();
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::NonArrayInArrayAccess, err, loc));
    }

    /// Emits an error that a call designator does not name a function.
    pub fn is_not_callable(ident: SourceIdentifier, driver: &mut Driver) {
        let err = format!("'{}' cannot be called", ident.0);
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::IsNotCallable, err, ident.1));
    }

    /// Emits an error that a void function is called where a value is required.
    pub fn is_not_function(ident: SourceIdentifier, driver: &mut Driver) {
        let err = format!("'{}' does not return a value", ident.0);
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::IsNotFunction, err, ident.1));
    }

    /// Emits an error that a call has the wrong number of arguments.
    pub fn number_of_parameters(loc: SourceLocation, callee: &str, driver: &mut Driver) {
        let err = format!("wrong number of arguments in call to '{callee}'");
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::NumberOfParameters, err, loc));
    }

    /// Emits an error that the program has no 'main' function taking no parameters and returning no value.
    pub fn no_main_properly_declared(loc: SourceLocation, driver: &mut Driver) {
        let err = "program requires a 'main' function taking no parameters and returning no value".to_string();
        driver.add_diagnostic(Diagnostic::semantic(SemErrorKind::NoMainProperlyDeclared, err, loc));
    }
}
