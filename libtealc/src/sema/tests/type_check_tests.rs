use crate::compiler_driver::SemErrorKind;
use crate::parser::{AstExpressionKind, AstStatement};

use super::utils::{analyze, sem_error_kinds};

#[test]
fn valid_program_has_no_diagnostics() {
    let (driver, _, _) = analyze(
        "func add(a : int, b : int) : int\n\
         \x20 return a + b;\n\
         endfunc\n\
         func main()\n\
         \x20 var x : int;\n\
         \x20 x := add(1, 2);\n\
         \x20 write x;\n\
         endfunc",
    );

    assert!(!driver.has_error_diagnostics());
}

#[test]
fn every_expression_is_decorated() {
    let (_, sema, ast) = analyze(
        "func main()\n\
         \x20 var x : float;\n\
         \x20 x := (1 + 2) * 3 - -4;\n\
         endfunc",
    );

    let AstStatement::Assign { target, value, .. } = &ast.functions[0].statements[0] else {
        panic!("Expected an assignment");
    };

    assert!(sema.decorations.has_type(target.node_id));
    assert!(sema.decorations.has_type(value.node_id));
    assert!(sema.types.is_integer(sema.decorations.get_type(value.node_id)));
    assert!(!sema.decorations.get_is_lvalue(value.node_id));
}

#[test]
fn arithmetic_infers_float_when_either_operand_is_float() {
    let (driver, sema, ast) = analyze(
        "func main()\n\
         \x20 var x : float;\n\
         \x20 x := 1 + 2.0;\n\
         endfunc",
    );
    assert!(!driver.has_error_diagnostics());

    let AstStatement::Assign { value, .. } = &ast.functions[0].statements[0] else {
        panic!("Expected an assignment");
    };
    assert!(sema.types.is_float(sema.decorations.get_type(value.node_id)));
}

#[test]
fn parenthesis_propagates_the_lvalue_flag() {
    let (driver, sema, ast) = analyze(
        "func main()\n\
         \x20 var x, y : int;\n\
         \x20 x := (y);\n\
         endfunc",
    );
    assert!(!driver.has_error_diagnostics());

    let AstStatement::Assign { value, .. } = &ast.functions[0].statements[0] else {
        panic!("Expected an assignment");
    };
    assert!(matches!(value.kind, AstExpressionKind::Parenthesis { .. }));
    assert!(sema.decorations.get_is_lvalue(value.node_id));
}

#[test]
fn boolean_index_is_diagnosed_but_access_keeps_the_element_type() {
    let (driver, sema, ast) = analyze(
        "func main()\n\
         \x20 var a : array<5,int>;\n\
         \x20 var x : int;\n\
         \x20 x := a[true];\n\
         endfunc",
    );

    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::NonIntegerIndexInArrayAccess]);

    // The access still decorates with the array's element type, and stays an l-value.
    let AstStatement::Assign { value, .. } = &ast.functions[0].statements[0] else {
        panic!("Expected an assignment");
    };
    assert!(matches!(value.kind, AstExpressionKind::ArrayAccess { .. }));
    assert!(sema.types.is_integer(sema.decorations.get_type(value.node_id)));
    assert!(sema.decorations.get_is_lvalue(value.node_id));
}

#[test]
fn indexing_a_non_array_is_diagnosed() {
    let (driver, _, _) = analyze(
        "func main()\n\
         \x20 var x, y : int;\n\
         \x20 x := y[0];\n\
         endfunc",
    );

    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::NonArrayInArrayAccess]);
}

#[test]
fn undeclared_identifier_does_not_cascade() {
    let (driver, _, _) = analyze(
        "func main()\n\
         \x20 var x : int;\n\
         \x20 x := y + 1;\n\
         endfunc",
    );

    // Only the undeclared identifier is reported; the '+' and the assignment stay silent because the
    // error type absorbs their checks.
    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::UndeclaredIdent]);
}

#[test]
fn incompatible_assignment() {
    let (driver, _, _) = analyze(
        "func main()\n\
         \x20 var x : int;\n\
         \x20 x := true;\n\
         endfunc",
    );

    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::IncompatibleAssignment]);
}

#[test]
fn int_to_float_assignment_is_accepted() {
    let (driver, _, _) = analyze(
        "func main()\n\
         \x20 var x : float;\n\
         \x20 x := 3;\n\
         endfunc",
    );

    assert!(!driver.has_error_diagnostics());
}

#[test]
fn assigning_to_a_function_name() {
    let (driver, _, _) = analyze(
        "func f() : int\n\
         \x20 return 1;\n\
         endfunc\n\
         func main()\n\
         \x20 f := 3;\n\
         endfunc",
    );

    // The function name is not an l-value, and a function type is not assignment-compatible with int.
    let kinds = sem_error_kinds(&driver);
    assert!(kinds.contains(&SemErrorKind::NonReferenceableLeftExpr));
    assert!(kinds.contains(&SemErrorKind::IncompatibleAssignment));
}

#[test]
fn operator_type_errors() {
    let cases = [
        ("x := 1 + true;", "var x : int;"),
        ("x := 1.0 % 2;", "var x : int;"),
        ("b := true < false;", "var b : bool;"),
        ("b := not 1;", "var b : bool;"),
        ("b := 1 and true;", "var b : bool;"),
        ("b := 'a' = 1;", "var b : bool;"),
    ];

    for (statement, decl) in cases {
        let source = format!("func main()\n {decl}\n {statement}\nendfunc");
        let (driver, _, _) = analyze(&source);
        assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::IncompatibleOperator], "for: {statement}");
    }
}

#[test]
fn mixed_numeric_comparison_is_accepted() {
    let (driver, _, _) = analyze(
        "func main()\n\
         \x20 var b : bool;\n\
         \x20 b := 1 <= 2.0;\n\
         \x20 b := 1.5 != 2;\n\
         endfunc",
    );

    assert!(!driver.has_error_diagnostics());
}

#[test]
fn conditions_must_be_boolean() {
    let (driver, _, _) = analyze(
        "func main()\n\
         \x20 var x : int;\n\
         \x20 if 1 then\n\
         \x20   x := 1;\n\
         \x20 endif\n\
         \x20 while x do\n\
         \x20   x := 0;\n\
         \x20 endwhile\n\
         endfunc",
    );

    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::BooleanRequired, SemErrorKind::BooleanRequired]);
}

#[test]
fn read_and_write_require_basic_types() {
    let (driver, _, _) = analyze(
        "func main()\n\
         \x20 var a : array<3,int>;\n\
         \x20 read a;\n\
         \x20 write a;\n\
         endfunc",
    );

    assert_eq!(
        sem_error_kinds(&driver),
        vec![SemErrorKind::ReadWriteRequireBasic, SemErrorKind::ReadWriteRequireBasic]
    );
}

#[test]
fn return_type_mismatch() {
    let (driver, _, _) = analyze(
        "func f() : int\n\
         \x20 return 1.0;\n\
         endfunc\n\
         func main()\n\
         endfunc",
    );

    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::IncompatibleReturn]);
}

#[test]
fn widening_return_is_accepted() {
    let (driver, _, _) = analyze(
        "func f() : float\n\
         \x20 return 3;\n\
         endfunc\n\
         func main()\n\
         endfunc",
    );

    assert!(!driver.has_error_diagnostics());
}

#[test]
fn bare_return_in_a_void_function_is_accepted() {
    let (driver, _, _) = analyze(
        "func main()\n\
         \x20 return;\n\
         endfunc",
    );

    assert!(!driver.has_error_diagnostics());
}

#[test]
fn bare_return_in_a_value_function_is_diagnosed() {
    let (driver, _, _) = analyze(
        "func f() : int\n\
         \x20 return;\n\
         endfunc\n\
         func main()\n\
         endfunc",
    );

    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::IncompatibleReturn]);
}

#[test]
fn call_diagnostics() {
    // Wrong arity.
    let (driver, _, _) = analyze(
        "func f(x : int)\n\
         endfunc\n\
         func main()\n\
         \x20 f(1, 2);\n\
         endfunc",
    );
    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::NumberOfParameters]);

    // Incompatible argument; the position in the message is 1-based.
    let (driver, _, _) = analyze(
        "func f(x : int)\n\
         endfunc\n\
         func main()\n\
         \x20 f(true);\n\
         endfunc",
    );
    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::IncompatibleParameter]);
    assert!(driver.diagnostics()[0].message().contains("parameter 1"));

    // Calling something that is not a function.
    let (driver, _, _) = analyze(
        "func main()\n\
         \x20 var x : int;\n\
         \x20 x();\n\
         endfunc",
    );
    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::IsNotCallable]);

    // A void function used where a value is required.
    let (driver, _, _) = analyze(
        "func p()\n\
         endfunc\n\
         func main()\n\
         \x20 var x : int;\n\
         \x20 x := p();\n\
         endfunc",
    );
    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::IsNotFunction]);

    // Statement-form calls may discard a non-void result.
    let (driver, _, _) = analyze(
        "func g() : int\n\
         \x20 return 1;\n\
         endfunc\n\
         func main()\n\
         \x20 g();\n\
         endfunc",
    );
    assert!(!driver.has_error_diagnostics());
}

#[test]
fn int_argument_for_float_parameter_is_accepted() {
    let (driver, _, _) = analyze(
        "func f(x : float)\n\
         endfunc\n\
         func main()\n\
         \x20 f(3);\n\
         endfunc",
    );

    assert!(!driver.has_error_diagnostics());
}

#[test]
fn missing_main_is_diagnosed() {
    let (driver, _, _) = analyze(
        "func helper()\n\
         endfunc",
    );

    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::NoMainProperlyDeclared]);
}

#[test]
fn main_with_a_parameter_is_not_a_proper_main() {
    let (driver, _, _) = analyze(
        "func main(x : int)\n\
         endfunc",
    );

    assert_eq!(sem_error_kinds(&driver), vec![SemErrorKind::NoMainProperlyDeclared]);
}
