use crate::compiler_driver::{Driver, SemErrorKind};
use crate::lexer;
use crate::parser::{self, AstProgram};

use super::super::{symbols_pass, SemanticContext};

/// Lexes and parses the source, then runs only the symbol pass.
fn collect(source: &str) -> (Driver, SemanticContext, AstProgram) {
    let mut driver = Driver::for_testing();

    let tokens = lexer::lex(&mut driver, source);
    let ast = parser::parse(&mut driver, tokens);
    assert!(!driver.has_error_diagnostics(), "unexpected lex/parse diagnostics: {:?}", driver.diagnostics());

    let mut sema = SemanticContext::new();
    symbols_pass::collect_symbols(&ast, &mut sema, &mut driver);

    (driver, sema, ast)
}

#[test]
fn registers_functions_in_the_global_scope() {
    let (driver, mut sema, ast) = collect(
        "func helper(x : int) : float\n\
         \x20 return 1.0;\n\
         endfunc\n\
         func main()\n\
         endfunc",
    );
    assert!(!driver.has_error_diagnostics());

    // Re-enter the decorated global scope and look the functions up.
    let global = sema.decorations.get_scope(ast.node_id);
    sema.symbols.push_existing(global);

    assert!(sema.symbols.is_function("helper"));
    assert!(sema.symbols.is_function("main"));

    let helper_ty = sema.symbols.type_of("helper").expect("helper should be bound");
    assert_eq!(sema.symbols.scope_name(global), super::super::symbol_table::GLOBAL_SCOPE_NAME);
    assert_eq!(sema.types.func_params(helper_ty), &[sema.types.create_integer()]);
    assert_eq!(sema.types.func_return(helper_ty), sema.types.create_float());

    let main_ty = sema.symbols.type_of("main").expect("main should be bound");
    assert!(sema.types.is_void_function(main_ty));
    assert!(!sema.symbols.no_main_properly_declared(&sema.types));

    sema.symbols.pop();
}

#[test]
fn registers_parameters_and_locals_in_the_function_scope() {
    let (driver, mut sema, ast) = collect(
        "func calc(p : float, v : array<4,char>)\n\
         \x20 var a, b : int;\n\
         \x20 var flag : bool;\n\
         endfunc",
    );
    assert!(!driver.has_error_diagnostics());

    let func_scope = sema.decorations.get_scope(ast.functions[0].node_id);
    assert_eq!(sema.symbols.scope_name(func_scope), "calc");

    sema.symbols.push_existing(func_scope);

    assert_eq!(sema.symbols.type_of("p"), Some(sema.types.create_float()));
    let v_ty = sema.symbols.type_of("v").expect("v should be bound");
    assert!(sema.types.is_array(v_ty));
    assert_eq!(sema.types.array_size(v_ty), 4);
    assert_eq!(sema.types.array_elem(v_ty), sema.types.create_character());

    assert_eq!(sema.symbols.type_of("a"), Some(sema.types.create_integer()));
    assert_eq!(sema.symbols.type_of("b"), Some(sema.types.create_integer()));
    assert_eq!(sema.symbols.type_of("flag"), Some(sema.types.create_boolean()));

    sema.symbols.pop();
}

#[test]
fn every_type_node_is_decorated() {
    let (_, sema, ast) = collect(
        "func calc(p : float) : int\n\
         \x20 var a : array<2,int>;\n\
         \x20 return 0;\n\
         endfunc",
    );

    let function = &ast.functions[0];
    assert!(sema.decorations.has_type(function.parameters[0].type_spec.node_id));
    assert!(sema.decorations.has_type(function.return_type.as_ref().unwrap().node_id));
    assert!(sema.decorations.has_type(function.declarations[0].type_spec.node_id));
}

#[test]
fn redeclared_local_keeps_the_first_binding() {
    let (driver, mut sema, ast) = collect(
        "func main()\n\
         \x20 var x : int;\n\
         \x20 var x : float;\n\
         endfunc",
    );

    assert_eq!(driver.error_count(), 1);
    assert_eq!(driver.diagnostics()[0].sem_kind(), Some(SemErrorKind::DeclaredIdent));

    // The first binding survives.
    let func_scope = sema.decorations.get_scope(ast.functions[0].node_id);
    sema.symbols.push_existing(func_scope);
    assert_eq!(sema.symbols.type_of("x"), Some(sema.types.create_integer()));
    sema.symbols.pop();
}

#[test]
fn parameter_colliding_with_parameter() {
    let (driver, _, _) = collect("func f(a : int, a : float) endfunc func main() endfunc");

    assert_eq!(driver.error_count(), 1);
    assert_eq!(driver.diagnostics()[0].sem_kind(), Some(SemErrorKind::DeclaredIdent));
}

#[test]
fn local_colliding_with_parameter() {
    let (driver, _, _) = collect(
        "func f(a : int)\n\
         \x20 var a : float;\n\
         endfunc\n\
         func main()\n\
         endfunc",
    );

    assert_eq!(driver.error_count(), 1);
    assert_eq!(driver.diagnostics()[0].sem_kind(), Some(SemErrorKind::DeclaredIdent));
}

#[test]
fn redeclared_function_keeps_the_first_binding() {
    let (driver, mut sema, ast) = collect(
        "func f() : int\n\
         \x20 return 1;\n\
         endfunc\n\
         func f() : float\n\
         \x20 return 1.0;\n\
         endfunc\n\
         func main()\n\
         endfunc",
    );

    assert_eq!(driver.error_count(), 1);
    assert_eq!(driver.diagnostics()[0].sem_kind(), Some(SemErrorKind::DeclaredIdent));

    let global = sema.decorations.get_scope(ast.node_id);
    sema.symbols.push_existing(global);
    let f_ty = sema.symbols.type_of("f").expect("f should be bound");
    assert_eq!(sema.types.func_return(f_ty), sema.types.create_integer());
    sema.symbols.pop();
}
