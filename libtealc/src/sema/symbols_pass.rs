//! The `symbols_pass` module implements the first semantic pass: it creates the scopes and registers every
//! declared name.

use crate::compiler_driver::{Driver, Error};
use crate::core::SourceIdentifier;
use crate::parser::{
    AstBasicType, AstFunction, AstParameter, AstProgram, AstTypeSpec, AstTypeSpecKind, AstVariableDecl,
};

use super::symbol_table::GLOBAL_SCOPE_NAME;
use super::type_manager::TypeId;
use super::SemanticContext;

/// Walks the parse tree, creates one scope per function under the global scope, and registers every declared
/// parameter, local variable and function.
///
/// Decorates the program and function nodes with their scope ids and every type node with its `TypeId`. On a
/// name collision the first binding is kept and a `declaredIdent` diagnostic is emitted.
pub fn collect_symbols(ast: &AstProgram, sema: &mut SemanticContext, driver: &mut Driver) {
    let scope = sema.symbols.push_new_scope(GLOBAL_SCOPE_NAME);
    sema.decorations.put_scope(ast.node_id, scope);

    for function in &ast.functions {
        collect_function(function, sema, driver);
    }

    sema.symbols.pop();
}

fn collect_function(function: &AstFunction, sema: &mut SemanticContext, driver: &mut Driver) {
    let scope = sema.symbols.push_new_scope(&function.name);
    sema.decorations.put_scope(function.node_id, scope);

    let mut param_types = Vec::new();
    for param in &function.parameters {
        collect_parameter(param, &mut param_types, sema, driver);
    }

    for decl in &function.declarations {
        collect_variable_decl(decl, sema, driver);
    }

    sema.symbols.pop();

    // The return type node is decorated whether or not the function name collides: the type pass reads it
    // unconditionally.
    let return_type = match &function.return_type {
        Some(type_spec) => collect_type_spec(type_spec, sema),
        None => sema.types.create_void(),
    };

    // Register the function itself, back in the enclosing scope.
    if sema.symbols.find_in_current(&function.name) {
        Error::declared_ident(SourceIdentifier(&function.name, function.name_loc), driver);
    } else {
        let func_type = sema.types.create_function(param_types, return_type);
        sema.symbols.add_function(&function.name, func_type);
    }
}

fn collect_parameter(
    param: &AstParameter,
    param_types: &mut Vec<TypeId>,
    sema: &mut SemanticContext,
    driver: &mut Driver,
) {
    let param_type = collect_type_spec(&param.type_spec, sema);

    if sema.symbols.find_in_current(&param.name) {
        Error::declared_ident(SourceIdentifier(&param.name, param.name_loc), driver);
    } else {
        sema.symbols.add_parameter(&param.name, param_type);
    }

    // The declared type still takes its place in the function signature, so arity checks see every written
    // parameter even after a collision.
    param_types.push(param_type);
}

fn collect_variable_decl(decl: &AstVariableDecl, sema: &mut SemanticContext, driver: &mut Driver) {
    let decl_type = collect_type_spec(&decl.type_spec, sema);

    for name in &decl.names {
        if sema.symbols.find_in_current(&name.name) {
            Error::declared_ident(SourceIdentifier(&name.name, name.loc), driver);
        } else {
            sema.symbols.add_local(&name.name, decl_type);
        }
    }
}

/// Builds the `TypeId` for a written type bottom-up and decorates the type node with it.
fn collect_type_spec(type_spec: &AstTypeSpec, sema: &mut SemanticContext) -> TypeId {
    let type_id = match &type_spec.kind {
        AstTypeSpecKind::Basic(basic) => basic_type_id(*basic, sema),
        AstTypeSpecKind::Array { size, elem } => {
            let elem_type = basic_type_id(*elem, sema);
            sema.types.create_array(*size, elem_type)
        }
    };

    sema.decorations.put_type(type_spec.node_id, type_id);
    type_id
}

fn basic_type_id(basic: AstBasicType, sema: &mut SemanticContext) -> TypeId {
    match basic {
        AstBasicType::Integer => sema.types.create_integer(),
        AstBasicType::Float => sema.types.create_float(),
        AstBasicType::Boolean => sema.types.create_boolean(),
        AstBasicType::Character => sema.types.create_character(),
    }
}
