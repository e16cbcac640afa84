//! The `symbol_table` module defines the [SymbolTable] type and its related types.

use crate::ICE;

use super::type_manager::{TypeId, TypeManager};

/// Identifies a scope. Ids remain valid for the whole compilation, so later passes can re-enter a scope that an
/// earlier pass created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ScopeId(usize);

/// The name of the global scope.
pub const GLOBAL_SCOPE_NAME: &str = "$global$";

/// The kind of a declared symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SymbolKind {
    Local,
    Parameter,
    Function,
}

/// A named entry in a scope.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub type_id: TypeId,
}

/// One lexical scope: an ordered sequence of name bindings.
#[derive(Debug)]
struct Scope {
    name: String,
    symbols: Vec<Symbol>,
}

impl Scope {
    fn find(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }
}

/// The stack of lexical scopes.
///
/// Scopes are opened during the symbol pass and closed in LIFO order, but closing a scope never destroys it: the
/// scope is retained in an arena and later passes push it again by id. Lookup searches the active stack from the
/// innermost scope outwards.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    stack: Vec<ScopeId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a new symbol table with no scopes.
    pub fn new() -> Self {
        Self { scopes: Vec::new(), stack: Vec::new() }
    }

    /// Creates a new scope with the given name, pushes it onto the active stack, and returns its id.
    pub fn push_new_scope(&mut self, name: &str) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope { name: name.to_string(), symbols: Vec::new() });
        self.stack.push(id);
        id
    }

    /// Pushes an existing scope onto the active stack.
    pub fn push_existing(&mut self, id: ScopeId) {
        if id.0 >= self.scopes.len() {
            ICE!("push_existing with unknown scope id {}", id.0);
        }
        self.stack.push(id);
    }

    /// Pops the innermost scope off the active stack. The scope itself is retained.
    pub fn pop(&mut self) {
        if self.stack.pop().is_none() {
            ICE!("pop called with no active scope");
        }
    }

    /// The name of the given scope.
    pub fn scope_name(&self, id: ScopeId) -> &str {
        match self.scopes.get(id.0) {
            Some(scope) => &scope.name,
            None => ICE!("scope_name with unknown scope id {}", id.0),
        }
    }

    fn current(&self) -> &Scope {
        match self.stack.last() {
            Some(id) => &self.scopes[id.0],
            None => ICE!("Symbol table has no active scope"),
        }
    }

    fn current_mut(&mut self) -> &mut Scope {
        match self.stack.last() {
            Some(id) => &mut self.scopes[id.0],
            None => ICE!("Symbol table has no active scope"),
        }
    }

    /// Is the name bound in the innermost active scope?
    pub fn find_in_current(&self, name: &str) -> bool {
        self.current().find(name).is_some()
    }

    /// Finds the innermost active scope that binds the name.
    pub fn find_in_stack(&self, name: &str) -> Option<ScopeId> {
        self.stack.iter().rev().find(|id| self.scopes[id.0].find(name).is_some()).copied()
    }

    /// Adds a local variable to the innermost active scope.
    pub fn add_local(&mut self, name: &str, type_id: TypeId) {
        self.add_symbol(name, SymbolKind::Local, type_id);
    }

    /// Adds a parameter to the innermost active scope.
    pub fn add_parameter(&mut self, name: &str, type_id: TypeId) {
        self.add_symbol(name, SymbolKind::Parameter, type_id);
    }

    /// Adds a function to the innermost active scope.
    pub fn add_function(&mut self, name: &str, type_id: TypeId) {
        self.add_symbol(name, SymbolKind::Function, type_id);
    }

    fn add_symbol(&mut self, name: &str, kind: SymbolKind, type_id: TypeId) {
        // The passes collision-check with find_in_current before adding; a duplicate here is a compiler bug.
        if self.find_in_current(name) {
            ICE!("Symbol '{name}' is already bound in the current scope");
        }

        self.current_mut().symbols.push(Symbol { name: name.to_string(), kind, type_id });
    }

    /// The type of the name, searching the active stack from the innermost scope outwards.
    pub fn type_of(&self, name: &str) -> Option<TypeId> {
        self.lookup(name).map(|symbol| symbol.type_id)
    }

    /// Is the name bound to a function, searching the active stack from the innermost scope outwards?
    pub fn is_function(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|symbol| symbol.kind == SymbolKind::Function)
    }

    fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.stack.iter().rev().find_map(|id| self.scopes[id.0].find(name))
    }

    /// Returns true iff the global scope does not bind `main` as a function taking no parameters and returning
    /// void.
    pub fn no_main_properly_declared(&self, types: &TypeManager) -> bool {
        let Some(global) = self.scopes.first() else {
            return true;
        };

        let Some(symbol) = global.find("main") else {
            return true;
        };

        if symbol.kind != SymbolKind::Function {
            return true;
        }

        !(types.func_params(symbol.type_id).is_empty() && types.is_void(types.func_return(symbol.type_id)))
    }
}
