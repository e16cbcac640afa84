//! The `decorations` module defines the side-tables that attach pass results to parse-tree nodes.

use std::collections::HashMap;

use crate::parser::NodeId;
use crate::ICE;

use super::symbol_table::ScopeId;
use super::type_manager::TypeId;

/// Out-of-band annotations attached to parse-tree nodes.
///
/// The symbol pass writes scope ids (on the program and function nodes) and declared types (on type nodes); the
/// type pass writes expression types and l-value flags. The code pass reads all of them. Decorations are never
/// cleared between passes, and no pass overwrites a decoration written by an earlier pass.
#[derive(Debug, Default)]
pub struct TreeDecoration {
    scopes: HashMap<NodeId, ScopeId>,
    types: HashMap<NodeId, TypeId>,
    lvalues: HashMap<NodeId, bool>,
}

impl TreeDecoration {
    /// Creates an empty decoration table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a scope to a node.
    pub fn put_scope(&mut self, node_id: NodeId, scope: ScopeId) {
        self.scopes.insert(node_id, scope);
    }

    /// The scope attached to a node.
    pub fn get_scope(&self, node_id: NodeId) -> ScopeId {
        match self.scopes.get(&node_id) {
            Some(scope) => *scope,
            None => ICE!("No scope decoration on node {node_id}"),
        }
    }

    /// Attaches a type to a node.
    pub fn put_type(&mut self, node_id: NodeId, type_id: TypeId) {
        self.types.insert(node_id, type_id);
    }

    /// The type attached to a node.
    pub fn get_type(&self, node_id: NodeId) -> TypeId {
        match self.types.get(&node_id) {
            Some(type_id) => *type_id,
            None => ICE!("No type decoration on node {node_id}"),
        }
    }

    /// Does the node have a type decoration?
    pub fn has_type(&self, node_id: NodeId) -> bool {
        self.types.contains_key(&node_id)
    }

    /// Attaches the l-value flag to a node.
    pub fn put_is_lvalue(&mut self, node_id: NodeId, is_lvalue: bool) {
        self.lvalues.insert(node_id, is_lvalue);
    }

    /// The l-value flag attached to a node.
    pub fn get_is_lvalue(&self, node_id: NodeId) -> bool {
        match self.lvalues.get(&node_id) {
            Some(is_lvalue) => *is_lvalue,
            None => ICE!("No l-value decoration on node {node_id}"),
        }
    }
}
