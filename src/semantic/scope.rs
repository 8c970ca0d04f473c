//! Lexically scoped symbol table
//!
//! Scopes live in an arena owned by [`ScopeTable`] and refer to each other
//! through [`ScopeId`] handles:
//! - every scope except the root has exactly one parent
//! - closed scopes stay attached to their parent as children, so the whole
//!   tree can be inspected after parsing
//!
//! Lookup by ancestry walks parent handles outward and returns the nearest
//! binding, which is how inner declarations shadow outer ones without
//! touching them.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Handle to a scope inside a [`ScopeTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What kind of lexical region a scope belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Block,
    Class,
    Method,
}

/// Role of a declared name, kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Global,
    Class,
    Method,
    Parameter,
    Variable,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolKind::Global => "global",
            SymbolKind::Class => "class",
            SymbolKind::Method => "method",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Variable => "variable",
        };
        f.write_str(name)
    }
}

/// A declared name. Created once at its declaration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub declared_type: String,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        kind: SymbolKind,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            kind,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.name, self.declared_type, self.kind)
    }
}

/// Returned by [`ScopeTable::insert`] when the name is already bound in that scope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' is already declared in this scope")]
pub struct AlreadyDeclared {
    pub name: String,
}

#[derive(Debug, Clone)]
struct Scope {
    kind: ScopeKind,
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    symbols: Vec<Symbol>,
    index: FxHashMap<String, usize>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            symbols: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

/// Tree of scopes rooted at a single global scope
#[derive(Debug, Clone)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
}

impl Default for ScopeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTable {
    /// Create a table holding only the root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Global, None)],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Number of scopes ever created, including closed ones
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Bind `symbol` in `scope`. Fails without mutating anything when the
    /// name is already bound in that same scope; ancestors are not consulted.
    pub fn insert(&mut self, scope: ScopeId, symbol: Symbol) -> Result<(), AlreadyDeclared> {
        let scope = &mut self.scopes[scope.0];
        if scope.index.contains_key(&symbol.name) {
            return Err(AlreadyDeclared { name: symbol.name });
        }
        scope.index.insert(symbol.name.clone(), scope.symbols.len());
        scope.symbols.push(symbol);
        Ok(())
    }

    /// Current-scope-only membership test
    pub fn contains_local(&self, scope: ScopeId, name: &str) -> bool {
        self.scopes[scope.0].index.contains_key(name)
    }

    /// Find the nearest binding of `name`, starting at `scope` and walking
    /// outward to the root.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(&slot) = scope.index.get(name) {
                return Some(&scope.symbols[slot]);
            }
            current = scope.parent;
        }
        None
    }

    /// Open a new scope nested in `parent`.
    pub fn enter_child(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(kind, Some(parent)));
        self.scopes[parent.0].children.push(id);
        id
    }

    /// The enclosing scope of `scope`, or `scope` itself at the root.
    pub fn exit_to_parent(&self, scope: ScopeId) -> ScopeId {
        self.scopes[scope.0].parent.unwrap_or(scope)
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0].parent
    }

    pub fn children(&self, scope: ScopeId) -> &[ScopeId] {
        &self.scopes[scope.0].children
    }

    pub fn kind(&self, scope: ScopeId) -> ScopeKind {
        self.scopes[scope.0].kind
    }

    /// Symbols declared directly in `scope`, in declaration order
    pub fn symbols(&self, scope: ScopeId) -> &[Symbol] {
        &self.scopes[scope.0].symbols
    }

    /// Distance from `scope` to the root
    pub fn depth(&self, scope: ScopeId) -> usize {
        let mut depth = 0;
        let mut current = scope;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Every symbol visible from `scope`, outermost first; an inner binding
    /// replaces an outer binding of the same name.
    pub fn visible_symbols(&self, scope: ScopeId) -> Vec<&Symbol> {
        let mut chain = vec![scope];
        let mut current = scope;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }

        let mut visible: Vec<&Symbol> = Vec::new();
        let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
        for id in chain.into_iter().rev() {
            for symbol in self.symbols(id) {
                match slots.get(symbol.name.as_str()) {
                    Some(&slot) => visible[slot] = symbol,
                    None => {
                        slots.insert(symbol.name.as_str(), visible.len());
                        visible.push(symbol);
                    }
                }
            }
        }
        visible
    }

    /// All scopes in depth-first pre-order starting at the root
    pub fn walk(&self) -> Vec<ScopeId> {
        let mut order = Vec::with_capacity(self.scopes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, ty: &str) -> Symbol {
        Symbol::new(name, ty, SymbolKind::Variable)
    }

    #[test]
    fn test_insert_rejects_local_duplicate() {
        let mut table = ScopeTable::new();
        let root = table.root();

        assert!(table.insert(root, var("x", "int")).is_ok());
        let err = table.insert(root, var("x", "String")).unwrap_err();
        assert_eq!(err.name, "x");

        // First binding survives
        assert_eq!(table.lookup(root, "x").unwrap().declared_type, "int");
        assert_eq!(table.symbols(root).len(), 1);
    }

    #[test]
    fn test_lookup_walks_ancestors() {
        let mut table = ScopeTable::new();
        let root = table.root();
        table.insert(root, var("a", "int")).unwrap();

        let block = table.enter_child(root, ScopeKind::Block);
        let inner = table.enter_child(block, ScopeKind::Block);

        assert!(table.lookup(inner, "a").is_some());
        assert!(!table.contains_local(inner, "a"));
        assert!(table.lookup(inner, "missing").is_none());
    }

    #[test]
    fn test_shadowing_keeps_outer_binding() {
        let mut table = ScopeTable::new();
        let root = table.root();
        table.insert(root, var("x", "int")).unwrap();

        let child = table.enter_child(root, ScopeKind::Block);
        assert!(table.insert(child, var("x", "String")).is_ok());
        assert_eq!(table.lookup(child, "x").unwrap().declared_type, "String");

        let back = table.exit_to_parent(child);
        assert_eq!(back, root);
        assert_eq!(table.lookup(back, "x").unwrap().declared_type, "int");
    }

    #[test]
    fn test_exit_root_is_noop() {
        let table = ScopeTable::new();
        assert_eq!(table.exit_to_parent(table.root()), table.root());
    }

    #[test]
    fn test_walk_and_visible_symbols() {
        let mut table = ScopeTable::new();
        let root = table.root();
        table.insert(root, var("x", "int")).unwrap();
        table.insert(root, var("y", "int")).unwrap();

        let first = table.enter_child(root, ScopeKind::Method);
        let nested = table.enter_child(first, ScopeKind::Block);
        let second = table.enter_child(root, ScopeKind::Class);
        table.insert(nested, var("x", "double")).unwrap();

        assert_eq!(table.walk(), vec![root, first, nested, second]);
        assert_eq!(table.depth(nested), 2);

        let visible: Vec<_> = table
            .visible_symbols(nested)
            .into_iter()
            .map(|s| (s.name.as_str(), s.declared_type.as_str()))
            .collect();
        assert_eq!(visible, vec![("x", "double"), ("y", "int")]);
    }
}
