//! Namespaces.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::symbol::upgrade;
use crate::{NamespaceSymbol, Symbol, SymbolKind, SymbolRef, WeakSymbolRef};

/// A namespace with a growable member list.
#[derive(Debug)]
pub struct DeclaredNamespace {
    name: String,
    containing: Option<WeakSymbolRef>,
    members: RwLock<Vec<SymbolRef>>,
    children: RwLock<Vec<Arc<DeclaredNamespace>>>,
}

impl DeclaredNamespace {
    /// The unnamed root namespace.
    pub fn global() -> Arc<Self> {
        Arc::new(DeclaredNamespace {
            name: String::new(),
            containing: None,
            members: RwLock::new(Vec::new()),
            children: RwLock::new(Vec::new()),
        })
    }

    /// Child namespace `name`, created on first request.
    pub fn get_or_add_child(self: &Arc<Self>, name: &str) -> Arc<DeclaredNamespace> {
        if let Some(existing) = self.children.read().iter().find(|child| child.name == name) {
            return Arc::clone(existing);
        }
        let mut children = self.children.write();
        if let Some(existing) = children.iter().find(|child| child.name == name) {
            return Arc::clone(existing);
        }
        let parent: Weak<DeclaredNamespace> = Arc::downgrade(self);
        let parent: WeakSymbolRef = parent;
        let child = Arc::new(DeclaredNamespace {
            name: name.to_owned(),
            containing: Some(parent),
            members: RwLock::new(Vec::new()),
            children: RwLock::new(Vec::new()),
        });
        children.push(Arc::clone(&child));
        let member: SymbolRef = child.clone();
        self.members.write().push(member);
        child
    }

    /// Namespace at a dotted path below this one, creating each level.
    pub fn get_or_add_path(self: &Arc<Self>, dotted: &str) -> Arc<DeclaredNamespace> {
        dotted
            .split('.')
            .filter(|part| !part.is_empty())
            .fold(Arc::clone(self), |namespace, part| namespace.get_or_add_child(part))
    }

    pub fn add_member(&self, member: SymbolRef) {
        self.members.write().push(member);
    }

    /// Type `name` directly in this namespace.
    pub fn find_type(&self, metadata_name: &str) -> Option<SymbolRef> {
        self.members
            .read()
            .iter()
            .find(|member| {
                member.kind() == SymbolKind::NamedType && member.metadata_name() == metadata_name
            })
            .cloned()
    }
}

impl Symbol for DeclaredNamespace {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Namespace
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(self.containing.as_ref())
    }

    fn is_implicitly_declared(&self) -> bool {
        false
    }

    fn as_namespace(&self) -> Option<&dyn NamespaceSymbol> {
        Some(self)
    }
}

impl NamespaceSymbol for DeclaredNamespace {
    fn members(&self) -> Vec<SymbolRef> {
        self.members.read().clone()
    }
}
