//! Namespace Tree - hierarchical storage for registered classes and exceptions.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: `NamespaceData` (classes and exceptions at that level)
//! - Edges: `Contains(name)` for the parent/child hierarchy

use dune_pymor_core::{ClassEntry, ExceptionEntry, RegistrationError, TypeHash};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

/// Edge types in the namespace graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceEdge {
    /// Parent namespace contains child namespace.
    /// The String is the child's simple name.
    Contains(String),
}

/// Data stored in each namespace node.
#[derive(Debug, Default)]
pub struct NamespaceData {
    /// Classes in this namespace by simple (instantiated) name.
    pub classes: FxHashMap<String, ClassEntry>,

    /// Exceptions in this namespace by simple name.
    pub exceptions: FxHashMap<String, ExceptionEntry>,
}

impl NamespaceData {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The namespace graph.
pub struct NamespaceTree {
    /// The directed graph storing all namespaces.
    graph: DiGraph<NamespaceData, NamespaceEdge>,

    /// The root (global) namespace node.
    root: NodeIndex,

    /// Reverse index: class hash -> (NodeIndex, simple_name).
    class_hash_index: FxHashMap<TypeHash, (NodeIndex, String)>,

    /// Reverse index: exception hash -> (NodeIndex, simple_name).
    exception_hash_index: FxHashMap<TypeHash, (NodeIndex, String)>,
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTree {
    /// Create a new namespace tree with an empty root.
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(NamespaceData::new());
        Self {
            graph,
            root,
            class_hash_index: FxHashMap::default(),
            exception_hash_index: FxHashMap::default(),
        }
    }

    /// Get the root namespace node index.
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Number of namespace nodes, root included.
    pub fn namespace_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get a namespace node's data.
    pub fn get_namespace(&self, node: NodeIndex) -> Option<&NamespaceData> {
        self.graph.node_weight(node)
    }

    /// Find a child namespace by name.
    pub fn find_child(&self, parent: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.graph.edges(parent).find_map(|edge| {
            let NamespaceEdge::Contains(child_name) = edge.weight();
            (child_name == name).then(|| edge.target())
        })
    }

    /// Get or create a child namespace.
    pub fn get_or_create_child(&mut self, parent: NodeIndex, name: &str) -> NodeIndex {
        if let Some(child) = self.find_child(parent, name) {
            return child;
        }

        let child = self.graph.add_node(NamespaceData::new());
        self.graph
            .add_edge(parent, child, NamespaceEdge::Contains(name.to_string()));
        child
    }

    /// Get or create a namespace path from root.
    pub fn get_or_create_path<S: AsRef<str>>(&mut self, path: &[S]) -> NodeIndex {
        let mut current = self.root;
        for segment in path {
            current = self.get_or_create_child(current, segment.as_ref());
        }
        current
    }

    /// Get an existing namespace by path, or None if it doesn't exist.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeIndex> {
        let mut current = self.root;
        for segment in path {
            current = self.find_child(current, segment.as_ref())?;
        }
        Some(current)
    }

    /// Find the parent namespace of a node.
    pub fn find_parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .next()
            .map(|edge| edge.source())
    }

    /// Get the simple name of a namespace node.
    pub fn get_namespace_name(&self, node: NodeIndex) -> Option<&str> {
        if node == self.root {
            return None;
        }
        self.graph
            .edges_directed(node, Direction::Incoming)
            .next()
            .map(|edge| {
                let NamespaceEdge::Contains(name) = edge.weight();
                name.as_str()
            })
    }

    /// Get the full namespace path for a node.
    pub fn get_namespace_path(&self, node: NodeIndex) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = node;

        while current != self.root {
            if let Some(name) = self.get_namespace_name(current) {
                path.push(name.to_string());
            }
            match self.find_parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }

        path.reverse();
        path
    }

    /// Get the qualified name string for a symbol in a namespace.
    pub fn qualified_name(&self, ns_node: NodeIndex, simple_name: &str) -> String {
        let path = self.get_namespace_path(ns_node);
        if path.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}::{}", path.join("::"), simple_name)
        }
    }

    /// All non-root namespaces as qualified strings, in creation order.
    pub fn namespace_paths(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|&node| node != self.root)
            .map(|node| self.get_namespace_path(node).join("::"))
            .collect()
    }

    // ========================================================================
    // Class Registration
    // ========================================================================

    /// Register a class in the given namespace node.
    pub fn register_class(
        &mut self,
        ns_node: NodeIndex,
        entry: ClassEntry,
    ) -> Result<(), RegistrationError> {
        let simple_name = entry.name().to_string();
        let type_hash = entry.type_hash;

        {
            let ns_data = self
                .graph
                .node_weight(ns_node)
                .ok_or(RegistrationError::InvalidNamespace)?;

            if ns_data.classes.contains_key(&simple_name) {
                let qualified = self.qualified_name(ns_node, &simple_name);
                return Err(RegistrationError::DuplicateType(qualified));
            }
        }

        let ns_data = self
            .graph
            .node_weight_mut(ns_node)
            .ok_or(RegistrationError::InvalidNamespace)?;
        ns_data.classes.insert(simple_name.clone(), entry);

        self.class_hash_index.insert(type_hash, (ns_node, simple_name));

        Ok(())
    }

    /// Get a class by hash.
    pub fn get_class_by_hash(&self, hash: TypeHash) -> Option<&ClassEntry> {
        let (ns_node, name) = self.class_hash_index.get(&hash)?;
        self.graph.node_weight(*ns_node)?.classes.get(name)
    }

    /// Resolve a fully qualified class name like "Dune::Pymor::Parametric".
    pub fn resolve_qualified_class(&self, qualified_name: &str) -> Option<&ClassEntry> {
        let name = dune_pymor_core::QualifiedName::from_qualified_string(qualified_name);
        let ns_node = self.get_path(&name.namespace)?;
        self.graph.node_weight(ns_node)?.classes.get(&name.name)
    }

    // ========================================================================
    // Exception Registration
    // ========================================================================

    /// Register an exception in the given namespace node.
    pub fn register_exception(
        &mut self,
        ns_node: NodeIndex,
        entry: ExceptionEntry,
    ) -> Result<(), RegistrationError> {
        let simple_name = entry.qualified_name.simple_name().to_string();
        let type_hash = entry.type_hash;

        {
            let ns_data = self
                .graph
                .node_weight(ns_node)
                .ok_or(RegistrationError::InvalidNamespace)?;

            if ns_data.exceptions.contains_key(&simple_name) {
                let qualified = self.qualified_name(ns_node, &simple_name);
                return Err(RegistrationError::DuplicateException(qualified));
            }
        }

        let ns_data = self
            .graph
            .node_weight_mut(ns_node)
            .ok_or(RegistrationError::InvalidNamespace)?;
        ns_data.exceptions.insert(simple_name.clone(), entry);

        self.exception_hash_index
            .insert(type_hash, (ns_node, simple_name));

        Ok(())
    }

    /// Get an exception by hash.
    pub fn get_exception_by_hash(&self, hash: TypeHash) -> Option<&ExceptionEntry> {
        let (ns_node, name) = self.exception_hash_index.get(&hash)?;
        self.graph.node_weight(*ns_node)?.exceptions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dune_pymor_core::QualifiedName;

    fn class(ns: &[&str], name: &str) -> ClassEntry {
        ClassEntry::new(ns.iter().map(|s| s.to_string()).collect(), name, vec![])
    }

    #[test]
    fn root_namespace_is_created_on_init() {
        let tree = NamespaceTree::new();
        assert!(tree.get_namespace(tree.root()).is_some());
        assert_eq!(tree.namespace_count(), 1);
    }

    #[test]
    fn empty_path_returns_root() {
        let mut tree = NamespaceTree::new();
        let empty: [&str; 0] = [];
        assert_eq!(tree.get_or_create_path(&empty), tree.root());
    }

    #[test]
    fn create_namespace_path() {
        let mut tree = NamespaceTree::new();
        let node = tree.get_or_create_path(&["Dune", "Pymor", "Functionals"]);
        assert_eq!(
            tree.get_namespace_path(node),
            vec!["Dune", "Pymor", "Functionals"]
        );
        assert_eq!(tree.namespace_count(), 4);
    }

    #[test]
    fn get_or_create_child_returns_same_node_if_exists() {
        let mut tree = NamespaceTree::new();
        let root = tree.root();
        let first = tree.get_or_create_child(root, "Dune");
        let second = tree.get_or_create_child(root, "Dune");
        assert_eq!(first, second);
    }

    #[test]
    fn find_parent_of_root_returns_none() {
        let tree = NamespaceTree::new();
        assert!(tree.find_parent(tree.root()).is_none());
        assert!(tree.get_namespace_name(tree.root()).is_none());
    }

    #[test]
    fn qualified_name_at_root_returns_simple_name() {
        let tree = NamespaceTree::new();
        assert_eq!(tree.qualified_name(tree.root(), "Foo"), "Foo");
    }

    #[test]
    fn register_and_resolve_class() {
        let mut tree = NamespaceTree::new();
        let node = tree.get_or_create_path(&["Dune", "Pymor"]);
        let entry = class(&["Dune", "Pymor"], "Parametric");
        let hash = entry.type_hash;
        tree.register_class(node, entry).unwrap();

        assert!(tree.resolve_qualified_class("Dune::Pymor::Parametric").is_some());
        assert!(tree.resolve_qualified_class("::Dune::Pymor::Parametric").is_some());
        assert!(tree.resolve_qualified_class("Dune::Parametric").is_none());
        assert_eq!(
            tree.get_class_by_hash(hash).map(|c| c.name()),
            Some("Parametric")
        );
    }

    #[test]
    fn duplicate_class_detection() {
        let mut tree = NamespaceTree::new();
        let node = tree.get_or_create_path(&["Dune", "Pymor"]);
        tree.register_class(node, class(&["Dune", "Pymor"], "Parameter"))
            .unwrap();
        let result = tree.register_class(node, class(&["Dune", "Pymor"], "Parameter"));
        assert_eq!(
            result,
            Err(RegistrationError::DuplicateType(
                "Dune::Pymor::Parameter".into()
            ))
        );
    }

    #[test]
    fn register_exception_and_lookup_by_hash() {
        let mut tree = NamespaceTree::new();
        let node = tree.get_or_create_path(&["Dune"]);
        let entry = ExceptionEntry::new(QualifiedName::from("Dune::Exception"));
        let hash = entry.type_hash;
        tree.register_exception(node, entry).unwrap();

        assert!(tree.get_exception_by_hash(hash).is_some());
        let again = ExceptionEntry::new(QualifiedName::from("Dune::Exception"));
        assert!(matches!(
            tree.register_exception(node, again),
            Err(RegistrationError::DuplicateException(_))
        ));
    }

    #[test]
    fn namespace_paths_skip_root() {
        let mut tree = NamespaceTree::new();
        tree.get_or_create_path(&["Dune", "Pymor"]);
        assert_eq!(tree.namespace_paths(), vec!["Dune", "Dune::Pymor"]);
    }
}
