//! Class-hierarchy queries behind an injected trait.
//!
//! The matching engine never walks a class registry itself. The three rule
//! table rows that need hierarchy knowledge (iterable, callable, subtype)
//! resolve through a [`TypeResolver`], so the engine stays a pure function of
//! its explicit inputs and tests can supply a fake hierarchy.
//!
//! Every query must be synchronous and side-effect free; the recursive
//! matcher cannot suspend mid-traversal. Hosts with an asynchronous registry
//! should pre-resolve into a [`ClassGraph`] before matching.

use rustc_hash::{FxHashMap, FxHashSet};

/// Subtype oracle consulted by the covariance engine.
pub trait TypeResolver {
    /// True if `sub` is a strict transitive subtype of `sup`. Identity is
    /// handled by the engine and must not be reported here.
    fn is_subclass_of(&self, sub: &str, sup: &str) -> bool;

    /// True if the class satisfies the host's invocable protocol: it is the
    /// host closure class, extends it, or exposes an invocable-call method.
    fn is_invokable(&self, class: &str) -> bool;

    /// True if the class is, or transitively implements, the host's
    /// traversable capability.
    fn is_traversable(&self, class: &str) -> bool;
}

/// Resolver for hosts with no class registry: every query answers false.
///
/// Class identifiers still match each other by name identity; only
/// hierarchy-dependent rules are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl TypeResolver for NoopResolver {
    fn is_subclass_of(&self, _sub: &str, _sup: &str) -> bool {
        false
    }

    fn is_invokable(&self, _class: &str) -> bool {
        false
    }

    fn is_traversable(&self, _class: &str) -> bool {
        false
    }
}

/// In-memory class/interface registry with transitive lookup.
///
/// Classes are registered with their direct supertypes (base class and
/// implemented interfaces are not distinguished; both are edges). Invocable
/// and traversable capabilities are marks that propagate to subclasses, so
/// marking the host's closure class makes everything extending it invokable.
#[derive(Debug, Clone, Default)]
pub struct ClassGraph {
    parents: FxHashMap<String, Vec<String>>,
    invokable: FxHashSet<String>,
    traversable: FxHashSet<String>,
}

impl ClassGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class or interface with its direct supertypes.
    ///
    /// Parents do not need to be defined first; dangling edges simply never
    /// match. Redefining a name replaces its parent list.
    pub fn define(&mut self, name: &str, parents: &[&str]) {
        self.parents.insert(
            name.to_string(),
            parents.iter().map(|p| p.to_string()).collect(),
        );
    }

    /// Marks a class as satisfying the invocable protocol.
    pub fn mark_invokable(&mut self, name: &str) {
        self.invokable.insert(name.to_string());
    }

    /// Marks a class or interface as the traversable capability (or an
    /// implementation of it).
    pub fn mark_traversable(&mut self, name: &str) {
        self.traversable.insert(name.to_string());
    }

    /// Depth-first walk over the supertype edges of `name`, excluding `name`
    /// itself. The graph is expected to be acyclic; a cycle terminates via
    /// the visited set rather than looping.
    fn any_ancestor(&self, name: &str, pred: &dyn Fn(&str) -> bool) -> bool {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut stack: Vec<&str> = match self.parents.get(name) {
            Some(direct) => direct.iter().map(String::as_str).collect(),
            None => return false,
        };

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if pred(current) {
                return true;
            }
            if let Some(direct) = self.parents.get(current) {
                stack.extend(direct.iter().map(String::as_str));
            }
        }

        false
    }

    fn self_or_ancestor(&self, name: &str, pred: &dyn Fn(&str) -> bool) -> bool {
        pred(name) || self.any_ancestor(name, pred)
    }
}

impl TypeResolver for ClassGraph {
    fn is_subclass_of(&self, sub: &str, sup: &str) -> bool {
        self.any_ancestor(sub, &|ancestor| ancestor == sup)
    }

    fn is_invokable(&self, class: &str) -> bool {
        self.self_or_ancestor(class, &|name| self.invokable.contains(name))
    }

    fn is_traversable(&self, class: &str) -> bool {
        self.self_or_ancestor(class, &|name| self.traversable.contains(name))
    }
}
