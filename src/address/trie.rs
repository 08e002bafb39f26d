//! Pattern trie.
//!
//! Each node has any number of literal edges and at most one variable edge.
//! Every pattern sharing a prefix must agree on the variable (name and
//! converter) at each position, which is what makes a single variable edge
//! per node sufficient.

use std::fmt;

use rustc_hash::FxHashMap;

use super::resource::Lookup;
use crate::core::{Converters, Step, Value, join_path};

pub(super) struct Node<T> {
    /// Canonical pattern text of the path leading to this node.
    pub path: String,
    pub literals: FxHashMap<String, Node<T>>,
    pub variable: Option<Box<VariableEdge<T>>>,
    pub lookup: Option<Lookup<T>>,
}

pub(super) struct VariableEdge<T> {
    pub name: String,
    pub converter: Option<String>,
    pub node: Node<T>,
}

impl<T> VariableEdge<T> {
    pub fn step(&self) -> Step {
        Step::Variable {
            name: self.name.clone(),
            converter: self.converter.clone(),
        }
    }

    /// Whether `step` describes exactly this edge.
    pub fn matches(&self, name: &str, converter: Option<&str>) -> bool {
        self.name == name && self.converter.as_deref() == converter
    }
}

impl<T> Node<T> {
    pub fn root() -> Self {
        Self::with_path(String::new())
    }

    fn with_path(path: String) -> Self {
        Self {
            path,
            literals: FxHashMap::default(),
            variable: None,
            lookup: None,
        }
    }

    fn child_path(&self, step: &Step) -> String {
        if self.path.is_empty() {
            step.to_string()
        } else {
            join_path(&[self.path.clone(), step.to_string()])
        }
    }

    /// Follow the edge described by a pattern step.
    pub fn child(&self, step: &Step) -> Option<&Self> {
        match step {
            Step::Literal(text) => self.literals.get(text),
            Step::Variable { name, converter } => self
                .variable
                .as_deref()
                .filter(|edge| edge.matches(name, converter.as_deref()))
                .map(|edge| &edge.node),
        }
    }

    /// Follow a sequence of pattern steps from this node.
    pub fn find(&self, steps: &[Step]) -> Option<&Self> {
        steps.iter().try_fold(self, |node, step| node.child(step))
    }

    /// Follow or create the edge for `step`.
    ///
    /// Callers must have checked the step against the existing variable edge;
    /// a mismatching variable edge is never replaced.
    fn child_or_insert(&mut self, step: &Step) -> &mut Self {
        let path = self.child_path(step);
        match step {
            Step::Literal(text) => self
                .literals
                .entry(text.clone())
                .or_insert_with(|| Self::with_path(path)),
            Step::Variable { name, converter } => {
                let edge = self.variable.get_or_insert_with(|| {
                    Box::new(VariableEdge {
                        name: name.clone(),
                        converter: converter.clone(),
                        node: Self::with_path(path),
                    })
                });
                &mut edge.node
            }
        }
    }

    /// Create every node along `steps` and return the last one.
    pub fn insert(&mut self, steps: &[Step]) -> &mut Self {
        let mut node = self;
        for step in steps {
            node = node.child_or_insert(step);
        }
        node
    }

    /// Match one concrete path segment.
    ///
    /// Literal edges win over the variable edge. Returns the next node and,
    /// for a variable edge, the binding produced by its converter. `None` if
    /// nothing matches or the converter rejects the segment.
    pub fn step(
        &self,
        segment: &str,
        converters: &Converters,
    ) -> Option<(&Self, Option<(&str, Value)>)> {
        if let Some(child) = self.literals.get(segment) {
            return Some((child, None));
        }

        let edge = self.variable.as_deref()?;
        let value = converters.apply(edge.converter.as_deref(), segment)?;
        Some((&edge.node, Some((edge.name.as_str(), value))))
    }

    /// Visit this node and all descendants, literals in sorted order first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);

        let mut literals: Vec<_> = self.literals.iter().collect();
        literals.sort_unstable_by(|a, b| a.0.cmp(b.0));
        for (_, child) in literals {
            child.walk(visit);
        }
        if let Some(edge) = &self.variable {
            edge.node.walk(visit);
        }
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("path", &self.path)
            .field("literals", &self.literals.keys().collect::<Vec<_>>())
            .field(
                "variable",
                &self.variable.as_ref().map(|edge| edge.step().to_string()),
            )
            .field("lookup", &self.lookup.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_pattern;

    #[test]
    fn test_insert_and_find() {
        let mut root: Node<()> = Node::root();
        let steps = parse_pattern("a/$b:int/c").unwrap();
        root.insert(&steps);

        let node = root.find(&steps).unwrap();
        assert_eq!(node.path, "a/$b:int/c");
        assert_eq!(root.find(&steps[..1]).unwrap().path, "a");

        // Same name, different converter is a different edge.
        let other = parse_pattern("a/$b/c").unwrap();
        assert!(root.find(&other).is_none());
    }

    #[test]
    fn test_step_prefers_literal() {
        let mut root: Node<()> = Node::root();
        root.insert(&parse_pattern("departments/$id").unwrap());
        root.insert(&parse_pattern("departments/special").unwrap());
        let converters = Converters::new();

        let departments = root.literals.get("departments").unwrap();
        let (node, binding) = departments.step("special", &converters).unwrap();
        assert_eq!(node.path, "departments/special");
        assert!(binding.is_none());

        let (node, binding) = departments.step("4", &converters).unwrap();
        assert_eq!(node.path, "departments/$id");
        assert_eq!(binding, Some(("id", Value::from("4"))));
    }

    #[test]
    fn test_step_converter_rejects() {
        let mut root: Node<()> = Node::root();
        root.insert(&parse_pattern("a/$v:int").unwrap());
        let converters = Converters::new();

        let a = root.literals.get("a").unwrap();
        assert!(a.step("x", &converters).is_none());
        let (_, binding) = a.step("7", &converters).unwrap();
        assert_eq!(binding, Some(("v", Value::Int(7))));
    }

    #[test]
    fn test_walk_order() {
        let mut root: Node<()> = Node::root();
        root.insert(&parse_pattern("b/$x").unwrap());
        root.insert(&parse_pattern("a").unwrap());

        let mut paths = Vec::new();
        root.walk(&mut |node| paths.push(node.path.clone()));
        assert_eq!(paths, ["", "a", "b", "b/$x"]);
    }
}
