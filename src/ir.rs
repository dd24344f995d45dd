// Type tree handed from the builder to codegen. No serde_json::Value here.

use std::fmt;

use indexmap::IndexMap;

use crate::inference::ScalarKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Scalar(ScalarKind),
    /// A child [`TypeNode`] by name.
    Named(String),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn list(item: TypeRef) -> Self {
        Self::List(Box::new(item))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.rust_type()),
            Self::Named(name) => f.write_str(name),
            Self::List(item) => write!(f, "Vec<{item}>"),
        }
    }
}

/// One inferred struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub name: String,
    /// Original JSON key → type, in document order.
    pub fields: IndexMap<String, TypeRef>,
    /// Nested types discovered while building this node, owned exclusively.
    pub children: Vec<TypeNode>,
}

impl TypeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: IndexMap::new(), children: Vec::new() }
    }

    /// Children before parents, depth first. This is declaration order.
    pub fn post_order(&self) -> Vec<&TypeNode> {
        let mut out = Vec::new();
        self.collect_post_order(&mut out);
        out
    }

    fn collect_post_order<'a>(&'a self, out: &mut Vec<&'a TypeNode>) {
        for child in &self.children {
            child.collect_post_order(out);
        }
        out.push(self);
    }

    pub fn find(&self, name: &str) -> Option<&TypeNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, children: Vec<TypeNode>) -> TypeNode {
        TypeNode { children, ..TypeNode::new(name) }
    }

    #[test]
    fn display_is_rust_syntax() {
        let t = TypeRef::list(TypeRef::list(TypeRef::Named("Leg".into())));
        assert_eq!(t.to_string(), "Vec<Vec<Leg>>");
        assert_eq!(TypeRef::list(TypeRef::Scalar(ScalarKind::Unknown)).to_string(), "Vec<serde_json::Value>");
    }

    #[test]
    fn post_order_puts_children_first() {
        let tree = node("Root", vec![node("A", vec![node("A1", vec![])]), node("B", vec![])]);
        let names: Vec<&str> = tree.post_order().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["A1", "A", "B", "Root"]);
        assert!(tree.find("A1").is_some());
        assert!(tree.find("C").is_none());
    }
}
