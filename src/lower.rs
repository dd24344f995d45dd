//! Decoded JSON object → [`TypeNode`] tree.
//!
//! Every nested object becomes its own child node, named by the [`Renamer`]
//! from the key it was found under. Identical shapes under different keys (or
//! the same key under different parents) are *not* merged; each occurrence gets
//! an independent node. Codegen reports the resulting duplicate names.

use serde_json::{Map, Value};
use tracing::debug;

use crate::inference::{Class, ScalarKind, classify};
use crate::ir::{TypeNode, TypeRef};
use crate::naming::{NameContext, Renamer};
use crate::options::NumberPolicy;

pub struct TreeBuilder<'a> {
    numbers: NumberPolicy,
    renamer: &'a dyn Renamer,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(numbers: NumberPolicy, renamer: &'a dyn Renamer) -> Self {
        Self { numbers, renamer }
    }

    /// Builds the root node; `raw_name` goes through the renamer as [`NameContext::Root`].
    pub fn build_root(&self, raw_name: &str, object: &Map<String, Value>) -> TypeNode {
        let name = self.renamer.rename(raw_name, NameContext::Root);
        self.build(name, object)
    }

    /// Builds a node named exactly `name`.
    pub fn build(&self, name: String, object: &Map<String, Value>) -> TypeNode {
        let mut node = TypeNode::new(name);
        for (key, value) in object {
            let ty = self.describe(key, value, NameContext::Object, &mut node.children);
            node.fields.insert(key.clone(), ty);
        }
        debug!(type_name = %node.name, fields = node.fields.len(), children = node.children.len(), "inferred type");
        node
    }

    /// Type for `value` found under `key`. Object types discovered here are
    /// pushed onto `children` of the node being built.
    fn describe(
        &self,
        key: &str,
        value: &Value,
        ctx: NameContext,
        children: &mut Vec<TypeNode>,
    ) -> TypeRef {
        match classify(value, self.numbers) {
            Class::Scalar(kind) => TypeRef::Scalar(kind),
            Class::Object(map) => {
                let child = self.build(self.renamer.rename(key, ctx), map);
                let ty = TypeRef::Named(child.name.clone());
                children.push(child);
                ty
            }
            Class::Array { first } => {
                TypeRef::list(self.describe(key, first, NameContext::ArrayElement, children))
            }
            Class::EmptyArray => TypeRef::list(TypeRef::Scalar(ScalarKind::Unknown)),
        }
    }
}

/// [`TreeBuilder::build_root`] with a throwaway builder.
pub fn build_tree(
    raw_name: &str,
    object: &Map<String, Value>,
    numbers: NumberPolicy,
    renamer: &dyn Renamer,
) -> TypeNode {
    TreeBuilder::new(numbers, renamer).build_root(raw_name, object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{Singularize, TitleCase};
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    fn scalar(kind: ScalarKind) -> TypeRef {
        TypeRef::Scalar(kind)
    }

    fn named(name: &str) -> TypeRef {
        TypeRef::Named(name.to_string())
    }

    #[test]
    fn mixed_document_float_policy() {
        let doc = obj(json!({"a": true, "b": {"c": 1}, "d": [{"e": "x"}], "f": []}));
        let root = build_tree("root", &doc, NumberPolicy::Float, &TitleCase);

        assert_eq!(root.name, "Root");
        assert_eq!(root.fields["a"], scalar(ScalarKind::Bool));
        assert_eq!(root.fields["b"], named("B"));
        assert_eq!(root.fields["d"], TypeRef::list(named("D")));
        assert_eq!(root.fields["f"], TypeRef::list(scalar(ScalarKind::Unknown)));

        let b = root.find("B").unwrap();
        assert_eq!(b.fields["c"], scalar(ScalarKind::Float));
        let d = root.find("D").unwrap();
        assert_eq!(d.fields["e"], scalar(ScalarKind::Text));
    }

    #[test]
    fn mixed_document_preserve_policy() {
        let doc = obj(json!({"a": true, "b": {"c": 1}, "d": [{"e": "x"}], "f": []}));
        let root = build_tree("root", &doc, NumberPolicy::Preserve, &TitleCase);
        assert_eq!(root.find("B").unwrap().fields["c"], scalar(ScalarKind::PreservedNumber));
    }

    #[test]
    fn fields_keep_document_order() {
        let doc = obj(json!({"zeta": 1, "alpha": 2, "mid": {"y": 1, "x": 2}}));
        let root = build_tree("r", &doc, NumberPolicy::Float, &TitleCase);
        let keys: Vec<&str> = root.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        let mid: Vec<&str> = root.children[0].fields.keys().map(String::as_str).collect();
        assert_eq!(mid, ["y", "x"]);
    }

    #[test]
    fn array_type_comes_from_first_element_only() {
        let doc = obj(json!({"xs": ["a", 1, true], "ys": [1, "a"], "zs": [null, 1]}));
        let root = build_tree("r", &doc, NumberPolicy::Float, &TitleCase);
        assert_eq!(root.fields["xs"], TypeRef::list(scalar(ScalarKind::Text)));
        assert_eq!(root.fields["ys"], TypeRef::list(scalar(ScalarKind::Float)));
        assert_eq!(root.fields["zs"], TypeRef::list(scalar(ScalarKind::Unknown)));
    }

    #[test]
    fn nested_arrays_of_objects() {
        let doc = obj(json!({"grid": [[{"v": 1}]], "empty": [[]]}));
        let root = build_tree("r", &doc, NumberPolicy::Float, &TitleCase);
        assert_eq!(root.fields["grid"], TypeRef::list(TypeRef::list(named("Grid"))));
        assert_eq!(
            root.fields["empty"],
            TypeRef::list(TypeRef::list(scalar(ScalarKind::Unknown)))
        );
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn children_are_owned_by_the_discovering_node() {
        let doc = obj(json!({"legs": [{"venue": {"code": "X"}}], "meta": {}}));
        let root = build_tree("order", &doc, NumberPolicy::Float, &TitleCase);
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Legs", "Meta"]);
        assert_eq!(root.children[0].children[0].name, "Venue");
        assert!(root.find("Meta").unwrap().fields.is_empty());
    }

    #[test]
    fn array_elements_are_named_with_the_element_context() {
        let doc = obj(json!({"items": [{"id": 1}], "owner": {"id": 2}}));
        let root = build_tree("r", &doc, NumberPolicy::Float, &Singularize(TitleCase));
        assert_eq!(root.fields["items"], TypeRef::list(named("Item")));
        assert_eq!(root.fields["owner"], named("Owner"));
    }

    #[test]
    fn repeated_shapes_are_not_merged() {
        let doc = obj(json!({"a": {"meta": {"v": 1}}, "b": {"meta": {"v": 1}}}));
        let root = build_tree("r", &doc, NumberPolicy::Float, &TitleCase);
        let metas = root.post_order().into_iter().filter(|n| n.name == "Meta").count();
        assert_eq!(metas, 2);
    }

    #[test]
    fn every_key_at_every_depth_is_a_field() {
        let doc = json!({"a": {"b": {"c": [{"d": null, "e": {"f": "x"}}]}}, "g": 1});
        let root = build_tree("r", &obj(doc.clone()), NumberPolicy::Float, &TitleCase);

        fn count_keys(v: &Value) -> usize {
            match v {
                Value::Object(m) => m.len() + m.values().map(count_keys).sum::<usize>(),
                Value::Array(xs) => xs.first().map_or(0, count_keys),
                _ => 0,
            }
        }
        let fields: usize = root.post_order().iter().map(|n| n.fields.len()).sum();
        assert_eq!(fields, count_keys(&doc));
    }
}
