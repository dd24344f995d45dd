//! [`TypeNode`] tree → Rust source.
//!
//! Output layout: a module doc header, the serde imports, then one
//! `#[derive(Serialize, Deserialize)]` struct per node, children before parents.
//! Every field carries `#[serde(rename = "...")]` with its original JSON key.
//! The assembled text is parsed with `syn` and re-printed with `prettyplease`;
//! text that does not parse is reported as [`Error::Format`].

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt::Write;

use crate::error::{Error, Result};
use crate::ir::TypeNode;
use crate::naming::Renamer;
use crate::options::NumberPolicy;

/// Names the emitted source refers to; a generated type may not shadow them.
const PRELUDE_NAMES: &[&str] = &["Serialize", "Deserialize", "String", "Vec", "Option"];

pub struct Codegen<'a> {
    package: &'a str,
    numbers: NumberPolicy,
    renamer: &'a dyn Renamer,
    out: String,
}

impl<'a> Codegen<'a> {
    pub fn new(package: &'a str, numbers: NumberPolicy, renamer: &'a dyn Renamer) -> Self {
        Self { package, numbers, renamer, out: String::new() }
    }

    /// Appends the header and every declaration of `root`.
    pub fn emit(&mut self, root: &TypeNode) -> Result<()> {
        let field_names = self.check_names(root)?;
        self.emit_header()?;
        for (node, idents) in root.post_order().into_iter().zip(field_names) {
            self.emit_struct(node, &idents)?;
        }
        Ok(())
    }

    /// Unformatted source.
    pub fn into_string(self) -> String {
        self.out
    }

    /// Formatted source. Fails if the text is not valid Rust.
    pub fn finish(self) -> Result<String> {
        format_source(self.into_string())
    }

    fn emit_header(&mut self) -> Result<()> {
        let out = &mut self.out;
        writeln!(out, "//! Types for the `{}` module, inferred from a sample JSON document.", self.package)?;
        writeln!(out)?;
        writeln!(out, "use serde::{{Deserialize, Serialize}};")?;
        if self.numbers == NumberPolicy::Preserve {
            writeln!(out, "#[allow(unused_imports)]")?;
            writeln!(out, "use serde_json::Number;")?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn emit_struct(&mut self, node: &TypeNode, idents: &[String]) -> Result<()> {
        let out = &mut self.out;
        writeln!(out, "#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]")?;
        writeln!(out, "pub struct {} {{", node.name)?;
        for ((key, ty), ident) in node.fields.iter().zip(idents) {
            writeln!(out, "    #[serde(rename = {key:?})]")?;
            writeln!(out, "    pub {ident}: {ty},")?;
        }
        writeln!(out, "}}")?;
        writeln!(out)?;
        Ok(())
    }

    /// Rejects duplicate type names and duplicate field identifiers. Returns the
    /// field identifiers of every node, in post order.
    fn check_names(&self, root: &TypeNode) -> Result<Vec<Vec<String>>> {
        let mut reserved: Vec<&str> = PRELUDE_NAMES.to_vec();
        if self.numbers == NumberPolicy::Preserve {
            reserved.push("Number");
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut all_idents = Vec::new();
        for node in root.post_order() {
            if reserved.contains(&node.name.as_str()) {
                return Err(Error::NameCollision {
                    name: node.name.clone(),
                    detail: "shadows a type the generated code uses".to_string(),
                });
            }
            if !seen.insert(&node.name) {
                return Err(Error::NameCollision {
                    name: node.name.clone(),
                    detail: "two nested objects map to the same type name".to_string(),
                });
            }

            let mut by_ident: HashMap<String, &str> = HashMap::new();
            let mut idents = Vec::with_capacity(node.fields.len());
            for key in node.fields.keys() {
                let ident = self.renamer.field_name(key);
                if let Some(other) = by_ident.insert(ident.clone(), key) {
                    return Err(Error::NameCollision {
                        name: format!("{}::{ident}", node.name),
                        detail: format!("keys {other:?} and {key:?} map to the same field"),
                    });
                }
                idents.push(ident);
            }
            all_idents.push(idents);
        }
        Ok(all_idents)
    }
}

/// Parses `raw` as a Rust file and pretty-prints it.
pub fn format_source(raw: String) -> Result<String> {
    match syn::parse_file(&raw) {
        Ok(file) => Ok(prettyplease::unparse(&file)),
        Err(source) => Err(Error::Format { source, raw }),
    }
}

/// Renders and formats `root` in one go.
pub fn render(
    root: &TypeNode,
    package: &str,
    numbers: NumberPolicy,
    renamer: &dyn Renamer,
) -> Result<String> {
    let mut cg = Codegen::new(package, numbers, renamer);
    cg.emit(root)?;
    cg.finish()
}
