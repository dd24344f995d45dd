//! Rust type declarations from a sample JSON document.
//!
//! ```text
//! bytes ─decode→ Map ─lower→ TypeNode tree ─codegen→ source ─syn/prettyplease→ formatted source
//! ```
//!
//! ```rust
//! use json2struct::{Options, NumberPolicy, generate_to_string};
//!
//! let src = generate_to_string(
//!     br#"{"id": 7, "owner": {"name": "x"}}"#,
//!     &Options::new("api", "Account").with_numbers(NumberPolicy::Preserve),
//! ).unwrap();
//! assert!(src.contains("pub struct Owner"));
//! assert!(src.contains("pub id: Number"));
//! ```

pub mod cli;
pub mod codegen;
pub mod decode;
pub mod driver;
pub mod error;
pub mod inference;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod options;

use std::io::Write;

use tracing::debug;

pub use decode::{Decoder, JsonDecoder};
pub use driver::{BatchReport, OnError, generate_dir, generate_file};
pub use error::{DecodeError, Error, Result};
pub use ir::{TypeNode, TypeRef};
pub use naming::{NameContext, Renamer, Singularize, TitleCase};
pub use options::{NumberPolicy, Options};

/// Decodes `json` and builds its type tree without rendering.
pub fn infer(json: &[u8], options: &Options) -> Result<TypeNode> {
    let type_name = options.validate()?;
    let object = options.decoder().decode(json)?;
    let renamer = options.renamer();
    Ok(lower::build_tree(type_name, &object, options.numbers, renamer.as_ref()))
}

/// Full pipeline into a string.
pub fn generate_to_string(json: &[u8], options: &Options) -> Result<String> {
    let root = infer(json, options)?;
    let renamer = options.renamer();
    let src = codegen::render(&root, &options.package, options.numbers, renamer.as_ref())?;
    debug!(type_name = %root.name, bytes = src.len(), "rendered");
    Ok(src)
}

/// Full pipeline into `writer`. Nothing is written unless generation succeeds.
pub fn generate<W: Write>(json: &[u8], writer: &mut W, options: &Options) -> Result<()> {
    let src = generate_to_string(json, options)?;
    writer
        .write_all(src.as_bytes())
        .map_err(|source| Error::io("write", "<output>", source))
}
