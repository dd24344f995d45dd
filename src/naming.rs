//! Identifier derivation for generated Rust.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `cross_liab` | [`TitleCase`] | `CrossLiab` |
//! | `availBal` | [`field_ident`] | `avail_bal` |
//! | `type` | [`field_ident`] | `r#type` |
//! | `my-file.v2` | [`normalize_name`] | `myfilev2` |
//!
//! Type names go through a [`Renamer`], which callers may replace. Field
//! identifiers always go through [`field_ident`] unless the renamer overrides
//! [`Renamer::field_name`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Where a name is being derived. Lets a renamer treat array element types
/// differently from plain nested objects (e.g. singularize `items` → `Item`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameContext {
    /// The top-level type of a document.
    Root,
    /// A field whose value is an object.
    Object,
    /// The element type of an array field.
    ArrayElement,
}

/// Maps raw JSON names to Rust identifiers.
///
/// Must be deterministic: a type name is computed once and then referenced from
/// both the parent's field and the child's own declaration.
pub trait Renamer: Send + Sync {
    /// Type name for `raw` in the given context.
    fn rename(&self, raw: &str, ctx: NameContext) -> String;

    /// Field identifier for the JSON key `key`.
    fn field_name(&self, key: &str) -> String {
        field_ident(key)
    }
}

impl<F> Renamer for F
where
    F: Fn(&str, NameContext) -> String + Send + Sync,
{
    fn rename(&self, raw: &str, ctx: NameContext) -> String {
        self(raw, ctx)
    }
}

// ------------------------------- TitleCase -------------------------------- //

static WORD_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// Default renamer: split on anything that is not an ASCII letter or digit,
/// upper-case single-letter words, capitalize longer ones, concatenate.
///
/// `u_time` → `UTime`, `cross_liab` → `CrossLiab`, `availBal` → `AvailBal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleCase;

impl Renamer for TitleCase {
    fn rename(&self, raw: &str, _ctx: NameContext) -> String {
        title_case(raw)
    }
}

pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in WORD_SEPARATORS.split(raw).filter(|w| !w.is_empty()) {
        if word.len() == 1 {
            out.push_str(&word.to_ascii_uppercase());
        } else {
            let (head, tail) = word.split_at(1);
            out.push_str(&head.to_ascii_uppercase());
            out.push_str(tail);
        }
    }
    if out.is_empty() {
        return "Unnamed".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, "Type");
    }
    if out == "Self" {
        out.push('_');
    }
    out
}

// ------------------------------ Singularize ------------------------------- //

/// Strips an English plural from array element names before delegating.
#[derive(Debug, Clone, Copy, Default)]
pub struct Singularize<R>(pub R);

impl<R: Renamer> Renamer for Singularize<R> {
    fn rename(&self, raw: &str, ctx: NameContext) -> String {
        match ctx {
            NameContext::ArrayElement => self.0.rename(&singular(raw), ctx),
            _ => self.0.rename(raw, ctx),
        }
    }

    fn field_name(&self, key: &str) -> String {
        self.0.field_name(key)
    }
}

/// Words that end like a plural but have no distinct singular.
const INVARIANT_PLURALS: &[&str] = &["series", "species", "news", "means", "analytics", "statistics"];

/// Rough English heuristic: `ies` → `y`, `ses`/`xes` → drop `es`, otherwise a
/// trailing `s`. Words ending in `ss`, `us` or `is` and the few invariant
/// plurals above are left alone.
fn singular(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    let unchanged = INVARIANT_PLURALS.iter().any(|w| lower.ends_with(w))
        || ["ss", "us", "is"].iter().any(|suffix| lower.ends_with(suffix));
    if unchanged {
        raw.to_string()
    } else if lower.len() > 3 && lower.ends_with("ies") {
        format!("{}y", &raw[..raw.len() - 3])
    } else if lower.len() > 3 && (lower.ends_with("ses") || lower.ends_with("xes")) {
        raw[..raw.len() - 2].to_string()
    } else if lower.len() > 1 && lower.ends_with('s') && !lower.ends_with("ss") {
        raw[..raw.len() - 1].to_string()
    } else {
        raw.to_string()
    }
}

// --------------------------------- Fields --------------------------------- //

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NOT_RAW: &[&str] = &["self", "Self", "super", "crate"];

/// snake_case field identifier for a JSON key.
///
/// Word boundaries are separators, lower→upper transitions and the last
/// capital of an acronym (`HTTPServer` → `http_server`). Non-ASCII characters
/// are dropped.
pub fn field_ident(key: &str) -> String {
    let words = split_words(key);
    let mut ident = words.join("_");
    if ident.is_empty() {
        return "field".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if NOT_RAW.contains(&ident.as_str()) {
        ident.push('_');
    } else if KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}

fn split_words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Keeps ASCII letters, digits and `_`. Used for names taken from file paths.
pub fn normalize_name(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_').collect()
}

/// True when `name` is usable as a plain (non-raw) Rust identifier.
pub fn is_plain_ident(name: &str) -> bool {
    let mut chars = name.chars();
    let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    head_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
        && !KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_follows_fragment_rules() {
        assert_eq!(title_case("cross_liab"), "CrossLiab");
        assert_eq!(title_case("u_time"), "UTime");
        assert_eq!(title_case("availBal"), "AvailBal");
        assert_eq!(title_case("a"), "A");
        assert_eq!(title_case("kebab-case.name"), "KebabCaseName");
    }

    #[test]
    fn title_case_drops_empty_fragments() {
        assert_eq!(title_case("foo__bar"), "FooBar");
        assert_eq!(title_case("_leading"), "Leading");
        assert_eq!(title_case("trailing_"), "Trailing");
    }

    #[test]
    fn title_case_always_yields_an_identifier() {
        assert_eq!(title_case(""), "Unnamed");
        assert_eq!(title_case("---"), "Unnamed");
        assert_eq!(title_case("2fa"), "Type2fa");
        assert_eq!(title_case("self"), "Self_");
        assert_eq!(title_case("café_menu"), "CafMenu");
        for raw in ["", "x", "9lives", "self", "αβγ", "a b c"] {
            assert!(is_plain_ident(&title_case(raw)), "{raw:?}");
        }
    }

    #[test]
    fn default_renamer_ignores_context() {
        assert_eq!(TitleCase.rename("items", NameContext::ArrayElement), "Items");
        assert_eq!(TitleCase.rename("items", NameContext::Object), "Items");
    }

    #[test]
    fn singularize_only_touches_array_elements() {
        let renamer = Singularize(TitleCase);
        assert_eq!(renamer.rename("items", NameContext::ArrayElement), "Item");
        assert_eq!(renamer.rename("categories", NameContext::ArrayElement), "Category");
        assert_eq!(renamer.rename("boxes", NameContext::ArrayElement), "Box");
        assert_eq!(renamer.rename("address", NameContext::ArrayElement), "Address");
        assert_eq!(renamer.rename("items", NameContext::Object), "Items");
    }

    #[test]
    fn singularize_leaves_invariant_words_alone() {
        let renamer = Singularize(TitleCase);
        assert_eq!(renamer.rename("series", NameContext::ArrayElement), "Series");
        assert_eq!(renamer.rename("tvSeries", NameContext::ArrayElement), "TvSeries");
        assert_eq!(renamer.rename("news", NameContext::ArrayElement), "News");
        assert_eq!(renamer.rename("status", NameContext::ArrayElement), "Status");
        assert_eq!(renamer.rename("analysis", NameContext::ArrayElement), "Analysis");
        assert_eq!(renamer.rename("trade_fills", NameContext::ArrayElement), "TradeFill");
    }

    #[test]
    fn closures_are_renamers() {
        let renamer = |raw: &str, ctx: NameContext| match ctx {
            NameContext::ArrayElement => format!("{}Elem", title_case(raw)),
            _ => title_case(raw),
        };
        assert_eq!(renamer.rename("legs", NameContext::ArrayElement), "LegsElem");
        assert_eq!(renamer.field_name("legCount"), "leg_count");
    }

    #[test]
    fn field_ident_snake_cases_keys() {
        assert_eq!(field_ident("availEq"), "avail_eq");
        assert_eq!(field_ident("cross_liab"), "cross_liab");
        assert_eq!(field_ident("uTime"), "u_time");
        assert_eq!(field_ident("HTTPServer"), "http_server");
        assert_eq!(field_ident("userID"), "user_id");
        assert_eq!(field_ident("kebab-key"), "kebab_key");
        assert_eq!(field_ident("v2Name"), "v2_name");
    }

    #[test]
    fn field_ident_escapes_keywords_and_odd_keys() {
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("gen"), "r#gen");
        assert_eq!(field_ident("self"), "self_");
        assert_eq!(field_ident("Self"), "self_");
        assert_eq!(field_ident("2fa"), "_2fa");
        assert_eq!(field_ident(""), "field");
        assert_eq!(field_ident("$$"), "field");
    }

    #[test]
    fn normalize_name_keeps_ascii_word_chars() {
        assert_eq!(normalize_name("balance"), "balance");
        assert_eq!(normalize_name("my-file.v2"), "myfilev2");
        assert_eq!(normalize_name("api_ü"), "api_");
    }
}
