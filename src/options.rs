//! Per-run configuration.
//!
//! An [`Options`] value is cheap to clone; the batch driver clones it for every
//! document so nothing set while processing one file leaks into the next.

use std::fmt;
use std::sync::Arc;

use crate::decode::{Decoder, JsonDecoder};
use crate::error::{Error, Result};
use crate::naming::{self, Renamer, TitleCase};

/// How JSON numbers are typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NumberPolicy {
    /// Every number is an `f64`.
    #[default]
    Float,
    /// Numbers keep their exact representation as `serde_json::Number`.
    Preserve,
}

#[derive(Clone, Default)]
pub struct Options {
    /// Module the generated types belong to. Required.
    pub package: String,
    /// Name of the top-level type. Required unless the driver derives it from a file name.
    pub type_name: Option<String>,
    pub numbers: NumberPolicy,
    /// Custom decoder; defaults to [`JsonDecoder`] configured from `numbers`.
    pub decoder: Option<Arc<dyn Decoder>>,
    /// Custom renamer; defaults to [`TitleCase`].
    pub renamer: Option<Arc<dyn Renamer>>,
}

impl Options {
    pub fn new(package: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_numbers(mut self, numbers: NumberPolicy) -> Self {
        self.numbers = numbers;
        self
    }

    pub fn with_decoder(mut self, decoder: impl Decoder + 'static) -> Self {
        self.decoder = Some(Arc::new(decoder));
        self
    }

    pub fn with_renamer(mut self, renamer: impl Renamer + 'static) -> Self {
        self.renamer = Some(Arc::new(renamer));
        self
    }

    pub fn decoder(&self) -> Arc<dyn Decoder> {
        match &self.decoder {
            Some(decoder) => Arc::clone(decoder),
            None => Arc::new(JsonDecoder::new(self.numbers)),
        }
    }

    pub fn renamer(&self) -> Arc<dyn Renamer> {
        match &self.renamer {
            Some(renamer) => Arc::clone(renamer),
            None => Arc::new(TitleCase),
        }
    }

    /// Checks the required settings and returns the root type name.
    pub fn validate(&self) -> Result<&str> {
        if self.package.trim().is_empty() {
            return Err(Error::config("missing package name"));
        }
        if !naming::is_plain_ident(&self.package) {
            return Err(Error::config(format!(
                "package name `{}` is not a valid Rust identifier",
                self.package
            )));
        }
        match self.type_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(Error::config("missing type name")),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("package", &self.package)
            .field("type_name", &self.type_name)
            .field("numbers", &self.numbers)
            .field("decoder", &self.decoder.as_ref().map(|_| "custom"))
            .field("renamer", &self.renamer.as_ref().map(|_| "custom"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NameContext;

    #[test]
    fn validate_requires_package_and_type() {
        let err = Options::default().validate().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let err = Options::default().with_package("api").validate().unwrap_err();
        assert!(err.to_string().contains("missing type name"));

        let err = Options::new("", "Root").validate().unwrap_err();
        assert!(err.to_string().contains("missing package name"));

        assert_eq!(Options::new("api", "Balance").validate().unwrap(), "Balance");
    }

    #[test]
    fn validate_rejects_unusable_package() {
        let err = Options::new("my api", "Root").validate().unwrap_err();
        assert!(err.to_string().contains("not a valid Rust identifier"));
        assert!(Options::new("type", "Root").validate().is_err());
    }

    #[test]
    fn defaults_fill_in_renamer() {
        let opts = Options::new("api", "Root");
        assert_eq!(opts.renamer().rename("cross_liab", NameContext::Object), "CrossLiab");

        let opts = opts.with_renamer(|raw: &str, _: NameContext| raw.to_uppercase());
        assert_eq!(opts.renamer().rename("abc", NameContext::Root), "ABC");
    }

    #[test]
    fn clones_do_not_share_type_name() {
        let shared = Options::new("api", "First");
        let mut copy = shared.clone();
        copy.type_name = None;
        assert_eq!(shared.type_name.as_deref(), Some("First"));
    }
}
