//! CLI: JSON sample(s) → Rust model file(s)
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::decode::JsonDecoder;
use crate::driver::{self, OnError};
use crate::naming::{Singularize, TitleCase};
use crate::options::{NumberPolicy, Options};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate serde-ready Rust structs from sample JSON documents
#[derive(Parser, Debug)]
#[command(name = "json2struct", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// convert a single JSON file
    File(FileOut),
    /// convert every *.json under a directory, mirroring its layout
    Dir(DirOut),
}

#[derive(Args, Debug, Clone)]
struct GenerateSettings {
    /// module name written into the header (default: output directory name)
    #[arg(long)]
    package: Option<String>,

    /// top-level type name (default: file name)
    #[arg(long)]
    type_name: Option<String>,

    /// type numbers as serde_json::Number instead of f64
    #[arg(long, default_value_t = false)]
    preserve_numbers: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0)
    #[arg(long)]
    json_pointer: Option<String>,

    /// singularize array field names for element types (items → Item)
    #[arg(long, default_value_t = false)]
    singularize: bool,
}

#[derive(clap::Parser, Debug)]
struct FileOut {
    #[command(flatten)]
    settings: GenerateSettings,

    /// input .json file
    #[arg(long, short)]
    input: PathBuf,

    /// output .rs file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct DirOut {
    #[command(flatten)]
    settings: GenerateSettings,

    /// directory searched recursively for *.json
    #[arg(long, short)]
    input: PathBuf,

    /// directory receiving the .rs files
    #[arg(short, long)]
    out: PathBuf,

    /// report failing files and continue instead of stopping at the first one
    #[arg(long, default_value_t = false)]
    keep_going: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl GenerateSettings {
    fn to_options(&self) -> Options {
        let numbers = if self.preserve_numbers { NumberPolicy::Preserve } else { NumberPolicy::Float };
        let mut options = Options::default().with_numbers(numbers);
        if let Some(package) = &self.package {
            options = options.with_package(package.clone());
        }
        if let Some(type_name) = &self.type_name {
            options = options.with_type_name(type_name.clone());
        }
        if let Some(pointer) = &self.json_pointer {
            options = options.with_decoder(JsonDecoder::new(numbers).with_pointer(pointer.clone()));
        }
        if self.singularize {
            options = options.with_renamer(Singularize(TitleCase));
        }
        options
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::File(target) => {
                let options = target.settings.to_options();
                match target.out.as_ref() {
                    Some(out) => {
                        driver::generate_file(&target.input, out, &options).with_context(|| {
                            format!("failed to convert {}", target.input.display())
                        })?;
                    }
                    None => {
                        // names are derived as if writing next to the input
                        let options = driver::resolve_names(&target.input.with_extension("rs"), &options)?;
                        let json = std::fs::read(&target.input)
                            .with_context(|| format!("failed to read {}", target.input.display()))?;
                        let src = crate::generate_to_string(&json, &options)?;
                        print!("{src}");
                    }
                }
            }
            Command::Dir(target) => {
                let on_error = if target.keep_going { OnError::Continue } else { OnError::Abort };
                let options = target.settings.to_options();
                let report = driver::generate_dir(&target.input, &target.out, &options, on_error)
                    .with_context(|| format!("failed to convert {}", target.input.display()))?;
                info!(generated = report.generated.len(), failed = report.failed.len(), "done");
                if let Some((path, err)) = report.failed.first() {
                    anyhow::bail!(
                        "{} of {} files failed; first: {}: {err}",
                        report.failed.len(),
                        report.failed.len() + report.generated.len(),
                        path.display()
                    );
                }
            }
        }
        Ok(())
    }
}
