//! Regenerates every `testdata/*.json` fixture and compares it against the
//! checked-in model under `testdata/api/`. Pass `--bless` to overwrite the
//! models with the current generator output.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use json2struct::{NumberPolicy, Options, generate_to_string};

fn normalize(src: &str) -> Result<String> {
    Ok(prettyplease::unparse(&syn::parse_file(src)?))
}

fn check(json_path: &Path, golden_path: &Path, bless: bool) -> Result<bool> {
    let stem = json_path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("fixture without a UTF-8 file name")?;
    let json = std::fs::read(json_path).with_context(|| format!("read {}", json_path.display()))?;
    let options = Options::new("api", stem).with_numbers(NumberPolicy::Preserve);
    let generated = generate_to_string(&json, &options)?;

    if bless {
        std::fs::write(golden_path, &generated)
            .with_context(|| format!("write {}", golden_path.display()))?;
        return Ok(true);
    }

    let golden = std::fs::read_to_string(golden_path)
        .with_context(|| format!("read {}", golden_path.display()))?;
    Ok(normalize(&generated)? == normalize(&golden)?)
}

fn main() -> Result<()> {
    let bless = std::env::args().any(|arg| arg == "--bless");
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../testdata");
    let pattern = format!("{}/*.json", glob::Pattern::escape(&root.to_string_lossy()));

    let mut failures = 0usize;
    for entry in glob::glob(&pattern)? {
        let json_path = entry?;
        let Some(stem) = json_path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let golden_path = root.join("api").join(format!("{stem}.rs"));
        match check(&json_path, &golden_path, bless) {
            Ok(true) if bless => println!("{} {stem}", "✍️ blessed".yellow()),
            Ok(true) => println!("{} {stem}", "✅".green()),
            Ok(false) => {
                failures += 1;
                println!("{} {stem}: output differs from {}", "❌".red(), golden_path.display());
            }
            Err(error) => {
                failures += 1;
                println!("{} {stem}: {error:#}", "❌".red());
            }
        }
    }

    if failures > 0 {
        eprintln!("{}", format!("{failures} fixture(s) failed").red().bold());
        std::process::exit(1);
    }
    Ok(())
}
