//! Convenience helpers shared across command handlers.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardsheet::{ParsedSpec, SpecParser, Style};

use crate::cli::common::SpecArgs;

/// Load the style named on the command line, or the defaults.
pub fn load_style(path: Option<&Path>) -> Result<Style> {
    match path {
        Some(path) => Style::load(path),
        None => Ok(Style::default()),
    }
}

/// Parse a spec file, attaching path context to any error.
pub fn load_spec(path: &Path, style: &Style) -> Result<ParsedSpec> {
    let file =
        File::open(path).with_context(|| format!("failed to open spec {}", path.display()))?;
    SpecParser::new(style)
        .parse_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse spec {}", path.display()))
}

/// Resolve style and spec together.
pub fn load_inputs(args: &SpecArgs) -> Result<(Style, ParsedSpec)> {
    let style = load_style(args.style.as_deref())?;
    let spec = load_spec(&args.spec, &style)?;
    Ok((style, spec))
}

/// Directory that relative image references in a spec are resolved against.
pub fn asset_root(spec: &Path) -> PathBuf {
    match spec.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Persist bytes either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content)?;
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
