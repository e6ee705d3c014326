//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

/// Document formats the `render` command can produce.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    /// Vector PDF, one page per sheet.
    Pdf,
    /// Numbered PNG files, one per sheet.
    Png,
}

impl OutputFormatArg {
    /// Guess the format from an output path's extension, defaulting to PDF.
    pub fn infer(path: &std::path::Path) -> Self {
        let is_png = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("png"))
            .unwrap_or(false);
        if is_png { Self::Png } else { Self::Pdf }
    }
}

/// Spec input shared by every command that reads one.
#[derive(Args, Debug)]
pub struct SpecArgs {
    /// Card spec file (comma-separated rows).
    #[arg(short = 's', long = "spec")]
    pub spec: PathBuf,
    /// JSON style file overriding default fonts, colors and strokes.
    #[arg(long)]
    pub style: Option<PathBuf>,
}
