//! Drawing-call dumps (`cardsheet trace ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use cardsheet::{RecordingSurface, render_spec};
use clap::Args;

use crate::cli::common::SpecArgs;
use crate::cli::utils::{load_inputs, write_output};

/// Args for `cardsheet trace`.
#[derive(Args, Debug)]
pub struct TraceArgs {
    #[command(flatten)]
    pub input: SpecArgs,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Render onto a recording surface and write the ops as pretty JSON.
pub fn handle(args: TraceArgs) -> Result<()> {
    let (style, spec) = load_inputs(&args.input)?;
    let ops = render_spec(&spec, &style, RecordingSurface::new())
        .with_context(|| format!("failed to trace {}", args.input.spec.display()))?;
    let mut json = serde_json::to_string_pretty(&ops)?;
    json.push('\n');
    let target = args.output.unwrap_or_else(|| PathBuf::from("-"));
    write_output(&target, json.as_bytes())
}
