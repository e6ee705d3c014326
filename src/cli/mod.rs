//! Command-line interface wiring for the `cardsheet` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod check;
pub mod common;
pub mod layouts;
pub mod render;
pub mod trace;
pub mod utils;

/// Parsed CLI entrypoint for the `cardsheet` binary.
#[derive(Parser, Debug)]
#[command(
    name = "cardsheet",
    version,
    about = "Lay out prototype cards on print-ready sheets"
)]
pub struct Cli {
    /// Log parser and renderer decisions.
    #[arg(long, global = true)]
    pub debug: bool,
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a spec to a PDF or PNG sheets.
    Render(render::RenderArgs),
    /// Parse a spec and report what it would produce.
    Check(check::CheckArgs),
    /// Inspect the built-in layout presets.
    #[command(subcommand)]
    Layouts(layouts::LayoutsCommand),
    /// Dump the drawing calls a spec produces as JSON.
    Trace(trace::TraceArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(args) => render::handle(args),
        Command::Check(args) => check::handle(args),
        Command::Layouts(cmd) => layouts::handle(cmd),
        Command::Trace(args) => trace::handle(args),
    }
}
