//! Layout discovery commands (`cardsheet layouts ...`).

use anyhow::Result;
use cardsheet::{INCH, LayoutRegistry};
use clap::{Args, Subcommand};

/// Layout subcommands.
#[derive(Subcommand, Debug)]
pub enum LayoutsCommand {
    /// List all known layout presets.
    List,
    /// Show the anchors of one preset.
    Show(LayoutShowArgs),
}

/// Arguments for `cardsheet layouts show`.
#[derive(Args, Debug)]
pub struct LayoutShowArgs {
    /// Preset name to display.
    pub name: String,
}

/// Execute a layouts command.
pub fn handle(command: LayoutsCommand) -> Result<()> {
    match command {
        LayoutsCommand::List => list(),
        LayoutsCommand::Show(args) => show(args),
    }
}

fn list() -> Result<()> {
    println!("Available layouts:");
    for preset in LayoutRegistry::list() {
        println!(
            "  - {} ({} per sheet): {}",
            preset.name,
            preset.cards_per_sheet(),
            preset.description
        );
    }
    Ok(())
}

fn show(args: LayoutShowArgs) -> Result<()> {
    let preset = LayoutRegistry::lookup(&args.name)?;
    println!("Layout: {}", preset.name);
    println!("{}", preset.description);
    println!(
        "Page: {:.2}in x {:.2}in, card: {:.2}in x {:.2}in",
        preset.page_size.0 / INCH,
        preset.page_size.1 / INCH,
        preset.card_dim.0 / INCH,
        preset.card_dim.1 / INCH
    );
    for (idx, anchor) in preset.anchors.iter().enumerate() {
        println!(
            "  {:>2}: ({:.3}in, {:.3}in) rot {}",
            idx + 1,
            anchor.center.0 / INCH,
            anchor.center.1 / INCH,
            anchor.rotation
        );
    }
    Ok(())
}
