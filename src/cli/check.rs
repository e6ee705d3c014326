//! Spec validation (`cardsheet check ...`).

use anyhow::Result;
use clap::Args;

use crate::cli::common::SpecArgs;
use crate::cli::utils::load_inputs;

/// Args for `cardsheet check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: SpecArgs,
    /// Also list each card's section text.
    #[arg(long)]
    pub verbose: bool,
}

/// Parse a spec file and summarise the deck without rendering.
pub fn handle(args: CheckArgs) -> Result<()> {
    let (_, spec) = load_inputs(&args.input)?;
    println!("Spec: {}", args.input.spec.display());
    println!(
        "Layout: {} ({} per sheet)",
        spec.layout.name,
        spec.layout.cards_per_sheet()
    );
    println!("Cards: {}", spec.cards.len());
    println!("Sheets: {}", spec.sheet_count());

    if args.verbose {
        for (idx, card) in spec.cards.iter().enumerate() {
            let background = card
                .background
                .as_ref()
                .map(|bg| bg.image_ref.as_str())
                .unwrap_or("-");
            println!(
                "{:>4}: {:.0}x{:.0}pt bg={} sections={}",
                idx + 1,
                card.dimension.0,
                card.dimension.1,
                background,
                card.sections.len()
            );
            for section in &card.sections {
                println!("        {}", section.lines.join(" / "));
            }
        }
    }
    Ok(())
}
