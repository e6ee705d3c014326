//! Rendering commands (`cardsheet render ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use cardsheet::{PdfSurface, RasterSurface, render_spec};
use clap::Args;
use log::info;

use crate::cli::common::{OutputFormatArg, SpecArgs};
use crate::cli::utils::{asset_root, load_inputs, write_output};

/// Args for `cardsheet render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: SpecArgs,
    /// Output file. PNG output writes one numbered file per sheet.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Output format; inferred from the output extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormatArg>,
    /// Dots per inch used when rasterising.
    #[arg(long, default_value_t = 150)]
    pub dpi: u32,
}

/// Execute a render command.
pub fn handle(args: RenderArgs) -> Result<()> {
    let (style, spec) = load_inputs(&args.input)?;
    let root = asset_root(&args.input.spec);
    let format = args
        .format
        .unwrap_or_else(|| OutputFormatArg::infer(&args.output));
    info!(
        "rendering {} cards on {} {} sheets",
        spec.cards.len(),
        spec.sheet_count(),
        spec.layout.name
    );

    match format {
        OutputFormatArg::Pdf => {
            let title = args
                .input
                .spec
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "cards".to_string());
            let surface = PdfSurface::new(root).with_title(title);
            let bytes = render_spec(&spec, &style, surface)
                .with_context(|| format!("failed to render {}", args.input.spec.display()))?;
            write_output(&args.output, &bytes)?;
            println!(
                "Wrote {} sheet(s) to {}",
                spec.sheet_count(),
                args.output.display()
            );
        }
        OutputFormatArg::Png => {
            let surface = RasterSurface::new(root, args.dpi);
            let document = render_spec(&spec, &style, surface)
                .with_context(|| format!("failed to render {}", args.input.spec.display()))?;
            let written = document.save_pages(&args.output)?;
            for path in &written {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}
