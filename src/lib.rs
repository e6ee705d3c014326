//! Core library for laying out prototype cards on printable sheets.

mod card;
mod error;
pub mod geometry;
mod layouts;
mod literal;
pub mod render;
mod section;
mod spec;
mod style;
mod wrap;

pub use card::{Background, Card, OverlayLine, OverlayRect};
pub use error::{LayoutError, LiteralError, SurfaceError};
pub use layouts::{Anchor, INCH, LETTER, LayoutPreset, LayoutRegistry};
pub use literal::Literal;
pub use render::{
    DrawOp, PdfSurface, RasterDocument, RasterSurface, RecordingSurface, Renderer, Sheet, Slot,
    Surface, paginate,
};
pub use section::{Alignment, HAlign, Section, SectionTemplate, VAlign};
pub use spec::{MAX_COPIES, ParsedSpec, SpecParser, SpecRow, parse_spec};
pub use style::{BLACK, Rgb, Style};
pub use wrap::wrap;

/// Render a parsed spec onto `surface` and return the finalized output.
pub fn render_spec<S: Surface>(
    spec: &ParsedSpec,
    style: &Style,
    surface: S,
) -> Result<S::Output, LayoutError> {
    Renderer::new(style).render(&spec.cards, spec.layout, surface)
}
