//! Pagination and the card drawing pipeline.
//!
//! The [`Renderer`] walks the deck sheet by sheet and drives any
//! [`Surface`] through the anchor → card → section transform chain.
//! Concrete surfaces live in the submodules.

mod metrics;
mod pdf;
mod raster;
mod recording;

pub use metrics::{FontFace, StandardFont};
pub use pdf::PdfSurface;
pub use raster::{RasterDocument, RasterSurface};
pub use recording::{DrawOp, RecordingSurface};

use log::debug;

use crate::card::Card;
use crate::error::{LayoutError, SurfaceError};
use crate::geometry::Rect;
use crate::layouts::{Anchor, LayoutPreset};
use crate::section::Section;
use crate::style::{Rgb, Style};

/// Drawing primitives the renderer needs from an output backend.
///
/// Coordinates are in points with the y axis pointing up. `translate`
/// and `rotate` modify the current transform the same way PDF `cm`
/// operators do; `save_state`/`restore_state` bracket them.
pub trait Surface {
    type Output;

    fn new_page(&mut self, size: (f64, f64)) -> Result<(), SurfaceError>;
    fn end_page(&mut self) -> Result<(), SurfaceError>;
    fn save_state(&mut self);
    fn restore_state(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, degrees: f64);
    fn set_stroke(&mut self, color: Rgb, width: f64);
    fn draw_image(
        &mut self,
        image_ref: &str,
        rect: Rect,
        clip: Option<Rect>,
    ) -> Result<(), SurfaceError>;
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn draw_rect(&mut self, rect: Rect);
    fn measure_text_width(&self, text: &str, font: &str, size: f64) -> Result<f64, SurfaceError>;
    fn draw_text_line(
        &mut self,
        text: &str,
        origin: (f64, f64),
        font: &str,
        size: f64,
        color: Rgb,
    ) -> Result<(), SurfaceError>;
    fn finalize(self) -> Result<Self::Output, SurfaceError>;
}

/// One card position on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub anchor: usize,
    pub card: usize,
}

/// The cards placed on one sheet, in anchor order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub index: usize,
    pub slots: Vec<Slot>,
}

/// Bucket `deck_len` cards onto sheets of `cards_per_sheet` anchors.
///
/// Card `i * cards_per_sheet + j` lands on sheet `i`, anchor `j`; the
/// final sheet may leave trailing anchors empty.
pub fn paginate(deck_len: usize, cards_per_sheet: usize) -> Vec<Sheet> {
    if cards_per_sheet == 0 {
        return Vec::new();
    }
    (0..deck_len.div_ceil(cards_per_sheet))
        .map(|index| {
            let first = index * cards_per_sheet;
            let slots = (0..cards_per_sheet)
                .map(|anchor| Slot {
                    anchor,
                    card: first + anchor,
                })
                .take_while(|slot| slot.card < deck_len)
                .collect();
            Sheet { index, slots }
        })
        .collect()
}

/// Draws a deck onto a surface using explicit style settings.
pub struct Renderer<'a> {
    style: &'a Style,
}

impl<'a> Renderer<'a> {
    pub fn new(style: &'a Style) -> Self {
        Self { style }
    }

    /// Render every sheet and finalize the surface.
    pub fn render<S: Surface>(
        &self,
        cards: &[Card],
        layout: &LayoutPreset,
        mut surface: S,
    ) -> Result<S::Output, LayoutError> {
        let sheets = paginate(cards.len(), layout.cards_per_sheet());
        debug!(
            "rendering {} card(s) on {} sheet(s) of {}",
            cards.len(),
            sheets.len(),
            layout.name
        );
        for sheet in &sheets {
            surface
                .new_page(layout.page_size)
                .map_err(LayoutError::Surface)?;
            surface.set_stroke(self.style.stroke_color, self.style.stroke_width);
            for slot in &sheet.slots {
                let anchor = &layout.anchors[slot.anchor];
                self.draw_card(&mut surface, &cards[slot.card], slot.card, anchor)?;
            }
            surface.end_page().map_err(LayoutError::Surface)?;
            debug!("sheet {} done ({} card(s))", sheet.index + 1, sheet.slots.len());
        }
        surface.finalize().map_err(LayoutError::Surface)
    }

    fn draw_card<S: Surface>(
        &self,
        surface: &mut S,
        card: &Card,
        card_index: usize,
        anchor: &Anchor,
    ) -> Result<(), LayoutError> {
        let (w, h) = card.dimension;

        surface.save_state();
        surface.translate(anchor.center.0, anchor.center.1);
        surface.rotate(anchor.rotation);
        surface.translate(-w / 2.0, -h / 2.0);
        let result = self.draw_card_body(surface, card, card_index);
        surface.restore_state();
        result?;

        for (idx, section) in card.sections.iter().enumerate() {
            surface.save_state();
            surface.translate(anchor.center.0, anchor.center.1);
            surface.rotate(section.rotation);
            surface.translate(-w / 2.0, -h / 2.0);
            let result = self.draw_section(surface, card, section);
            surface.restore_state();
            result.map_err(resource_error(card_index, format!("section {}", idx + 1)))?;
        }
        Ok(())
    }

    fn draw_card_body<S: Surface>(
        &self,
        surface: &mut S,
        card: &Card,
        card_index: usize,
    ) -> Result<(), LayoutError> {
        let (w, h) = card.dimension;
        if let Some(background) = &card.background {
            let (bw, bh) = background.size(card.dimension);
            let (ox, oy) = background.offset;
            surface
                .draw_image(
                    &background.image_ref,
                    Rect::new(ox, oy, bw, bh),
                    Some(Rect::new(0.0, 0.0, w, h)),
                )
                .map_err(resource_error(card_index, "background".to_string()))?;
        }
        for line in &card.overlay_lines {
            let [x1, y1, x2, y2] = card.to_absolute(line);
            surface.draw_line(x1, y1, x2, y2);
        }
        for rect in &card.overlay_rects {
            let [x, y, rw, rh] = card.to_absolute(rect);
            surface.draw_rect(Rect::new(x, y, rw, rh));
        }
        Ok(())
    }

    fn draw_section<S: Surface>(
        &self,
        surface: &mut S,
        card: &Card,
        section: &Section,
    ) -> Result<(), SurfaceError> {
        let (ox, oy) = card.section_origin(section);
        let leading = self.style.leading(section.font_size);
        let block_height = leading * section.lines.len() as f64;
        let top = oy + section.alignment.vertical_shift(block_height);

        for (idx, line) in section.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = top - (idx + 1) as f64 * leading;
            let width = surface.measure_text_width(line, &section.font_name, section.font_size)?;
            let x = ox - section.alignment.horizontal_shift(width);
            surface.draw_text_line(
                line,
                (x, baseline),
                &section.font_name,
                section.font_size,
                section.font_color,
            )?;
        }
        Ok(())
    }
}

fn resource_error(card: usize, element: String) -> impl FnOnce(SurfaceError) -> LayoutError {
    move |source| {
        if source.is_missing_resource() {
            LayoutError::MissingResource {
                card,
                element,
                source,
            }
        } else {
            LayoutError::Surface(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paginate_fills_sheets_in_order() {
        let sheets = paginate(11, 9);
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].slots.len(), 9);
        assert_eq!(
            sheets[1].slots,
            vec![Slot { anchor: 0, card: 9 }, Slot { anchor: 1, card: 10 }]
        );
    }

    #[test]
    fn paginate_counts_match_ceiling() {
        for per_sheet in 1..=20 {
            for deck in 0..=45 {
                let sheets = paginate(deck, per_sheet);
                assert_eq!(sheets.len(), deck.div_ceil(per_sheet));
                let placed: usize = sheets.iter().map(|s| s.slots.len()).sum();
                assert_eq!(placed, deck);
                if let Some(last) = sheets.last() {
                    let expected = match deck % per_sheet {
                        0 => per_sheet,
                        rem => rem,
                    };
                    assert_eq!(last.slots.len(), expected);
                }
            }
        }
    }

    #[test]
    fn empty_deck_has_no_sheets() {
        assert!(paginate(0, 9).is_empty());
    }
}
