use crate::literal::Literal;
use crate::section::Section;

/// Background image placed inside a card's bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    /// Opaque reference resolved by the drawing surface (usually a path).
    pub image_ref: String,
    /// Offset from the card's bottom-left corner, in points.
    pub offset: (f64, f64),
    /// Multipliers applied to the card dimension.
    pub scale: (f64, f64),
}

impl Background {
    pub fn new<S: Into<String>>(image_ref: S) -> Self {
        Self {
            image_ref: image_ref.into(),
            offset: (0.0, 0.0),
            scale: (1.0, 1.0),
        }
    }

    /// Apply an `(offset_x, offset_y, scale_x, scale_y)` placement tuple.
    pub fn with_placement(mut self, placement: &Literal) -> Result<Self, String> {
        let [ox, oy, sx, sy] = placement.as_numbers::<4>().ok_or_else(|| {
            format!("background placement must be (offset_x, offset_y, scale_x, scale_y), got {placement}")
        })?;
        self.offset = (ox, oy);
        self.scale = (sx, sy);
        Ok(self)
    }

    /// Drawn size of the image for a card of dimension `card_dim`.
    pub fn size(&self, card_dim: (f64, f64)) -> (f64, f64) {
        (card_dim.0 * self.scale.0, card_dim.1 * self.scale.1)
    }
}

/// Overlay line `(x1, y1, x2, y2)` in card-normalized fractions.
pub type OverlayLine = [f64; 4];
/// Overlay rectangle `(x, y, width, height)` in card-normalized fractions.
pub type OverlayRect = [f64; 4];

/// One printable card. Cards are plain values: they own snapshots of the
/// background and overlays that were active when they were built.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub dimension: (f64, f64),
    pub background: Option<Background>,
    pub overlay_lines: Vec<OverlayLine>,
    pub overlay_rects: Vec<OverlayRect>,
    pub sections: Vec<Section>,
}

impl Card {
    /// Scale a normalized 4-tuple against the card, pairing x with width
    /// and y with height.
    pub fn to_absolute(&self, fractions: &[f64; 4]) -> [f64; 4] {
        let (w, h) = self.dimension;
        [
            fractions[0] * w,
            fractions[1] * h,
            fractions[2] * w,
            fractions[3] * h,
        ]
    }

    /// Absolute text origin of a section within this card.
    pub fn section_origin(&self, section: &Section) -> (f64, f64) {
        (
            section.position.0 * self.dimension.0,
            section.position.1 * self.dimension.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card {
            dimension: (180.0, 252.0),
            background: None,
            overlay_lines: vec![],
            overlay_rects: vec![],
            sections: vec![],
        }
    }

    #[test]
    fn fractions_scale_per_axis() {
        assert_eq!(card().to_absolute(&[0.5, 0.5, 1.0, 0.25]), [90.0, 126.0, 180.0, 63.0]);
    }

    #[test]
    fn placement_overrides_defaults() {
        let bg = Background::new("art/back.png")
            .with_placement(&Literal::parse("(-9, -9, 1.1, 1.1)").unwrap())
            .unwrap();
        assert_eq!(bg.offset, (-9.0, -9.0));
        let (w, h) = bg.size((100.0, 200.0));
        assert!((w - 110.0).abs() < 1e-9 && (h - 220.0).abs() < 1e-9);
    }

    #[test]
    fn placement_needs_four_numbers() {
        let err = Background::new("x.png")
            .with_placement(&Literal::parse("(1, 2)").unwrap())
            .unwrap_err();
        assert!(err.contains("offset_x"));
    }
}
