use serde::Serialize;

use super::Surface;
use super::metrics::StandardFont;
use crate::error::SurfaceError;
use crate::geometry::{Affine, Rect};
use crate::style::Rgb;

/// One recorded drawing call together with the transform active at the time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    NewPage {
        size: (f64, f64),
    },
    EndPage,
    Image {
        image_ref: String,
        rect: Rect,
        clip: Option<Rect>,
        transform: Affine,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        transform: Affine,
    },
    Rect {
        rect: Rect,
        transform: Affine,
    },
    Text {
        text: String,
        origin: (f64, f64),
        width: f64,
        font: String,
        size: f64,
        color: Rgb,
        transform: Affine,
    },
}

impl DrawOp {
    /// The transform the op was drawn under, if it draws anything.
    pub fn transform(&self) -> Option<&Affine> {
        match self {
            DrawOp::Image { transform, .. }
            | DrawOp::Line { transform, .. }
            | DrawOp::Rect { transform, .. }
            | DrawOp::Text { transform, .. } => Some(transform),
            DrawOp::NewPage { .. } | DrawOp::EndPage => None,
        }
    }
}

/// Surface that records calls instead of drawing them.
///
/// Text is measured with the standard PDF font metrics so recorded
/// layouts match what [`PdfSurface`](super::PdfSurface) would produce.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    ctm: Affine,
    stack: Vec<Affine>,
    page_open: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    type Output = Vec<DrawOp>;

    fn new_page(&mut self, size: (f64, f64)) -> Result<(), SurfaceError> {
        if self.page_open {
            return Err(SurfaceError::Backend(
                "new_page called while a page is open".to_string(),
            ));
        }
        self.page_open = true;
        self.ctm = Affine::IDENTITY;
        self.stack.clear();
        self.ops.push(DrawOp::NewPage { size });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), SurfaceError> {
        if !self.page_open {
            return Err(SurfaceError::Backend(
                "end_page without an open page".to_string(),
            ));
        }
        self.page_open = false;
        self.ops.push(DrawOp::EndPage);
        Ok(())
    }

    fn save_state(&mut self) {
        self.stack.push(self.ctm);
    }

    fn restore_state(&mut self) {
        if let Some(ctm) = self.stack.pop() {
            self.ctm = ctm;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.ctm = self.ctm.translate(x, y);
    }

    fn rotate(&mut self, degrees: f64) {
        self.ctm = self.ctm.rotate(degrees);
    }

    fn set_stroke(&mut self, _color: Rgb, _width: f64) {}

    fn draw_image(
        &mut self,
        image_ref: &str,
        rect: Rect,
        clip: Option<Rect>,
    ) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Image {
            image_ref: image_ref.to_string(),
            rect,
            clip,
            transform: self.ctm,
        });
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push(DrawOp::Line {
            from: (x1, y1),
            to: (x2, y2),
            transform: self.ctm,
        });
    }

    fn draw_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Rect {
            rect,
            transform: self.ctm,
        });
    }

    fn measure_text_width(&self, text: &str, font: &str, size: f64) -> Result<f64, SurfaceError> {
        Ok(StandardFont::resolve(font)?.text_width(text, size))
    }

    fn draw_text_line(
        &mut self,
        text: &str,
        origin: (f64, f64),
        font: &str,
        size: f64,
        color: Rgb,
    ) -> Result<(), SurfaceError> {
        let width = self.measure_text_width(text, font, size)?;
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            width,
            font: font.to_string(),
            size,
            color,
            transform: self.ctm,
        });
        Ok(())
    }

    fn finalize(self) -> Result<Vec<DrawOp>, SurfaceError> {
        Ok(self.ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_transform_with_each_op() {
        let mut surface = RecordingSurface::new();
        surface.new_page((10.0, 10.0)).unwrap();
        surface.save_state();
        surface.translate(2.0, 3.0);
        surface.draw_line(0.0, 0.0, 1.0, 0.0);
        surface.restore_state();
        surface.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        surface.end_page().unwrap();
        let ops = surface.finalize().unwrap();
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[1].transform().unwrap().apply((0.0, 0.0)), (2.0, 3.0));
        assert_eq!(ops[2].transform(), Some(&Affine::IDENTITY));
    }

    #[test]
    fn ops_serialize_with_tags() {
        let json = serde_json::to_string(&DrawOp::EndPage).unwrap();
        assert_eq!(json, r#"{"op":"end_page"}"#);
    }
}
