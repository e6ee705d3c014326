use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, Timelike};
use log::{debug, warn};
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};

use super::Surface;
use super::metrics::StandardFont;
use crate::error::SurfaceError;
use crate::geometry::{Affine, Rect};
use crate::style::Rgb;

struct OpenPage {
    content: Content,
    size: (f64, f64),
}

struct EmbeddedImage {
    id: Ref,
    name: String,
}

/// Vector PDF output built with the standard Type1 fonts.
pub struct PdfSurface {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    page_tree_id: Ref,
    page_ids: Vec<Ref>,
    page: Option<OpenPage>,
    fonts: BTreeMap<StandardFont, (Ref, String)>,
    images: HashMap<String, EmbeddedImage>,
    asset_root: PathBuf,
    title: Option<String>,
}

impl PdfSurface {
    /// Create a surface resolving relative image references against `asset_root`.
    pub fn new<P: Into<PathBuf>>(asset_root: P) -> Self {
        Self {
            pdf: Pdf::new(),
            next_id: 3,
            catalog_id: Ref::new(1),
            page_tree_id: Ref::new(2),
            page_ids: Vec::new(),
            page: None,
            fonts: BTreeMap::new(),
            images: HashMap::new(),
            asset_root: asset_root.into(),
            title: None,
        }
    }

    /// Set the document title recorded in the PDF metadata.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn content(&mut self) -> Option<&mut Content> {
        match self.page.as_mut() {
            Some(page) => Some(&mut page.content),
            None => {
                warn!("drawing call outside of a page ignored");
                None
            }
        }
    }

    fn require_content(&mut self) -> Result<&mut Content, SurfaceError> {
        self.page
            .as_mut()
            .map(|page| &mut page.content)
            .ok_or_else(|| SurfaceError::Backend("no page is open".to_string()))
    }

    fn font_resource(&mut self, font: StandardFont) -> String {
        if let Some((_, name)) = self.fonts.get(&font) {
            return name.clone();
        }
        let id = self.alloc();
        let name = format!("F{}", self.fonts.len() + 1);
        self.pdf
            .type1_font(id)
            .base_font(Name(font.base_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        debug!("registered font {} as /{}", font.base_name(), name);
        self.fonts.insert(font, (id, name.clone()));
        name
    }

    fn image_resource(&mut self, image_ref: &str) -> Result<String, SurfaceError> {
        if let Some(image) = self.images.get(image_ref) {
            return Ok(image.name.clone());
        }
        let path = resolve_asset(&self.asset_root, image_ref);
        let decoded = image::open(&path).map_err(|err| SurfaceError::MissingImage {
            reference: image_ref.to_string(),
            detail: format!("{}: {err}", path.display()),
        })?;
        let rgba = decoded.to_rgba8();
        let (w, h) = (rgba.width() as i32, rgba.height() as i32);
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let smask_id = if has_alpha {
            let alpha: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&alpha, 6);
            let id = self.alloc();
            let mut mask = self.pdf.image_xobject(id, &compressed);
            mask.filter(Filter::FlateDecode);
            mask.width(w);
            mask.height(h);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
            Some(id)
        } else {
            None
        };

        let rgb: Vec<u8> = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&rgb, 6);
        let id = self.alloc();
        let mut xobject = self.pdf.image_xobject(id, &compressed);
        xobject.filter(Filter::FlateDecode);
        xobject.width(w);
        xobject.height(h);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        if let Some(mask) = smask_id {
            xobject.s_mask(mask);
        }
        drop(xobject);

        let name = format!("Im{}", self.images.len() + 1);
        debug!("embedded {} ({}x{}) as /{}", path.display(), w, h, name);
        self.images.insert(
            image_ref.to_string(),
            EmbeddedImage {
                id,
                name: name.clone(),
            },
        );
        Ok(name)
    }

    fn write_page(&mut self, page: OpenPage) {
        let page_id = self.alloc();
        let content_id = self.alloc();
        let raw = page.content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        self.pdf
            .stream(content_id, &compressed)
            .filter(Filter::FlateDecode);

        let mut pdf_page = self.pdf.page(page_id);
        pdf_page
            .media_box(PdfRect::new(0.0, 0.0, page.size.0 as f32, page.size.1 as f32))
            .parent(self.page_tree_id)
            .contents(content_id);
        let mut resources = pdf_page.resources();
        {
            let mut fonts = resources.fonts();
            for (id, name) in self.fonts.values() {
                fonts.pair(Name(name.as_bytes()), *id);
            }
        }
        if !self.images.is_empty() {
            let mut xobjects = resources.x_objects();
            for image in self.images.values() {
                xobjects.pair(Name(image.name.as_bytes()), image.id);
            }
        }
        drop(resources);
        drop(pdf_page);
        self.page_ids.push(page_id);
    }
}

impl Surface for PdfSurface {
    type Output = Vec<u8>;

    fn new_page(&mut self, size: (f64, f64)) -> Result<(), SurfaceError> {
        if self.page.is_some() {
            return Err(SurfaceError::Backend(
                "new_page called while a page is open".to_string(),
            ));
        }
        self.page = Some(OpenPage {
            content: Content::new(),
            size,
        });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), SurfaceError> {
        let page = self
            .page
            .take()
            .ok_or_else(|| SurfaceError::Backend("end_page without an open page".to_string()))?;
        self.write_page(page);
        Ok(())
    }

    fn save_state(&mut self) {
        if let Some(content) = self.content() {
            content.save_state();
        }
    }

    fn restore_state(&mut self) {
        if let Some(content) = self.content() {
            content.restore_state();
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        if let Some(content) = self.content() {
            content.transform(Affine::translation(x, y).to_array());
        }
    }

    fn rotate(&mut self, degrees: f64) {
        if degrees == 0.0 {
            return;
        }
        if let Some(content) = self.content() {
            content.transform(Affine::rotation(degrees).to_array());
        }
    }

    fn set_stroke(&mut self, color: Rgb, width: f64) {
        if let Some(content) = self.content() {
            content
                .set_stroke_rgb(color[0] as f32, color[1] as f32, color[2] as f32)
                .set_line_width(width as f32);
        }
    }

    fn draw_image(
        &mut self,
        image_ref: &str,
        rect: Rect,
        clip: Option<Rect>,
    ) -> Result<(), SurfaceError> {
        let name = self.image_resource(image_ref)?;
        let content = self.require_content()?;
        content.save_state();
        if let Some(clip) = clip {
            content
                .rect(
                    clip.x as f32,
                    clip.y as f32,
                    clip.width as f32,
                    clip.height as f32,
                )
                .clip_nonzero()
                .end_path();
        }
        content
            .transform([
                rect.width as f32,
                0.0,
                0.0,
                rect.height as f32,
                rect.x as f32,
                rect.y as f32,
            ])
            .x_object(Name(name.as_bytes()))
            .restore_state();
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        if let Some(content) = self.content() {
            content
                .move_to(x1 as f32, y1 as f32)
                .line_to(x2 as f32, y2 as f32)
                .stroke();
        }
    }

    fn draw_rect(&mut self, rect: Rect) {
        if let Some(content) = self.content() {
            content
                .rect(
                    rect.x as f32,
                    rect.y as f32,
                    rect.width as f32,
                    rect.height as f32,
                )
                .stroke();
        }
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
        let font = StandardFont::resolve(font)?;
        let resource = self.font_resource(font);
        let encoded = win_ansi(text);
        let content = self.require_content()?;
        content
            .begin_text()
            .set_font(Name(resource.as_bytes()), size as f32)
            .set_fill_rgb(color[0] as f32, color[1] as f32, color[2] as f32)
            .next_line(origin.0 as f32, origin.1 as f32)
            .show(Str(&encoded))
            .end_text();
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<u8>, SurfaceError> {
        if let Some(page) = self.page.take() {
            warn!("closing a page left open at finalize");
            self.write_page(page);
        }
        let page_count = self.page_ids.len() as i32;
        self.pdf.catalog(self.catalog_id).pages(self.page_tree_id);
        self.pdf
            .pages(self.page_tree_id)
            .kids(self.page_ids.iter().copied())
            .count(page_count);

        let info_id = self.alloc();
        let now = Local::now();
        let created = Date::new(now.year().clamp(0, 9999) as u16)
            .month(now.month() as u8)
            .day(now.day() as u8)
            .hour(now.hour() as u8)
            .minute(now.minute() as u8)
            .second(now.second() as u8);
        let mut info = self.pdf.document_info(info_id);
        info.producer(TextStr("cardsheet")).creation_date(created);
        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        drop(info);

        debug!("finalized PDF with {} page(s)", page_count);
        Ok(self.pdf.finish())
    }
}

/// Resolve an image reference relative to the asset root unless absolute.
pub(crate) fn resolve_asset(root: &Path, reference: &str) -> PathBuf {
    let path = Path::new(reference);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Encode text for a WinAnsi Type1 font, substituting '?' for unmapped chars.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_ansi_maps_latin1_and_quotes() {
        assert_eq!(win_ansi("Né’s ✓"), vec![b'N', 0xe9, 0x92, b's', b' ', b'?']);
    }

    #[test]
    fn unknown_font_is_a_missing_resource() {
        let surface = PdfSurface::new(".");
        let err = surface.measure_text_width("x", "NoSuchFont", 10.0).unwrap_err();
        assert!(err.is_missing_resource());
    }

    #[test]
    fn missing_image_is_reported_with_reference() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PdfSurface::new(dir.path());
        surface.new_page((100.0, 100.0)).unwrap();
        match surface.draw_image("nope.png", Rect::new(0.0, 0.0, 10.0, 10.0), None) {
            Err(SurfaceError::MissingImage { reference, .. }) => assert_eq!(reference, "nope.png"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn writes_a_pdf_document() {
        let mut surface = PdfSurface::new(".").with_title("test");
        surface.new_page((200.0, 300.0)).unwrap();
        surface.draw_line(0.0, 0.0, 10.0, 10.0);
        surface
            .draw_text_line("Hi", (5.0, 5.0), "Helvetica", 10.0, [0.0, 0.0, 0.0])
            .unwrap();
        surface.end_page().unwrap();
        let bytes = surface.finalize().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica"));
        assert!(text.contains("/Count 1"));
    }
}
