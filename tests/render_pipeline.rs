use cardsheet::{
    DrawOp, LayoutError, PdfSurface, RasterSurface, RecordingSurface, Style, SurfaceError,
    parse_spec, render_spec,
};
use pretty_assertions::assert_eq;

fn trace(input: &str) -> Vec<DrawOp> {
    let style = Style::default();
    let spec = parse_spec(input, &style).expect("spec parses");
    render_spec(&spec, &style, RecordingSurface::new()).expect("render succeeds")
}

fn close(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6
}

fn text_ops(ops: &[DrawOp]) -> Vec<&DrawOp> {
    ops.iter()
        .filter(|op| matches!(op, DrawOp::Text { .. }))
        .collect()
}

fn text_x(input: &str) -> f64 {
    let ops = trace(input);
    match text_ops(&ops)[0] {
        DrawOp::Text { origin, .. } => origin.0,
        _ => unreachable!(),
    }
}

#[test]
fn card_corner_lands_half_a_card_from_the_anchor() {
    let ops = trace("layout,poker_9\nrects,\"(0, 0, 1, 1)\"\n1\n");
    let rect = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Rect { rect, transform } => Some((*rect, *transform)),
            _ => None,
        })
        .expect("rect drawn");
    assert_eq!((rect.0.width, rect.0.height), (180.0, 252.0));
    // Anchor (1.75in, 9in) minus half of 2.5in x 3.5in.
    assert!(close(rect.1.apply((0.0, 0.0)), (36.0, 522.0)));
    assert!(close(rect.1.apply((180.0, 252.0)), (216.0, 774.0)));
}

#[test]
fn bottom_left_text_sits_on_the_origin() {
    let ops = trace("layout,poker_9\ntext,\"(0.5, 0.5, 0, 10)\"\n1,Hello\n");
    let texts = text_ops(&ops);
    assert_eq!(texts.len(), 1);
    match texts[0] {
        DrawOp::Text {
            text,
            origin,
            width,
            transform,
            ..
        } => {
            assert_eq!(text, "Hello");
            assert!(close(*origin, (90.0, 126.0)));
            assert!((width - 22.78).abs() < 1e-9);
            assert!(close(transform.apply(*origin), (126.0, 648.0)));
        }
        _ => unreachable!(),
    }
}

#[test]
fn horizontal_alignment_moves_line_edges() {
    let left = text_x("layout,poker_9\ntext,\"(0.5, 0.5, 0, 10, 'left')\"\n1,Hello\n");
    let center = text_x("layout,poker_9\ntext,\"(0.5, 0.5, 0, 10, 'center')\"\n1,Hello\n");
    let right = text_x("layout,poker_9\ntext,\"(0.5, 0.5, 0, 10, 'right')\"\n1,Hello\n");
    assert!((left - 90.0).abs() < 1e-9);
    assert!((center - (90.0 - 11.39)).abs() < 1e-9);
    assert!((right - (90.0 - 22.78)).abs() < 1e-9);
}

#[test]
fn right_alignment_uses_the_selected_font_metrics() {
    let times =
        text_x("layout,poker_9\ntext,\"(0.5, 0.5, 0, 10, 'right', 10, 'Times-Roman')\"\n1,Hello\n");
    let bold = text_x(
        "layout,poker_9\ntext,\"(0.5, 0.5, 0, 10, 'right', 10, 'Helvetica-Bold')\"\n1,Hello\n",
    );
    assert!((times - (90.0 - 22.22)).abs() < 1e-9);
    // Helvetica-Bold: 722 + 556 + 278 + 278 + 611 units.
    assert!((bold - (90.0 - 24.45)).abs() < 1e-9);
}

#[test]
fn vertical_alignment_stacks_lines_downward() {
    let ops = trace("layout,poker_9\ntext,\"(0.5, 0.5, 0, 5, 'top')\"\n1,one two three\n");
    let baselines: Vec<f64> = text_ops(&ops)
        .into_iter()
        .map(|op| match op {
            DrawOp::Text { origin, .. } => origin.1,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(baselines, vec![116.0, 106.0, 96.0]);

    let ops = trace("layout,poker_9\ntext,\"(0.5, 0.5, 0, 5, 'middle')\"\n1,one two\n");
    match text_ops(&ops)[..] {
        [DrawOp::Text { origin: first, .. }, DrawOp::Text { origin: second, .. }] => {
            assert!((first.1 - 126.0).abs() < 1e-9);
            assert!((second.1 - 116.0).abs() < 1e-9);
        }
        _ => panic!("expected two lines"),
    }
}

#[test]
fn blank_paragraphs_reserve_a_line() {
    let ops = trace("layout,poker_9\ntext,\"(0.5, 0.5, 0, 20, 'top')\"\n1,\"above\n\nbelow\"\n");
    let texts: Vec<(String, f64)> = text_ops(&ops)
        .into_iter()
        .map(|op| match op {
            DrawOp::Text { text, origin, .. } => (text.clone(), origin.1),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(
        texts,
        vec![("above".to_string(), 116.0), ("below".to_string(), 96.0)]
    );
}

#[test]
fn section_rotation_ignores_card_rotation() {
    let ops = trace(
        "layout,poker_l\nrects,\"(0, 0, 1, 1)\"\ntext,\"(0, 0, 0, 10)\",\"(0, 0, 90, 10)\"\n1,flat,turned\n",
    );
    let rect_transform = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Rect { transform, .. } => Some(*transform),
            _ => None,
        })
        .expect("rect drawn");
    // The card follows the anchor's 90 degree turn.
    assert!(close(rect_transform.apply((0.0, 0.0)), (216.0, 522.0)));

    let texts = text_ops(&ops);
    assert_eq!(texts.len(), 2);
    let flat = texts[0].transform().expect("text has transform");
    let turned = texts[1].transform().expect("text has transform");
    // Rotation 0 keeps the section upright despite the card being turned.
    assert!(close(flat.apply((0.0, 0.0)), (0.0, 558.0)));
    assert!(close(flat.apply((1.0, 0.0)), (1.0, 558.0)));
    assert!(close(turned.apply((0.0, 0.0)), (216.0, 522.0)));
}

#[test]
fn sheets_fill_in_order_and_leave_trailing_slots_blank() {
    let ops = trace("layout,poker_9\ntext,\"(0.5, 0.5, 0, 10)\"\n10,x\n");
    let pages = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::NewPage { .. }))
        .count();
    assert_eq!(pages, 2);
    let second_page: Vec<&DrawOp> = ops
        .iter()
        .skip_while(|op| !matches!(op, DrawOp::EndPage))
        .skip(1)
        .filter(|op| matches!(op, DrawOp::Text { .. }))
        .collect();
    assert_eq!(second_page.len(), 1);
    assert!(close(
        second_page[0].transform().unwrap().apply((90.0, 126.0)),
        (126.0, 648.0)
    ));
}

#[test]
fn empty_deck_renders_no_pages() {
    let ops = trace("layout,jumbo\n");
    assert!(ops.is_empty());
}

#[test]
fn background_is_clipped_to_the_card() {
    let ops = trace("layout,poker_9\nbg_image,front.png,\"(-9, -9, 1.1, 1.1)\"\n1\n");
    match &ops[1] {
        DrawOp::Image {
            image_ref,
            rect,
            clip,
            ..
        } => {
            assert_eq!(image_ref, "front.png");
            assert_eq!((rect.x, rect.y), (-9.0, -9.0));
            assert!((rect.width - 198.0).abs() < 1e-9);
            let clip = clip.expect("clip set");
            assert_eq!((clip.width, clip.height), (180.0, 252.0));
        }
        other => panic!("expected background first, got {other:?}"),
    }
}

#[test]
fn missing_background_names_the_card() {
    let dir = tempfile::tempdir().unwrap();
    let style = Style::default();
    let spec = parse_spec(
        "layout,poker_9\n1\nbg_image,missing.png\n1\n",
        &style,
    )
    .unwrap();
    let err = render_spec(&spec, &style, PdfSurface::new(dir.path())).unwrap_err();
    match err {
        LayoutError::MissingResource {
            card,
            element,
            source: SurfaceError::MissingImage { reference, .. },
        } => {
            assert_eq!(card, 1);
            assert_eq!(element, "background");
            assert_eq!(reference, "missing.png");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unknown_font_is_a_missing_resource() {
    let style = Style::default();
    let spec = parse_spec(
        "layout,poker_9\ntext,\"(0.5, 0.5, 0, 10, 'left', 10, 'Wingdings')\"\n1,hi\n",
        &style,
    )
    .unwrap();
    let err = render_spec(&spec, &style, RecordingSurface::new()).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::MissingResource {
            card: 0,
            source: SurfaceError::MissingFont(_),
            ..
        }
    ));
}

#[test]
fn pdf_output_embeds_background_art() {
    let dir = tempfile::tempdir().unwrap();
    image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 30, 30, 255]))
        .save(dir.path().join("front.png"))
        .unwrap();
    let style = Style::default();
    let spec = parse_spec(
        "layout,poker_9\nbg_image,front.png\ntext,\"(0.5, 0.5, 0, 10)\"\n11,Card\n",
        &style,
    )
    .unwrap();
    let bytes = render_spec(&spec, &style, PdfSurface::new(dir.path())).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.len() > 500);
}

#[test]
fn raster_output_writes_one_png_per_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let style = Style::default();
    let spec = parse_spec(
        "layout,poker_9\nrects,\"(0.05, 0.05, 0.9, 0.9)\"\ntext,\"(0.5, 0.5, 0, 10)\"\n10,Card\n",
        &style,
    )
    .unwrap();
    let document = render_spec(&spec, &style, RasterSurface::new(dir.path(), 36)).unwrap();
    assert_eq!(document.pages.len(), 2);
    assert_eq!(document.pages[0].dimensions(), (306, 396));

    let written = document.save_pages(&dir.path().join("deck.png")).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|path| path.exists()));
}
