//! Row-based spec parsing.
//!
//! A spec is a comma-separated file whose rows are either directives
//! (`layout`, `bg_image`, `no_bg_image`, `lines`, `rects`, `text`) or
//! copy-count rows that emit cards. Directives update parser state that
//! every later copy-count row snapshots into its cards.

use std::io::Read;

use log::{debug, info, warn};

use crate::card::{Background, Card, OverlayLine, OverlayRect};
use crate::error::LayoutError;
use crate::layouts::{LayoutPreset, LayoutRegistry};
use crate::literal::Literal;
use crate::section::{Section, SectionTemplate};
use crate::style::Style;

/// Largest copy count a single row may request.
pub const MAX_COPIES: usize = 10_000;

/// One input row: its 1-based line number and raw fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl SpecRow {
    pub fn new<S: Into<String>>(line: usize, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    fn field(&self, idx: usize) -> Option<&str> {
        self.fields
            .get(idx)
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
    }

    fn malformed<S: Into<String>>(&self, reason: S) -> LayoutError {
        LayoutError::MalformedRow {
            row: self.line,
            raw: self.fields.join(","),
            reason: reason.into(),
        }
    }
}

/// Result of parsing a spec: the deck in page order and the active layout.
#[derive(Debug, Clone)]
pub struct ParsedSpec {
    pub cards: Vec<Card>,
    pub layout: &'static LayoutPreset,
}

impl ParsedSpec {
    pub fn sheet_count(&self) -> usize {
        self.layout.sheets_for(self.cards.len())
    }
}

/// Directive state machine that accumulates cards row by row.
pub struct SpecParser<'s> {
    style: &'s Style,
    layout: Option<&'static LayoutPreset>,
    background: Option<Background>,
    lines: Vec<OverlayLine>,
    rects: Vec<OverlayRect>,
    templates: Vec<SectionTemplate>,
    cards: Vec<Card>,
}

impl<'s> SpecParser<'s> {
    pub fn new(style: &'s Style) -> Self {
        Self {
            style,
            layout: None,
            background: None,
            lines: Vec::new(),
            rects: Vec::new(),
            templates: Vec::new(),
            cards: Vec::new(),
        }
    }

    /// Parse comma-separated spec text.
    pub fn parse_str(self, input: &str) -> Result<ParsedSpec, LayoutError> {
        self.parse_reader(input.as_bytes())
    }

    /// Parse comma-separated spec rows from any reader.
    pub fn parse_reader<R: Read>(self, reader: R) -> Result<ParsedSpec, LayoutError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut rows = Vec::new();
        for (idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(idx + 1);
            rows.push(SpecRow::new(line, record.iter()));
        }
        self.parse_rows(rows)
    }

    /// Run already-split rows through the directive state machine.
    pub fn parse_rows<I>(mut self, rows: I) -> Result<ParsedSpec, LayoutError>
    where
        I: IntoIterator<Item = SpecRow>,
    {
        for row in rows {
            self.apply(&row)?;
        }
        // Copy-count rows pin the fallback preset, so only card-less specs get here unset.
        let layout = self.layout.unwrap_or_else(LayoutRegistry::default_preset);
        info!(
            "parsed {} card(s) for layout {} ({} sheet(s))",
            self.cards.len(),
            layout.name,
            layout.sheets_for(self.cards.len())
        );
        Ok(ParsedSpec {
            cards: self.cards,
            layout,
        })
    }

    fn apply(&mut self, row: &SpecRow) -> Result<(), LayoutError> {
        let keyword = match row.fields.first().map(|f| f.trim()) {
            None | Some("") => return Ok(()),
            Some(first) if first.starts_with('#') => return Ok(()),
            Some(first) => first.to_ascii_lowercase(),
        };

        match keyword.as_str() {
            "layout" => {
                let name = row
                    .field(1)
                    .ok_or_else(|| row.malformed("layout row needs a preset name"))?;
                let preset =
                    LayoutRegistry::lookup(name).map_err(|err| row.malformed(err.to_string()))?;
                debug!("row {}: layout {}", row.line, preset.name);
                self.layout = Some(preset);
            }
            "bg_image" => {
                let image_ref = row
                    .field(1)
                    .ok_or_else(|| row.malformed("bg_image row needs an image reference"))?;
                let mut background = Background::new(image_ref);
                if let Some(raw) = row.field(2) {
                    let placement = parse_literal(row, raw)?;
                    background = background
                        .with_placement(&placement)
                        .map_err(|reason| row.malformed(reason))?;
                }
                self.background = Some(background);
            }
            "no_bg_image" => self.background = None,
            "lines" => self.lines = parse_quads(row, "line")?,
            "rects" => self.rects = parse_quads(row, "rect")?,
            "text" => {
                let mut templates = Vec::new();
                for raw in row.fields.iter().skip(1) {
                    let raw = raw.trim();
                    if raw.is_empty() {
                        continue;
                    }
                    let literal = parse_literal(row, raw)?;
                    let template = SectionTemplate::from_literal(&literal, self.style)
                        .map_err(|reason| row.malformed(reason))?;
                    templates.push(template);
                }
                debug!("row {}: {} section template(s)", row.line, templates.len());
                self.templates = templates;
            }
            _ => self.emit_cards(row)?,
        }
        Ok(())
    }

    fn emit_cards(&mut self, row: &SpecRow) -> Result<(), LayoutError> {
        let raw_count = row.fields[0].trim();
        let copies: usize = raw_count
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                row.malformed(format!(
                    "'{raw_count}' is neither a directive nor a positive copy count"
                ))
            })?;
        if copies > MAX_COPIES {
            return Err(row.malformed(format!(
                "copy count {copies} exceeds the limit of {MAX_COPIES}"
            )));
        }

        let mut sections = Vec::new();
        for (idx, text) in row.fields.iter().enumerate().skip(1) {
            if text.trim().is_empty() {
                continue;
            }
            let template = self.templates.get(idx - 1).ok_or_else(|| {
                row.malformed(format!(
                    "field {} has no matching text template ({} defined)",
                    idx + 1,
                    self.templates.len()
                ))
            })?;
            sections.push(Section::new(text, template));
        }

        let layout = match self.layout {
            Some(layout) => layout,
            None => {
                let fallback = LayoutRegistry::default_preset();
                warn!(
                    "row {}: no layout selected yet; using {}",
                    row.line, fallback.name
                );
                self.layout = Some(fallback);
                fallback
            }
        };

        let card = Card {
            dimension: layout.card_dim,
            background: self.background.clone(),
            overlay_lines: self.lines.clone(),
            overlay_rects: self.rects.clone(),
            sections,
        };
        debug!(
            "row {}: {} cop{} of a card with {} section(s)",
            row.line,
            copies,
            if copies == 1 { "y" } else { "ies" },
            card.sections.len()
        );
        self.cards
            .try_reserve(copies)
            .map_err(|err| row.malformed(format!("cannot hold {copies} more cards: {err}")))?;
        self.cards.extend(std::iter::repeat_n(card, copies));
        Ok(())
    }
}

fn parse_literal(row: &SpecRow, raw: &str) -> Result<Literal, LayoutError> {
    Literal::parse(raw).map_err(|err| row.malformed(format!("bad literal '{raw}': {err}")))
}

fn parse_quads(row: &SpecRow, what: &str) -> Result<Vec<[f64; 4]>, LayoutError> {
    let mut quads = Vec::new();
    for raw in row.fields.iter().skip(1) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let quad = parse_literal(row, raw)?
            .as_numbers::<4>()
            .ok_or_else(|| row.malformed(format!("{what} '{raw}' must be a tuple of 4 numbers")))?;
        quads.push(quad);
    }
    Ok(quads)
}

/// Parse spec text with the given style defaults.
pub fn parse_spec(input: &str, style: &Style) -> Result<ParsedSpec, LayoutError> {
    SpecParser::new(style).parse_str(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Result<ParsedSpec, LayoutError> {
        parse_spec(input, &Style::default())
    }

    fn row_of(err: LayoutError) -> usize {
        match err {
            LayoutError::MalformedRow { row, .. } => row,
            other => panic!("expected a malformed row, got {other:?}"),
        }
    }

    #[test]
    fn comments_and_blank_rows_are_skipped() {
        let spec = parse("# deck\n\n,ignored\nlayout,bridge\n2\n").unwrap();
        assert_eq!(spec.layout.name, "bridge");
        assert_eq!(spec.cards.len(), 2);
    }

    #[test]
    fn cards_snapshot_overlays_at_creation() {
        let spec = parse(
            "layout,poker_9\n\
             lines,\"(0, 0.5, 1, 0.5)\"\n\
             1\n\
             lines,\"(0.5, 0, 0.5, 1)\",\"(0, 0, 1, 1)\"\n\
             rects,\"(0.1, 0.1, 0.8, 0.8)\"\n\
             1\n",
        )
        .unwrap();
        assert_eq!(spec.cards[0].overlay_lines, vec![[0.0, 0.5, 1.0, 0.5]]);
        assert!(spec.cards[0].overlay_rects.is_empty());
        assert_eq!(spec.cards[1].overlay_lines.len(), 2);
        assert_eq!(spec.cards[1].overlay_rects, vec![[0.1, 0.1, 0.8, 0.8]]);
    }

    #[test]
    fn sections_align_with_template_positions() {
        let spec = parse(
            "layout,poker_9\n\
             text,\"(0.1, 0.9, 0, 8)\",\"(0.5, 0.1, 0, 20, 'bottom center', 8)\"\n\
             1,,Footer text\n",
        )
        .unwrap();
        let card = &spec.cards[0];
        assert_eq!(card.sections.len(), 1);
        assert_eq!(card.sections[0].position, (0.5, 0.1));
        assert_eq!(card.sections[0].lines, vec!["Footer text"]);
    }

    #[test]
    fn text_beyond_templates_is_malformed() {
        let err = parse("layout,poker_9\ntext,\"(0.5, 0.5, 0, 10)\"\n1,a,b\n").unwrap_err();
        assert_eq!(row_of(err), 3);
    }

    #[test]
    fn trailing_empty_fields_are_tolerated() {
        let spec = parse("layout,poker_9\ntext,\"(0.5, 0.5, 0, 10)\"\n1,a,,,\n").unwrap();
        assert_eq!(spec.cards[0].sections.len(), 1);
    }

    #[test]
    fn bad_copy_counts() {
        assert_eq!(row_of(parse("layout,poker_9\n0\n").unwrap_err()), 2);
        assert_eq!(row_of(parse("layout,poker_9\nthree\n").unwrap_err()), 2);
        assert_eq!(row_of(parse("layout,poker_9\n-1\n").unwrap_err()), 2);
    }

    #[test]
    fn oversized_copy_counts_are_malformed() {
        match parse("layout,poker_9\n99999999999999999\n").unwrap_err() {
            LayoutError::MalformedRow { row, reason, .. } => {
                assert_eq!(row, 2);
                assert!(reason.contains("exceeds the limit"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        let limit = format!("layout,poker_9\n{}\n", MAX_COPIES + 1);
        assert_eq!(row_of(parse(&limit).unwrap_err()), 2);
        let spec = parse(&format!("layout,poker_9\n{MAX_COPIES}\n")).unwrap();
        assert_eq!(spec.cards.len(), MAX_COPIES);
    }

    #[test]
    fn blank_card_fields_add_no_section() {
        let spec = parse(
            "layout,poker_9\ntext,\"(0.5, 0.5, 0, 10)\",\"(0.5, 0.1, 0, 10)\"\n1,title,   \n",
        )
        .unwrap();
        assert_eq!(spec.cards[0].sections.len(), 1);
        assert_eq!(spec.cards[0].sections[0].lines, vec!["title"]);
    }

    #[test]
    fn infinite_coordinates_are_malformed() {
        let err = parse("layout,poker_9\ntext,\"(1e999, 0.5, 0, 10)\"\n").unwrap_err();
        assert_eq!(row_of(err), 2);
    }

    #[test]
    fn unknown_layout_is_a_malformed_row() {
        match parse("\nlayout,hexes\n").unwrap_err() {
            LayoutError::MalformedRow { row, reason, raw } => {
                assert_eq!(row, 2);
                assert!(reason.contains("unknown layout 'hexes'"));
                assert_eq!(raw, "layout,hexes");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unsafe_literals_are_rejected() {
        let err = parse("layout,poker_9\nlines,\"__import__('os').system('true')\"\n").unwrap_err();
        assert_eq!(row_of(err), 2);
    }

    #[test]
    fn missing_layout_falls_back_to_default() {
        let spec = parse("1\n").unwrap();
        assert_eq!(spec.layout.name, "poker_9");
        assert_eq!(spec.cards[0].dimension, spec.layout.card_dim);
    }

    #[test]
    fn quoted_fields_keep_newlines() {
        let spec = parse("layout,poker_9\ntext,\"(0.5, 0.5, 0, 10)\"\n1,\"one\n\ntwo\"\n").unwrap();
        assert_eq!(spec.cards[0].sections[0].lines, vec!["one", "", "two"]);
    }

    #[test]
    fn directives_are_case_insensitive() {
        let spec = parse("LAYOUT,Poker_8\nBG_IMAGE,back.png\n1\n").unwrap();
        assert_eq!(spec.layout.name, "poker_8");
        assert!(spec.cards[0].background.is_some());
    }
}
