use std::fmt;

use crate::literal::Literal;
use crate::style::{Rgb, Style};
use crate::wrap::wrap;

/// Vertical placement of a text block relative to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    Middle,
    #[default]
    Bottom,
}

/// Horizontal placement of each line relative to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Independent vertical and horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    pub vertical: VAlign,
    pub horizontal: HAlign,
}

impl Alignment {
    /// Parse a token such as `"top right"` or `"center"`.
    ///
    /// Axes are matched by substring, so either or both may be given;
    /// an omitted axis keeps its default. Returns `None` when the token
    /// names neither axis.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.to_ascii_lowercase();
        let vertical = if token.contains("top") {
            Some(VAlign::Top)
        } else if token.contains("middle") {
            Some(VAlign::Middle)
        } else if token.contains("bottom") {
            Some(VAlign::Bottom)
        } else {
            None
        };
        let horizontal = if token.contains("left") {
            Some(HAlign::Left)
        } else if token.contains("center") || token.contains("centre") {
            Some(HAlign::Center)
        } else if token.contains("right") {
            Some(HAlign::Right)
        } else {
            None
        };
        if vertical.is_none() && horizontal.is_none() {
            return None;
        }
        Some(Self {
            vertical: vertical.unwrap_or_default(),
            horizontal: horizontal.unwrap_or_default(),
        })
    }

    /// Offset applied to the block top, given the block height.
    pub fn vertical_shift(&self, block_height: f64) -> f64 {
        match self.vertical {
            VAlign::Top => 0.0,
            VAlign::Middle => block_height / 2.0,
            VAlign::Bottom => block_height,
        }
    }

    /// Offset subtracted from the origin x, given one line's width.
    pub fn horizontal_shift(&self, line_width: f64) -> f64 {
        match self.horizontal {
            HAlign::Left => 0.0,
            HAlign::Center => line_width / 2.0,
            HAlign::Right => line_width,
        }
    }
}

/// Layout and styling for one text slot, as declared by a `text` row.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTemplate {
    pub position: (f64, f64),
    pub rotation: f64,
    pub wrap_width: usize,
    pub alignment: Alignment,
    pub font_name: String,
    pub font_size: f64,
    pub font_color: Rgb,
}

impl SectionTemplate {
    /// Build a template from a literal tuple:
    /// `(x, y, rotation, wrap_width[, alignment[, font_size[, font_name[, (r, g, b)]]]])`.
    /// The position may also be nested as `((x, y), rotation, ...)`.
    pub fn from_literal(lit: &Literal, style: &Style) -> Result<Self, String> {
        let items = lit
            .as_tuple()
            .ok_or_else(|| format!("text template must be a tuple, got {lit}"))?;

        let (position, rest) = match items.first().and_then(|first| first.as_numbers::<2>()) {
            Some([x, y]) => ((x, y), &items[1..]),
            None => {
                let x = number(items.first(), "x position")?;
                let y = number(items.get(1), "y position")?;
                ((x, y), items.get(2..).unwrap_or_default())
            }
        };

        let rotation = number(rest.first(), "rotation")?;
        let wrap_width = rest
            .get(1)
            .ok_or_else(|| "missing wrap width".to_string())?
            .as_usize()
            .filter(|w| *w > 0)
            .ok_or_else(|| "wrap width must be a positive integer".to_string())?;

        let alignment = match rest.get(2) {
            None => Alignment::default(),
            Some(value) => {
                let token = value
                    .as_str()
                    .ok_or_else(|| format!("alignment must be a string, got {value}"))?;
                Alignment::parse(token)
                    .ok_or_else(|| format!("unrecognized alignment '{token}'"))?
            }
        };

        let font_size = match rest.get(3) {
            None => style.font_size,
            Some(value) => value
                .as_f64()
                .filter(|s| *s > 0.0)
                .ok_or_else(|| format!("font size must be a positive number, got {value}"))?,
        };

        let font_name = match rest.get(4) {
            None => style.font_name.clone(),
            Some(value) => value
                .as_str()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
                .ok_or_else(|| format!("font name must be a non-empty string, got {value}"))?,
        };

        let font_color = match rest.get(5) {
            None => style.font_color,
            Some(value) => parse_color(value)?,
        };

        if rest.len() > 6 {
            return Err(format!(
                "text template has {} trailing fields, expected at most 6",
                rest.len()
            ));
        }

        Ok(Self {
            position,
            rotation,
            wrap_width,
            alignment,
            font_name,
            font_size,
            font_color,
        })
    }
}

fn number(value: Option<&Literal>, what: &str) -> Result<f64, String> {
    let value = value.ok_or_else(|| format!("missing {what}"))?;
    value
        .as_f64()
        .ok_or_else(|| format!("{what} must be a number, got {value}"))
}

/// Parse an `(r, g, b)` tuple with components in `[0, 1]`.
pub fn parse_color(value: &Literal) -> Result<Rgb, String> {
    let rgb = value
        .as_numbers::<3>()
        .ok_or_else(|| format!("color must be an (r, g, b) tuple, got {value}"))?;
    if rgb.iter().any(|c| !(0.0..=1.0).contains(c)) {
        return Err(format!("color components must lie in [0, 1], got {value}"));
    }
    Ok(rgb)
}

/// A wrapped, styled block of text at a fixed spot on a card.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub position: (f64, f64),
    pub rotation: f64,
    pub wrap_width: usize,
    pub alignment: Alignment,
    pub font_name: String,
    pub font_size: f64,
    pub font_color: Rgb,
    pub lines: Vec<String>,
}

impl Section {
    pub fn new(text: &str, template: &SectionTemplate) -> Self {
        Self {
            position: template.position,
            rotation: template.rotation,
            wrap_width: template.wrap_width,
            alignment: template.alignment,
            font_name: template.font_name.clone(),
            font_size: template.font_size,
            font_color: template.font_color,
            lines: wrap(text, template.wrap_width),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical {
            VAlign::Top => "top",
            VAlign::Middle => "middle",
            VAlign::Bottom => "bottom",
        };
        let h = match self.horizontal {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        };
        write!(f, "{v} {h}")
    }
}
