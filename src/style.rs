//! Explicit styling defaults shared by the parser and the renderer.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// RGB triple with components in `[0, 1]`.
pub type Rgb = [f64; 3];

pub const BLACK: Rgb = [0.0, 0.0, 0.0];

/// Defaults for section text and overlay strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    pub font_name: String,
    pub font_size: f64,
    pub font_color: Rgb,
    /// Leading expressed as a multiple of the font size.
    pub line_spacing: f64,
    pub stroke_color: Rgb,
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_name: "Helvetica".to_string(),
            font_size: 10.0,
            font_color: BLACK,
            line_spacing: 1.0,
            stroke_color: BLACK,
            stroke_width: 1.0,
        }
    }
}

impl Style {
    /// Load a style from a JSON file; omitted fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read style file {}", path.display()))?;
        let style: Style = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse style file {}", path.display()))?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.font_size > 0.0, "font_size must be positive");
        anyhow::ensure!(self.line_spacing > 0.0, "line_spacing must be positive");
        anyhow::ensure!(self.stroke_width >= 0.0, "stroke_width must not be negative");
        for color in [&self.font_color, &self.stroke_color] {
            anyhow::ensure!(
                color.iter().all(|c| (0.0..=1.0).contains(c)),
                "color components must lie in [0, 1]"
            );
        }
        Ok(())
    }

    /// Distance between consecutive baselines for a given font size.
    pub fn leading(&self, font_size: f64) -> f64 {
        font_size * self.line_spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "font_name": "Times-Roman", "line_spacing": 1.2 }}"#).unwrap();
        let style = Style::load(file.path()).unwrap();
        assert_eq!(style.font_name, "Times-Roman");
        assert_eq!(style.font_size, 10.0);
        assert!((style.leading(10.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_out_of_range_colors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "font_color": [0, 2, 0] }}"#).unwrap();
        assert!(Style::load(file.path()).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fontsize": 9 }}"#).unwrap();
        assert!(Style::load(file.path()).is_err());
    }
}
