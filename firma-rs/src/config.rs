//! Pad configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it changes:
//!
//! ```json
//! { "width": 600, "height": 240, "offset": { "left": 8, "top": 120 } }
//! ```

use crate::error::{FirmaError, FirmaResult};
use firma_canvas2d::CanvasColor;
use firma_pdf::PageSize;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the downloaded document.
pub const DEFAULT_FILENAME: &str = "firma.pdf";

/// Position of the canvas on the page, subtracted from client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOffset {
    pub left: f32,
    pub top: f32,
}

/// Where and how large the signature image lands on the exported page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportLayout {
    /// Distance of the image's left edge from the page's left edge, in points.
    pub origin_x: f32,
    /// Distance of the image's top edge below the page top, in points.
    pub top_margin: f32,
    /// Factor applied to the canvas pixel size; one pixel maps to one point.
    pub scale: f32,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            top_margin: 100.0,
            scale: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub line_width: f32,
    /// CSS color of the strokes.
    pub stroke_style: String,
    pub offset: PageOffset,
    pub layout: ExportLayout,
    pub page_size: PageSize,
    pub filename: String,
}

impl Default for PadConfig {
    fn default() -> Self {
        // 300x150 is the size of an HTML canvas without width/height attributes
        Self {
            width: 300,
            height: 150,
            line_width: 2.0,
            stroke_style: "#000000".to_string(),
            offset: PageOffset::default(),
            layout: ExportLayout::default(),
            page_size: PageSize::default(),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl PadConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> FirmaResult<Self> {
        let config: PadConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> FirmaResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Check the values a pad cannot work with.
    ///
    /// Canvas dimensions are not checked here: a zero-sized canvas yields an
    /// inert pad rather than a configuration error.
    pub fn validate(&self) -> FirmaResult<()> {
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(FirmaError::InvalidConfig(format!(
                "line_width must be positive, got {}",
                self.line_width
            )));
        }
        self.stroke_style
            .parse::<CanvasColor>()
            .map_err(|e| FirmaError::InvalidConfig(e.to_string()))?;
        if !(self.layout.scale.is_finite() && self.layout.scale > 0.0) {
            return Err(FirmaError::InvalidConfig(format!(
                "layout.scale must be positive, got {}",
                self.layout.scale
            )));
        }
        if !(self.page_size.width > 0.0 && self.page_size.height > 0.0) {
            return Err(FirmaError::InvalidConfig(format!(
                "page_size must be positive, got {}x{}",
                self.page_size.width, self.page_size.height
            )));
        }
        crate::download::check_filename(&self.filename)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PadConfig::default();
        assert_eq!((config.width, config.height), (300, 150));
        assert_eq!(config.line_width, 2.0);
        assert_eq!(config.stroke_style, "#000000");
        assert_eq!(config.layout, ExportLayout::default());
        assert_eq!(config.page_size, PageSize::A4);
        assert_eq!(config.filename, "firma.pdf");
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json() {
        let config = PadConfig::from_json_str(
            r#"{"width": 600, "offset": {"top": 120}, "layout": {"scale": 0.25}}"#,
        )
        .unwrap();
        assert_eq!(config.width, 600);
        assert_eq!(config.height, 150);
        assert_eq!(
            config.offset,
            PageOffset {
                left: 0.0,
                top: 120.0
            }
        );
        assert_eq!(config.layout.scale, 0.25);
        assert_eq!(config.layout.origin_x, 100.0);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            PadConfig::from_json_str(r#"{"line_width": 0}"#),
            Err(FirmaError::InvalidConfig(_))
        ));
        assert!(matches!(
            PadConfig::from_json_str(r##"{"stroke_style": "#zzz"}"##),
            Err(FirmaError::InvalidConfig(_))
        ));
        assert!(matches!(
            PadConfig::from_json_str(r#"{"layout": {"scale": -1}}"#),
            Err(FirmaError::InvalidConfig(_))
        ));
        assert!(matches!(
            PadConfig::from_json_str(r#"{"filename": "../escape.pdf"}"#),
            Err(FirmaError::InvalidFilename(_))
        ));
        assert!(matches!(
            PadConfig::from_json_str("{"),
            Err(FirmaError::Json(_))
        ));
    }
}
