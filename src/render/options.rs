//! Render configuration

use super::defaults;
use crate::errors::RenderError;
use crate::types::{check_non_negative, check_positive};

/// Options controlling SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Padding around the data as a fraction of its extent
    pub margin: f64,
    /// Stroke width of plotted lines and polylines, in pixels
    pub plot_stroke_width: f64,
    /// Stroke width of circles and arcs, in pixels
    pub patch_stroke_width: f64,
    /// Stroke color of circles and arcs
    pub patch_stroke: String,
    /// Colors cycled through by successive plots
    pub palette: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            margin: defaults::MARGIN,
            plot_stroke_width: defaults::PLOT_STROKE_WIDTH,
            patch_stroke_width: defaults::PATCH_STROKE_WIDTH,
            patch_stroke: defaults::PATCH_STROKE.to_string(),
            palette: defaults::PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl RenderOptions {
    /// Reject sizes that would produce an unusable viewport.
    pub fn validate(&self) -> Result<(), RenderError> {
        let positive = [("width", self.width), ("height", self.height)];
        for (name, value) in positive {
            check_positive(value).map_err(|reason| RenderError::InvalidOption {
                name,
                value,
                reason,
            })?;
        }
        let non_negative = [
            ("margin", self.margin),
            ("plot_stroke_width", self.plot_stroke_width),
            ("patch_stroke_width", self.patch_stroke_width),
        ];
        for (name, value) in non_negative {
            check_non_negative(value).map_err(|reason| RenderError::InvalidOption {
                name,
                value,
                reason,
            })?;
        }
        Ok(())
    }

    /// Stroke color for the `n`th plot. Falls back to the patch color when
    /// the palette is empty.
    pub fn plot_color(&self, n: usize) -> &str {
        if self.palette.is_empty() {
            &self.patch_stroke
        } else {
            &self.palette[n % self.palette.len()]
        }
    }
}
