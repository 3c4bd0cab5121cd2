//! The drawing surface shared by all entities of a document

use glam::DVec2;

use super::options::RenderOptions;
use super::shapes::{ArcShape, CircleShape, PlotShape, Shape, ShapeEnum, ShapeStyle};
use crate::errors::RenderError;
use crate::types::{Aspect, BBox};

/// Accumulates shapes in insertion order.
///
/// Insertion order is paint order: later shapes are drawn on top.
#[derive(Debug, Clone)]
pub struct Canvas {
    shapes: Vec<ShapeEnum>,
    aspect: Aspect,
    plots: usize,
    options: RenderOptions,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(&RenderOptions::default())
    }
}

impl Canvas {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            shapes: Vec::new(),
            aspect: Aspect::Auto,
            plots: 0,
            options: options.clone(),
        }
    }

    /// Add an open path through `(xs[i], ys[i])`.
    ///
    /// Each plot takes the next palette color.
    pub fn plot(
        &mut self,
        xs: impl Into<Vec<f64>>,
        ys: impl Into<Vec<f64>>,
    ) -> Result<(), RenderError> {
        let (xs, ys) = (xs.into(), ys.into());
        if xs.len() != ys.len() {
            return Err(RenderError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        let style = ShapeStyle::new(
            self.options.plot_color(self.plots),
            self.options.plot_stroke_width,
        );
        self.plots += 1;
        self.shapes.push(PlotShape { xs, ys, style }.into());
        Ok(())
    }

    /// Add an arc of the ellipse with full `width` and `height` centered at
    /// `center`, from `theta1` to `theta2` degrees counterclockwise.
    pub fn add_arc(&mut self, center: DVec2, width: f64, height: f64, theta1: f64, theta2: f64) {
        let style = self.patch_style();
        self.shapes.push(
            ArcShape {
                center,
                width,
                height,
                theta1,
                theta2,
                style,
            }
            .into(),
        );
    }

    /// Add an unfilled circle outline.
    pub fn add_circle(&mut self, center: DVec2, radius: f64) {
        let style = self.patch_style();
        self.shapes.push(
            CircleShape {
                center,
                radius,
                style,
            }
            .into(),
        );
    }

    fn patch_style(&self) -> ShapeStyle {
        ShapeStyle::new(
            self.options.patch_stroke.clone(),
            self.options.patch_stroke_width,
        )
    }

    pub fn set_aspect(&mut self, aspect: Aspect) {
        self.aspect = aspect;
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn shapes(&self) -> &[ShapeEnum] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Union of all shape extents; empty when nothing was drawn.
    pub fn bounds(&self) -> BBox {
        let mut b = BBox::new();
        for shape in &self.shapes {
            b.union(&shape.bounds());
        }
        b
    }
}
