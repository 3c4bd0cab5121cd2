//! Shape types for canvas rendering
//!
//! Each shape is its own type that knows how to:
//! - Report its extent in world coordinates
//! - Render itself to an SVG node

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::geometry::{arc_sweep_degrees, create_arc_path};
use super::svg::{SvgNode, SvgStyle, fmt_num};
use crate::types::{BBox, Scaler};

/// Stroke settings for one shape. Shapes are never filled.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub stroke: String,
    /// Stroke width in pixels
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn new(stroke: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            stroke: stroke.into(),
            stroke_width,
        }
    }

    fn to_svg(&self) -> SvgStyle {
        SvgStyle::new()
            .add("fill", "none")
            .add("stroke", self.stroke.clone())
            .add("stroke-width", fmt_num(self.stroke_width))
    }
}

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    /// Extent in world coordinates
    fn bounds(&self) -> BBox;

    /// The stroke settings
    fn style(&self) -> &ShapeStyle;

    /// Render this shape to an SVG node
    fn render_svg(&self, scaler: &Scaler) -> SvgNode;
}

// ============================================================================
// Shape Types
// ============================================================================

/// An open path through `(xs[i], ys[i])`, the result of a plot call
#[derive(Debug, Clone, PartialEq)]
pub struct PlotShape {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub style: ShapeStyle,
}

impl PlotShape {
    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.xs.iter().zip(&self.ys).map(|(x, y)| dvec2(*x, *y))
    }
}

impl Shape for PlotShape {
    fn bounds(&self) -> BBox {
        let mut b = BBox::new();
        for p in self.points() {
            b.expand_point(p);
        }
        b
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn render_svg(&self, scaler: &Scaler) -> SvgNode {
        SvgNode::Polyline {
            points: self.points().map(|p| scaler.point(p)).collect(),
            style: self.style.to_svg(),
        }
    }
}

/// A circle outline
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: DVec2,
    pub radius: f64,
    pub style: ShapeStyle,
}

impl Shape for CircleShape {
    fn bounds(&self) -> BBox {
        let mut b = BBox::new();
        b.expand_rect(self.center, DVec2::splat(self.radius));
        b
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn render_svg(&self, scaler: &Scaler) -> SvgNode {
        let center = scaler.point(self.center);
        let radii = scaler.extent(DVec2::splat(self.radius));
        let style = self.style.to_svg();
        if scaler.is_uniform() {
            SvgNode::Circle {
                center,
                r: radii.x,
                style,
            }
        } else {
            SvgNode::Ellipse {
                center,
                radii,
                style,
            }
        }
    }
}

/// An elliptical arc given by its full width and height, swept
/// counterclockwise from `theta1` to `theta2` degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcShape {
    pub center: DVec2,
    pub width: f64,
    pub height: f64,
    pub theta1: f64,
    pub theta2: f64,
    pub style: ShapeStyle,
}

impl ArcShape {
    /// Counterclockwise sweep in degrees, see [`arc_sweep_degrees`].
    pub fn sweep(&self) -> f64 {
        arc_sweep_degrees(self.theta1, self.theta2)
    }

    fn half_extent(&self) -> DVec2 {
        dvec2(self.width, self.height) * 0.5
    }
}

impl Shape for ArcShape {
    /// The full ellipse box, not just the swept part
    fn bounds(&self) -> BBox {
        let mut b = BBox::new();
        b.expand_rect(self.center, self.half_extent());
        b
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn render_svg(&self, scaler: &Scaler) -> SvgNode {
        let d = create_arc_path(
            scaler.point(self.center),
            scaler.extent(self.half_extent()),
            self.theta1,
            self.sweep(),
        );
        SvgNode::Path {
            d,
            style: self.style.to_svg(),
        }
    }
}

// ============================================================================
// Shape Enum
// ============================================================================

/// A shape enum wrapping all shape types
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEnum {
    Plot(PlotShape),
    Circle(CircleShape),
    Arc(ArcShape),
}

// ============================================================================
// Tests
// ============================================================================
