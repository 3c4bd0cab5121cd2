//! Rendering model space entities to SVG
//!
//! This module is organized into submodules:
//! - `defaults`: Default canvas size and strokes
//! - `options`: [`RenderOptions`]
//! - `canvas`: the shared drawing surface
//! - `shapes`: shape types and the `Shape` trait
//! - `geometry`: angle conversion and arc paths
//! - `svg`: SVG generation

pub mod canvas;
pub mod defaults;
pub mod geometry;
pub mod options;
pub mod shapes;
pub mod svg;

pub use canvas::Canvas;
pub use geometry::radians_to_degrees;
pub use options::RenderOptions;

use crate::entity::Entity;
use crate::errors::RenderError;
use crate::log;
use crate::types::Aspect;

/// What a render pass drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub lines: usize,
    pub polylines: usize,
    pub arcs: usize,
    pub circles: usize,
    /// Entities with an unrecognized type
    pub skipped: usize,
}

impl RenderStats {
    /// Number of shapes added, one per recognized entity
    pub fn shapes(&self) -> usize {
        self.lines + self.polylines + self.arcs + self.circles
    }
}

/// Result of rendering a document
#[derive(Debug, Clone)]
pub struct Rendering {
    pub svg: String,
    pub stats: RenderStats,
}

/// Add one shape per recognized entity to `canvas`, in order, then lock the
/// aspect ratio so circles stay round.
pub fn render_entities(entities: &[Entity], canvas: &mut Canvas) -> Result<RenderStats, RenderError> {
    let mut stats = RenderStats::default();

    for (index, entity) in entities.iter().enumerate() {
        match entity {
            Entity::Line(line) => {
                let (start, end) = (line.start.0, line.end.0);
                canvas.plot([start.x, end.x], [start.y, end.y])?;
                stats.lines += 1;
            }
            Entity::LwPolyline(poly) | Entity::Polyline2d(poly) => {
                let (xs, ys) = poly.transpose();
                canvas.plot(xs, ys)?;
                stats.polylines += 1;
            }
            Entity::Arc(arc) => {
                let theta1 = radians_to_degrees(arc.start_angle);
                let theta2 = radians_to_degrees(arc.end_angle);
                if theta1 == theta2 {
                    log::warn!(
                        entity = index,
                        degrees = theta1,
                        "arc start and end angles are equal, nothing is drawn"
                    );
                }
                let diameter = arc.radius * 2.0;
                canvas.add_arc(arc.center.0, diameter, diameter, theta1, theta2);
                stats.arcs += 1;
            }
            Entity::Circle(circle) => {
                canvas.add_circle(circle.center.0, circle.radius);
                stats.circles += 1;
            }
            Entity::Unrecognized { tag } => {
                log::debug!(entity = index, tag = %tag, "skipping unrecognized entity");
                stats.skipped += 1;
            }
        }
    }

    canvas.set_aspect(Aspect::Equal);
    log::debug!(
        shapes = stats.shapes(),
        skipped = stats.skipped,
        "entities rendered"
    );
    Ok(stats)
}

/// Render entities on a fresh canvas and serialize it.
pub fn render(entities: &[Entity], options: &RenderOptions) -> Result<Rendering, RenderError> {
    options.validate()?;
    let mut canvas = Canvas::new(options);
    let stats = render_entities(entities, &mut canvas)?;
    let svg = svg::generate_svg(&canvas, options)?;
    Ok(Rendering { svg, stats })
}

#[cfg(test)]
mod tests {
    use super::shapes::ShapeEnum;
    use super::*;
    use serde_json::json;
    use std::f64::consts::PI;

    fn entities(records: serde_json::Value) -> Vec<Entity> {
        records
            .as_array()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(i, r)| Entity::from_value(i, r).unwrap())
            .collect()
    }

    #[test]
    fn line_draws_one_segment() {
        let mut canvas = Canvas::default();
        let stats = render_entities(
            &entities(json!([{"type": "LINE", "start": [0, 0], "end": [1, 1]}])),
            &mut canvas,
        )
        .unwrap();
        assert_eq!(stats.shapes(), 1);
        match &canvas.shapes()[0] {
            ShapeEnum::Plot(p) => {
                assert_eq!(p.xs, vec![0.0, 1.0]);
                assert_eq!(p.ys, vec![0.0, 1.0]);
            }
            other => panic!("expected a plot, got {other:?}"),
        }
    }

    #[test]
    fn circle_draws_one_outline() {
        let mut canvas = Canvas::default();
        render_entities(
            &entities(json!([{"type": "CIRCLE", "center": [0, 0], "radius": 5}])),
            &mut canvas,
        )
        .unwrap();
        assert_eq!(canvas.len(), 1);
        match &canvas.shapes()[0] {
            ShapeEnum::Circle(c) => {
                assert_eq!(c.center, glam::DVec2::ZERO);
                assert_eq!(c.radius, 5.0);
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn arc_uses_diameter_and_degrees() {
        let mut canvas = Canvas::default();
        render_entities(
            &entities(json!([{
                "type": "ARC", "center": [1, 2], "radius": 3,
                "start_angle": 0.0, "end_angle": PI
            }])),
            &mut canvas,
        )
        .unwrap();
        match &canvas.shapes()[0] {
            ShapeEnum::Arc(a) => {
                assert_eq!(a.width, 6.0);
                assert_eq!(a.height, 6.0);
                assert_eq!(a.theta1, 0.0);
                assert_eq!(a.theta2, 180.0);
            }
            other => panic!("expected an arc, got {other:?}"),
        }
    }

    /// Known limitation: angles are converted but never normalized, so a
    /// start past the end or values outside one turn reach the arc as is.
    #[test]
    fn arc_angles_are_not_normalized() {
        let mut canvas = Canvas::default();
        render_entities(
            &entities(json!([
                {"type": "ARC", "center": [0, 0], "radius": 1, "start_angle": 1.5 * PI, "end_angle": 0.5 * PI},
                {"type": "ARC", "center": [0, 0], "radius": 1, "start_angle": -PI, "end_angle": 3.0 * PI}
            ])),
            &mut canvas,
        )
        .unwrap();
        let arcs: Vec<_> = canvas
            .shapes()
            .iter()
            .map(|s| match s {
                ShapeEnum::Arc(a) => (a.theta1, a.theta2),
                other => panic!("expected an arc, got {other:?}"),
            })
            .collect();
        assert!((arcs[0].0 - 270.0).abs() < 1e-9);
        assert!((arcs[0].1 - 90.0).abs() < 1e-9);
        assert_eq!(arcs[1].0, -180.0);
        assert!((arcs[1].1 - 540.0).abs() < 1e-9);
    }

    #[test]
    fn polyline_transposes_vertices() {
        let mut canvas = Canvas::default();
        let stats = render_entities(
            &entities(json!([
                {"type": "LWPOLYLINE", "vertex": [[0, 0], [1, 2], [3, 4], [5, 6]]},
                {"type": "POLYLINE_2D", "vertex": [[7, 8, 0]]}
            ])),
            &mut canvas,
        )
        .unwrap();
        assert_eq!(stats.polylines, 2);
        match &canvas.shapes()[0] {
            ShapeEnum::Plot(p) => {
                assert_eq!(p.xs, vec![0.0, 1.0, 3.0, 5.0]);
                assert_eq!(p.ys, vec![0.0, 2.0, 4.0, 6.0]);
            }
            other => panic!("expected a plot, got {other:?}"),
        }
        match &canvas.shapes()[1] {
            ShapeEnum::Plot(p) => {
                assert_eq!(p.xs.len(), 1);
                assert_eq!(p.ys.len(), 1);
            }
            other => panic!("expected a plot, got {other:?}"),
        }
    }

    #[test]
    fn unknown_entities_draw_nothing() {
        let mut canvas = Canvas::default();
        let stats = render_entities(
            &entities(json!([{"type": "TEXT", "text": "hi"}, {"type": "INSERT", "blockId": 3}])),
            &mut canvas,
        )
        .unwrap();
        assert_eq!(stats.shapes(), 0);
        assert_eq!(stats.skipped, 2);
        assert!(canvas.is_empty());
    }

    #[test]
    fn empty_list_draws_nothing() {
        let mut canvas = Canvas::default();
        let stats = render_entities(&[], &mut canvas).unwrap();
        assert_eq!(stats, RenderStats::default());
        assert!(canvas.is_empty());
        assert_eq!(canvas.aspect(), Aspect::Equal);
    }

    #[test]
    fn count_invariant_on_mixed_input() {
        let list = entities(json!([
            {"type": "LINE", "start": [0, 0], "end": [1, 0]},
            {"type": "SPLINE", "ctrl_pts": []},
            {"type": "CIRCLE", "center": [0, 0], "radius": 1},
            {"type": "ARC", "center": [0, 0], "radius": 1, "start_angle": 0, "end_angle": 1},
            {"type": "ELLIPSE", "center": [0, 0, 0]},
            {"type": "LWPOLYLINE", "vertex": [[0, 0], [1, 1]]}
        ]));
        let rendering = render(&list, &RenderOptions::default()).unwrap();
        assert_eq!(rendering.stats.shapes(), 4);
        assert_eq!(rendering.stats.skipped, 2);
        let elements = ["<polyline", "<circle", "<path"]
            .iter()
            .map(|tag| rendering.svg.matches(tag).count())
            .sum::<usize>();
        assert_eq!(elements, 4);
    }

    #[test]
    fn render_rejects_bad_options() {
        let options = RenderOptions {
            height: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            render(&[], &options),
            Err(RenderError::InvalidOption { name: "height", .. })
        ));
    }
}
