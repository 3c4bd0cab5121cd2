//! Model space entities.
//!
//! Each JSON record becomes one [`Entity`]. The `type` string selects the
//! variant; anything not listed in [`EntityKind`] becomes
//! [`Entity::Unrecognized`] and is never an error.

use std::fmt;

use glam::{DVec2, dvec2};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::EntityError;

/// A 2D coordinate read from a JSON array.
///
/// dwgsim writes 3D vectors as `[x, y, z]`; anything past the second
/// component is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Coord(pub DVec2);

impl TryFrom<Vec<f64>> for Coord {
    type Error = String;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y, ..] => Ok(Coord(dvec2(*x, *y))),
            _ => Err(format!("expected a point with at least 2 coordinates, got {}", v.len())),
        }
    }
}

impl From<Coord> for DVec2 {
    fn from(c: Coord) -> DVec2 {
        c.0
    }
}

/// The recognized entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Line,
    LwPolyline,
    Polyline2d,
    Arc,
    Circle,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Line,
        EntityKind::LwPolyline,
        EntityKind::Polyline2d,
        EntityKind::Arc,
        EntityKind::Circle,
    ];

    /// Look up a `type` tag. Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<EntityKind> {
        EntityKind::ALL.into_iter().find(|k| k.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Line => "LINE",
            EntityKind::LwPolyline => "LWPOLYLINE",
            EntityKind::Polyline2d => "POLYLINE_2D",
            EntityKind::Arc => "ARC",
            EntityKind::Circle => "CIRCLE",
        }
    }

    /// Fields that must be present for this kind to render.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Line => &["start", "end"],
            EntityKind::LwPolyline | EntityKind::Polyline2d => &["vertex"],
            EntityKind::Arc => &["center", "radius", "start_angle", "end_angle"],
            EntityKind::Circle => &["center", "radius"],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Straight segment
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Line {
    pub start: Coord,
    pub end: Coord,
}

/// Open path through `vertex` in order
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Polyline {
    pub vertex: Vec<Coord>,
}

impl Polyline {
    /// Split the vertex list into parallel X and Y sequences, paired by index.
    pub fn transpose(&self) -> (Vec<f64>, Vec<f64>) {
        self.vertex.iter().map(|c| (c.0.x, c.0.y)).unzip()
    }
}

/// Circular arc, angles in radians, swept counterclockwise
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Arc {
    pub center: Coord,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Full circle outline
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Circle {
    pub center: Coord,
    pub radius: f64,
}

/// One model space entity
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Line(Line),
    LwPolyline(Polyline),
    Polyline2d(Polyline),
    Arc(Arc),
    Circle(Circle),
    /// Any other `type`; carries the tag as written (or the raw JSON if it was not a string)
    Unrecognized { tag: String },
}

impl Entity {
    /// Interpret record number `index` of the entity list.
    pub fn from_value(index: usize, record: &Value) -> Result<Entity, EntityError> {
        let tag = match record.get("type") {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Ok(Entity::Unrecognized {
                    tag: other.to_string(),
                });
            }
            None => return Err(EntityError::MissingType { index }),
        };
        let Some(kind) = EntityKind::from_tag(tag) else {
            return Ok(Entity::Unrecognized {
                tag: tag.to_string(),
            });
        };

        let required = kind.required_fields();
        if let Some(field) = required.iter().copied().find(|f| record.get(*f).is_none()) {
            return Err(EntityError::MissingField {
                index,
                kind: kind.to_string(),
                field,
                required: required.join(", "),
            });
        }

        let invalid = |e: serde_json::Error| EntityError::InvalidField {
            index,
            kind: kind.to_string(),
            message: e.to_string(),
        };
        let polyline = || -> Result<Polyline, EntityError> {
            let poly = Polyline::deserialize(record).map_err(invalid)?;
            if poly.vertex.is_empty() {
                return Err(EntityError::InvalidField {
                    index,
                    kind: kind.to_string(),
                    message: "`vertex` must hold at least one point".to_string(),
                });
            }
            Ok(poly)
        };
        let entity = match kind {
            EntityKind::Line => Entity::Line(Line::deserialize(record).map_err(invalid)?),
            EntityKind::LwPolyline => Entity::LwPolyline(polyline()?),
            EntityKind::Polyline2d => Entity::Polyline2d(polyline()?),
            EntityKind::Arc => Entity::Arc(Arc::deserialize(record).map_err(invalid)?),
            EntityKind::Circle => Entity::Circle(Circle::deserialize(record).map_err(invalid)?),
        };
        Ok(entity)
    }

    /// The recognized kind, or `None` for [`Entity::Unrecognized`].
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Entity::Line(_) => Some(EntityKind::Line),
            Entity::LwPolyline(_) => Some(EntityKind::LwPolyline),
            Entity::Polyline2d(_) => Some(EntityKind::Polyline2d),
            Entity::Arc(_) => Some(EntityKind::Arc),
            Entity::Circle(_) => Some(EntityKind::Circle),
            Entity::Unrecognized { .. } => None,
        }
    }
}
