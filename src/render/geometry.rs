//! Angle conversion and arc path construction

use std::f64::consts::PI;

use glam::{DVec2, dvec2};

use super::svg::fmt_num;

/// Convert radians to degrees as `radians / PI * 180`.
///
/// No wraparound or sign normalization is applied; `0..PI` maps to exactly
/// `0..180`.
#[inline]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians / PI * 180.0
}

/// Counterclockwise sweep in degrees from `theta1` to `theta2`.
///
/// `theta2` is shifted by whole turns into `(theta1, theta1 + 360]`, so a
/// start past the end still draws the counterclockwise arc between them and
/// `theta2 = theta1 + 360` is a full turn. Equal angles sweep nothing.
pub fn arc_sweep_degrees(theta1: f64, theta2: f64) -> f64 {
    if theta1 == theta2 {
        return 0.0;
    }
    let mut end = theta2 - 360.0 * ((theta2 - theta1) / 360.0).floor();
    if end <= theta1 {
        end += 360.0;
    }
    end - theta1
}

/// A single SVG path command (absolute coordinates only)
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    Arc {
        radii: DVec2,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
}

/// SVG path data (`d` attribute) builder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(dvec2(x, y)));
        self
    }

    pub fn a(mut self, rx: f64, ry: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Arc {
            radii: dvec2(rx, ry),
            large_arc,
            sweep,
            to: dvec2(x, y),
        });
        self
    }
}

impl std::fmt::Display for PathData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(p) => write!(f, "M{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::Arc {
                    radii,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A{},{} 0 {} {} {},{}",
                    fmt_num(radii.x),
                    fmt_num(radii.y),
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    fmt_num(to.x),
                    fmt_num(to.y)
                )?,
            }
        }
        Ok(())
    }
}

/// Build an elliptical arc path in pixel space (Y down).
///
/// `theta1` and `sweep` are in degrees, measured counterclockwise in world
/// space (Y up). After the Y flip a counterclockwise world arc is drawn
/// with SVG sweep-flag 0. A full turn is split into two half arcs because
/// SVG cannot draw an arc whose endpoints coincide.
pub fn create_arc_path(center: DVec2, radii: DVec2, theta1: f64, sweep: f64) -> PathData {
    let at = |deg: f64| {
        let t = deg.to_radians();
        center + dvec2(radii.x * t.cos(), -radii.y * t.sin())
    };
    let start = at(theta1);
    let path = PathData::new().m(start.x, start.y);

    if sweep <= 0.0 {
        return path;
    }
    if sweep >= 360.0 {
        let mid = at(theta1 + 180.0);
        return path
            .a(radii.x, radii.y, false, false, mid.x, mid.y)
            .a(radii.x, radii.y, false, false, start.x, start.y);
    }
    let end = at(theta1 + sweep);
    path.a(radii.x, radii.y, sweep > 180.0, false, end.x, end.y)
}
