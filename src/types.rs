//! Numeric primitives shared by the canvas and the SVG backend.
//!
//! World coordinates are drawing units with Y pointing up. Pixel
//! coordinates have Y pointing down. The only way from one to the other is
//! a [`Scaler`].

use std::fmt;

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Check that a value is finite and strictly positive.
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    let val = check_non_negative(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else {
        Ok(val)
    }
}

/// Check that a value is finite and not negative.
pub fn check_non_negative(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// How the two axes share the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aspect {
    /// Each axis is stretched independently to fill the canvas
    #[default]
    Auto,
    /// One drawing unit has the same length on both axes
    Equal,
}

/// Axis-aligned bounding box in world coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// An empty box (min > max) that any expansion will overwrite.
    pub fn new() -> Self {
        BBox {
            min: DVec2::splat(f64::INFINITY),
            max: DVec2::splat(f64::NEG_INFINITY),
        }
    }

    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        BBox {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow to include a rectangle given by its center and half extents.
    pub fn expand_rect(&mut self, center: DVec2, half: DVec2) {
        let half = half.abs();
        self.expand_point(center - half);
        self.expand_point(center + half);
    }

    pub fn union(&mut self, other: &BBox) {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Axis limits for display: empty boxes become the unit square, a
    /// zero-extent axis is widened by one unit on each side, and finally
    /// `margin` times the extent is added on both ends of each axis.
    pub fn view_limits(&self, margin: f64) -> BBox {
        let (min, max) = if self.is_empty() {
            (DVec2::ZERO, DVec2::ONE)
        } else {
            (self.min, self.max)
        };
        let (x0, x1) = widen_singular(min.x, max.x);
        let (y0, y1) = widen_singular(min.y, max.y);
        let pad = dvec2((x1 - x0) * margin, (y1 - y0) * margin);
        BBox {
            min: dvec2(x0, y0) - pad,
            max: dvec2(x1, y1) + pad,
        }
    }
}

fn widen_singular(lo: f64, hi: f64) -> (f64, f64) {
    if hi - lo > 0.0 {
        (lo, hi)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

/// Maps world coordinates (Y up) into pixel coordinates (Y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaler {
    /// Pixels per drawing unit along X
    pub sx: f64,
    /// Pixels per drawing unit along Y
    pub sy: f64,
    /// Pixel position of the top-left corner of `limits`
    pub offset: DVec2,
    /// Visible world region
    pub limits: BBox,
}

impl Scaler {
    /// Fit `limits` into a `width` x `height` pixel canvas.
    ///
    /// With [`Aspect::Equal`] both axes use the smaller scale and the drawing
    /// is centered along the other axis.
    pub fn fit(limits: BBox, width: f64, height: f64, aspect: Aspect) -> Self {
        let sx = width / limits.width();
        let sy = height / limits.height();
        match aspect {
            Aspect::Auto => Scaler {
                sx,
                sy,
                offset: DVec2::ZERO,
                limits,
            },
            Aspect::Equal => {
                let s = sx.min(sy);
                let used = dvec2(limits.width() * s, limits.height() * s);
                Scaler {
                    sx: s,
                    sy: s,
                    offset: (dvec2(width, height) - used) * 0.5,
                    limits,
                }
            }
        }
    }

    /// Convert a world point to pixels.
    pub fn point(&self, p: DVec2) -> DVec2 {
        dvec2(
            self.offset.x + (p.x - self.limits.min.x) * self.sx,
            self.offset.y + (self.limits.max.y - p.y) * self.sy,
        )
    }

    /// Convert a world extent to pixels, per axis.
    pub fn extent(&self, e: DVec2) -> DVec2 {
        dvec2(e.x * self.sx, e.y * self.sy)
    }

    pub fn is_uniform(&self) -> bool {
        self.sx == self.sy
    }
}
