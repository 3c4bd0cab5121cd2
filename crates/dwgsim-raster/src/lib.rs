//! Turn rendered drawings into pixels.
//!
//! The SVG is parsed with usvg and painted by resvg onto a white
//! tiny-skia pixmap.

use camino::Utf8Path;
use miette::Diagnostic;
use thiserror::Error;
use tiny_skia::Pixmap;

/// Channel value below which a pixel counts as painted
const INK_THRESHOLD: u8 = 250;

#[derive(Error, Diagnostic, Debug)]
pub enum RasterError {
    #[error("could not parse SVG: {0}")]
    #[diagnostic(code(dwgsim_raster::svg))]
    Svg(#[from] usvg::Error),

    #[error("scale must be a positive finite number, got {0}")]
    #[diagnostic(code(dwgsim_raster::scale))]
    InvalidScale(f32),

    #[error("cannot allocate a {width}x{height} pixmap")]
    #[diagnostic(code(dwgsim_raster::pixmap))]
    Pixmap { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    #[diagnostic(code(dwgsim_raster::encode))]
    Encode(String),

    #[error("cannot write {path}")]
    #[diagnostic(code(dwgsim_raster::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Render `svg` at `scale` times its declared size on a white background.
pub fn rasterize(svg: &str, scale: f32) -> Result<Pixmap, RasterError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RasterError::InvalidScale(scale));
    }

    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or(RasterError::Pixmap { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Rasterize `svg` and save it as a PNG file.
pub fn write_png(svg: &str, path: &Utf8Path, scale: f32) -> Result<(), RasterError> {
    let pixmap = rasterize(svg, scale)?;
    let png = pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    std::fs::write(path, png).map_err(|source| RasterError::Io {
        path: path.to_string(),
        source,
    })
}

/// Number of pixels that differ visibly from the white background.
pub fn ink_coverage(pixmap: &Pixmap) -> usize {
    pixmap.pixels().iter().filter(|p| is_ink(**p)).count()
}

fn is_ink(p: tiny_skia::PremultipliedColorU8) -> bool {
    p.alpha() > 128 && p.red().min(p.green()).min(p.blue()) < INK_THRESHOLD
}

/// Ink inside the `w` x `h` window whose top left corner is `(x, y)`.
pub fn ink_in_window(pixmap: &Pixmap, x: u32, y: u32, w: u32, h: u32) -> usize {
    let mut count = 0;
    for py in y..(y + h).min(pixmap.height()) {
        for px in x..(x + w).min(pixmap.width()) {
            if pixmap.pixel(px, py).is_some_and(is_ink) {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(json: &str) -> String {
        dwgsim_draw::dwgsim_to_svg(json).unwrap()
    }

    #[test]
    fn circle_paints_its_outline_only() {
        let svg = render(r#"{"modelSpaceEntities": [{"type": "CIRCLE", "center": [0, 0], "radius": 5}]}"#);
        let pixmap = rasterize(&svg, 1.0).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (800, 600));
        assert!(ink_coverage(&pixmap) > 0);

        // Unfilled: the center stays white
        assert_eq!(ink_in_window(&pixmap, 395, 295, 10, 10), 0);
        // The rightmost point of the outline lands near x = 672
        assert!(ink_in_window(&pixmap, 666, 294, 12, 12) > 0);
    }

    #[test]
    fn empty_drawing_has_no_ink() {
        let svg = render(r#"{"modelSpaceEntities": []}"#);
        let pixmap = rasterize(&svg, 1.0).unwrap();
        assert_eq!(ink_coverage(&pixmap), 0);
    }

    #[test]
    fn unknown_entities_leave_canvas_blank() {
        let svg = render(r#"{"modelSpaceEntities": [{"type": "TEXT", "text": "x"}]}"#);
        let pixmap = rasterize(&svg, 0.5).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (400, 300));
        assert_eq!(ink_coverage(&pixmap), 0);
    }

    #[test]
    fn rejects_bad_scale() {
        let svg = render(r#"{"modelSpaceEntities": []}"#);
        assert!(matches!(rasterize(&svg, 0.0), Err(RasterError::InvalidScale(_))));
        assert!(matches!(rasterize(&svg, f32::NAN), Err(RasterError::InvalidScale(_))));
    }

    #[test]
    fn rejects_non_svg() {
        assert!(matches!(rasterize("not svg", 1.0), Err(RasterError::Svg(_))));
    }
}
