//! Render DwgSim JSON drawings to SVG.
//!
//! A DwgSim document is a JSON object whose `modelSpaceEntities` array holds
//! flat 2D CAD entities. Lines, polylines, arcs and circles are drawn; every
//! other entity type is skipped.
//!
//! ```
//! let svg = dwgsim_draw::dwgsim_to_svg(
//!     r#"{"modelSpaceEntities": [{"type": "LINE", "start": [0, 0], "end": [1, 1]}]}"#,
//! )
//! .unwrap();
//! assert!(svg.contains("<polyline"));
//! ```

pub mod document;
pub mod entity;
pub mod errors;
pub mod log;
pub mod render;
pub mod types;

pub use document::Document;
pub use entity::{Entity, EntityKind};
pub use errors::{DocumentError, EntityError, LoadError, RenderError};
pub use render::{Canvas, RenderOptions, RenderStats, Rendering, render_entities};

/// Render every model space entity of `doc`.
///
/// Fails on the first malformed entity; nothing is rendered in that case.
pub fn render_document(
    doc: &Document,
    options: &RenderOptions,
) -> Result<Rendering, miette::Report> {
    let entities = doc.entities()?;
    let rendering = render::render(&entities, options)?;
    Ok(rendering)
}

/// Inspection mode: the parsed document as JSON text, compact unless `pretty`.
pub fn echo_json(doc: &Document, pretty: bool) -> String {
    doc.to_json(pretty)
}

/// Render DwgSim JSON text to SVG with default options.
pub fn dwgsim_to_svg(source: &str) -> Result<String, miette::Report> {
    let doc = Document::parse("<input>", source)?;
    Ok(render_document(&doc, &RenderOptions::default())?.svg)
}
