//! Error types with rich diagnostics using miette
//!
//! Loading errors carry the document source so parse failures point at the
//! offending line. Entity errors carry the index of the record that failed.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Load Errors
// ============================================================================

/// Errors that occur while reading and parsing a document
#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    #[error("cannot read {path}")]
    #[diagnostic(code(dwgsim_draw::load::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {message}")]
    #[diagnostic(code(dwgsim_draw::load::parse))]
    Parse {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parsing stopped here")]
        span: SourceSpan,
    },
}

impl LoadError {
    /// Build a parse error from a serde_json failure, locating it in `source`.
    pub(crate) fn parse(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let offset = byte_offset(source, err.line(), err.column());
        let len = usize::from(offset < source.len());
        LoadError::Parse {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: (offset, len).into(),
        }
    }
}

/// Convert serde_json's 1-based line/column into a byte offset, clamped to the source.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

// ============================================================================
// Document Errors
// ============================================================================

/// Errors about the document's top-level shape
#[derive(Error, Diagnostic, Debug)]
pub enum DocumentError {
    #[error("{name} has no `modelSpaceEntities` list")]
    #[diagnostic(
        code(dwgsim_draw::document::missing_entities),
        help("the document root must be an object with a `modelSpaceEntities` array")
    )]
    MissingEntityList { name: String },

    #[error("`modelSpaceEntities` in {name} is {found}, not an array")]
    #[diagnostic(code(dwgsim_draw::document::entities_not_array))]
    EntityListNotArray { name: String, found: &'static str },
}

// ============================================================================
// Entity Errors
// ============================================================================

/// Errors in an individual entity record. Fatal: rendering stops at the first one.
#[derive(Error, Diagnostic, Debug)]
pub enum EntityError {
    #[error("entity #{index} ({kind}) is missing field `{field}`")]
    #[diagnostic(
        code(dwgsim_draw::entity::missing_field),
        help("{kind} records need: {required}")
    )]
    MissingField {
        index: usize,
        kind: String,
        field: &'static str,
        required: String,
    },

    #[error("entity #{index} has no `type` field")]
    #[diagnostic(code(dwgsim_draw::entity::missing_type))]
    MissingType { index: usize },

    #[error("entity #{index} ({kind}) is malformed: {message}")]
    #[diagnostic(code(dwgsim_draw::entity::invalid_field))]
    InvalidField {
        index: usize,
        kind: String,
        message: String,
    },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur during rendering
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("plot needs as many y values as x values (got {xs} x, {ys} y)")]
    #[diagnostic(code(dwgsim_draw::render::length_mismatch))]
    LengthMismatch { xs: usize, ys: usize },

    #[error("invalid render option `{name}` = {value}: {reason}")]
    #[diagnostic(code(dwgsim_draw::render::invalid_option))]
    InvalidOption {
        name: &'static str,
        value: f64,
        reason: NumericError,
    },

    #[error("SVG serialization failed: {message}")]
    #[diagnostic(code(dwgsim_draw::render::xml))]
    Xml { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offset_walks_lines() {
        let src = "{\n  \"a\": 1,\n  oops\n}";
        // line 3, column 3 is the 'o' of oops
        let off = byte_offset(src, 3, 3);
        assert_eq!(&src[off..off + 4], "oops");
    }

    #[test]
    fn byte_offset_clamps_past_end() {
        assert_eq!(byte_offset("{}", 9, 40), 2);
        assert_eq!(byte_offset("", 1, 0), 0);
    }

    #[test]
    fn parse_error_points_into_source() {
        let src = "{\"modelSpaceEntities\": [,]}";
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        match LoadError::parse("bad.json", src, &err) {
            LoadError::Parse { span, .. } => {
                assert_eq!(&src[span.offset()..span.offset() + 1], ",");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
