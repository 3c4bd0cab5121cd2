//! Loading DwgSim JSON documents.
//!
//! A document is any well-formed JSON value. Nothing is validated at load
//! time; the entity list is looked up lazily by [`Document::entities`].

use std::path::Path;

use serde_json::Value;

use crate::entity::Entity;
use crate::errors::{DocumentError, EntityError, LoadError};
use crate::log;

/// Key holding the model space entity list
pub const MODEL_SPACE_KEY: &str = "modelSpaceEntities";

/// A parsed drawing document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Name used in diagnostics (file path or `<input>`)
    pub name: String,
    /// The parsed JSON, key order preserved
    pub root: Value,
}

impl Document {
    /// Read and parse the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Document, LoadError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: name.clone(),
            source,
        })?;
        Document::parse(name, &source)
    }

    /// Parse in-memory JSON text.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Document, LoadError> {
        let name = name.into();
        let root: Value =
            serde_json::from_str(source).map_err(|e| LoadError::parse(&name, source, &e))?;
        log::debug!(name = %name, bytes = source.len(), "document parsed");
        Ok(Document { name, root })
    }

    /// The raw `modelSpaceEntities` records.
    pub fn model_space_entities(&self) -> Result<&[Value], DocumentError> {
        match self.root.get(MODEL_SPACE_KEY) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(DocumentError::EntityListNotArray {
                name: self.name.clone(),
                found: json_type_name(other),
            }),
            None => Err(DocumentError::MissingEntityList {
                name: self.name.clone(),
            }),
        }
    }

    /// Interpret every model space record, stopping at the first malformed one.
    pub fn entities(&self) -> Result<Vec<Entity>, miette::Report> {
        let records = self.model_space_entities()?;
        let entities = records
            .iter()
            .enumerate()
            .map(|(index, record)| Entity::from_value(index, record))
            .collect::<Result<Vec<_>, EntityError>>()?;
        log::debug!(count = entities.len(), "model space entities read");
        Ok(entities)
    }

    /// Serialize the document back to JSON text.
    ///
    /// Compact unless `pretty`, in which case nested values are indented by
    /// two spaces.
    pub fn to_json(&self, pretty: bool) -> String {
        // Serializing a `Value` cannot fail: its map keys are always strings.
        if pretty {
            serde_json::to_string_pretty(&self.root).unwrap_or_default()
        } else {
            self.root.to_string()
        }
    }
}

pub(crate) fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
