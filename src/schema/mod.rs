//! # Schema Module
//!
//! Loading, compiling and caching of JSON Schema documents used for response
//! conformance checks.
//!
//! ## Overview
//!
//! A [`SchemaDocument`] is compiled once when it is loaded; an unparsable or
//! uncompilable schema is reported as [`VerifyError::SchemaLoad`] at that
//! point, so a suite fails during setup rather than inside a scenario.
//!
//! Documents are resolved by logical name (`single-resource-byid-response-scheme.json`).
//! A configured schema directory is searched first, then the resources bundled
//! into the crate under `resources/schemes/`. A `schemes/` prefix on the name
//! is accepted and ignored.
//!
//! ## Drafts
//!
//! Documents that declare `$schema` are validated with the draft they name
//! (Draft-04 and Draft-07 included). Documents without `$schema` default to
//! Draft-07.
//!
//! [`VerifyError::SchemaLoad`]: crate::error::VerifyError::SchemaLoad

mod cache;
mod load;

pub use cache::SchemaCache;
pub use load::{bundled_names, load_schema, load_schema_file, SINGLE_RESOURCE_SCHEMA};

use crate::error::{Result, VerifyError};
use jsonschema::Validator;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// An immutable, compiled JSON Schema.
#[derive(Clone)]
pub struct SchemaDocument {
    name: String,
    raw: Arc<Value>,
    validator: Arc<Validator>,
}

impl SchemaDocument {
    /// Compile a schema from an already parsed JSON value.
    pub fn from_value(name: impl Into<String>, raw: Value) -> Result<Self> {
        let name = name.into();
        if !raw.is_object() && !raw.is_boolean() {
            return Err(VerifyError::schema_load(
                name,
                "schema document must be a JSON object or boolean",
            ));
        }
        let compiled = if raw.get("$schema").is_some() {
            jsonschema::validator_for(&raw)
        } else {
            jsonschema::draft7::new(&raw)
        };
        let validator = compiled.map_err(|e| VerifyError::schema_load(&name, e))?;
        Ok(Self {
            name,
            raw: Arc::new(raw),
            validator: Arc::new(validator),
        })
    }

    /// Parse and compile a schema from its JSON text.
    pub fn from_json(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let raw: Value = serde_json::from_str(text)
            .map_err(|e| VerifyError::schema_load(&name, format!("invalid JSON: {e}")))?;
        Self::from_value(name, raw)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub(crate) fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl fmt::Debug for SchemaDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDocument")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
