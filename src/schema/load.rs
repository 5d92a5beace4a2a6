use super::SchemaDocument;
use crate::error::{Result, VerifyError};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Logical name of the schema for `GET /unknown/{id}` responses.
pub const SINGLE_RESOURCE_SCHEMA: &str = "single-resource-byid-response-scheme.json";

const BUNDLED: &[(&str, &str)] = &[(
    SINGLE_RESOURCE_SCHEMA,
    include_str!("../../resources/schemes/single-resource-byid-response-scheme.json"),
)];

/// Names of the schemas compiled into the crate.
pub fn bundled_names() -> impl Iterator<Item = &'static str> {
    BUNDLED.iter().map(|(name, _)| *name)
}

pub(crate) fn logical_name(name: &str) -> &str {
    name.strip_prefix("schemes/").unwrap_or(name)
}

/// Resolve a schema by logical name.
///
/// `schema_dir` is searched first so a suite can override a bundled schema
/// without rebuilding.
pub fn load_schema(name: &str, schema_dir: Option<&Path>) -> Result<SchemaDocument> {
    let logical = logical_name(name);

    if let Some(dir) = schema_dir {
        let candidate = dir.join(logical);
        if candidate.is_file() {
            debug!(schema = logical, path = %candidate.display(), "Loading schema from directory");
            return load_schema_file(&candidate);
        }
    }

    match BUNDLED.iter().find(|(bundled, _)| *bundled == logical) {
        Some((_, text)) => {
            info!(schema = logical, "Loading bundled schema");
            SchemaDocument::from_json(logical, text)
        }
        None => Err(VerifyError::schema_load(
            logical,
            match schema_dir {
                Some(dir) => format!(
                    "not found in {} or in the bundled resources",
                    dir.display()
                ),
                None => "not found in the bundled resources".to_string(),
            },
        )),
    }
}

/// Load a schema straight from a file path; the file name becomes its name.
pub fn load_schema_file(path: &Path) -> Result<SchemaDocument> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let text = fs::read_to_string(path).map_err(|e| VerifyError::schema_load(&name, e))?;
    SchemaDocument::from_json(name, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate;
    use std::io::Write;

    #[test]
    fn test_bundled_schema_loads() {
        let doc = load_schema(SINGLE_RESOURCE_SCHEMA, None).unwrap();
        assert_eq!(doc.name(), SINGLE_RESOURCE_SCHEMA);
        assert!(bundled_names().any(|n| n == SINGLE_RESOURCE_SCHEMA));
    }

    #[test]
    fn test_classpath_style_prefix_is_accepted() {
        let doc = load_schema("schemes/single-resource-byid-response-scheme.json", None).unwrap();
        assert_eq!(doc.name(), SINGLE_RESOURCE_SCHEMA);
    }

    #[test]
    fn test_unknown_schema_is_load_error() {
        let err = load_schema("nope.json", None).unwrap_err();
        assert_eq!(err.kind(), "SchemaLoadError");
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_directory_overrides_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join(SINGLE_RESOURCE_SCHEMA)).unwrap();
        file.write_all(br#"{"type": "array"}"#).unwrap();

        let doc = load_schema(SINGLE_RESOURCE_SCHEMA, Some(dir.path())).unwrap();
        assert!(validate("[]", &doc).is_valid());
        assert!(!validate("{}", &doc).is_valid());
    }

    #[test]
    fn test_directory_miss_falls_back_to_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let doc = load_schema(SINGLE_RESOURCE_SCHEMA, Some(dir.path())).unwrap();
        assert_eq!(doc.raw()["type"], "object");
    }

    #[test]
    fn test_invalid_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        let err = load_schema_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
