//! File loading with JSON-path context in decode errors.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LoadError;
use crate::schema::Schema;
use crate::value::Value;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(origin: &str, src: &str) -> Result<T, LoadError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| LoadError::Decode {
        origin: origin.to_string(),
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

pub fn schema_from_str(origin: &str, src: &str) -> Result<Schema, LoadError> {
    from_str_with_path(origin, src)
}

pub fn load_schema(path: &Path) -> Result<Schema, LoadError> {
    let source = read_to_string(path)?;
    schema_from_str(&path.to_string_lossy(), &source)
}

/// One decoded document and where it came from (`file` or `file:line`).
#[derive(Debug, Clone)]
pub struct Document {
    pub origin: String,
    pub value: Value,
}

/// Decode a whole source into documents, narrowing each by `json_pointer`
/// when given. NDJSON sources yield one document per non-blank line.
pub fn documents_from_str(
    origin: &str,
    src: &str,
    ndjson: bool,
    json_pointer: Option<&str>,
) -> Result<Vec<Document>, LoadError> {
    let raw: Vec<(String, serde_json::Value)> = if ndjson {
        src.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(ix, line)| {
                let origin = format!("{origin}:{}", ix + 1);
                from_str_with_path(&origin, line).map(|json| (origin, json))
            })
            .collect::<Result<_, _>>()?
    } else {
        vec![(origin.to_string(), from_str_with_path(origin, src)?)]
    };
    raw.into_iter()
        .map(|(origin, json)| {
            let json = match json_pointer {
                None => json,
                Some(pointer) => match json.pointer(pointer) {
                    Some(selected) => selected.clone(),
                    None => {
                        return Err(LoadError::Pointer {
                            origin,
                            pointer: pointer.to_string(),
                        });
                    }
                },
            };
            Ok(Document { origin, value: Value::from(json) })
        })
        .collect()
}

pub fn load_documents(
    path: &Path,
    ndjson: bool,
    json_pointer: Option<&str>,
) -> Result<Vec<Document>, LoadError> {
    let source = read_to_string(path)?;
    documents_from_str(&path.to_string_lossy(), &source, ndjson, json_pointer)
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Kind;

    #[test]
    fn decode_errors_name_the_json_path() {
        let err = schema_from_str("schema.json", r#"{"foo": [{"$type": "widget"}]}"#).unwrap_err();
        let LoadError::Decode { origin, path, message } = &err else {
            panic!("expected a decode error, got {err:?}");
        };
        assert_eq!(origin, "schema.json");
        assert!(path.starts_with("foo"), "{path}");
        assert!(message.contains("widget"));
        assert!(err.to_string().starts_with("schema.json: at JSON path foo"));
    }

    #[test]
    fn decodes_a_schema() {
        let schema = schema_from_str("-", r#"{"bar": {"$type": "string"}}"#).unwrap();
        assert_eq!(schema, Schema::map([("bar", Kind::String)]));
    }

    #[test]
    fn ndjson_yields_one_document_per_line() {
        let docs = documents_from_str("in.ndjson", "{\"a\": 1}\n\n{\"a\": 2}\n", true, None).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].origin, "in.ndjson:1");
        assert_eq!(docs[1].origin, "in.ndjson:3");
        assert_eq!(docs[1].value, Value::map([("a", 2)]));
    }

    #[test]
    fn json_pointer_narrows_each_document() {
        let docs = documents_from_str("in.json", r#"{"data": {"items": [10, 20]}}"#, false, Some("/data/items/1"))
            .unwrap();
        assert_eq!(docs[0].value, Value::from(20));

        let err = documents_from_str("in.json", r#"{"data": {}}"#, false, Some("/missing")).unwrap_err();
        assert!(matches!(err, LoadError::Pointer { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_schema(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().starts_with("failed to read /definitely/not/here.json"));
    }
}
