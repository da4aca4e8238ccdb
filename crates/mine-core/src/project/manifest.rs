//! composer.json dependency edits

use crate::error::{MineError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Remove `remove_key` from the manifest's `require` map and set `add_key` to `add_value`
///
/// `add_key` is overwritten if it already exists. The rest of the document is
/// kept as-is (including key order) and rewritten with 4-space indentation.
/// A manifest without a `require` object is a [`MineError::Schema`] and is
/// left unchanged.
pub fn remove_and_add_dependency(
    manifest_path: &Path,
    remove_key: &str,
    add_key: &str,
    add_value: &str,
) -> Result<()> {
    let content = std::fs::read_to_string(manifest_path)
        .map_err(|e| MineError::io(format!("failed to read {}", manifest_path.display()), e))?;

    let mut manifest: Value =
        serde_json::from_str(&content).map_err(|source| MineError::Decode {
            what: manifest_path.display().to_string(),
            source,
        })?;

    let require = require_map(&mut manifest).ok_or_else(|| MineError::Schema {
        document: manifest_path.display().to_string(),
        message: "missing \"require\" object".to_string(),
    })?;

    if require.shift_remove(remove_key).is_some() {
        tracing::debug!("removed {} from {}", remove_key, manifest_path.display());
    }
    require.insert(add_key.to_string(), Value::String(add_value.to_string()));

    let rendered = to_pretty_json(&manifest).map_err(|source| MineError::Decode {
        what: manifest_path.display().to_string(),
        source,
    })?;
    std::fs::write(manifest_path, rendered)
        .map_err(|e| MineError::io(format!("failed to write {}", manifest_path.display()), e))
}

fn require_map(manifest: &mut Value) -> Option<&mut Map<String, Value>> {
    manifest.as_object_mut()?.get_mut("require")?.as_object_mut()
}

fn to_pretty_json(value: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_manifest(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("composer.json");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_swap_dependency() {
        let (_tmp, path) = write_manifest(r#"{"require":{"ext-swoole":"*","x":"1"}}"#);

        remove_and_add_dependency(&path, "ext-swoole", "hyperf/engine-swow", "*").unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let require = value["require"].as_object().unwrap();
        assert!(!require.contains_key("ext-swoole"));
        assert_eq!(require["hyperf/engine-swow"], "*");
        assert_eq!(require["x"], "1");
    }

    #[test]
    fn test_existing_value_is_overwritten() {
        let (_tmp, path) =
            write_manifest(r#"{"require":{"hyperf/engine-swow":"^2.0","php":">=8.1"}}"#);

        remove_and_add_dependency(&path, "ext-swoole", "hyperf/engine-swow", "*").unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["require"]["hyperf/engine-swow"], "*");
        assert_eq!(value["require"]["php"], ">=8.1");
    }

    #[test]
    fn test_key_order_and_indentation_kept() {
        let (_tmp, path) = write_manifest(
            r#"{"name":"mineadmin/mineadmin","type":"project","require":{"php":">=8.1","ext-swoole":"*"}}"#,
        );

        remove_and_add_dependency(&path, "ext-swoole", "hyperf/engine-swow", "*").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let name = content.find("\"name\"").unwrap();
        let kind = content.find("\"type\"").unwrap();
        let require = content.find("\"require\"").unwrap();
        assert!(name < kind && kind < require);
        assert!(content.contains("\n    \"name\": \"mineadmin/mineadmin\""));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn test_missing_require_is_a_schema_error() {
        let (_tmp, path) = write_manifest(r#"{"name":"demo"}"#);
        let err =
            remove_and_add_dependency(&path, "ext-swoole", "hyperf/engine-swow", "*").unwrap_err();
        assert!(matches!(err, MineError::Schema { .. }), "{:?}", err);

        // File is left untouched
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"name":"demo"}"#);
    }

    #[test]
    fn test_require_must_be_an_object() {
        let (_tmp, path) = write_manifest(r#"{"require":["ext-swoole"]}"#);
        let err =
            remove_and_add_dependency(&path, "ext-swoole", "hyperf/engine-swow", "*").unwrap_err();
        assert!(matches!(err, MineError::Schema { .. }));
    }

    #[test]
    fn test_malformed_json_is_a_decode_error() {
        let (_tmp, path) = write_manifest("{ not json");
        let err =
            remove_and_add_dependency(&path, "ext-swoole", "hyperf/engine-swow", "*").unwrap_err();
        assert!(matches!(err, MineError::Decode { .. }));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = remove_and_add_dependency(
            &tmp.path().join("composer.json"),
            "ext-swoole",
            "hyperf/engine-swow",
            "*",
        )
        .unwrap_err();
        assert!(matches!(err, MineError::Io { .. }));
    }
}
