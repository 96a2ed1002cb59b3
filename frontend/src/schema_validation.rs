//! Schema validation helpers – compiled into WASM.
//!
//! Listing responses are checked item by item before they are deserialized
//! so a backend shape change shows up as one readable console error instead
//! of an opaque serde message.

use jsonschema::JSONSchema;
use lazy_static::lazy_static;
use serde_json::Value;

fn compile(raw: &str, name: &str) -> JSONSchema {
    let parsed: Value = serde_json::from_str(raw)
        .unwrap_or_else(|e| panic!("{} schema must be valid JSON: {}", name, e));
    JSONSchema::compile(&parsed).unwrap_or_else(|e| panic!("invalid {} schema: {}", name, e))
}

lazy_static! {
    static ref FILE_SCHEMA: JSONSchema = compile(include_str!("schema/file_schema.json"), "file");
    static ref KNOWLEDGE_BASE_SCHEMA: JSONSchema = compile(
        include_str!("schema/knowledge_base_schema.json"),
        "knowledge base"
    );
    static ref EMBEDDING_SCHEMA: JSONSchema =
        compile(include_str!("schema/embedding_schema.json"), "embedding");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    File,
    KnowledgeBase,
    Embedding,
}

impl RecordKind {
    fn schema(&self) -> &'static JSONSchema {
        match self {
            RecordKind::File => &FILE_SCHEMA,
            RecordKind::KnowledgeBase => &KNOWLEDGE_BASE_SCHEMA,
            RecordKind::Embedding => &EMBEDDING_SCHEMA,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::File => "file",
            RecordKind::KnowledgeBase => "knowledge base",
            RecordKind::Embedding => "embedding",
        }
    }
}

/// Validate a single record.
pub fn validate_record(kind: RecordKind, value: &Value) -> Result<(), String> {
    let schema = kind.schema();
    let result = schema.validate(value);
    match result {
        Ok(()) => Ok(()),
        Err(errors) => {
            let details: Vec<String> = errors.map(|e| e.to_string()).collect();
            Err(format!("invalid {}: {}", kind.label(), details.join("; ")))
        }
    }
}

/// Validate a `{ "data": [...] }` listing envelope.
pub fn validate_list(kind: RecordKind, value: &Value) -> Result<(), String> {
    let items = value
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| format!("{} listing is missing a `data` array", kind.label()))?;

    for (i, item) in items.iter().enumerate() {
        validate_record(kind, item).map_err(|e| format!("item {}: {}", i, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_backend_knowledge_base_listing() {
        let listing = json!({
            "data": [
                {"id": 1, "name": "docs", "created_at": 1, "updated_at": 2},
                {"id": 2, "name": "faq", "created_at": 3, "updated_at": 4}
            ]
        });
        assert!(validate_list(RecordKind::KnowledgeBase, &listing).is_ok());
    }

    #[test]
    fn rejects_record_with_wrong_types() {
        let bad = json!({"id": "x", "name": 3});
        let err = validate_record(RecordKind::KnowledgeBase, &bad).unwrap_err();
        assert!(err.starts_with("invalid knowledge base"));
    }

    #[test]
    fn reports_index_of_bad_list_item() {
        let listing = json!({
            "object": "list",
            "data": [
                {"id": "file-1", "filename": "a", "bytes": 1, "created_at": 0},
                {"id": "file-2", "filename": "b", "bytes": -5, "created_at": 0}
            ]
        });
        let err = validate_list(RecordKind::File, &listing).unwrap_err();
        assert!(err.starts_with("item 1:"), "{}", err);
    }

    #[test]
    fn missing_data_array_is_an_error() {
        assert!(validate_list(RecordKind::Embedding, &json!({"items": []})).is_err());
    }
}
