use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Backend resources
// ---------------------------------------------------------------------------

/// File record as returned by `/v1/files` and `/v1/knowledgebases/{id}/files`.
///
/// The OpenAI-compatible endpoint returns string ids while the knowledge-base
/// endpoint returns integers, so `id` accepts both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiFile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub filename: String,
    pub bytes: u64,
    pub created_at: i64,
    #[serde(default = "default_file_object")]
    pub object: String,
    #[serde(default)]
    pub purpose: String,
}

fn default_file_object() -> String {
    "file".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiKnowledgeBase {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// One embedded text chunk of a knowledge-base file. Read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEmbedding {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub kb_id: i64,
    pub file_id: i64,
    pub filename: String,
    pub text: String,
    #[serde(default)]
    pub embedding: Vec<f32>,
    pub index: usize,
}

/// `{ "object": "list", "data": [...] }` envelope used by every listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiList<T> {
    #[serde(default)]
    pub object: Option<String>,
    pub data: Vec<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiKnowledgeBaseCreate {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiKnowledgeBaseCreated {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub existed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiOcrResult {
    #[serde(default)]
    pub text: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Transcript entry. Lives only for the duration of one page visit.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    /// Client-side key used to identify the rendered row.
    pub key: Uuid,
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            key: Uuid::new_v4(),
            role,
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl From<&ChatMessage> for ApiChatMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

/// Body of `POST .../chat/completions`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ApiChatMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// One `data:` payload of a streamed completion.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ApiChunkChoice>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiChunkChoice {
    #[serde(default)]
    pub delta: ApiChunkDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl ApiChatCompletionChunk {
    /// Text carried by the first choice, empty when the chunk has none.
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_accepts_numeric_and_string_ids() {
        let kb_file: ApiFile = serde_json::from_value(json!({
            "id": 7, "filename": "a.txt", "bytes": 12, "purpose": "embedding",
            "created_at": 1700000000, "updated_at": 1700000000
        }))
        .unwrap();
        assert_eq!(kb_file.id, "7");
        assert_eq!(kb_file.object, "file");

        let oa_file: ApiFile = serde_json::from_value(json!({
            "id": "file-abc", "filename": "b.txt", "bytes": 3, "created_at": 1,
            "object": "file", "purpose": "fine-tune"
        }))
        .unwrap();
        assert_eq!(oa_file.id, "file-abc");
    }

    #[test]
    fn completion_request_omits_unset_sampling() {
        let req = ApiChatCompletionRequest {
            model: "NULL".into(),
            messages: vec![ApiChatMessage {
                role: ChatRole::User,
                content: "hi".into(),
            }],
            stream: true,
            max_tokens: Some(128),
            temperature: None,
            top_p: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["max_tokens"], 128);
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn chunk_content_defaults_to_empty() {
        let chunk: ApiChatCompletionChunk = serde_json::from_value(json!({
            "id": "x", "choices": [{"delta": {"role": "assistant"}, "index": 0}]
        }))
        .unwrap();
        assert_eq!(chunk.content(), "");

        let chunk: ApiChatCompletionChunk =
            serde_json::from_value(json!({"choices": [{"delta": {"content": "Hel"}}]})).unwrap();
        assert_eq!(chunk.content(), "Hel");
    }
}
