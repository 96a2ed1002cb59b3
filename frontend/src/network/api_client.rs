use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, RequestMode, Response};

use crate::models::{
    ApiEmbedding, ApiFile, ApiKnowledgeBase, ApiKnowledgeBaseCreate, ApiKnowledgeBaseCreated,
    ApiList, ApiOcrResult,
};
use crate::schema_validation::{validate_list, RecordKind};

use super::{api_url, ApiError};

/// REST client for the zxrag `/v1` surface.
pub struct ApiClient;

impl ApiClient {
    // ---------------- Knowledge bases ----------------

    pub async fn list_knowledge_bases() -> Result<Vec<ApiKnowledgeBase>, ApiError> {
        Self::get_list("/knowledgebases", RecordKind::KnowledgeBase).await
    }

    pub async fn create_knowledge_base(name: &str) -> Result<ApiKnowledgeBaseCreated, ApiError> {
        let body = ApiKnowledgeBaseCreate {
            name: name.to_string(),
        };
        let payload = to_json(&body)?;
        let text = Self::fetch_json(&api_url("/knowledgebases"), "POST", Some(payload.as_str())).await?;
        parse(&text)
    }

    pub async fn delete_knowledge_base(kb_id: i64) -> Result<(), ApiError> {
        let url = api_url(&format!("/knowledgebases/{}", kb_id));
        Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    // ---------------- Knowledge-base files ----------------

    pub async fn list_kb_files(kb_id: i64) -> Result<Vec<ApiFile>, ApiError> {
        Self::get_list(&format!("/knowledgebases/{}/files", kb_id), RecordKind::File).await
    }

    pub async fn upload_kb_file(kb_id: i64, file: &web_sys::File) -> Result<(), ApiError> {
        let form = file_form(file)?;
        let url = api_url(&format!("/knowledgebases/{}/files", kb_id));
        Self::fetch_multipart(&url, &form).await?;
        Ok(())
    }

    pub async fn delete_kb_file(kb_id: i64, file_id: &str) -> Result<(), ApiError> {
        let url = api_url(&format!("/knowledgebases/{}/files/{}", kb_id, file_id));
        Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    /// Ask the backend to chunk and embed one file of a knowledge base.
    pub async fn create_embeddings(kb_id: i64, file_id: &str) -> Result<(), ApiError> {
        let url = api_url(&format!("/knowledgebases/embeddings/{}/files/{}", kb_id, file_id));
        Self::fetch_json(&url, "POST", None).await?;
        Ok(())
    }

    pub async fn list_embeddings(kb_id: i64) -> Result<Vec<ApiEmbedding>, ApiError> {
        Self::get_list(&format!("/knowledgebases/{}/embeddings", kb_id), RecordKind::Embedding).await
    }

    // ---------------- Global files ----------------

    pub async fn list_files() -> Result<Vec<ApiFile>, ApiError> {
        Self::get_list("/files", RecordKind::File).await
    }

    pub async fn upload_file(file: &web_sys::File, purpose: &str) -> Result<(), ApiError> {
        let form = file_form(file)?;
        form.append_with_str("purpose", purpose)
            .map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
        Self::fetch_multipart(&api_url("/files"), &form).await?;
        Ok(())
    }

    pub async fn delete_file(file_id: &str) -> Result<(), ApiError> {
        let url = api_url(&format!("/files/{}", file_id));
        Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    // ---------------- OCR ----------------

    pub async fn ocr(file: &web_sys::File) -> Result<String, ApiError> {
        let form = file_form(file)?;
        let text = Self::fetch_multipart(&api_url("/ocr"), &form).await?;
        let result: ApiOcrResult = parse(&text)?;
        Ok(result.text)
    }

    // -------------------------------------------------------------------
    // Plumbing
    // -------------------------------------------------------------------

    async fn get_list<T: DeserializeOwned>(path: &str, kind: RecordKind) -> Result<Vec<T>, ApiError> {
        let text = Self::fetch_json(&api_url(path), "GET", None).await?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        validate_list(kind, &value).map_err(ApiError::Decode)?;
        let list: ApiList<T> = serde_json::from_value(value)?;
        Ok(list.data)
    }

    /// Issue a request with an optional JSON body and return the raw body
    /// text of a 2xx response.
    pub async fn fetch_json(url: &str, method: &str, body: Option<&str>) -> Result<String, ApiError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
            headers
                .append("Content-Type", "application/json")
                .map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
        let resp = send(&request).await?;
        read_text(&resp).await
    }

    /// POST a multipart form. The browser sets the boundary header itself.
    pub async fn fetch_multipart(url: &str, form: &FormData) -> Result<String, ApiError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(form.as_ref());

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
        let resp = send(&request).await?;
        read_text(&resp).await
    }
}

/// Run `fetch` and reject non-2xx responses.
pub(crate) async fn send(request: &Request) -> Result<Response, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Dom("no global window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| ApiError::from_js(ApiError::Network, e))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| ApiError::from_js(ApiError::Dom, e))?;

    if !resp.ok() {
        return Err(ApiError::Status {
            status: resp.status(),
            text: resp.status_text(),
        });
    }
    Ok(resp)
}

async fn read_text(resp: &Response) -> Result<String, ApiError> {
    let promise = resp.text().map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::from_js(ApiError::Network, e))?;
    Ok(text.as_string().unwrap_or_default())
}

fn file_form(file: &web_sys::File) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
    Ok(form)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn parse<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(text)?)
}
