//! Streamed chat completions.
//!
//! The response body is pulled chunk by chunk through a
//! `ReadableStreamDefaultReader`, fed to [`SseDecoder`], and every text
//! fragment is handed to the caller as soon as it is decoded.  At most one
//! stream is active; starting a new one or calling [`abort_active_stream`]
//! cancels the previous fetch through its `AbortController`.

use std::cell::RefCell;

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, ReadableStreamDefaultReader, Request, RequestInit, RequestMode};

use crate::models::ApiChatCompletionRequest;

use super::api_client::send;
use super::sse::{parse_completion_fragment, SseDecoder, SseEvent};
use super::ApiError;

/// The single in-flight stream. Each registration gets a fresh token so a
/// late release from an older stream never clears a newer one.
#[derive(Debug)]
struct ActiveStream<H> {
    next_token: u64,
    current: Option<(u64, u64, H)>,
}

impl<H> ActiveStream<H> {
    const fn new() -> Self {
        Self {
            next_token: 0,
            current: None,
        }
    }

    /// Install `handle`, returning its token and whatever it displaced.
    fn register(&mut self, request_id: u64, handle: H) -> (u64, Option<(u64, H)>) {
        self.next_token += 1;
        let token = self.next_token;
        let previous = self
            .current
            .replace((token, request_id, handle))
            .map(|(_, id, h)| (id, h));
        (token, previous)
    }

    fn release(&mut self, token: u64) -> bool {
        if matches!(self.current, Some((t, _, _)) if t == token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    fn take(&mut self) -> Option<(u64, H)> {
        self.current.take().map(|(_, id, h)| (id, h))
    }
}

thread_local! {
    static ACTIVE_STREAM: RefCell<ActiveStream<AbortController>> = const { RefCell::new(ActiveStream::new()) };
}

#[derive(Deserialize)]
struct ReadChunk {
    done: bool,
}

fn abort(request_id: u64, controller: AbortController) -> u64 {
    controller.abort();
    crate::debug_log!("Aborted chat stream #{}", request_id);
    request_id
}

/// Abort whatever stream is in flight. Returns its request id.
pub fn abort_active_stream() -> Option<u64> {
    let active = ACTIVE_STREAM.with(|cell| cell.borrow_mut().take());
    active.map(|(request_id, controller)| abort(request_id, controller))
}

fn register(request_id: u64) -> Result<(u64, AbortController), ApiError> {
    let controller = AbortController::new().map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
    let (token, previous) =
        ACTIVE_STREAM.with(|cell| cell.borrow_mut().register(request_id, controller.clone()));
    if let Some((old_id, old)) = previous {
        abort(old_id, old);
    }
    Ok((token, controller))
}

fn release(token: u64) {
    ACTIVE_STREAM.with(|cell| {
        cell.borrow_mut().release(token);
    });
}

/// POST `body` to `url` and call `on_fragment` for every non-empty content
/// fragment, in arrival order.  Resolves once `[DONE]` arrives or the body
/// ends.
pub async fn stream_chat_completion<F>(
    url: &str,
    request_id: u64,
    body: &ApiChatCompletionRequest,
    mut on_fragment: F,
) -> Result<(), ApiError>
where
    F: FnMut(String),
{
    let (token, controller) = register(request_id)?;
    let result = run_stream(url, body, &controller, &mut on_fragment).await;
    release(token);
    result
}

async fn run_stream<F>(
    url: &str,
    body: &ApiChatCompletionRequest,
    controller: &AbortController,
    on_fragment: &mut F,
) -> Result<(), ApiError>
where
    F: FnMut(String),
{
    let payload = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&payload));
    opts.set_signal(Some(&controller.signal()));

    let headers = Headers::new().map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
    headers
        .append("Content-Type", "application/json")
        .map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
    headers
        .append("Accept", "text/event-stream")
        .map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| ApiError::from_js(ApiError::Dom, e))?;
    let resp = send(&request).await?;

    let stream = resp
        .body()
        .ok_or_else(|| ApiError::Stream("response has no body".into()))?;
    let reader: ReadableStreamDefaultReader = stream.get_reader().unchecked_into();

    let mut decoder = SseDecoder::new();
    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|e| ApiError::from_js(ApiError::Stream, e))?;
        let state: ReadChunk = serde_wasm_bindgen::from_value(chunk.clone())
            .map_err(|e| ApiError::Stream(e.to_string()))?;

        let events = if state.done {
            decoder.finish()?
        } else {
            let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value"))
                .map_err(|e| ApiError::from_js(ApiError::Stream, e))?;
            let bytes = js_sys::Uint8Array::new(&value).to_vec();
            decoder.push(&bytes)?
        };

        for event in events {
            match event {
                SseEvent::Data(data) => {
                    let fragment = parse_completion_fragment(&data)?;
                    if !fragment.is_empty() {
                        on_fragment(fragment);
                    }
                }
                SseEvent::Done => {
                    let _ = reader.cancel();
                    return Ok(());
                }
            }
        }

        if state.done {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_release_keeps_the_newer_stream() {
        let mut slot = ActiveStream::new();
        let (first, previous) = slot.register(1, "first");
        assert!(previous.is_none());

        // A new mount restarts request ids, so the same id comes back.
        let (second, previous) = slot.register(1, "second");
        assert_eq!(previous, Some((1, "first")));

        assert!(!slot.release(first));
        assert_eq!(slot.take(), Some((1, "second")));
        assert!(!slot.release(second));
    }

    #[test]
    fn release_clears_own_stream() {
        let mut slot = ActiveStream::new();
        let (token, _) = slot.register(3, ());
        assert!(slot.release(token));
        assert_eq!(slot.take(), None);
    }
}
