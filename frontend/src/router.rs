//! URL path <-> page mapping and History API glue.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::messages::Message;
use crate::state::dispatch_global_message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Chat,
    KnowledgeBaseChat,
    KnowledgeBaseSettings,
    Files,
    Embeddings,
    Ocr,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/chat" => Route::Chat,
            "/knowledgebase/chat" => Route::KnowledgeBaseChat,
            "/knowledgebase/settings" => Route::KnowledgeBaseSettings,
            "/knowledgebase/files" => Route::Files,
            "/knowledgebase/embeddings" => Route::Embeddings,
            "/ocr" => Route::Ocr,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Chat => "/chat",
            Route::KnowledgeBaseChat => "/knowledgebase/chat",
            Route::KnowledgeBaseSettings => "/knowledgebase/settings",
            Route::Files => "/knowledgebase/files",
            Route::Embeddings => "/knowledgebase/embeddings",
            Route::Ocr => "/ocr",
            Route::NotFound(path) => path,
        }
    }

    /// Routes reachable from the navbar, in display order.
    pub fn main_nav() -> [Route; 6] {
        [
            Route::Chat,
            Route::KnowledgeBaseChat,
            Route::KnowledgeBaseSettings,
            Route::Files,
            Route::Embeddings,
            Route::Ocr,
        ]
    }

    /// Pages that show a knowledge-base selector.
    pub fn uses_knowledge_bases(&self) -> bool {
        matches!(
            self,
            Route::KnowledgeBaseChat | Route::KnowledgeBaseSettings | Route::Embeddings
        )
    }
}

/// Route for the current `window.location`.
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|p| Route::parse(&p))
        .unwrap_or(Route::Chat)
}

pub fn push_history(path: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let history = window.history()?;
    let current = window.location().pathname().unwrap_or_default();
    if current != path {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))?;
    }
    Ok(())
}

/// Re-mount the page whenever the user goes back or forward.
pub fn install_popstate_listener() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let cb = Closure::wrap(Box::new(move |_e: web_sys::PopStateEvent| {
        dispatch_global_message(Message::RouteChanged(current_route()));
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("popstate", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_parse() {
        assert_eq!(Route::parse("/"), Route::Chat);
        assert_eq!(Route::parse("/chat"), Route::Chat);
        assert_eq!(Route::parse("/knowledgebase/chat/"), Route::KnowledgeBaseChat);
        assert_eq!(Route::parse("/knowledgebase/settings?x=1"), Route::KnowledgeBaseSettings);
        assert_eq!(Route::parse("/knowledgebase/files"), Route::Files);
        assert_eq!(Route::parse("/knowledgebase/embeddings"), Route::Embeddings);
        assert_eq!(Route::parse("/ocr"), Route::Ocr);
    }

    #[test]
    fn unknown_paths_keep_their_path() {
        let route = Route::parse("/nope/deeper");
        assert_eq!(route, Route::NotFound("/nope/deeper".into()));
        assert_eq!(route.path(), "/nope/deeper");
    }

    #[test]
    fn nav_routes_round_trip_through_their_path() {
        for route in Route::main_nav() {
            assert_eq!(Route::parse(route.path()), route);
        }
    }
}
