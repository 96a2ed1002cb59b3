//! Sub-reducers, one per concern.
//!
//! Each exposes `update(state, &msg, &mut cmds) -> bool`; the root
//! `update.rs` tries them in turn and stops at the first that consumes the
//! message.

pub mod chat;
pub mod embeddings;
pub mod files;
pub mod knowledge_base;
pub mod navigation;
pub mod ocr;
pub mod preferences;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::messages::{Command, Message};
    use crate::models::{ApiFile, ApiKnowledgeBase};
    use crate::router::Route;
    use crate::state::AppState;

    pub fn kb(id: i64) -> ApiKnowledgeBase {
        ApiKnowledgeBase {
            id,
            name: format!("kb-{}", id),
            created_at: 0,
            updated_at: 0,
        }
    }

    pub fn file(id: &str) -> ApiFile {
        ApiFile {
            id: id.to_string(),
            filename: format!("{}.pdf", id),
            bytes: 10,
            created_at: 1_700_000_000,
            object: "file".into(),
            purpose: "embedding".into(),
        }
    }

    /// State with `route` freshly mounted.
    pub fn mounted(route: Route) -> (AppState, Vec<Command>) {
        let mut state = AppState::new();
        let cmds = crate::update::update(&mut state, Message::RouteChanged(route));
        (state, cmds)
    }

    /// Mount a KB page and deliver the KB list.
    pub fn mounted_with_kbs(route: Route, ids: &[i64]) -> (AppState, Vec<Command>) {
        let (mut state, _) = mounted(route);
        let epoch = state.page_epoch;
        let cmds = crate::update::update(
            &mut state,
            Message::KnowledgeBasesLoaded {
                epoch,
                knowledge_bases: ids.iter().map(|id| kb(*id)).collect(),
                prefer: None,
            },
        );
        (state, cmds)
    }

    pub fn network(cmds: &[Command]) -> Vec<&Command> {
        cmds.iter().filter(|c| c.is_network()).collect()
    }
}
