//! Knowledge-base list, selection, create and delete.

use crate::messages::{Command, Message, View};
use crate::router::Route;
use crate::state::{AppState, Dialog, KbSection};

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::KnowledgeBasesLoaded {
            epoch,
            knowledge_bases,
            prefer,
        } => {
            if !state.is_current(*epoch) {
                crate::debug_log!("Dropping stale knowledge base list (epoch {})", epoch);
                return true;
            }
            let changed = match state.active_kbs_mut() {
                Some(kbs) => kbs.set_list(knowledge_bases.clone(), *prefer),
                None => return true,
            };
            if changed {
                on_selection_changed(state, cmds);
            }
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::SelectKnowledgeBase(kb_id) => {
            let changed = state
                .active_kbs_mut()
                .map(|kbs| kbs.select(*kb_id))
                .unwrap_or(false);
            if changed {
                on_selection_changed(state, cmds);
                cmds.push(Command::Render(View::Page));
            }
            true
        }
        Message::OpenCreateKnowledgeBaseDialog => {
            state.dialog = Some(Dialog::CreateKnowledgeBase {
                name: String::new(),
            });
            cmds.push(Command::Render(View::Dialog));
            true
        }
        Message::DialogInputChanged(text) => {
            if let Some(Dialog::CreateKnowledgeBase { name }) = state.dialog.as_mut() {
                *name = text.clone();
            }
            true
        }
        Message::ConfirmCreateKnowledgeBase => {
            let name = match &state.dialog {
                Some(Dialog::CreateKnowledgeBase { name }) => name.trim().to_string(),
                _ => return true,
            };
            if name.is_empty() {
                return true;
            }
            state.dialog = None;
            state.kb_settings.busy = true;
            cmds.push(Command::CreateKnowledgeBase {
                epoch: state.page_epoch,
                name,
            });
            cmds.push(Command::Render(View::Dialog));
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::KnowledgeBaseCreated { epoch, created } => {
            if !state.is_current(*epoch) {
                return true;
            }
            state.kb_settings.busy = false;
            if created.existed {
                cmds.push(Command::toast_success(format!(
                    "Knowledge base '{}' already exists",
                    created.name
                )));
            } else {
                cmds.push(Command::toast_success(format!(
                    "Created knowledge base '{}'",
                    created.name
                )));
            }
            refresh_list(state, Some(created.id), cmds);
            true
        }
        Message::RequestDeleteKnowledgeBase(kb_id) => {
            let name = state
                .active_kbs()
                .and_then(|kbs| kbs.list.iter().find(|kb| kb.id == *kb_id))
                .map(|kb| kb.name.clone());
            if let Some(name) = name {
                state.dialog = Some(Dialog::ConfirmDeleteKnowledgeBase { kb_id: *kb_id, name });
                cmds.push(Command::Render(View::Dialog));
            }
            true
        }
        Message::ConfirmDeleteKnowledgeBase(kb_id) => {
            state.dialog = None;
            state.kb_settings.busy = true;
            cmds.push(Command::DeleteKnowledgeBase {
                epoch: state.page_epoch,
                kb_id: *kb_id,
            });
            cmds.push(Command::Render(View::Dialog));
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::KnowledgeBaseDeleted { epoch, kb_id } => {
            if !state.is_current(*epoch) {
                return true;
            }
            state.kb_settings.busy = false;
            crate::debug_log!("Knowledge base {} deleted", kb_id);
            cmds.push(Command::toast_success("Knowledge base deleted"));
            refresh_list(state, None, cmds);
            true
        }
        Message::CloseDialog => {
            state.dialog = None;
            cmds.push(Command::Render(View::Dialog));
            true
        }
        _ => false,
    }
}

fn refresh_list(state: &mut AppState, prefer: Option<i64>, cmds: &mut Vec<Command>) {
    if let Some(kbs) = state.active_kbs_mut() {
        kbs.loading = true;
    }
    cmds.push(Command::FetchKnowledgeBases {
        epoch: state.page_epoch,
        prefer,
    });
    cmds.push(Command::Render(View::Page));
}

/// Follow-up work once the active page's selected KB changed: drop data of
/// the previous KB and fetch the listings scoped to the new one.
pub(crate) fn on_selection_changed(state: &mut AppState, cmds: &mut Vec<Command>) {
    let epoch = state.page_epoch;
    let selected = state.selected_kb_id();

    match state.route {
        Route::KnowledgeBaseChat => {
            if state.kb_chat.session.abandon().is_some() {
                cmds.push(Command::AbortChatStream);
            }
        }
        Route::KnowledgeBaseSettings => {
            let page = &mut state.kb_settings;
            page.files.table.set_rows(Vec::new());
            page.embeddings.table.set_rows(Vec::new());
            if let Some(kb_id) = selected {
                page.files.loading = true;
                cmds.push(Command::FetchKbFiles { epoch, kb_id });
                if page.section == KbSection::Vector {
                    page.embeddings.loading = true;
                    cmds.push(Command::FetchEmbeddings { epoch, kb_id });
                }
            }
        }
        Route::Embeddings => {
            let page = &mut state.embeddings;
            page.embeddings.table.set_rows(Vec::new());
            if let Some(kb_id) = selected {
                page.embeddings.loading = true;
                cmds.push(Command::FetchEmbeddings { epoch, kb_id });
            }
        }
        _ => {}
    }
}
