//! Embedding listings and the Files/Vector switch on the settings page.

use crate::messages::{Command, Message, View};
use crate::router::Route;
use crate::state::{AppState, KbSection};

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::EmbeddingsLoaded {
            epoch,
            kb_id,
            embeddings,
        } => {
            if !state.is_current(*epoch) || state.selected_kb_id() != Some(*kb_id) {
                crate::debug_log!("Dropping stale embeddings for knowledge base {}", kb_id);
                return true;
            }
            let listing = match state.route {
                Route::KnowledgeBaseSettings => &mut state.kb_settings.embeddings,
                Route::Embeddings => &mut state.embeddings.embeddings,
                _ => return true,
            };
            listing.table.set_rows(embeddings.clone());
            listing.loading = false;
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::SelectKbSection(section) => {
            let page = &mut state.kb_settings;
            if page.section == *section {
                return true;
            }
            page.section = *section;
            if *section == KbSection::Vector {
                if let Some(kb_id) = page.kbs.selected {
                    page.embeddings.loading = true;
                    cmds.push(Command::FetchEmbeddings {
                        epoch: state.page_epoch,
                        kb_id,
                    });
                }
            }
            cmds.push(Command::Render(View::Page));
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiEmbedding;
    use crate::reducers::test_support::{mounted_with_kbs, network};
    use crate::update::update as root_update;

    fn embedding(id: i64, kb_id: i64) -> ApiEmbedding {
        ApiEmbedding {
            id: id.to_string(),
            kb_id,
            file_id: 1,
            filename: "a.pdf".into(),
            text: "chunk".into(),
            embedding: vec![0.1, 0.2, 0.3],
            index: id as usize,
        }
    }

    #[test]
    fn vector_section_fetches_embeddings_once() {
        let (mut state, _) = mounted_with_kbs(Route::KnowledgeBaseSettings, &[2]);
        let cmds = root_update(&mut state, Message::SelectKbSection(KbSection::Vector));
        assert!(matches!(
            network(&cmds)[..],
            [Command::FetchEmbeddings { kb_id: 2, .. }]
        ));
        let cmds = root_update(&mut state, Message::SelectKbSection(KbSection::Vector));
        assert!(cmds.is_empty());
    }

    #[test]
    fn embeddings_land_only_for_selected_kb() {
        let (mut state, _) = mounted_with_kbs(Route::Embeddings, &[1, 2]);
        let epoch = state.page_epoch;
        root_update(&mut state, Message::SelectKnowledgeBase(2));
        root_update(
            &mut state,
            Message::EmbeddingsLoaded {
                epoch,
                kb_id: 1,
                embeddings: vec![embedding(1, 1)],
            },
        );
        assert!(state.embeddings.embeddings.table.rows().is_empty());

        root_update(
            &mut state,
            Message::EmbeddingsLoaded {
                epoch,
                kb_id: 2,
                embeddings: vec![embedding(5, 2), embedding(6, 2)],
            },
        );
        assert_eq!(state.embeddings.embeddings.table.rows().len(), 2);
    }
}
