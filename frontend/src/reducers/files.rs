//! File listings: the per-KB table on the settings page and the global
//! `/v1/files` table.

use crate::messages::{Command, Message, Mutation, View};
use crate::router::Route;
use crate::state::{AppState, TableId};

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::KbFilesLoaded { epoch, kb_id, files } => {
            if !state.is_current(*epoch) || !state.kb_settings.kbs.is_selected(*kb_id) {
                crate::debug_log!("Dropping stale file list for knowledge base {}", kb_id);
                return true;
            }
            let listing = &mut state.kb_settings.files;
            listing.table.set_rows(files.clone());
            listing.loading = false;
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::FilesLoaded { epoch, files } => {
            if !state.is_current(*epoch) {
                return true;
            }
            let listing = &mut state.files.files;
            listing.table.set_rows(files.clone());
            listing.loading = false;
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::UploadKbFile(file) => {
            if let Some(kb_id) = idle_kb_settings(state) {
                state.kb_settings.busy = true;
                cmds.push(Command::UploadKbFile {
                    epoch: state.page_epoch,
                    kb_id,
                    file: file.clone(),
                });
                cmds.push(Command::Render(View::Page));
            }
            true
        }
        Message::DeleteKbFile(file_id) => {
            if let Some(kb_id) = idle_kb_settings(state) {
                state.kb_settings.busy = true;
                cmds.push(Command::DeleteKbFile {
                    epoch: state.page_epoch,
                    kb_id,
                    file_id: file_id.clone(),
                });
                cmds.push(Command::Render(View::Page));
            }
            true
        }
        Message::CreateEmbeddings(file_id) => {
            if let Some(kb_id) = idle_kb_settings(state) {
                state.kb_settings.busy = true;
                cmds.push(Command::CreateEmbeddings {
                    epoch: state.page_epoch,
                    kb_id,
                    file_id: file_id.clone(),
                });
                cmds.push(Command::Render(View::Page));
            }
            true
        }
        Message::KbFileMutationDone {
            epoch,
            kb_id,
            mutation,
        } => {
            if !state.is_current(*epoch) {
                return true;
            }
            state.kb_settings.busy = false;
            cmds.push(Command::toast_success(success_text(*mutation)));
            if state.kb_settings.kbs.is_selected(*kb_id) {
                state.kb_settings.files.loading = true;
                cmds.push(Command::FetchKbFiles {
                    epoch: *epoch,
                    kb_id: *kb_id,
                });
            }
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::UploadFile(file) => {
            if state.route == Route::Files && !state.files.busy {
                state.files.busy = true;
                cmds.push(Command::UploadFile {
                    epoch: state.page_epoch,
                    file: file.clone(),
                });
                cmds.push(Command::Render(View::Page));
            }
            true
        }
        Message::DeleteFile(file_id) => {
            if state.route == Route::Files && !state.files.busy {
                state.files.busy = true;
                cmds.push(Command::DeleteFile {
                    epoch: state.page_epoch,
                    file_id: file_id.clone(),
                });
                cmds.push(Command::Render(View::Page));
            }
            true
        }
        Message::FileMutationDone { epoch, mutation } => {
            if !state.is_current(*epoch) {
                return true;
            }
            state.files.busy = false;
            state.files.files.loading = true;
            cmds.push(Command::toast_success(success_text(*mutation)));
            cmds.push(Command::FetchFiles { epoch: *epoch });
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::CopyId(id) => {
            cmds.push(Command::CopyToClipboard(id.clone()));
            true
        }
        Message::Table { table, action } => {
            let changed = match table {
                TableId::KbFiles => state.kb_settings.files.table.apply(action.clone()),
                TableId::KbEmbeddings => state.kb_settings.embeddings.table.apply(action.clone()),
                TableId::Files => state.files.files.table.apply(action.clone()),
                TableId::Embeddings => state.embeddings.embeddings.table.apply(action.clone()),
            };
            if changed {
                cmds.push(Command::Render(View::Page));
            }
            true
        }
        _ => false,
    }
}

/// Selected KB of the settings page when no other mutation is running.
fn idle_kb_settings(state: &AppState) -> Option<i64> {
    if state.route != Route::KnowledgeBaseSettings || state.kb_settings.busy {
        return None;
    }
    state.kb_settings.kbs.selected
}

fn success_text(mutation: Mutation) -> &'static str {
    match mutation {
        Mutation::UploadKbFile | Mutation::UploadFile => "File uploaded",
        Mutation::DeleteKbFile | Mutation::DeleteFile => "File deleted",
        Mutation::CreateEmbeddings => "Embeddings created",
        _ => "Done",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::test_support::{file, mounted, mounted_with_kbs, network};
    use crate::table::TableAction;
    use crate::update::update as root_update;

    #[test]
    fn kb_files_for_another_kb_are_dropped() {
        let (mut state, _) = mounted_with_kbs(Route::KnowledgeBaseSettings, &[1, 2]);
        let epoch = state.page_epoch;
        root_update(&mut state, Message::SelectKnowledgeBase(2));

        root_update(
            &mut state,
            Message::KbFilesLoaded {
                epoch,
                kb_id: 1,
                files: vec![file("a")],
            },
        );
        assert!(state.kb_settings.files.table.rows().is_empty());

        root_update(
            &mut state,
            Message::KbFilesLoaded {
                epoch,
                kb_id: 2,
                files: vec![file("b")],
            },
        );
        assert_eq!(state.kb_settings.files.table.rows().len(), 1);
        assert!(!state.kb_settings.files.loading);
    }

    #[test]
    fn delete_then_refetch_exactly_once() {
        let (mut state, _) = mounted_with_kbs(Route::KnowledgeBaseSettings, &[1]);
        let cmds = root_update(&mut state, Message::DeleteKbFile("7".into()));
        assert!(matches!(
            network(&cmds)[..],
            [Command::DeleteKbFile { kb_id: 1, file_id, .. }] if file_id == "7"
        ));
        assert!(state.kb_settings.busy);

        // A second action while busy is ignored.
        let cmds = root_update(&mut state, Message::CreateEmbeddings("8".into()));
        assert!(network(&cmds).is_empty());

        let epoch = state.page_epoch;
        let cmds = root_update(
            &mut state,
            Message::KbFileMutationDone {
                epoch,
                kb_id: 1,
                mutation: Mutation::DeleteKbFile,
            },
        );
        let net = network(&cmds);
        assert_eq!(net.len(), 1);
        assert!(matches!(net[0], Command::FetchKbFiles { kb_id: 1, .. }));
        assert!(!state.kb_settings.busy);
    }

    #[test]
    fn create_embeddings_issues_one_call() {
        let (mut state, _) = mounted_with_kbs(Route::KnowledgeBaseSettings, &[3]);
        let cmds = root_update(&mut state, Message::CreateEmbeddings("11".into()));
        assert!(matches!(
            network(&cmds)[..],
            [Command::CreateEmbeddings { kb_id: 3, .. }]
        ));
    }

    #[test]
    fn global_file_delete_refetches_once() {
        let (mut state, _) = mounted(Route::Files);
        let epoch = state.page_epoch;
        root_update(
            &mut state,
            Message::FilesLoaded {
                epoch,
                files: vec![file("file-1"), file("file-2")],
            },
        );
        let cmds = root_update(&mut state, Message::DeleteFile("file-1".into()));
        assert_eq!(network(&cmds).len(), 1);

        let cmds = root_update(
            &mut state,
            Message::FileMutationDone {
                epoch,
                mutation: Mutation::DeleteFile,
            },
        );
        assert!(matches!(network(&cmds)[..], [Command::FetchFiles { .. }]));
    }

    #[test]
    fn stale_files_result_is_ignored() {
        let (mut state, _) = mounted(Route::Files);
        let epoch = state.page_epoch;
        root_update(&mut state, Message::Navigate(Route::Ocr));
        root_update(&mut state, Message::Navigate(Route::Files));
        root_update(
            &mut state,
            Message::FilesLoaded {
                epoch,
                files: vec![file("old")],
            },
        );
        assert!(state.files.files.table.rows().is_empty());
        assert!(state.files.files.loading);
    }

    #[test]
    fn table_actions_reach_the_right_table() {
        let (mut state, _) = mounted(Route::Files);
        let epoch = state.page_epoch;
        let files = (0..25).map(|i| file(&i.to_string())).collect();
        root_update(&mut state, Message::FilesLoaded { epoch, files });
        root_update(
            &mut state,
            Message::Table {
                table: TableId::Files,
                action: TableAction::NextPage,
            },
        );
        assert_eq!(state.files.files.table.page_index(), 1);
        assert_eq!(state.kb_settings.files.table.page_index(), 0);
    }

    #[test]
    fn columns_menu_stays_open_across_column_toggles() {
        let (mut state, _) = mounted(Route::Files);
        let cmds = root_update(
            &mut state,
            Message::Table {
                table: TableId::Files,
                action: TableAction::SetColumnsMenuOpen(true),
            },
        );
        assert!(cmds.is_empty());

        let cmds = root_update(
            &mut state,
            Message::Table {
                table: TableId::Files,
                action: TableAction::ToggleColumn("bytes".into()),
            },
        );
        assert!(cmds.iter().any(|c| matches!(c, Command::Render(View::Page))));
        let table = &state.files.files.table;
        assert!(table.is_columns_menu_open());
        assert!(!table.is_column_visible("bytes"));
    }

    #[test]
    fn copy_id_goes_to_clipboard() {
        let mut state = AppState::new();
        let cmds = root_update(&mut state, Message::CopyId("file-9".into()));
        assert!(matches!(&cmds[..], [Command::CopyToClipboard(id)] if id == "file-9"));
    }
}
