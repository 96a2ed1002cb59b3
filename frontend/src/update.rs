// frontend/src/update.rs
//
use crate::messages::{Command, Listing, Message, View};
use crate::state::AppState;

/// Root reducer. Runs `msg` through the domain reducers and returns the side
/// effects to execute once the state borrow is released.
pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    // ---------------------------------------------------------------
    // Delegate to domain-specific reducers first.  When one of them
    // consumes the message we can bail out early.
    // ---------------------------------------------------------------

    if crate::reducers::navigation::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::preferences::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::chat::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::knowledge_base::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::files::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::embeddings::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::ocr::update(state, &msg, &mut commands) {
        return commands;
    }

    match msg {
        // ---------------------------------------------------------------
        // Failures. Reads only log; mutations also surface a toast.
        // ---------------------------------------------------------------
        Message::ListingFailed {
            epoch,
            kb_id,
            listing,
            error,
        } => {
            if !state.is_current(epoch) || kb_id.is_some_and(|id| state.selected_kb_id() != Some(id)) {
                return commands;
            }
            crate::error_log!("Failed to load {:?}: {}", listing, error);
            match listing {
                Listing::KnowledgeBases => {
                    if let Some(kbs) = state.active_kbs_mut() {
                        kbs.loading = false;
                    }
                }
                Listing::KbFiles => state.kb_settings.files.loading = false,
                Listing::Embeddings => {
                    state.kb_settings.embeddings.loading = false;
                    state.embeddings.embeddings.loading = false;
                }
                Listing::Files => state.files.files.loading = false,
            }
            commands.push(Command::Render(View::Page));
        }
        Message::MutationFailed {
            epoch,
            mutation,
            error,
        } => {
            if !state.is_current(epoch) {
                return commands;
            }
            crate::error_log!("Failed to {}: {}", mutation.describe(), error);
            state.kb_settings.busy = false;
            state.files.busy = false;
            state.ocr.busy = false;
            commands.push(Command::toast_error(format!(
                "Failed to {}: {}",
                mutation.describe(),
                error
            )));
            commands.push(Command::Render(View::Page));
        }
        other => {
            crate::warn_log!("Unhandled message: {:?}", other);
        }
    }

    commands
}
