//! Chat and knowledge-base chat reducer.

use crate::constants::{DEFAULT_CHAT_MODEL, KB_CHAT_MODEL};
use crate::messages::{Command, Message, View};
use crate::models::ApiChatCompletionRequest;
use crate::state::{AppState, ChatTarget};

/// Returns `true` when the message was handled by the chat reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::ChatInputChanged { target, text } => {
            state.session_mut(*target).set_input(text.clone());
            cmds.push(Command::Render(View::ChatControls(*target)));
            true
        }
        Message::InstructionsChanged { target, text } => {
            state.session_mut(*target).set_instructions(text.clone());
            true
        }
        Message::SamplingChanged { target, field, value } => {
            state.sampling_mut(*target).set(*field, *value);
            cmds.push(Command::Render(View::ChatControls(*target)));
            true
        }
        Message::SubmitChat(target) => {
            submit(state, *target, cmds);
            true
        }
        Message::ClearChat(target) => {
            let session = state.session_mut(*target);
            if session.abandon().is_some() {
                cmds.push(Command::AbortChatStream);
            }
            session.clear();
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::ChatFragment {
            epoch,
            target,
            request_id,
            fragment,
        } => {
            if state.is_current(*epoch)
                && state.session_mut(*target).apply_fragment(*request_id, fragment)
            {
                cmds.push(Command::Render(View::ChatTranscript(*target)));
            }
            true
        }
        Message::ChatFinished {
            epoch,
            target,
            request_id,
        } => {
            if state.is_current(*epoch) && state.session_mut(*target).finish(*request_id) {
                cmds.push(Command::Render(View::ChatTranscript(*target)));
            }
            true
        }
        Message::ChatFailed {
            epoch,
            target,
            request_id,
            error,
        } => {
            if state.is_current(*epoch) && state.session_mut(*target).fail(*request_id) {
                crate::error_log!("Chat request #{} failed: {}", request_id, error);
                cmds.push(Command::Render(View::ChatTranscript(*target)));
            }
            true
        }
        _ => false,
    }
}

fn submit(state: &mut AppState, target: ChatTarget, cmds: &mut Vec<Command>) {
    let (path, model) = match target {
        ChatTarget::General => ("/chat/completions".to_string(), DEFAULT_CHAT_MODEL),
        ChatTarget::KnowledgeBase => match state.kb_chat.kbs.selected {
            Some(kb_id) => (
                format!("/knowledgebases/{}/chat/completions", kb_id),
                KB_CHAT_MODEL,
            ),
            None => return,
        },
    };

    let sampling = *state.sampling(target);
    let Some(outbound) = state.session_mut(target).begin_send() else {
        return;
    };

    cmds.push(Command::StreamChat {
        epoch: state.page_epoch,
        target,
        request_id: outbound.request_id,
        path,
        body: ApiChatCompletionRequest {
            model: model.to_string(),
            messages: outbound.messages,
            stream: true,
            max_tokens: Some(sampling.max_tokens),
            temperature: Some(sampling.temperature),
            top_p: Some(sampling.top_p),
        },
    });
    cmds.push(Command::Render(View::ChatTranscript(target)));
    cmds.push(Command::Render(View::ChatControls(target)));
}
