use crate::messages::{Command, Message, View};
use crate::router::Route;
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SubmitOcr(file) => {
            if state.route != Route::Ocr || state.ocr.busy {
                return true;
            }
            state.ocr.busy = true;
            state.ocr.output.clear();
            cmds.push(Command::RunOcr {
                epoch: state.page_epoch,
                file: file.clone(),
            });
            cmds.push(Command::Render(View::Page));
            true
        }
        Message::OcrCompleted { epoch, text } => {
            if !state.is_current(*epoch) {
                return true;
            }
            state.ocr.busy = false;
            state.ocr.output = text.clone();
            cmds.push(Command::Render(View::Page));
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::test_support::mounted;
    use crate::update::update as root_update;

    #[test]
    fn result_replaces_output_and_clears_busy() {
        let (mut state, _) = mounted(Route::Ocr);
        state.ocr.busy = true;
        let epoch = state.page_epoch;
        root_update(
            &mut state,
            Message::OcrCompleted {
                epoch,
                text: "Hello".into(),
            },
        );
        assert!(!state.ocr.busy);
        assert_eq!(state.ocr.output, "Hello");
    }

    #[test]
    fn result_after_leaving_the_page_is_dropped() {
        let (mut state, _) = mounted(Route::Ocr);
        let epoch = state.page_epoch;
        root_update(&mut state, Message::Navigate(Route::Chat));
        let cmds = root_update(
            &mut state,
            Message::OcrCompleted {
                epoch,
                text: "late".into(),
            },
        );
        assert!(cmds.is_empty());
        assert_eq!(state.ocr.output, "");
    }
}
