//! Page mounting.
//!
//! Every mount bumps `page_epoch`, abandons chat streams and resets the
//! target page's state, so results of requests issued by an earlier page
//! instance are recognisably stale.

use crate::messages::{Command, Message, View};
use crate::router::Route;
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::Navigate(route) => {
            if *route == state.route && state.page_epoch > 0 {
                return true;
            }
            mount(state, route.clone(), cmds);
            cmds.push(Command::PushHistory(route.path().to_string()));
            true
        }
        Message::RouteChanged(route) => {
            mount(state, route.clone(), cmds);
            true
        }
        _ => false,
    }
}

pub(crate) fn mount(state: &mut AppState, route: Route, cmds: &mut Vec<Command>) {
    let abandoned_general = state.chat.session.abandon();
    let abandoned_kb = state.kb_chat.session.abandon();
    if abandoned_general.is_some() || abandoned_kb.is_some() {
        cmds.push(Command::AbortChatStream);
    }

    state.page_epoch += 1;
    state.dialog = None;
    state.reset_page(&route);
    state.route = route;
    crate::debug_log!("Mounted {:?} (epoch {})", state.route, state.page_epoch);

    let epoch = state.page_epoch;
    if state.route.uses_knowledge_bases() {
        if let Some(kbs) = state.active_kbs_mut() {
            kbs.loading = true;
        }
        cmds.push(Command::FetchKnowledgeBases {
            epoch,
            prefer: None,
        });
    } else if state.route == Route::Files {
        state.files.files.loading = true;
        cmds.push(Command::FetchFiles { epoch });
    }

    cmds.push(Command::Render(View::Navbar));
    cmds.push(Command::Render(View::Page));
    cmds.push(Command::Render(View::Dialog));
}
