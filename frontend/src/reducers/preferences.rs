use crate::messages::{Command, Message, View};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::CycleTheme => {
            state.theme = state.theme.next();
            cmds.push(Command::ApplyTheme(state.theme));
            cmds.push(Command::Render(View::Navbar));
            true
        }
        Message::ToggleLanguage => {
            state.language = state.language.toggled();
            cmds.push(Command::PersistLanguage(state.language));
            cmds.push(Command::Render(View::Navbar));
            cmds.push(Command::Render(View::Page));
            cmds.push(Command::Render(View::Dialog));
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::storage::Theme;

    #[test]
    fn theme_and_language_are_persisted() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        assert!(update(&mut state, &Message::CycleTheme, &mut cmds));
        assert_eq!(state.theme, Theme::Light);
        assert!(matches!(cmds[0], Command::ApplyTheme(Theme::Light)));

        cmds.clear();
        update(&mut state, &Message::ToggleLanguage, &mut cmds);
        assert_eq!(state.language, Language::Cn);
        assert!(matches!(cmds[0], Command::PersistLanguage(Language::Cn)));
    }
}
