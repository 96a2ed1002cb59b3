//! Persistence of UI preferences in `localStorage`.
//!
//! Theme and language are the only values the console keeps between
//! visits; backend data is always re-fetched.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::constants::{STORAGE_LANGUAGE_KEY, STORAGE_THEME_KEY};
use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }

    /// light -> dark -> system -> light
    pub fn next(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        }
    }
}

fn local_storage() -> Result<Storage, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("no local storage exists"))
}

pub fn load_theme() -> Theme {
    local_storage()
        .ok()
        .and_then(|s| s.get_item(STORAGE_THEME_KEY).ok().flatten())
        .and_then(|v| Theme::parse(&v))
        .unwrap_or_default()
}

pub fn save_theme(theme: Theme) -> Result<(), JsValue> {
    local_storage()?.set_item(STORAGE_THEME_KEY, theme.as_str())
}

pub fn load_language() -> Language {
    local_storage()
        .ok()
        .and_then(|s| s.get_item(STORAGE_LANGUAGE_KEY).ok().flatten())
        .and_then(|v| Language::from_code(&v))
        .unwrap_or_default()
}

pub fn save_language(language: Language) -> Result<(), JsValue> {
    local_storage()?.set_item(STORAGE_LANGUAGE_KEY, language.code())
}

/// Toggle the `dark` class on `<html>`. `System` follows
/// `prefers-color-scheme`.
pub fn apply_theme(theme: Theme) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let root = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("no <html> element"))?;

    let dark = match theme {
        Theme::Light => false,
        Theme::Dark => true,
        Theme::System => window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map(|m| m.matches())
            .unwrap_or(false),
    };

    let classes = root.class_list();
    classes.remove_2("light", "dark")?;
    classes.add_1(if dark { "dark" } else { "light" })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycle_visits_every_mode() {
        let mut theme = Theme::Light;
        let mut seen = vec![theme];
        for _ in 0..2 {
            theme = theme.next();
            seen.push(theme);
        }
        assert_eq!(seen, vec![Theme::Light, Theme::Dark, Theme::System]);
        assert_eq!(theme.next(), Theme::Light);
    }

    #[test]
    fn unknown_stored_theme_is_rejected() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("blue"), None);
    }
}
