//! Top navigation bar: logo, main links, language and theme toggles.

use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::constants::{CSS_NAV_LINK, CSS_NAV_LINK_ACTIVE, ID_NAVBAR};
use crate::dom_utils::{self, button, el};
use crate::i18n::{t, Label};
use crate::messages::Message;
use crate::router::Route;
use crate::state::AppState;
use crate::storage::Theme;

pub fn render(document: &Document, state: &AppState) -> Result<(), JsValue> {
    let root = dom_utils::by_id(document, ID_NAVBAR)?;
    dom_utils::clear(&root);
    let lang = state.language;

    let logo = el(document, "a", "navbar-logo", t(lang, Label::AppName))?;
    logo.set_attribute("href", Route::Chat.path())?;
    dom_utils::on_click(&logo, || Message::Navigate(Route::Chat))?;
    root.append_child(&logo)?;

    let nav = el(document, "nav", "navbar-links", "")?;
    for route in Route::main_nav() {
        let class = if route == state.route {
            CSS_NAV_LINK_ACTIVE
        } else {
            CSS_NAV_LINK
        };
        let link = el(document, "a", class, t(lang, nav_label(&route)))?;
        link.set_attribute("href", route.path())?;
        link.set_attribute("data-testid", &format!("nav-{}", route.path().trim_start_matches('/').replace('/', "-")))?;
        dom_utils::on_click(&link, move || Message::Navigate(route.clone()))?;
        nav.append_child(&link)?;
    }
    root.append_child(&nav)?;

    let tools = el(document, "div", "navbar-tools", "")?;

    let language = button(document, "btn btn-ghost", t(lang, Label::LanguageToggle))?;
    language.set_attribute("data-testid", "language-toggle")?;
    dom_utils::on_click(&language, || Message::ToggleLanguage)?;
    tools.append_child(&language)?;

    let theme = button(document, "btn btn-ghost", t(lang, theme_label(state.theme)))?;
    theme.set_attribute("data-testid", "theme-toggle")?;
    dom_utils::on_click(&theme, || Message::CycleTheme)?;
    tools.append_child(&theme)?;

    root.append_child(&tools)?;
    Ok(())
}

fn nav_label(route: &Route) -> Label {
    match route {
        Route::Chat => Label::NavChat,
        Route::KnowledgeBaseChat => Label::NavKbChat,
        Route::KnowledgeBaseSettings => Label::NavKbSettings,
        Route::Files => Label::NavFiles,
        Route::Embeddings => Label::NavEmbeddings,
        Route::Ocr | Route::NotFound(_) => Label::NavOcr,
    }
}

fn theme_label(theme: Theme) -> Label {
    match theme {
        Theme::Light => Label::ThemeLight,
        Theme::Dark => Label::ThemeDark,
        Theme::System => Label::ThemeSystem,
    }
}
