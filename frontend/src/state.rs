use std::cell::RefCell;

use crate::chat_session::ChatSession;
use crate::constants::{
    DEFAULT_CHAT_MAX_TOKENS, DEFAULT_KB_CHAT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
    MAX_TOKENS_LIMIT,
};
use crate::i18n::Language;
use crate::messages::Message;
use crate::models::{ApiEmbedding, ApiFile, ApiKnowledgeBase};
use crate::router::Route;
use crate::storage::Theme;
use crate::table::{TableState, EMBEDDING_COLUMNS, FILE_COLUMNS};

// ---------------------------------------------------------------------------
// Small enums shared by messages and views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTarget {
    /// `/chat`, general completions.
    General,
    /// `/knowledgebase/chat`, completions grounded in the selected KB.
    KnowledgeBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingField {
    Temperature,
    MaxTokens,
    TopP,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KbSection {
    #[default]
    Files,
    Vector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableId {
    KbFiles,
    KbEmbeddings,
    Files,
    Embeddings,
}

// ---------------------------------------------------------------------------
// Page building blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingSettings {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl SamplingSettings {
    pub fn with_max_tokens(max_tokens: u32) -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens,
            top_p: DEFAULT_TOP_P,
        }
    }

    /// Store a slider value, clamped to the field's range and rounded to
    /// its step.
    pub fn set(&mut self, field: SamplingField, value: f64) {
        if !value.is_finite() {
            return;
        }
        match field {
            SamplingField::Temperature => self.temperature = round_tenth(value.clamp(0.0, 1.0)),
            SamplingField::TopP => self.top_p = round_tenth(value.clamp(0.0, 1.0)),
            SamplingField::MaxTokens => {
                self.max_tokens = value.round().clamp(1.0, MAX_TOKENS_LIMIT as f64) as u32
            }
        }
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Knowledge-base list plus the page-local selection.
#[derive(Debug, Clone, Default)]
pub struct KbSelection {
    pub list: Vec<ApiKnowledgeBase>,
    pub selected: Option<i64>,
    pub loading: bool,
}

impl KbSelection {
    /// Replace the list and fix up the selection: keep `prefer` or the
    /// current selection when still present, otherwise fall back to the
    /// first entry.  Returns true when the selected id changed.
    pub fn set_list(&mut self, list: Vec<ApiKnowledgeBase>, prefer: Option<i64>) -> bool {
        let before = self.selected;
        let contains = |id: i64| list.iter().any(|kb| kb.id == id);
        self.selected = prefer
            .filter(|id| contains(*id))
            .or(self.selected.filter(|id| contains(*id)))
            .or_else(|| list.first().map(|kb| kb.id));
        self.list = list;
        self.loading = false;
        self.selected != before
    }

    /// Select `kb_id` if it is in the list. Returns true on change.
    pub fn select(&mut self, kb_id: i64) -> bool {
        if self.selected == Some(kb_id) || !self.list.iter().any(|kb| kb.id == kb_id) {
            return false;
        }
        self.selected = Some(kb_id);
        true
    }

    pub fn selected_kb(&self) -> Option<&ApiKnowledgeBase> {
        self.selected
            .and_then(|id| self.list.iter().find(|kb| kb.id == id))
    }

    pub fn is_selected(&self, kb_id: i64) -> bool {
        self.selected == Some(kb_id)
    }
}

/// A fetched collection shown in a table.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub table: TableState<T>,
    pub loading: bool,
}

impl Listing<ApiFile> {
    pub fn files() -> Self {
        Self {
            table: TableState::new(FILE_COLUMNS),
            loading: false,
        }
    }
}

impl Listing<ApiEmbedding> {
    pub fn embeddings() -> Self {
        Self {
            table: TableState::new(EMBEDDING_COLUMNS),
            loading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Dialog {
    CreateKnowledgeBase { name: String },
    ConfirmDeleteKnowledgeBase { kb_id: i64, name: String },
}

// ---------------------------------------------------------------------------
// Per-page state (re-initialised on every mount)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ChatPageState {
    pub session: ChatSession,
    pub sampling: SamplingSettings,
}

impl Default for ChatPageState {
    fn default() -> Self {
        Self {
            session: ChatSession::new(),
            sampling: SamplingSettings::with_max_tokens(DEFAULT_CHAT_MAX_TOKENS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KbChatPageState {
    pub kbs: KbSelection,
    pub session: ChatSession,
    pub sampling: SamplingSettings,
}

impl Default for KbChatPageState {
    fn default() -> Self {
        Self {
            kbs: KbSelection::default(),
            session: ChatSession::new(),
            sampling: SamplingSettings::with_max_tokens(DEFAULT_KB_CHAT_MAX_TOKENS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KbSettingsPageState {
    pub kbs: KbSelection,
    pub section: KbSection,
    pub files: Listing<ApiFile>,
    pub embeddings: Listing<ApiEmbedding>,
    /// A mutation is in flight; upload and row actions are disabled.
    pub busy: bool,
}

impl Default for KbSettingsPageState {
    fn default() -> Self {
        Self {
            kbs: KbSelection::default(),
            section: KbSection::Files,
            files: Listing::files(),
            embeddings: Listing::embeddings(),
            busy: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilesPageState {
    pub files: Listing<ApiFile>,
    pub busy: bool,
}

impl Default for FilesPageState {
    fn default() -> Self {
        Self {
            files: Listing::files(),
            busy: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingsPageState {
    pub kbs: KbSelection,
    pub embeddings: Listing<ApiEmbedding>,
}

impl Default for EmbeddingsPageState {
    fn default() -> Self {
        Self {
            kbs: KbSelection::default(),
            embeddings: Listing::embeddings(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OcrPageState {
    pub busy: bool,
    pub output: String,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AppState {
    pub route: Route,
    /// Bumped on every page mount; results tagged with an older epoch are
    /// dropped.
    pub page_epoch: u64,
    pub theme: Theme,
    pub language: Language,
    pub dialog: Option<Dialog>,

    pub chat: ChatPageState,
    pub kb_chat: KbChatPageState,
    pub kb_settings: KbSettingsPageState,
    pub files: FilesPageState,
    pub embeddings: EmbeddingsPageState,
    pub ocr: OcrPageState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            route: Route::Chat,
            page_epoch: 0,
            theme: Theme::default(),
            language: Language::default(),
            dialog: None,
            chat: ChatPageState::default(),
            kb_chat: KbChatPageState::default(),
            kb_settings: KbSettingsPageState::default(),
            files: FilesPageState::default(),
            embeddings: EmbeddingsPageState::default(),
            ocr: OcrPageState::default(),
        }
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.page_epoch
    }

    pub fn session(&self, target: ChatTarget) -> &ChatSession {
        match target {
            ChatTarget::General => &self.chat.session,
            ChatTarget::KnowledgeBase => &self.kb_chat.session,
        }
    }

    pub fn session_mut(&mut self, target: ChatTarget) -> &mut ChatSession {
        match target {
            ChatTarget::General => &mut self.chat.session,
            ChatTarget::KnowledgeBase => &mut self.kb_chat.session,
        }
    }

    pub fn sampling(&self, target: ChatTarget) -> &SamplingSettings {
        match target {
            ChatTarget::General => &self.chat.sampling,
            ChatTarget::KnowledgeBase => &self.kb_chat.sampling,
        }
    }

    pub fn sampling_mut(&mut self, target: ChatTarget) -> &mut SamplingSettings {
        match target {
            ChatTarget::General => &mut self.chat.sampling,
            ChatTarget::KnowledgeBase => &mut self.kb_chat.sampling,
        }
    }

    /// KB selection of the active page, if it has one.
    pub fn active_kbs(&self) -> Option<&KbSelection> {
        match self.route {
            Route::KnowledgeBaseChat => Some(&self.kb_chat.kbs),
            Route::KnowledgeBaseSettings => Some(&self.kb_settings.kbs),
            Route::Embeddings => Some(&self.embeddings.kbs),
            _ => None,
        }
    }

    pub fn active_kbs_mut(&mut self) -> Option<&mut KbSelection> {
        match self.route {
            Route::KnowledgeBaseChat => Some(&mut self.kb_chat.kbs),
            Route::KnowledgeBaseSettings => Some(&mut self.kb_settings.kbs),
            Route::Embeddings => Some(&mut self.embeddings.kbs),
            _ => None,
        }
    }

    pub fn selected_kb_id(&self) -> Option<i64> {
        self.active_kbs().and_then(|k| k.selected)
    }

    /// Reset the state of `route`'s page for a fresh mount.
    pub fn reset_page(&mut self, route: &Route) {
        match route {
            Route::Chat => self.chat = ChatPageState::default(),
            Route::KnowledgeBaseChat => self.kb_chat = KbChatPageState::default(),
            Route::KnowledgeBaseSettings => self.kb_settings = KbSettingsPageState::default(),
            Route::Files => self.files = FilesPageState::default(),
            Route::Embeddings => self.embeddings = EmbeddingsPageState::default(),
            Route::Ocr => self.ocr = OcrPageState::default(),
            Route::NotFound(_) => {}
        }
    }
}

// We use thread_local to store our app state
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Run `msg` through `update`, then execute the resulting commands once the
/// state borrow has been released.
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        crate::update::update(&mut state, msg)
    });

    for cmd in commands {
        crate::command_executors::execute(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb(id: i64) -> ApiKnowledgeBase {
        ApiKnowledgeBase {
            id,
            name: format!("kb-{}", id),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn selection_defaults_to_first_entry() {
        let mut sel = KbSelection::default();
        assert!(sel.set_list(vec![kb(4), kb(9)], None));
        assert_eq!(sel.selected, Some(4));
    }

    #[test]
    fn selection_survives_refresh_when_still_present() {
        let mut sel = KbSelection::default();
        sel.set_list(vec![kb(1), kb(2)], None);
        assert!(sel.select(2));
        assert!(!sel.set_list(vec![kb(1), kb(2), kb(3)], None));
        assert_eq!(sel.selected, Some(2));
    }

    #[test]
    fn selection_falls_back_when_selected_kb_disappears() {
        let mut sel = KbSelection::default();
        sel.set_list(vec![kb(1), kb(2)], Some(2));
        assert!(sel.set_list(vec![kb(1)], None));
        assert_eq!(sel.selected, Some(1));
        assert!(sel.set_list(Vec::new(), None));
        assert_eq!(sel.selected, None);
    }

    #[test]
    fn preferred_id_wins_when_present() {
        let mut sel = KbSelection::default();
        sel.set_list(vec![kb(1)], None);
        sel.set_list(vec![kb(1), kb(7)], Some(7));
        assert_eq!(sel.selected, Some(7));
        assert!(!sel.select(99));
    }

    #[test]
    fn sampling_values_are_clamped_and_stepped() {
        let mut s = SamplingSettings::with_max_tokens(256);
        s.set(SamplingField::Temperature, 1.7);
        s.set(SamplingField::TopP, 0.44);
        s.set(SamplingField::MaxTokens, 9000.0);
        assert_eq!(s.temperature, 1.0);
        assert_eq!(s.top_p, 0.4);
        assert_eq!(s.max_tokens, MAX_TOKENS_LIMIT);
        s.set(SamplingField::MaxTokens, 0.0);
        assert_eq!(s.max_tokens, 1);
        s.set(SamplingField::TopP, f64::NAN);
        assert_eq!(s.top_p, 0.4);
    }
}
