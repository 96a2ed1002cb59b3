// Sampling defaults – single source of truth for the chat pages.
pub const DEFAULT_TEMPERATURE: f64 = 0.6;
pub const DEFAULT_TOP_P: f64 = 0.9;
pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 256;
pub const DEFAULT_KB_CHAT_MAX_TOKENS: u32 = 128;
pub const MAX_TOKENS_LIMIT: u32 = 4096;

// The general chat endpoint needs *some* model name; the knowledge-base
// endpoint ignores it.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const KB_CHAT_MODEL: &str = "NULL";

// Purpose tag used for uploads through the OpenAI-compatible files API.
pub const DEFAULT_UPLOAD_PURPOSE: &str = "fine-tune";

// Table defaults
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const CELL_PREVIEW_GRAPHEMES: usize = 60;

// localStorage keys
pub const STORAGE_THEME_KEY: &str = "zxrag-ui-theme";
pub const STORAGE_LANGUAGE_KEY: &str = "zxrag-ui-lang";

// Toast lifetime
pub const TOAST_TIMEOUT_MS: u32 = 4000;

// ---------------------------------------------------------------------------
// DOM ids
// ---------------------------------------------------------------------------

pub const ID_APP_CONTAINER: &str = "app-container";
pub const ID_NAVBAR: &str = "navbar";
pub const ID_PAGE_ROOT: &str = "page-root";
pub const ID_DIALOG_ROOT: &str = "dialog-root";

pub const ID_CHAT_INPUT: &str = "chat-input";
pub const ID_CHAT_INSTRUCTIONS: &str = "chat-instructions";
pub const ID_CHAT_SEND: &str = "chat-send";
pub const ID_CHAT_CLEAR: &str = "chat-clear";
pub const ID_CHAT_TRANSCRIPT: &str = "chat-transcript";
pub const ID_CHAT_SIDEBAR: &str = "chat-sidebar";

pub const ID_KB_NAV: &str = "kb-nav";
pub const ID_KB_HEADER: &str = "kb-header";
pub const ID_KB_FILE_TABLE: &str = "kb-file-table";
pub const ID_FILE_TABLE: &str = "file-table";
pub const ID_EMBEDDING_TABLE: &str = "embedding-table";
pub const ID_EMBEDDINGS_SIDEBAR: &str = "embeddings-sidebar";

pub const ID_OCR_INPUT: &str = "ocr-input";
pub const ID_OCR_SUBMIT: &str = "ocr-submit";
pub const ID_OCR_OUTPUT: &str = "ocr-output";

// ---------------------------------------------------------------------------
// CSS classes
// ---------------------------------------------------------------------------

pub const CSS_NAV_LINK: &str = "nav-link";
pub const CSS_NAV_LINK_ACTIVE: &str = "nav-link active";
