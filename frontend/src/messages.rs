use crate::models::{
    ApiChatCompletionRequest, ApiEmbedding, ApiFile, ApiKnowledgeBase, ApiKnowledgeBaseCreated,
};
use crate::router::Route;
use crate::state::{ChatTarget, KbSection, SamplingField, TableId};
use crate::storage::Theme;
use crate::i18n::Language;
use crate::table::TableAction;

/// Which mutation a result or failure belongs to. Used for toasts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateKnowledgeBase,
    DeleteKnowledgeBase,
    UploadKbFile,
    DeleteKbFile,
    CreateEmbeddings,
    UploadFile,
    DeleteFile,
    Ocr,
}

impl Mutation {
    pub fn describe(&self) -> &'static str {
        match self {
            Mutation::CreateKnowledgeBase => "create knowledge base",
            Mutation::DeleteKnowledgeBase => "delete knowledge base",
            Mutation::UploadKbFile | Mutation::UploadFile => "upload file",
            Mutation::DeleteKbFile | Mutation::DeleteFile => "delete file",
            Mutation::CreateEmbeddings => "create embeddings",
            Mutation::Ocr => "recognize text",
        }
    }
}

/// Which listing a read result or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    KnowledgeBases,
    KbFiles,
    Embeddings,
    Files,
}

#[derive(Debug, Clone)]
pub enum Message {
    // ---------------- Navigation & preferences ----------------
    /// Link click: push a history entry and mount the page.
    Navigate(Route),
    /// Back/forward or initial load: mount without touching history.
    RouteChanged(Route),
    CycleTheme,
    ToggleLanguage,

    // ---------------- Chat (both chat pages) ----------------
    ChatInputChanged {
        target: ChatTarget,
        text: String,
    },
    InstructionsChanged {
        target: ChatTarget,
        text: String,
    },
    SamplingChanged {
        target: ChatTarget,
        field: SamplingField,
        value: f64,
    },
    SubmitChat(ChatTarget),
    ClearChat(ChatTarget),
    ChatFragment {
        epoch: u64,
        target: ChatTarget,
        request_id: u64,
        fragment: String,
    },
    ChatFinished {
        epoch: u64,
        target: ChatTarget,
        request_id: u64,
    },
    ChatFailed {
        epoch: u64,
        target: ChatTarget,
        request_id: u64,
        error: String,
    },

    // ---------------- Knowledge bases ----------------
    KnowledgeBasesLoaded {
        epoch: u64,
        knowledge_bases: Vec<ApiKnowledgeBase>,
        /// Id to select if present, e.g. a freshly created KB.
        prefer: Option<i64>,
    },
    SelectKnowledgeBase(i64),
    SelectKbSection(KbSection),
    OpenCreateKnowledgeBaseDialog,
    DialogInputChanged(String),
    ConfirmCreateKnowledgeBase,
    KnowledgeBaseCreated {
        epoch: u64,
        created: ApiKnowledgeBaseCreated,
    },
    RequestDeleteKnowledgeBase(i64),
    ConfirmDeleteKnowledgeBase(i64),
    KnowledgeBaseDeleted {
        epoch: u64,
        kb_id: i64,
    },
    CloseDialog,

    // ---------------- Files & embeddings ----------------
    KbFilesLoaded {
        epoch: u64,
        kb_id: i64,
        files: Vec<ApiFile>,
    },
    EmbeddingsLoaded {
        epoch: u64,
        kb_id: i64,
        embeddings: Vec<ApiEmbedding>,
    },
    FilesLoaded {
        epoch: u64,
        files: Vec<ApiFile>,
    },
    UploadKbFile(web_sys::File),
    DeleteKbFile(String),
    CreateEmbeddings(String),
    UploadFile(web_sys::File),
    DeleteFile(String),
    CopyId(String),
    Table {
        table: TableId,
        action: TableAction,
    },
    /// A KB-scoped mutation succeeded.
    KbFileMutationDone {
        epoch: u64,
        kb_id: i64,
        mutation: Mutation,
    },
    FileMutationDone {
        epoch: u64,
        mutation: Mutation,
    },

    // ---------------- OCR ----------------
    SubmitOcr(web_sys::File),
    OcrCompleted {
        epoch: u64,
        text: String,
    },

    // ---------------- Failures ----------------
    ListingFailed {
        epoch: u64,
        /// KB the listing was scoped to, if any.
        kb_id: Option<i64>,
        listing: Listing,
        error: String,
    },
    MutationFailed {
        epoch: u64,
        mutation: Mutation,
        error: String,
    },
}

/// Which part of the screen to rebuild after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Navbar,
    Page,
    /// Transcript and send/clear buttons only, keeps focus in the prompt.
    ChatTranscript(ChatTarget),
    /// Button states and slider read-outs.
    ChatControls(ChatTarget),
    Dialog,
}

/// Commands represent side effects that should be executed after state updates.
/// This separates pure state changes from effects like rendering and API calls.
#[derive(Debug)]
pub enum Command {
    Render(View),
    PushHistory(String),
    ApplyTheme(Theme),
    PersistLanguage(Language),
    Toast {
        error: bool,
        text: String,
    },
    CopyToClipboard(String),

    FetchKnowledgeBases {
        epoch: u64,
        prefer: Option<i64>,
    },
    CreateKnowledgeBase {
        epoch: u64,
        name: String,
    },
    DeleteKnowledgeBase {
        epoch: u64,
        kb_id: i64,
    },
    FetchKbFiles {
        epoch: u64,
        kb_id: i64,
    },
    UploadKbFile {
        epoch: u64,
        kb_id: i64,
        file: web_sys::File,
    },
    DeleteKbFile {
        epoch: u64,
        kb_id: i64,
        file_id: String,
    },
    CreateEmbeddings {
        epoch: u64,
        kb_id: i64,
        file_id: String,
    },
    FetchEmbeddings {
        epoch: u64,
        kb_id: i64,
    },
    FetchFiles {
        epoch: u64,
    },
    UploadFile {
        epoch: u64,
        file: web_sys::File,
    },
    DeleteFile {
        epoch: u64,
        file_id: String,
    },
    RunOcr {
        epoch: u64,
        file: web_sys::File,
    },
    StreamChat {
        epoch: u64,
        target: ChatTarget,
        request_id: u64,
        /// Path under `/v1`.
        path: String,
        body: ApiChatCompletionRequest,
    },
    AbortChatStream,
}

impl Command {
    pub fn toast_error(text: impl Into<String>) -> Self {
        Command::Toast {
            error: true,
            text: text.into(),
        }
    }

    pub fn toast_success(text: impl Into<String>) -> Self {
        Command::Toast {
            error: false,
            text: text.into(),
        }
    }

    /// True for commands that hit the backend.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Command::FetchKnowledgeBases { .. }
                | Command::CreateKnowledgeBase { .. }
                | Command::DeleteKnowledgeBase { .. }
                | Command::FetchKbFiles { .. }
                | Command::UploadKbFile { .. }
                | Command::DeleteKbFile { .. }
                | Command::CreateEmbeddings { .. }
                | Command::FetchEmbeddings { .. }
                | Command::FetchFiles { .. }
                | Command::UploadFile { .. }
                | Command::DeleteFile { .. }
                | Command::RunOcr { .. }
                | Command::StreamChat { .. }
        )
    }
}
