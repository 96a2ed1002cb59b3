pub mod chat_transcript;
pub mod data_table;
pub mod dialog;
pub mod knowledge_base_selector;
pub mod navbar;
pub mod sampling_controls;
