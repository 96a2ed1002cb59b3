//! Side-effect executors for [`Command`]s that leave the reducer.
//!
//! Network commands spawn a local future, call [`ApiClient`] and feed the
//! outcome back through [`dispatch_global_message`] tagged with the epoch
//! they were issued under.

use crate::constants::DEFAULT_UPLOAD_PURPOSE;
use crate::messages::{Command, Listing, Message, Mutation};
use crate::network::api_client::ApiClient;
use crate::network::chat_stream::{abort_active_stream, stream_chat_completion};
use crate::network::{api_url, ApiError};
use crate::state::dispatch_global_message;

pub fn execute(cmd: Command) {
    match cmd {
        // -----------------------------------------------------------
        // Browser-local effects
        // -----------------------------------------------------------
        Command::PushHistory(path) => {
            if let Err(e) = crate::router::push_history(&path) {
                crate::error_log!("Failed to push history entry {}: {:?}", path, e);
            }
        }
        Command::ApplyTheme(theme) => {
            if let Err(e) = crate::storage::save_theme(theme) {
                crate::warn_log!("Failed to persist theme: {:?}", e);
            }
            if let Err(e) = crate::storage::apply_theme(theme) {
                crate::error_log!("Failed to apply theme: {:?}", e);
            }
        }
        Command::PersistLanguage(language) => {
            if let Err(e) = crate::storage::save_language(language) {
                crate::warn_log!("Failed to persist language: {:?}", e);
            }
        }
        Command::Toast { error, text } => {
            if error {
                crate::toast::error(&text);
            } else {
                crate::toast::success(&text);
            }
        }
        Command::CopyToClipboard(text) => {
            wasm_bindgen_futures::spawn_local(async move {
                match crate::utils::copy_to_clipboard(&text).await {
                    Ok(()) => crate::toast::success(&copied_label()),
                    Err(e) => crate::error_log!("Clipboard write failed: {:?}", e),
                }
            });
        }

        // -----------------------------------------------------------
        // Knowledge bases
        // -----------------------------------------------------------
        Command::FetchKnowledgeBases { epoch, prefer } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::list_knowledge_bases().await {
                    Ok(knowledge_bases) => {
                        debug_log!("Fetched {} knowledge bases", knowledge_bases.len());
                        dispatch_global_message(Message::KnowledgeBasesLoaded {
                            epoch,
                            knowledge_bases,
                            prefer,
                        })
                    }
                    Err(e) => listing_failed(epoch, None, Listing::KnowledgeBases, e),
                }
            });
        }
        Command::CreateKnowledgeBase { epoch, name } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::create_knowledge_base(&name).await {
                    Ok(created) => {
                        dispatch_global_message(Message::KnowledgeBaseCreated { epoch, created })
                    }
                    Err(e) => mutation_failed(epoch, Mutation::CreateKnowledgeBase, e),
                }
            });
        }
        Command::DeleteKnowledgeBase { epoch, kb_id } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::delete_knowledge_base(kb_id).await {
                    Ok(()) => dispatch_global_message(Message::KnowledgeBaseDeleted { epoch, kb_id }),
                    Err(e) => mutation_failed(epoch, Mutation::DeleteKnowledgeBase, e),
                }
            });
        }

        // -----------------------------------------------------------
        // KB-scoped files and embeddings
        // -----------------------------------------------------------
        Command::FetchKbFiles { epoch, kb_id } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::list_kb_files(kb_id).await {
                    Ok(files) => {
                        dispatch_global_message(Message::KbFilesLoaded { epoch, kb_id, files })
                    }
                    Err(e) => listing_failed(epoch, Some(kb_id), Listing::KbFiles, e),
                }
            });
        }
        Command::UploadKbFile { epoch, kb_id, file } => {
            wasm_bindgen_futures::spawn_local(async move {
                let result = ApiClient::upload_kb_file(kb_id, &file).await;
                kb_mutation_done(epoch, kb_id, Mutation::UploadKbFile, result);
            });
        }
        Command::DeleteKbFile {
            epoch,
            kb_id,
            file_id,
        } => {
            wasm_bindgen_futures::spawn_local(async move {
                let result = ApiClient::delete_kb_file(kb_id, &file_id).await;
                kb_mutation_done(epoch, kb_id, Mutation::DeleteKbFile, result);
            });
        }
        Command::CreateEmbeddings {
            epoch,
            kb_id,
            file_id,
        } => {
            wasm_bindgen_futures::spawn_local(async move {
                let result = ApiClient::create_embeddings(kb_id, &file_id).await;
                kb_mutation_done(epoch, kb_id, Mutation::CreateEmbeddings, result);
            });
        }
        Command::FetchEmbeddings { epoch, kb_id } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::list_embeddings(kb_id).await {
                    Ok(embeddings) => dispatch_global_message(Message::EmbeddingsLoaded {
                        epoch,
                        kb_id,
                        embeddings,
                    }),
                    Err(e) => listing_failed(epoch, Some(kb_id), Listing::Embeddings, e),
                }
            });
        }

        // -----------------------------------------------------------
        // Global files
        // -----------------------------------------------------------
        Command::FetchFiles { epoch } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::list_files().await {
                    Ok(files) => dispatch_global_message(Message::FilesLoaded { epoch, files }),
                    Err(e) => listing_failed(epoch, None, Listing::Files, e),
                }
            });
        }
        Command::UploadFile { epoch, file } => {
            wasm_bindgen_futures::spawn_local(async move {
                let result = ApiClient::upload_file(&file, DEFAULT_UPLOAD_PURPOSE).await;
                file_mutation_done(epoch, Mutation::UploadFile, result);
            });
        }
        Command::DeleteFile { epoch, file_id } => {
            wasm_bindgen_futures::spawn_local(async move {
                let result = ApiClient::delete_file(&file_id).await;
                file_mutation_done(epoch, Mutation::DeleteFile, result);
            });
        }

        // -----------------------------------------------------------
        // OCR
        // -----------------------------------------------------------
        Command::RunOcr { epoch, file } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::ocr(&file).await {
                    Ok(text) => dispatch_global_message(Message::OcrCompleted { epoch, text }),
                    Err(e) => mutation_failed(epoch, Mutation::Ocr, e),
                }
            });
        }

        // -----------------------------------------------------------
        // Chat streaming
        // -----------------------------------------------------------
        Command::StreamChat {
            epoch,
            target,
            request_id,
            path,
            body,
        } => {
            let url = api_url(&path);
            debug_log!("Streaming chat request #{} to {}", request_id, url);
            wasm_bindgen_futures::spawn_local(async move {
                let result = stream_chat_completion(&url, request_id, &body, |fragment| {
                    dispatch_global_message(Message::ChatFragment {
                        epoch,
                        target,
                        request_id,
                        fragment,
                    })
                })
                .await;

                match result {
                    Ok(()) => dispatch_global_message(Message::ChatFinished {
                        epoch,
                        target,
                        request_id,
                    }),
                    Err(e) if e.is_abort() => {
                        debug_log!("Chat request #{} aborted", request_id);
                    }
                    Err(e) => dispatch_global_message(Message::ChatFailed {
                        epoch,
                        target,
                        request_id,
                        error: e.to_string(),
                    }),
                }
            });
        }
        Command::AbortChatStream => {
            if let Some(request_id) = abort_active_stream() {
                debug_log!("Aborted chat request #{}", request_id);
            }
        }

        Command::Render(view) => {
            if let Err(e) = crate::views::render(view) {
                crate::error_log!("Failed to render {:?}: {:?}", view, e);
            }
        }
    }
}

fn listing_failed(epoch: u64, kb_id: Option<i64>, listing: Listing, error: ApiError) {
    dispatch_global_message(Message::ListingFailed {
        epoch,
        kb_id,
        listing,
        error: error.to_string(),
    });
}

fn mutation_failed(epoch: u64, mutation: Mutation, error: ApiError) {
    dispatch_global_message(Message::MutationFailed {
        epoch,
        mutation,
        error: error.to_string(),
    });
}

fn kb_mutation_done(epoch: u64, kb_id: i64, mutation: Mutation, result: Result<(), ApiError>) {
    match result {
        Ok(()) => dispatch_global_message(Message::KbFileMutationDone {
            epoch,
            kb_id,
            mutation,
        }),
        Err(e) => mutation_failed(epoch, mutation, e),
    }
}

fn file_mutation_done(epoch: u64, mutation: Mutation, result: Result<(), ApiError>) {
    match result {
        Ok(()) => dispatch_global_message(Message::FileMutationDone { epoch, mutation }),
        Err(e) => mutation_failed(epoch, mutation, e),
    }
}

fn copied_label() -> String {
    let language = crate::state::APP_STATE.with(|state| state.borrow().language);
    crate::i18n::t(language, crate::i18n::Label::Copied).to_string()
}
