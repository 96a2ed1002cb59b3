//! Injects the console stylesheet once per page so the WASM bundle works
//! with a bare `index.html`.

use wasm_bindgen::JsValue;
use web_sys::Document;

const STYLE_ID: &str = "zxrag-console-styles";

const CSS: &str = r#"
:root{--bg:#fff;--fg:#0f172a;--muted:#64748b;--border:#e2e8f0;--accent:#0f172a;--accent-fg:#fff;--danger:#dc2626;--panel:#f8fafc}
html.dark{--bg:#0b1120;--fg:#e2e8f0;--muted:#94a3b8;--border:#1e293b;--accent:#e2e8f0;--accent-fg:#0b1120;--panel:#111827}
body{margin:0;background:var(--bg);color:var(--fg);font-family:system-ui,-apple-system,"Segoe UI",sans-serif;font-size:14px}
.hidden{display:none!important}
.visually-hidden{position:absolute;width:1px;height:1px;overflow:hidden;clip:rect(0 0 0 0)}
.navbar{display:flex;align-items:center;gap:24px;padding:0 24px;height:56px;border-bottom:1px solid var(--border)}
.navbar-logo{font-weight:700;text-decoration:none;color:var(--fg)}
.navbar-links{display:flex;gap:16px;flex:1}
.nav-link{color:var(--muted);text-decoration:none}
.nav-link.active{color:var(--fg);font-weight:600}
.navbar-tools{display:flex;gap:8px}
.page{padding:24px}
.page-header{display:flex;align-items:center;justify-content:space-between;margin-bottom:16px}
.page-title{font-size:20px;margin:0}
.btn{border:1px solid transparent;border-radius:6px;padding:6px 12px;cursor:pointer;font:inherit;background:none;color:var(--fg)}
.btn[disabled],.btn[aria-disabled=true]{opacity:.5;cursor:not-allowed}
.btn-primary{background:var(--accent);color:var(--accent-fg)}
.btn-outline{border-color:var(--border)}
.btn-danger{background:var(--danger);color:#fff}
.btn-danger-text{color:var(--danger)}
.btn-sm{padding:2px 8px;font-size:12px}
.field-label{display:block;font-weight:500;margin:12px 0 6px}
textarea,input[type=text],select{width:100%;box-sizing:border-box;border:1px solid var(--border);border-radius:6px;padding:8px;background:var(--bg);color:var(--fg);font:inherit}
.chat-page{display:grid;grid-template-columns:1fr 280px;gap:24px;height:calc(100vh - 104px)}
.chat-main{display:flex;flex-direction:column;gap:12px;min-height:0}
.chat-transcript{flex:1;overflow-y:auto;border:1px solid var(--border);border-radius:6px;padding:12px;background:var(--panel)}
.chat-message{margin-bottom:12px}
.chat-role{font-size:12px;color:var(--muted);text-transform:uppercase}
.chat-content{white-space:pre-wrap}
.chat-message-streaming .chat-content::after{content:"▍";animation:blink 1s steps(1) infinite}
.chat-actions{display:flex;gap:8px;margin-top:8px}
.sampling-header{display:flex;justify-content:space-between}
.sampling-row input{width:100%}
.kb-settings-page,.embeddings-page{display:grid;grid-template-columns:220px 1fr;gap:24px}
.kb-list{list-style:none;padding:0}
.kb-link{width:100%;text-align:left;border:none;background:none;padding:6px 8px;border-radius:6px;cursor:pointer;color:var(--fg)}
.kb-link.active{background:var(--panel);font-weight:600}
.tab-bar{display:flex;gap:4px;margin-bottom:12px}
.tab-button{border:none;background:none;padding:6px 12px;border-bottom:2px solid transparent;cursor:pointer;color:var(--muted)}
.tab-button.active{border-bottom-color:var(--fg);color:var(--fg)}
.table-toolbar{display:flex;gap:8px;align-items:center;margin-bottom:8px}
.table-filter{max-width:280px}
.table-columns{position:relative}
.table-columns-list{position:absolute;right:0;z-index:10;background:var(--bg);border:1px solid var(--border);border-radius:6px;padding:8px;min-width:160px}
.table-columns-item{display:flex;gap:6px;align-items:center;padding:2px 0}
.table{width:100%;border-collapse:collapse}
.table th,.table td{border-bottom:1px solid var(--border);padding:8px;text-align:left}
.table tr[data-state=selected]{background:var(--panel)}
.table-sort{border:none;background:none;font:inherit;font-weight:600;cursor:pointer;color:var(--fg);padding:0}
.table-empty{text-align:center;color:var(--muted);height:64px}
.table-footer{display:flex;justify-content:space-between;align-items:center;margin-top:8px;color:var(--muted)}
.table-pagination{display:flex;gap:8px;align-items:center}
.table-page-size select{width:auto;margin-left:6px}
.row-actions{display:flex;gap:4px}
.cell-id{font-size:12px}
.ocr-page{max-width:720px}
.not-found{text-align:center;padding-top:80px}
.modal{position:fixed;inset:0;background:rgba(0,0,0,.5);display:flex;align-items:center;justify-content:center;z-index:1000}
.modal-content{background:var(--bg);border-radius:8px;padding:24px;min-width:360px;max-width:480px}
.modal-actions{display:flex;justify-content:flex-end;gap:8px;margin-top:16px}
.toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999}
.toast{padding:10px 16px;border-radius:4px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.1);opacity:0;animation:toast-in .2s forwards}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
@keyframes toast-in{to{opacity:1}}
@keyframes blink{50%{opacity:0}}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(CSS));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(&style)?,
    };
    Ok(())
}
