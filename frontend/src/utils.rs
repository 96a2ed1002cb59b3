//! Utility helpers shared across the WASM frontend.

use chrono::{TimeZone, Utc};
use unicode_segmentation::UnicodeSegmentation;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Human-readable byte size: `"512 B"`, `"1.5 KB"`, `"3.2 MB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Render a unix timestamp (seconds) as `YYYY-MM-DD HH:MM:SS` UTC.
pub fn format_unix_ts(secs: i64) -> String {
    match Utc.timestamp_opt(secs, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => secs.to_string(),
    }
}

/// Cut `text` to at most `max` grapheme clusters, appending an ellipsis
/// when something was dropped.
pub fn truncate_graphemes(text: &str, max: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max).collect();
    if graphemes.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

/// Write `text` to the system clipboard.
///
/// Goes through `Reflect` so the unstable `Clipboard` bindings are not
/// needed.
pub async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("clipboard unavailable"));
    }
    let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?;
    let write: js_sys::Function = write.dyn_into()?;
    let promise = write.call1(&clipboard, &JsValue::from_str(text))?;
    JsFuture::from(js_sys::Promise::from(promise)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_scaled() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn timestamps_render_in_utc() {
        assert_eq!(format_unix_ts(0), "1970-01-01 00:00:00");
        assert_eq!(format_unix_ts(1_700_000_000), "2023-11-14 22:13:20");
    }

    #[test]
    fn truncation_respects_graphemes() {
        assert_eq!(truncate_graphemes("hello", 10), "hello");
        assert_eq!(truncate_graphemes("hello", 3), "hel…");
        // Family emoji is a single grapheme made of several code points.
        let family = "👨‍👩‍👧x";
        assert_eq!(truncate_graphemes(family, 1), "👨‍👩‍👧…");
    }
}
