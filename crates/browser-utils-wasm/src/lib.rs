//! WASM bindings for browser-utils.
//!
//! Exposes the utilities to JavaScript via `wasm-bindgen`. Structured values
//! cross the boundary as JSON strings. Functions that need the environment
//! (current URL, user agent, local/session storage, local timezone) read it
//! through `web-sys` and then delegate to the pure-Rust core.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p browser-utils-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/browser-utils-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/browser_utils_wasm.wasm
//! ```

use browser_utils::storage::{BrowserStorage, KeyValueStore, StorageArea};
use browser_utils::{DateFormat, UtilError, DEFAULT_DIGITS, DEFAULT_FACTOR};
use chrono_tz::Tz;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Environment access
// ---------------------------------------------------------------------------

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` available"))
}

fn to_js(e: UtilError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// The browser's IANA timezone, falling back to UTC when it is missing or
/// unknown to `chrono-tz`.
fn local_timezone() -> Tz {
    let options = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new())
        .resolved_options();
    js_sys::Reflect::get(&options, &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|tz| tz.as_string())
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC)
}

/// `window.localStorage` / `window.sessionStorage` as a [`KeyValueStore`].
struct WebStore(web_sys::Storage);

impl WebStore {
    fn open(area: StorageArea) -> Result<Self, JsValue> {
        let window = window()?;
        let storage = match area {
            StorageArea::Local => window.local_storage()?,
            StorageArea::Session => window.session_storage()?,
        };
        storage
            .map(WebStore)
            .ok_or_else(|| JsValue::from_str("web storage is unavailable"))
    }
}

fn storage_error(e: JsValue) -> UtilError {
    UtilError::Storage(format!("{:?}", e))
}

impl KeyValueStore for WebStore {
    fn get_item(&self, key: &str) -> browser_utils::error::Result<Option<String>> {
        self.0.get_item(key).map_err(storage_error)
    }

    fn set_item(&self, key: &str, value: &str) -> browser_utils::error::Result<()> {
        self.0.set_item(key, value).map_err(storage_error)
    }

    fn remove_item(&self, key: &str) -> browser_utils::error::Result<()> {
        self.0.remove_item(key).map_err(storage_error)
    }
}

fn web_storage() -> Result<BrowserStorage<WebStore>, JsValue> {
    Ok(BrowserStorage::new(
        WebStore::open(StorageArea::Local)?,
        WebStore::open(StorageArea::Session)?,
    ))
}

fn set_json(area: StorageArea, key: &str, json: &str) -> Result<(), JsValue> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid JSON value: {}", e)))?;
    web_storage()?.set(area, key, &value).map_err(to_js)
}

fn get_json(area: StorageArea, key: &str) -> Result<String, JsValue> {
    let value = web_storage()?.get(area, key).map_err(to_js)?;
    serde_json::to_string(&value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Deep-clone a JSON array or object. Throws for scalars and invalid JSON.
#[wasm_bindgen(js_name = "deepClone")]
pub fn deep_clone(json: &str) -> Result<String, JsValue> {
    browser_utils::deep_clone_json(json).map_err(to_js)
}

/// Parse the query string of `url` (default: `window.location.href`) into a
/// JSON object of decoded strings.
#[wasm_bindgen(js_name = "queryObject")]
pub fn query_object(url: Option<String>) -> Result<String, JsValue> {
    let url = match url {
        Some(url) => url,
        None => window()?.location().href()?,
    };
    let params = browser_utils::query_object(&url);
    serde_json::to_string(&params)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Byte length of a string, surrogate pairs counting four bytes.
#[wasm_bindgen(js_name = "byteLength")]
pub fn byte_length(s: &str) -> usize {
    browser_utils::byte_length(s)
}

/// A random 36-character hyphenated UUID.
#[wasm_bindgen]
pub fn uuid() -> String {
    browser_utils::uuid()
}

/// Store a JSON value in `localStorage`.
#[wasm_bindgen(js_name = "setLocal")]
pub fn set_local(key: &str, json: &str) -> Result<(), JsValue> {
    set_json(StorageArea::Local, key, json)
}

/// Read a JSON value from `localStorage`; `""` (as JSON) on a miss.
#[wasm_bindgen(js_name = "getLocal")]
pub fn get_local(key: &str) -> Result<String, JsValue> {
    get_json(StorageArea::Local, key)
}

/// Remove a key from `localStorage`.
#[wasm_bindgen(js_name = "removeLocal")]
pub fn remove_local(key: &str) -> Result<(), JsValue> {
    web_storage()?.remove_local(key).map_err(to_js)
}

/// Store a JSON value in `sessionStorage`.
#[wasm_bindgen(js_name = "setSession")]
pub fn set_session(key: &str, json: &str) -> Result<(), JsValue> {
    set_json(StorageArea::Session, key, json)
}

/// Read a JSON value from `sessionStorage`; `""` (as JSON) on a miss.
#[wasm_bindgen(js_name = "getSession")]
pub fn get_session(key: &str) -> Result<String, JsValue> {
    get_json(StorageArea::Session, key)
}

/// Remove a key from `sessionStorage`.
#[wasm_bindgen(js_name = "removeSession")]
pub fn remove_session(key: &str) -> Result<(), JsValue> {
    web_storage()?.remove_session(key).map_err(to_js)
}

/// Format an epoch-millisecond timestamp in the browser's timezone.
///
/// `format` selects a template by number (0-5); any other number, or none,
/// gives the full `Y-M-D hh:mm:ss` form. `sep` defaults to `-`. Input with
/// no leading integer is returned unchanged.
#[wasm_bindgen(js_name = "formatDate")]
pub fn format_date(input: &str, format: Option<u8>, sep: Option<String>) -> String {
    browser_utils::format_date(
        input,
        DateFormat::from_optional(format),
        sep.as_deref().unwrap_or("-"),
        &local_timezone(),
    )
}

/// Insert thousands separators into a number.
#[wasm_bindgen]
pub fn thousands(n: f64) -> String {
    browser_utils::thousands(n)
}

/// Keep digits and `.`, with a `-` prefix when the input starts with `-`.
#[wasm_bindgen(js_name = "filterNumeric")]
pub fn filter_numeric(s: &str) -> String {
    browser_utils::filter_numeric(s)
}

/// IE version of the current browser: a number, `"edge"`, or `-1`.
#[wasm_bindgen(js_name = "ieVersion")]
pub fn ie_version() -> Result<JsValue, JsValue> {
    let user_agent = window()?.navigator().user_agent()?;
    let sentinel = browser_utils::ie_version(&user_agent).sentinel();
    js_sys::JSON::parse(&sentinel.to_string())
}

/// De-duplicate a JSON array of objects by `key`, keeping first occurrences.
#[wasm_bindgen(js_name = "dedupByKey")]
pub fn dedup_by_key(json: &str, key: &str) -> Result<String, JsValue> {
    let items: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid array JSON: {}", e)))?;
    let unique = browser_utils::dedup_by_key(&items, key);
    serde_json::to_string(&unique)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Whole days between local midnight of a `Y-M-D` date and now, in either
/// direction, or `undefined` if the date is not valid.
#[wasm_bindgen(js_name = "dateDiff")]
pub fn date_diff(date: &str) -> Option<f64> {
    browser_utils::date_diff_now(date, &local_timezone()).map(|days| days as f64)
}

/// `value / divisor` as a plain number string (divisor defaults to 100).
/// `""` for zero, empty or non-numeric input.
#[wasm_bindgen]
pub fn divide(value: &str, divisor: Option<f64>) -> String {
    browser_utils::divide(value, divisor.unwrap_or(DEFAULT_FACTOR))
}

/// `value * multiplier` to `digits` decimals (defaults 100 and 2); `""` for
/// non-numeric input.
#[wasm_bindgen]
pub fn multiply(value: &str, multiplier: Option<f64>, digits: Option<usize>) -> String {
    browser_utils::multiply(
        value,
        multiplier.unwrap_or(DEFAULT_FACTOR),
        digits.unwrap_or(DEFAULT_DIGITS),
    )
}

/// `value / divisor` to `digits` decimals (defaults 100 and 2); `""` for
/// non-numeric input.
#[wasm_bindgen(js_name = "keepDecimals")]
pub fn keep_decimals(value: &str, divisor: Option<f64>, digits: Option<usize>) -> String {
    browser_utils::keep_decimals(
        value,
        divisor.unwrap_or(DEFAULT_FACTOR),
        digits.unwrap_or(DEFAULT_DIGITS),
    )
}
