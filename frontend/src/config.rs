//! 浏览器端配置读取
//!
//! 查找顺序：`index.html` 中的 `<meta name="ledger:KEY">`，然后是编译期的
//! `LEDGER_KEY` 环境变量，最后由 [`AppConfig`] 使用默认值。

use ledger_shared::AppConfig;
use leptos::prelude::expect_context;
use wasm_bindgen::JsCast;

fn meta_value(key: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"ledger:{key}\"]");
    let element = document.query_selector(&selector).ok()??;
    let meta = element.dyn_into::<web_sys::HtmlMetaElement>().ok()?;
    Some(meta.content()).filter(|v| !v.trim().is_empty())
}

fn build_value(key: &str) -> Option<String> {
    let value = match key {
        "API_BASE_URL" => option_env!("LEDGER_API_BASE_URL"),
        "IDLE_TIMEOUT_SECS" => option_env!("LEDGER_IDLE_TIMEOUT_SECS"),
        "TOAST_DURATION_MS" => option_env!("LEDGER_TOAST_DURATION_MS"),
        "LIST_LIMIT" => option_env!("LEDGER_LIST_LIMIT"),
        "ACTIVITY_LIMIT" => option_env!("LEDGER_ACTIVITY_LIMIT"),
        "LOG_LEVEL" => option_env!("LEDGER_LOG_LEVEL"),
        _ => None,
    };
    value.map(str::to_string)
}

pub fn load_config() -> AppConfig {
    AppConfig::from_lookup(|key| meta_value(key).or_else(|| build_value(key)))
}

/// 在 `App` 中提供的配置
pub fn use_config() -> AppConfig {
    expect_context::<AppConfig>()
}
