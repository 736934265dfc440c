//! Task List Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod dates;
mod error;
mod hooks;
mod models;
mod notices;
mod query;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

/// Entries kept in the in-memory log buffer
const LOG_CAPACITY: usize = 200;

fn main() {
    console_error_panic_hook::set_once();

    let logs = match rolling_logger::init_logger("TaskList", LOG_CAPACITY) {
        Ok(buffer) => Some(buffer),
        Err(err) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Logger disabled: {}", err)));
            None
        }
    };

    mount_to_body(move || view! { <App logs=logs /> });
}
