/// AEM Swift Nav - Chrome Extension for jumping between AEM views
/// Built with Rust + WASM + Yew

mod background;
pub mod config;
pub mod content_path;
pub mod environment;
pub mod error;
pub mod operations;
pub mod rewriter;
pub mod storage;
pub mod tab_data;
pub mod ui;

pub use config::NavConfig;
pub use error::{ErrorCategory, NavError};
pub use operations::{Command, Navigator};
pub use rewriter::{PageInspector, Target};

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the path extractor for JavaScript access
#[wasm_bindgen]
pub fn extract_content_path(url: &str) -> Option<String> {
    content_path::extract_content_path_str(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
