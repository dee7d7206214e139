/// Service worker side: runs commands against the active tab

use crate::error::NavError;
use crate::operations::{Command, Navigator};
use crate::rewriter::{InspectionLost, PageInspector};
use crate::storage::{Settings, CONFIG_KEY, ENABLED_KEY};
use crate::tab_data::TabInfo;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/background_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn probeFormRepositoryPath(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn openInNextTab(url: &str, index: i32) -> Result<(), JsValue>;

    fn notifyUser(tab_id: i32, message: &str);
}

/// Reads `.guideContainerNode[data-repository-path]` in the given tab
struct TabProbe {
    tab_id: i32,
}

impl PageInspector for TabProbe {
    async fn form_repository_path(&self) -> Result<Option<String>, InspectionLost> {
        match probeFormRepositoryPath(self.tab_id).await {
            Ok(value) => Ok(value.as_string()),
            Err(e) => {
                log::debug!("Form probe in tab {} failed: {:?}", self.tab_id, e);
                Err(InspectionLost)
            }
        }
    }
}

/// Handle a command id for a tab, as delivered by `chrome.commands.onCommand`
#[wasm_bindgen]
pub async fn handle_command(command: String, tab: JsValue) -> Result<(), JsValue> {
    let tab: TabInfo = serde_wasm_bindgen::from_value(tab)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse tab: {:?}", e)))?;

    let navigator = match load_navigator().await {
        Ok(navigator) => navigator,
        Err(e) => {
            log::warn!("Navigation config rejected: {}", e);
            notifyUser(tab.id, &e.user_message());
            return Ok(());
        }
    };
    let settings = load_settings().await;

    if !navigator.should_handle(&settings, &tab.url) {
        log::debug!("Ignoring {} for {}", command, tab.url);
        return Ok(());
    }

    match run(&navigator, &command, &tab).await {
        Ok(Some(url)) => openInNextTab(&url, tab.next_index()).await,
        Ok(None) => Ok(()),
        Err(e) => {
            log::warn!("{} failed on {}: {}", command, tab.url, e);
            notifyUser(tab.id, &e.user_message());
            Ok(())
        }
    }
}

/// Handle a command triggered from the popup, against the active tab
#[wasm_bindgen]
pub async fn handle_popup_command(command: String) -> Result<(), JsValue> {
    let tab = getActiveTab().await?;
    handle_command(command, tab).await
}

/// Open a URL next to the active tab, used by the popup's login buttons
#[wasm_bindgen]
pub async fn open_url(url: String) -> Result<(), JsValue> {
    let tab: TabInfo = serde_wasm_bindgen::from_value(getActiveTab().await?)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse tab: {:?}", e)))?;
    openInNextTab(&url, tab.next_index()).await
}

async fn run(navigator: &Navigator, command: &str, tab: &TabInfo) -> Result<Option<String>, NavError> {
    let command: Command = command.parse()?;
    navigator.run(command, &tab.url, &TabProbe { tab_id: tab.id }).await
}

/// Built-in config unless an override was saved under `navConfig`
async fn load_navigator() -> Result<Navigator, NavError> {
    let stored = match getStorage(CONFIG_KEY).await {
        Ok(value) => value.as_string(),
        Err(e) => {
            log::warn!("Failed to read navigation config: {:?}", e);
            None
        }
    };
    Navigator::from_stored_config(stored.as_deref())
}

async fn load_settings() -> Settings {
    match getStorage(ENABLED_KEY).await {
        Ok(value) => Settings::from_stored(value.as_bool()),
        Err(e) => {
            log::warn!("Failed to read settings: {:?}", e);
            Settings::new()
        }
    }
}
