/// Data structures for browser tabs
use serde::{Deserialize, Serialize};

/// The part of a `chrome.tabs.Tab` the navigator needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabInfo {
    pub id: i32,
    pub url: String,
    pub index: i32,
}

impl TabInfo {
    pub fn new(id: i32, url: String, index: i32) -> TabInfo {
        TabInfo { id, url, index }
    }

    /// Index for a tab opened right next to this one
    pub fn next_index(&self) -> i32 {
        self.index + 1
    }
}
