//! # Shell State
//!
//! What every command can reach: the storefront session and the search
//! debouncer feeding it.

use storefront_client::{ClientResult, Debouncer, Storefront};

pub struct ShellState {
    pub storefront: Storefront,
    search: Debouncer,
}

impl ShellState {
    pub fn new(storefront: Storefront, search: Debouncer) -> Self {
        ShellState { storefront, search }
    }

    /// Hands raw search text to the debouncer. The query changes once
    /// input has been quiet for the debounce window.
    pub fn queue_search(&self, text: &str) -> ClientResult<()> {
        self.search.push(text)
    }
}
