//! # Shell Commands
//!
//! Every line typed at the prompt becomes a [`Command`], and every command
//! maps onto storefront actions.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (parsing + routing)
//! ├── catalog.rs   ◄─── Browse, search, filter, paginate
//! ├── cart.rs      ◄─── Add / quantity / remove
//! ├── checkout.rs  ◄─── Summary and order placement
//! └── session.rs   ◄─── Sign in / out
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "qty 4 3"                                                              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Command::parse ──► Command::Quantity { id: 4, quantity: 3 }            │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  execute ──► cart::set_quantity ──► session gate ──► UpdateQuantity     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Reply::Text(rendered cart)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

use storefront_core::validation::{
    clamp_page, normalize_category, parse_product_id, validate_search_query, validate_username,
};
use storefront_core::{ProductId, ValidationError};

use crate::error::ApiError;
use crate::render;
use crate::state::ShellState;

/// A parsed prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Search(String),
    Category(String),
    Categories,
    Page(u32),
    Next,
    Previous,
    Clear,
    Show(ProductId),
    Add(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Quantity { id: ProductId, quantity: i64 },
    Remove(ProductId),
    Cart,
    Checkout,
    PlaceOrder,
    Login(String),
    Logout,
    WhoAmI,
    Retry,
    State,
    Help,
    Quit,
}

/// What the prompt does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

impl Command {
    /// Parses one non-empty prompt line.
    pub fn parse(line: &str) -> Result<Command, ApiError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "products" | "home" => Command::Products,
            "search" => Command::Search(validate_search_query(rest)?),
            "category" => Command::Category(normalize_category(rest)),
            "categories" => Command::Categories,
            "page" => Command::Page(clamp_page(parse_number("page", rest)?)),
            "next" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "clear" => Command::Clear,
            "show" => Command::Show(parse_product_id(rest)?),
            "add" => Command::Add(parse_product_id(rest)?),
            "inc" | "+" => Command::Increment(parse_product_id(rest)?),
            "dec" | "-" => Command::Decrement(parse_product_id(rest)?),
            "qty" => {
                let (id, quantity) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    ValidationError::Required {
                        field: "quantity".to_string(),
                    }
                })?;
                Command::Quantity {
                    id: parse_product_id(id)?,
                    quantity: parse_number("quantity", quantity)?,
                }
            }
            "remove" | "rm" => Command::Remove(parse_product_id(rest)?),
            "cart" => Command::Cart,
            "checkout" => Command::Checkout,
            "place-order" | "order" => Command::PlaceOrder,
            "login" => Command::Login(validate_username(rest)?),
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "retry" => Command::Retry,
            "state" => Command::State,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ApiError::unknown_command(other)),
        };

        Ok(command)
    }
}

fn parse_number(field: &str, raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    raw.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a number", raw),
    })
}

/// Runs a command against the shell state.
pub async fn execute(state: &ShellState, command: Command) -> Result<Reply, ApiError> {
    tracing::debug!(?command, "execute");

    let text = match command {
        Command::Products => catalog::products(state),
        Command::Search(text) => catalog::search(state, &text)?,
        Command::Category(name) => catalog::category(state, name).await,
        Command::Categories => catalog::categories(state),
        Command::Page(page) => catalog::page(state, page).await?,
        Command::Next => catalog::next(state).await?,
        Command::Previous => catalog::previous(state).await?,
        Command::Clear => catalog::clear(state).await,
        Command::Show(id) => catalog::show(state, id)?,
        Command::Retry => catalog::retry(state).await,
        Command::Add(id) => cart::add(state, id)?,
        Command::Increment(id) => cart::increment(state, id)?,
        Command::Decrement(id) => cart::decrement(state, id)?,
        Command::Quantity { id, quantity } => cart::set_quantity(state, id, quantity).await?,
        Command::Remove(id) => cart::remove(state, id).await?,
        Command::Cart => cart::show(state)?,
        Command::Checkout => checkout::summary(state)?,
        Command::PlaceOrder => checkout::place_order(state)?,
        Command::Login(username) => session::login(state, username).await,
        Command::Logout => session::logout(state).await,
        Command::WhoAmI => session::whoami(state),
        Command::State => state_dump(state)?,
        Command::Help => render::HELP.to_string(),
        Command::Quit => return Ok(Reply::Quit),
    };

    Ok(Reply::Text(text))
}

fn state_dump(state: &ShellState) -> Result<String, ApiError> {
    let store = state.storefront.snapshot();
    serde_json::to_string_pretty(&store).map_err(|e| ApiError::internal(e.to_string()))
}
