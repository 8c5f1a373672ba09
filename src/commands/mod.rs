//! Bot command routing and response formatting.
//!
//! This module turns the text of a private message into the reply the bot sends
//! back, reading and writing pronoun sets in the store along the way.
//!
//! # Overview
//!
//! 1. **Splitting** - The message is split on its first space into a keyword and
//!    an argument string
//! 2. **Routing** - The keyword is resolved into a [`command::Command`]; unknown
//!    keywords go to the unrecognized fallback
//! 3. **Execution** - The matching handler reads or writes the store
//! 4. **Response** - The handler returns a Markdown reply
//!
//! # Architecture
//!
//! ```text
//! (sender, content)
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: route()
//! └─────────────┘
//!      │
//!      ├── split_command() ─────────────┐
//!      │                                ▼
//!      │                    ┌──────────────────────┐
//!      │                    │  command::Command    │
//!      │                    └──────────────────────┘
//!      ▼
//! ┌──────────────────────┐
//! │ Action Handlers      │
//! │  - handle_get        │
//! │  - handle_set        │
//! │  - handle_invite     │
//! │  - handle_welcome    │
//! │  - handle_unavailable│
//! │  - handle_unrecognized
//! └──────────────────────┘
//!      │
//!      ▼
//!   reply (Markdown)
//! ```
//!
//! ## Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `get` | `[email]` | Show your pronouns, or somebody else's |
//! | `set` | `[index] <nom>, <obl>, <det>, <poss>, <refl>` | Store your pronouns |
//! | `invite` | `<email>` | Invite somebody to the bot |
//! | `welcome` | None | Show the introduction message |
//! | `add`, `delete`, `prefer` | - | Not available yet |
//!
//! # Error Handling
//!
//! Every business outcome (no pronouns, bad syntax, unknown command) is a
//! normal reply. Only store failures surface as `Err`, and the caller drops
//! the message when that happens.

mod actions;
mod command;
mod commander;
mod markdown_response;

pub use crate::commands::commander::Commander;
use crate::store::Database;

/// Runtime context for command execution.
///
/// # Fields
///
/// * `database` - Store holding users and pronoun sets
/// * `sender` - Email of the user who sent the command
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    /// Store holding users and pronoun sets
    pub database: &'a Database,
    /// Email of the command issuer
    pub sender: &'a str,
}

impl<'a> CommandContext<'a> {
    pub fn new(database: &'a Database, sender: &'a str) -> Self {
        CommandContext { database, sender }
    }
}
