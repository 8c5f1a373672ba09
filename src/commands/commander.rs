//! Command routing and execution.
//!
//! This module provides the [`Commander`] struct, the entry point for turning a
//! message into a reply. It owns the store handle and dispatches each message
//! to the handler registered for its keyword.
//!
//! # Flow
//!
//! ```text
//! content → split_command() → Command::from_keyword() → handler → reply
//! ```

use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::{
    commands::{
        CommandContext,
        actions::{
            handle_get, handle_invite, handle_set, handle_unavailable, handle_unrecognized,
            handle_welcome,
        },
        command::{Command, split_command},
        markdown_response::format_empty_message,
    },
    store::Database,
};

/// Routes messages to command handlers.
///
/// The set of commands is fixed: see [`Command`]. A keyword without a
/// registered command always goes to the unrecognized fallback.
pub struct Commander {
    /// Store shared with every handler
    database: Arc<Database>,
}

impl Commander {
    /// Creates a new Commander working on `database`.
    pub fn new(database: Arc<Database>) -> Self {
        Commander { database }
    }

    /// Computes the reply to `content` sent by `sender`.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The Markdown reply, including for empty messages,
    ///   invalid arguments and unknown commands
    /// * `Err(anyhow::Error)` - The store failed; no reply should be sent
    pub fn route(&self, content: &str, sender: &str) -> Result<String> {
        if content.is_empty() {
            return Ok(format_empty_message());
        }

        let (keyword, args) = split_command(content);
        let context = CommandContext::new(&self.database, sender);

        match Command::from_keyword(keyword) {
            Some(command) => {
                info!("command in message: {}", keyword);
                self.execute(&command, &context, args)
            }
            None => {
                info!("command in message not recognized");
                handle_unrecognized(&context)
            }
        }
    }

    /// Runs the handler registered for `command`.
    fn execute(&self, command: &Command, context: &CommandContext, args: &str) -> Result<String> {
        match command {
            Command::Get => handle_get(context, args),
            Command::Set => handle_set(context, args),
            Command::Welcome => handle_welcome(context, None),
            Command::Invite => Ok(handle_invite(context, args)),
            Command::Add | Command::Delete | Command::Prefer => Ok(handle_unavailable(command)),
        }
    }
}
