//! Handler for registered commands that are not available yet.
//!
//! `add`, `delete` and `prefer` belong to multi-set support, which does not
//! exist yet. They answer with a fixed message and never touch the store.

use log::debug;

use crate::commands::{command::Command, markdown_response::format_not_available};

pub fn handle_unavailable(command: &Command) -> String {
    debug!("handling unavailable command: {:?}", command);
    format_not_available(command.keyword())
}
